//! Parser for the structure-definition text embedded in the TOC.
//!
//! The text is a compact two-level bracket mini-schema: table
//! descriptors separated by the literal `"],"`, each of the form
//! `name[ignored[col1,col2,...`. The column list is everything after
//! the last `[` of the descriptor, which keeps the nested bracket
//! level out of the comma split. Column tokens carry their type as a
//! trailing `:marker`.

use itertools::Itertools;
use serde::Serialize;

use crate::err::FormatError;

/// Value type of a column, from the trailing marker on its schema token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    String,
    Bool,
    Int,
    Long,
    Float,
    Double,
    Bytes,
}

impl ColumnType {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "S" => Some(ColumnType::String),
            "B" => Some(ColumnType::Bool),
            "I" => Some(ColumnType::Int),
            "L" => Some(ColumnType::Long),
            "F" => Some(ColumnType::Float),
            "D" => Some(ColumnType::Double),
            "M" => Some(ColumnType::Bytes),
            _ => None,
        }
    }
}

/// One column of a table. Immutable once the schema is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    /// Splits a token such as `Name:S` into display name and type tag.
    /// The marker is everything after the last `:`.
    fn parse(token: &str) -> Result<Self, FormatError> {
        let (name, marker) = token
            .rsplit_once(':')
            .ok_or_else(|| FormatError::UnknownColumnType(token.to_string()))?;
        let ty = ColumnType::from_marker(marker)
            .ok_or_else(|| FormatError::UnknownColumnType(marker.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            ty,
        })
    }
}

/// One table's schema entry, before any values are decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

/// Parses the structure-definition text into ordered table schemas.
///
/// A descriptor without any `[` (such as the remnant left after the
/// final table by the `"],"` split) is not a table and is skipped.
pub fn parse_structure(text: &str) -> Result<Vec<TableSchema>, FormatError> {
    let mut tables = Vec::new();
    for descriptor in text.split("],") {
        let Some(open) = descriptor.find('[') else {
            continue;
        };
        let name = &descriptor[..open];
        let list = &descriptor[descriptor.rfind('[').unwrap_or(open) + 1..];
        let columns = list
            .split(',')
            .filter(|token| !token.is_empty())
            .map(Column::parse)
            .try_collect()?;
        tables.push(TableSchema {
            name: name.to_string(),
            columns,
        });
    }
    Ok(tables)
}
