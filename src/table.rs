use serde::Serialize;

use crate::column::Value;
use crate::err::MetakitError;
use crate::schema::{Column, ColumnType};

/// One decoded table: schema, column-major value storage, and a
/// row-major view materialized once at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    row_count: usize,
    /// Column-major storage: one entry per column, `row_count` values each.
    /// Stays empty for a table with no rows.
    values: Vec<Vec<Value>>,
    #[serde(skip)]
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub(crate) fn new(
        name: String,
        columns: Vec<Column>,
        row_count: usize,
        values: Vec<Vec<Value>>,
    ) -> Self {
        let rows = transpose(&values, row_count);
        Self {
            name,
            columns,
            row_count,
            values,
            rows,
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|c| c.ty).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Row-major view of the decoded values. Empty when `row_count` is 0.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// The decoded values across all columns for one row index.
    pub fn row(&self, index: usize) -> Result<&[Value], MetakitError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| MetakitError::NotFound(format!("row {index} of table `{}`", self.name)))
    }
}

/// Turns column-major storage into row-major, one allocation pass.
fn transpose(values: &[Vec<Value>], row_count: usize) -> Vec<Vec<Value>> {
    (0..row_count)
        .map(|row| values.iter().map(|column| column[row].clone()).collect())
        .collect()
}

/// Selects a table by 0-based index or by name. The format allows
/// duplicate table names; a name resolves to the first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRef<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for TableRef<'static> {
    fn from(index: usize) -> Self {
        TableRef::Index(index)
    }
}

impl<'a> From<&'a str> for TableRef<'a> {
    fn from(name: &'a str) -> Self {
        TableRef::Name(name)
    }
}

/// The decode result: every table of the container, in file order.
///
/// Built in one pass at open time and immutable afterwards, so it can
/// be shared across threads without further synchronization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Database {
    tables: Vec<Table>,
}

impl Database {
    pub(crate) fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table<'a>(&self, table: impl Into<TableRef<'a>>) -> Result<&Table, MetakitError> {
        match table.into() {
            TableRef::Index(index) => self
                .tables
                .get(index)
                .ok_or_else(|| MetakitError::NotFound(format!("table index {index}"))),
            TableRef::Name(name) => self
                .tables
                .iter()
                .find(|t| t.name == name)
                .ok_or_else(|| MetakitError::NotFound(format!("table `{name}`"))),
        }
    }

    pub fn column_names<'a>(
        &self,
        table: impl Into<TableRef<'a>>,
    ) -> Result<Vec<&str>, MetakitError> {
        Ok(self.table(table)?.column_names())
    }

    pub fn column_types<'a>(
        &self,
        table: impl Into<TableRef<'a>>,
    ) -> Result<Vec<ColumnType>, MetakitError> {
        Ok(self.table(table)?.column_types())
    }

    pub fn row_count<'a>(&self, table: impl Into<TableRef<'a>>) -> Result<usize, MetakitError> {
        Ok(self.table(table)?.row_count())
    }

    /// Row-major data for one table.
    pub fn table_data<'a>(
        &self,
        table: impl Into<TableRef<'a>>,
    ) -> Result<&[Vec<Value>], MetakitError> {
        Ok(self.table(table)?.rows())
    }

    /// One row of one table, across all of its columns.
    pub fn row_data<'a>(
        &self,
        row: usize,
        table: impl Into<TableRef<'a>>,
    ) -> Result<&[Value], MetakitError> {
        self.table(table)?.row(row)
    }
}
