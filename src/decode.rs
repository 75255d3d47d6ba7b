//! Container location and the one-pass decode driver.
//!
//! The walk is strictly sequential: header, then footer (16 bytes
//! ending at the root offset), then TOC, then every table's column
//! data in file order. Each step is a hard precondition for the next.

use itertools::Itertools;

use crate::codec::{read_packed_int, read_packed_string};
use crate::column::decode_column;
use crate::err::{FormatError, MetakitError};
use crate::reader::{ByteOrder, Reader};
use crate::schema::parse_structure;
use crate::table::{Database, Table};

const MAGIC_BIG: [u8; 2] = *b"JL";
const MAGIC_LITTLE: [u8; 2] = *b"LJ";

/// Marker byte every well-formed container carries after the magic.
const VALID_MARKER: u8 = 26;

/// The footer occupies the 16 bytes ending at the root offset.
const FOOTER_LEN: u64 = 16;

pub fn decode(bytes: &[u8]) -> Result<Database, MetakitError> {
    let mut reader = Reader::new(bytes);
    locate_toc(&mut reader).map_err(MetakitError::Locate)?;

    // TOC marker, consumed only to advance the cursor.
    read_packed_int(&mut reader).map_err(MetakitError::Schema)?;
    let structure = read_packed_string(&mut reader).map_err(MetakitError::Schema)?;
    let schemas = parse_structure(&structure).map_err(MetakitError::Schema)?;
    let row_counts: Vec<u64> = schemas
        .iter()
        .map(|_| read_packed_int(&mut reader))
        .try_collect()
        .map_err(MetakitError::Schema)?;
    // Trailing checksum/terminator, discarded.
    read_packed_int(&mut reader).map_err(MetakitError::Schema)?;

    let mut tables = Vec::with_capacity(schemas.len());
    for (schema, row_count) in schemas.into_iter().zip(row_counts) {
        // An impossible count fails inside decode_column; the clamp only
        // keeps the conversion total on 32-bit targets.
        let row_count = usize::try_from(row_count).unwrap_or(usize::MAX);
        let mut values = Vec::with_capacity(schema.columns.len());
        if row_count > 0 {
            for column in &schema.columns {
                let data =
                    decode_column(&mut reader, column.ty, row_count).map_err(|source| {
                        MetakitError::Column {
                            table: schema.name.clone(),
                            column: column.name.clone(),
                            source,
                        }
                    })?;
                values.push(data);
            }
        }
        tables.push(Table::new(schema.name, schema.columns, row_count, values));
    }
    Ok(Database::new(tables))
}

/// Walks header and footer, leaving the reader positioned at the TOC
/// with the byte order for all later multi-byte reads resolved from
/// the magic.
fn locate_toc(reader: &mut Reader<'_>) -> Result<(), FormatError> {
    let magic = reader.take(2)?;
    let magic = [magic[0], magic[1]];
    match magic {
        MAGIC_BIG => reader.set_order(ByteOrder::Big),
        MAGIC_LITTLE => reader.set_order(ByteOrder::Little),
        other => return Err(FormatError::InvalidMagic(other)),
    }

    let valid = reader.read_u8()?;
    if valid != VALID_MARKER {
        return Err(FormatError::InvalidContainer(valid));
    }
    let header_type = reader.read_u8()?;
    if header_type != 0 {
        return Err(FormatError::UnsupportedHeader(header_type));
    }

    let root = u64::from(reader.read_u32()?);
    let footer = root
        .checked_sub(FOOTER_LEN)
        .ok_or(FormatError::OutOfBounds {
            offset: root,
            len: reader.len() as u64,
        })?;
    reader.seek(footer)?;

    reader.skip(4)?;
    let _header_location = reader.read_u32()?;
    reader.skip(4)?;
    let toc = u64::from(reader.read_u32()?);
    reader.seek(toc)?;
    Ok(())
}
