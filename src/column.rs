use serde::Serialize;

use crate::codec::{read_packed_bytes, read_packed_string};
use crate::err::FormatError;
use crate::reader::Reader;
use crate::schema::ColumnType;

/// A single decoded cell. Every value in one column carries the same
/// variant, fixed by the column's schema type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
}

/// Minimum encoded width of one value of `ty`, used to bound a claimed
/// row count against the bytes actually left in the container.
fn min_width(ty: ColumnType) -> u64 {
    match ty {
        ColumnType::String | ColumnType::Bool | ColumnType::Bytes => 1,
        ColumnType::Int | ColumnType::Float => 4,
        ColumnType::Long | ColumnType::Double => 8,
    }
}

/// Decodes `rows` values of one column, strictly in sequence.
///
/// Element widths of the variable-width types depend on the data, so
/// there is no skipping ahead without decoding everything in between.
pub fn decode_column(
    reader: &mut Reader<'_>,
    ty: ColumnType,
    rows: usize,
) -> Result<Vec<Value>, FormatError> {
    // Reject counts the remaining bytes cannot possibly satisfy before
    // allocating for them.
    let needed = (rows as u64).saturating_mul(min_width(ty));
    if needed > reader.remaining() as u64 {
        return Err(FormatError::Truncated {
            needed,
            remaining: reader.remaining() as u64,
        });
    }
    let mut values = Vec::with_capacity(rows);
    for _ in 0..rows {
        values.push(match ty {
            ColumnType::String => Value::String(read_packed_string(reader)?),
            ColumnType::Bool => Value::Bool(reader.read_u8()? != 0),
            ColumnType::Int => Value::Int(reader.read_i32()?),
            ColumnType::Long => Value::Long(reader.read_i64()?),
            ColumnType::Float => Value::Float(reader.read_f32()?),
            ColumnType::Double => Value::Double(reader.read_f64()?),
            ColumnType::Bytes => Value::Bytes(read_packed_bytes(reader)?.to_vec()),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{write_packed_bytes, write_packed_string};
    use crate::reader::ByteOrder;

    #[test]
    fn fixed_width_columns_honor_byte_order() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-3i32).to_le_bytes());
        buf.extend_from_slice(&9i32.to_le_bytes());
        let mut reader = Reader::new(&buf);
        reader.set_order(ByteOrder::Little);
        let values = decode_column(&mut reader, ColumnType::Int, 2).unwrap();
        assert_eq!(values, vec![Value::Int(-3), Value::Int(9)]);
    }

    #[test]
    fn variable_width_columns_decode_in_sequence() {
        let mut buf = Vec::new();
        write_packed_string(&mut buf, "left");
        write_packed_string(&mut buf, "right");
        write_packed_bytes(&mut buf, &[1, 2, 3]);
        let mut reader = Reader::new(&buf);
        assert_eq!(
            decode_column(&mut reader, ColumnType::String, 2).unwrap(),
            vec![
                Value::String("left".to_string()),
                Value::String("right".to_string())
            ]
        );
        assert_eq!(
            decode_column(&mut reader, ColumnType::Bytes, 1).unwrap(),
            vec![Value::Bytes(vec![1, 2, 3])]
        );
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn absurd_row_count_fails_before_allocating() {
        let buf = [0u8; 16];
        let mut reader = Reader::new(&buf);
        let err = decode_column(&mut reader, ColumnType::Long, usize::MAX).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }
}
