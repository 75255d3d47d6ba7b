//! Packed integer and packed string codecs.
//!
//! Lengths, counts, and offsets inside the container use a marker-byte
//! variable-length integer: markers `0x00..=0x7F` stand for themselves,
//! otherwise the marker's low seven bits give the count of following
//! big-endian bytes (1 through 4, or 8 for 64-bit magnitudes). Strings
//! are a packed length followed by that many bytes of text.
//!
//! The write half exists so tests and benches can build containers in
//! memory; the crate itself never writes a container.

use crate::err::FormatError;
use crate::reader::Reader;

const MARKER_BIT: u8 = 1 << 7;

/// Count value selecting an 8-byte magnitude.
const WIDE_COUNT: u8 = 8;

/// Decodes one packed integer, advancing the reader past exactly the
/// bytes that encode it.
pub fn read_packed_int(reader: &mut Reader<'_>) -> Result<u64, FormatError> {
    let marker = reader.read_u8()?;
    if marker & MARKER_BIT == 0 {
        return Ok(u64::from(marker));
    }
    let count = marker & !MARKER_BIT;
    if !(1..=4).contains(&count) && count != WIDE_COUNT {
        return Err(FormatError::InvalidPackedInt(marker));
    }
    let mut value = 0u64;
    for &byte in reader.take(usize::from(count))? {
        value = value << 8 | u64::from(byte);
    }
    Ok(value)
}

/// Decodes one packed byte block: a packed length, then that many bytes.
pub fn read_packed_bytes<'a>(reader: &mut Reader<'a>) -> Result<&'a [u8], FormatError> {
    let len = read_packed_int(reader)?;
    // A length the cursor cannot possibly satisfy fails here even on
    // targets where it does not fit in usize.
    if len > reader.remaining() as u64 {
        return Err(FormatError::Truncated {
            needed: len,
            remaining: reader.remaining() as u64,
        });
    }
    reader.take(len as usize)
}

/// Decodes one packed string. The legacy format declares no text
/// encoding, so stray non-UTF-8 bytes are replaced rather than fatal.
pub fn read_packed_string(reader: &mut Reader<'_>) -> Result<String, FormatError> {
    Ok(String::from_utf8_lossy(read_packed_bytes(reader)?).into_owned())
}

/// Emits the minimal encoding of `value`.
pub fn write_packed_int(out: &mut Vec<u8>, value: u64) {
    if value < u64::from(MARKER_BIT) {
        out.push(value as u8);
        return;
    }
    let count: u8 = match value {
        v if v <= 0xFF => 1,
        v if v <= 0xFFFF => 2,
        v if v <= 0xFF_FFFF => 3,
        v if v <= 0xFFFF_FFFF => 4,
        _ => WIDE_COUNT,
    };
    out.push(MARKER_BIT | count);
    out.extend_from_slice(&value.to_be_bytes()[8 - usize::from(count)..]);
}

pub fn write_packed_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_packed_int(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

pub fn write_packed_string(out: &mut Vec<u8>, text: &str) {
    write_packed_bytes(out, text.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn round_trip(value: u64) -> usize {
        let mut buf = Vec::new();
        write_packed_int(&mut buf, value);
        let mut reader = Reader::new(&buf);
        assert_eq!(read_packed_int(&mut reader).unwrap(), value);
        assert_eq!(reader.position(), buf.len());
        buf.len()
    }

    #[test]
    fn packed_int_boundaries() {
        assert_eq!(round_trip(0), 1);
        assert_eq!(round_trip(0x7F), 1);
        assert_eq!(round_trip(0x80), 2);
        assert_eq!(round_trip(0xFF), 2);
        assert_eq!(round_trip(0x100), 3);
        assert_eq!(round_trip(0xFFFF), 3);
        assert_eq!(round_trip(0x1_0000), 4);
        assert_eq!(round_trip(0xFF_FFFF), 4);
        assert_eq!(round_trip(0x100_0000), 5);
        assert_eq!(round_trip(0xFFFF_FFFF), 5);
        assert_eq!(round_trip(0x1_0000_0000), 9);
        assert_eq!(round_trip(u64::MAX), 9);
    }

    #[test]
    fn packed_int_random_sweep() {
        let mut rng = rand::thread_rng();
        for bits in 1..64 {
            for _ in 0..100 {
                round_trip(rng.gen_range(0..(1u64 << bits)));
            }
        }
    }

    #[test]
    fn invalid_markers_rejected() {
        for marker in [0x85u8, 0x86, 0x87, 0x89, 0xFF] {
            let buf = [marker, 0, 0, 0, 0, 0, 0, 0, 0];
            let mut reader = Reader::new(&buf);
            assert_eq!(
                read_packed_int(&mut reader).unwrap_err(),
                FormatError::InvalidPackedInt(marker)
            );
        }
    }

    #[test]
    fn truncated_payload_rejected() {
        let buf = [0x82, 0x01];
        let mut reader = Reader::new(&buf);
        assert!(matches!(
            read_packed_int(&mut reader).unwrap_err(),
            FormatError::Truncated { .. }
        ));
    }

    #[test]
    fn packed_string_round_trip() {
        let long = "a".repeat(300);
        for text in ["", "x", "hello", "π ≈ 3.14159", long.as_str()] {
            let mut buf = Vec::new();
            write_packed_string(&mut buf, text);
            let mut reader = Reader::new(&buf);
            assert_eq!(read_packed_string(&mut reader).unwrap(), text);
            // Consumes the length prefix plus the body, nothing more.
            assert_eq!(reader.position(), buf.len());
        }
    }

    #[test]
    fn packed_string_truncated_body() {
        let mut buf = Vec::new();
        write_packed_string(&mut buf, "hello");
        buf.truncate(buf.len() - 2);
        let mut reader = Reader::new(&buf);
        assert!(matches!(
            read_packed_string(&mut reader).unwrap_err(),
            FormatError::Truncated { .. }
        ));
    }
}
