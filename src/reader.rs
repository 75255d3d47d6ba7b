use crate::err::FormatError;

/// Byte order of all multi-byte reads, resolved once from the magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

/// Cursor over the raw container bytes.
///
/// Every parse in the crate goes through this reader: sequential reads
/// advance the cursor, seeks are absolute, and all accesses are bounds
/// checked so corrupt offsets surface as errors instead of panics.
#[derive(Debug)]
pub struct Reader<'a> {
    original: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            original: bytes,
            pos: 0,
            order: ByteOrder::Big,
        }
    }

    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.original.len() - self.pos
    }

    /// Moves the cursor to an absolute offset. The end of the buffer is
    /// a valid position; anything past it is not.
    pub fn seek(&mut self, offset: u64) -> Result<(), FormatError> {
        if offset > self.original.len() as u64 {
            return Err(FormatError::OutOfBounds {
                offset,
                len: self.original.len() as u64,
            });
        }
        self.pos = offset as usize;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<(), FormatError> {
        self.take(n).map(|_| ())
    }

    /// Reads exactly `n` bytes, advancing the cursor.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let truncated = FormatError::Truncated {
            needed: n as u64,
            remaining: self.remaining() as u64,
        };
        let end = self.pos.checked_add(n).ok_or_else(|| truncated.clone())?;
        if end > self.original.len() {
            return Err(truncated);
        }
        let slice = &self.original[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(match self.order {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        })
    }

    pub fn read_u64(&mut self) -> Result<u64, FormatError> {
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(match self.order {
            ByteOrder::Big => u64::from_be_bytes(bytes),
            ByteOrder::Little => u64::from_le_bytes(bytes),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64, FormatError> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, FormatError> {
        Ok(f64::from_bits(self.read_u64()?))
    }
}
