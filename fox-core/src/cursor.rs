//! Sequential reader over an immutable byte buffer

use crate::DecodeError;

/// Byte cursor with exact offset bookkeeping
///
/// Each read either consumes exactly the requested number of bytes or fails
/// with [`DecodeError::Truncated`] and leaves the offset untouched. Offsets
/// are absolute within the original file, including for cursors created
/// with [`ByteCursor::sub_cursor`].
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    base: usize,
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            base: 0,
            pos: 0,
        }
    }

    /// Current absolute offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Number of bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::Truncated {
                offset: self.offset(),
                needed: len,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Consume the next `len` bytes as a cursor of their own
    pub fn sub_cursor(&mut self, len: usize) -> Result<ByteCursor<'a>, DecodeError> {
        let base = self.offset();
        let data = self.read_bytes(len)?;
        Ok(ByteCursor { data, base, pos: 0 })
    }

    /// Read a fixed-size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    /// Advance without decoding
    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Move to an absolute offset (the end of the buffer is a valid target)
    pub fn seek(&mut self, offset: usize) -> Result<(), DecodeError> {
        let end = self.base + self.data.len();
        if offset > end {
            return Err(DecodeError::Truncated {
                offset,
                needed: offset - end,
                available: 0,
            });
        }
        self.pos = offset.checked_sub(self.base).ok_or(DecodeError::Consistency {
            offset,
            what: "seek target before window start",
            expected: self.base as u64,
            found: offset as u64,
        })?;
        Ok(())
    }

    /// Move backwards by `len` bytes
    pub fn rewind(&mut self, len: usize) -> Result<(), DecodeError> {
        let target = self.pos.checked_sub(len).ok_or(DecodeError::Consistency {
            offset: self.offset(),
            what: "rewind distance",
            expected: self.pos as u64,
            found: len as u64,
        })?;
        self.pos = target;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16_le(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16_be(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_i32_be(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    /// Read a fixed-length text field, dropping trailing whitespace and NUL padding
    pub fn read_text(&mut self, len: usize) -> Result<String, DecodeError> {
        Ok(trim_text(self.read_bytes(len)?))
    }
}

/// Decode a padded text field (lossy UTF-8, trailing whitespace/NUL removed)
pub fn trim_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0 && !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Decode text up to the first NUL (lossy UTF-8)
pub fn nul_terminated_text(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_text() {
        assert_eq!(trim_text(b"Hello\0\0\0"), "Hello");
        assert_eq!(trim_text(b"Trailing   "), "Trailing");
        assert_eq!(trim_text(b"Mixed \0 \0"), "Mixed");
        assert_eq!(trim_text(b"\0\0\0"), "");
        assert_eq!(trim_text(b""), "");
        // Only trailing padding is removed
        assert_eq!(trim_text(b"  lead\0in"), "  lead\0in");
    }

    #[test]
    fn test_nul_terminated_text() {
        assert_eq!(nul_terminated_text(b"Hello\0World"), "Hello");
        assert_eq!(nul_terminated_text(b"No null"), "No null");
        assert_eq!(nul_terminated_text(b"\0garbage"), "");
    }

    #[test]
    fn test_read_helpers() {
        let data: Vec<u8> = vec![
            0x12, 0x34, 0x56, 0x78, // u32 le: 0x78563412
            0xAB, 0xCD, // u16 le: 0xCDAB
            0xFF, // u8: 0xFF
            0x00, 0x00, 0x00, 0x01, // u32 be: 1
            0xFF, 0xFF, 0xFF, 0xF5, // i32 be: -11
            0x12, 0x34, // u16 be: 0x1234
        ];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u32_le().unwrap(), 0x7856_3412);
        assert_eq!(cursor.read_u16_le().unwrap(), 0xCDAB);
        assert_eq!(cursor.read_u8().unwrap(), 0xFF);
        assert_eq!(cursor.read_u32_be().unwrap(), 1);
        assert_eq!(cursor.read_i32_be().unwrap(), -11);
        assert_eq!(cursor.read_u16_be().unwrap(), 0x1234);
        assert_eq!(cursor.offset(), data.len());
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_read_signed_values() {
        let data: Vec<u8> = vec![
            0xFF, 0xFF, // i16: -1
            0xFF, // i8: -1
            0x00, 0x80, // i16: -32768
            0x80, // i8: -128
        ];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_i16_le().unwrap(), -1);
        assert_eq!(cursor.read_i8().unwrap(), -1);
        assert_eq!(cursor.read_i16_le().unwrap(), i16::MIN);
        assert_eq!(cursor.read_i8().unwrap(), i8::MIN);
    }

    #[test]
    fn test_read_past_end_is_truncation() {
        let data = [0x12u8, 0x34];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(
            cursor.read_u32_le(),
            Err(DecodeError::Truncated {
                offset: 0,
                needed: 4,
                available: 2
            })
        );
        // A failed read does not move the cursor
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.read_u16_le().unwrap(), 0x3412);
    }

    #[test]
    fn test_text_field_advances_full_width() {
        let mut data = b"Song\0\0\0\0".to_vec();
        data.push(0x1A);
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_text(8).unwrap(), "Song");
        assert_eq!(cursor.offset(), 8);
        assert_eq!(cursor.read_u8().unwrap(), 0x1A);
    }

    #[test]
    fn test_seek_skip_and_rewind() {
        let data = [0u8, 1, 2, 3, 4, 5];
        let mut cursor = ByteCursor::new(&data);

        cursor.skip(4).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 4);
        cursor.rewind(3).unwrap();
        assert_eq!(cursor.read_u8().unwrap(), 2);
        cursor.seek(6).unwrap();
        assert!(cursor.is_empty());

        assert!(matches!(cursor.seek(7), Err(DecodeError::Truncated { .. })));
        assert!(matches!(cursor.rewind(10), Err(DecodeError::Consistency { .. })));
        assert!(matches!(cursor.skip(1), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_sub_cursor_reports_absolute_offsets() {
        let data = [9u8, 9, 1, 2, 3, 9];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(2).unwrap();

        let mut window = cursor.sub_cursor(3).unwrap();
        assert_eq!(cursor.offset(), 5);
        assert_eq!(window.offset(), 2);
        assert_eq!(window.read_u16_le().unwrap(), 0x0201);
        assert_eq!(
            window.read_u16_le(),
            Err(DecodeError::Truncated {
                offset: 4,
                needed: 2,
                available: 1
            })
        );

        window.seek(2).unwrap();
        assert_eq!(window.read_u8().unwrap(), 1);
        assert!(matches!(window.seek(1), Err(DecodeError::Consistency { .. })));
    }
}
