// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cursor for reading little-endian frame fields.
//!
//! Frames are packed: there is no alignment or padding, so reads advance by
//! exactly the width of the field.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gamewire::encoding::cursor::FrameCursor;
//!
//! let data = [0x03, 0x00, 0x00, 0x00, 0x04];
//! let mut cursor = FrameCursor::new(&data);
//! assert_eq!(cursor.read_i32()?, 3);
//! assert_eq!(cursor.read_u8()?, 4);
//! assert!(cursor.is_at_end());
//! # Ok(())
//! # }
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Result};

/// Read cursor over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct FrameCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FrameCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Read a byte slice and advance past it.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::truncated(self.offset, count, self.remaining()));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    /// Read a little-endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Peek at the next byte without advancing the position.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fields() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x34, 0x12, 0x07];
        let mut cursor = FrameCursor::new(&data);
        assert_eq!(cursor.read_i32().unwrap(), -1);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.peek(), Some(7));
        assert_eq!(cursor.read_u8().unwrap(), 7);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_truncated_read_reports_offset() {
        let data = [1, 2, 3];
        let mut cursor = FrameCursor::new(&data);
        cursor.skip(1).unwrap();
        let err = cursor.read_i32().unwrap_err();
        assert_eq!(err, CodecError::truncated(1, 4, 2));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_read_bytes() {
        let data = [1, 2, 3, 4];
        let mut cursor = FrameCursor::new(&data);
        assert_eq!(cursor.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert_eq!(cursor.remaining(), 1);
        assert!(cursor.read_bytes(2).is_err());
        assert_eq!(cursor.read_bytes(0).unwrap(), &[] as &[u8]);
    }
}
