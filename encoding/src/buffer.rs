//! Byte sink and cursor abstractions used by all seal codecs.
//!
//! Encoders append to a [`SealWriter`], which records its own length,
//! so no component ever computes output offsets by hand.
//! Decoders read through a [`SealCursor`], which bounds-checks every
//! access and reports the position at which data ran out.

use byteordered::ByteOrdered;
use snafu::{Backtrace, Snafu};

/// An error type for reads past the end of the input.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The input ended before the requested number of bytes could be read.
    #[snafu(display(
        "unexpected end of data at position {}: needed {} more byte(s), {} left",
        position,
        needed,
        remaining
    ))]
    UnexpectedEndOfData {
        /// the cursor position at the failed read
        position: usize,
        /// how many bytes the read required
        needed: usize,
        /// how many bytes were left
        remaining: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// An append-only byte sink for building encoded profiles and seals.
#[derive(Debug, Default, Clone)]
pub struct SealWriter {
    data: Vec<u8>,
}

impl SealWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        SealWriter::default()
    }

    /// Create an empty writer with the given capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        SealWriter {
            data: Vec::with_capacity(capacity),
        }
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a single byte.
    pub fn put_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Append a byte slice.
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Consume the writer, yielding the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// A bounds-checked read cursor over an encoded profile or seal.
#[derive(Debug, Clone, Copy)]
pub struct SealCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SealCursor<'a> {
    /// Create a cursor at the start of the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        SealCursor { data, position: 0 }
    }

    /// Create a cursor starting at the given offset.
    pub fn with_position(data: &'a [u8], position: usize) -> Self {
        SealCursor { data, position }
    }

    /// The current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Whether the cursor has reached the end of the input.
    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// The next byte, without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.position).copied()
    }

    fn check(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return UnexpectedEndOfDataSnafu {
                position: self.position,
                needed,
                remaining: self.remaining(),
            }
            .fail();
        }
        Ok(())
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_slice(2)?;
        // the slice is exactly two bytes, the read cannot fail
        Ok(ByteOrdered::be(bytes).read_u16().unwrap_or_default())
    }

    /// Read `len` bytes as a subslice of the input.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        self.check(len)?;
        let slice = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    /// Skip `len` bytes, counting them as read.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.check(len)?;
        self.position += len;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_tracks_length() {
        let mut writer = SealWriter::new();
        assert!(writer.is_empty());
        writer.put_u8(0xDC);
        writer.put_slice(&[0x03, 0x6A, 0xBC]);
        assert_eq!(writer.len(), 4);
        assert_eq!(writer.into_bytes(), vec![0xDC, 0x03, 0x6A, 0xBC]);
    }

    #[test]
    fn cursor_reads_and_bounds_checks() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut cursor = SealCursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(cursor.read_u16().unwrap(), 0x0203);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 1);
        assert!(cursor.read_u16().is_err());
        assert_eq!(cursor.read_u8().unwrap(), 0x04);
        assert!(cursor.at_end());
        assert!(cursor.read_u8().is_err());
    }

    #[test]
    fn cursor_slices_share_input_lifetime() {
        let data = [0xAA, 0xBB, 0xCC];
        let mut cursor = SealCursor::new(&data);
        cursor.skip(1).unwrap();
        let tail: &[u8] = cursor.read_slice(2).unwrap();
        assert_eq!(tail, &[0xBB, 0xCC]);
        assert!(cursor.skip(1).is_err());
    }
}
