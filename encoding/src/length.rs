//! DER style length tags (ITU-T X.690) framing variable-length features.
//!
//! Lengths below 128 occupy a single byte. Larger lengths use the long
//! form: an initial byte `0x80 | n` followed by the `n` big-endian bytes
//! of the value, with `n` between 1 and 4.

use crate::buffer::SealCursor;
use snafu::{Backtrace, ResultExt, Snafu};

/// An error type for malformed length tags.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The length does not fit the one-to-five byte tag forms.
    #[snafu(display("invalid length tag for value {}", value))]
    InvalidLengthTag {
        /// the length value
        value: u64,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The initial byte announces an extension count outside 1..=4.
    #[snafu(display("invalid length tag extension count {}", count))]
    InvalidExtensionCount {
        /// the announced number of extension bytes
        count: u8,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The input ended inside the length tag.
    #[snafu(display("length tag is truncated"))]
    TruncatedTag {
        /// The underlying cursor error.
        #[snafu(backtrace)]
        source: crate::buffer::Error,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// Encode a length value into its tag bytes.
pub fn encode_length(value: usize) -> Result<Vec<u8>> {
    if value < 128 {
        return Ok(vec![value as u8]);
    }
    let mut byte_count = 0u8;
    let mut rest = value;
    while rest != 0 {
        rest >>= 8;
        byte_count += 1;
    }
    if byte_count > 4 {
        return InvalidLengthTagSnafu {
            value: value as u64,
        }
        .fail();
    }
    let mut out = Vec::with_capacity(usize::from(byte_count) + 1);
    out.push(0x80 | byte_count);
    for shift in (0..byte_count).rev() {
        out.push((value >> (u32::from(shift) * 8)) as u8);
    }
    Ok(out)
}

/// The number of bytes `encode_length` produces for a value.
pub fn encoded_length_size(value: usize) -> usize {
    if value < 128 {
        return 1;
    }
    let mut byte_count = 0;
    let mut rest = value;
    while rest != 0 {
        rest >>= 8;
        byte_count += 1;
    }
    byte_count + 1
}

/// Decode a length tag from the cursor, consuming `1 + n` bytes.
pub fn decode_length(cursor: &mut SealCursor<'_>) -> Result<usize> {
    let initial = cursor.read_u8().context(TruncatedTagSnafu)?;
    if initial < 0x80 {
        return Ok(usize::from(initial));
    }
    let count = initial & 0x7F;
    if count == 0 || count > 4 {
        return InvalidExtensionCountSnafu { count }.fail();
    }
    let mut value = 0usize;
    for _ in 0..count {
        let byte = cursor.read_u8().context(TruncatedTagSnafu)?;
        value = (value << 8) | usize::from(byte);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Result<usize> {
        let mut cursor = SealCursor::new(bytes);
        decode_length(&mut cursor)
    }

    #[test]
    fn short_form_below_128() {
        assert_eq!(encode_length(0).unwrap(), vec![0x00]);
        assert_eq!(encode_length(5).unwrap(), vec![0x05]);
        assert_eq!(encode_length(127).unwrap(), vec![0x7F]);
    }

    #[test]
    fn long_form_from_128() {
        assert_eq!(encode_length(128).unwrap(), vec![0x81, 0x80]);
        assert_eq!(encode_length(300).unwrap(), vec![0x82, 0x01, 0x2C]);
        assert_eq!(encode_length(0xFFFF).unwrap(), vec![0x82, 0xFF, 0xFF]);
        assert_eq!(encode_length(0x01_0000).unwrap(), vec![0x83, 0x01, 0x00, 0x00]);
        assert_eq!(
            encode_length(0xFFFF_FFFF).unwrap(),
            vec![0x84, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn rejects_values_past_four_extension_bytes() {
        assert!(encode_length(0x1_0000_0000).is_err());
    }

    #[test]
    fn sizes_match_encoding() {
        for value in [0, 1, 127, 128, 255, 256, 300, 0xFFFF, 0x01_0000, 0xFFFF_FFFF] {
            assert_eq!(
                encoded_length_size(value),
                encode_length(value).unwrap().len()
            );
        }
    }

    #[test]
    fn round_trips() {
        for value in [0, 1, 42, 127, 128, 129, 255, 256, 300, 65535, 65536, 0xFFFF_FFFF] {
            let encoded = encode_length(value).unwrap();
            assert_eq!(decode_all(&encoded).unwrap(), value);
        }
    }

    #[test]
    fn decode_consumes_exactly_the_tag() {
        let mut cursor = SealCursor::new(&[0x82, 0x01, 0x2C, 0xAB]);
        assert_eq!(decode_length(&mut cursor).unwrap(), 300);
        assert_eq!(cursor.position(), 3);
        let mut cursor = SealCursor::new(&[0x07, 0xAB]);
        assert_eq!(decode_length(&mut cursor).unwrap(), 7);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn rejects_malformed_tags() {
        // a zero extension count is not a legal long form
        assert!(decode_all(&[0x80]).is_err());
        // more than four extension bytes
        assert!(decode_all(&[0x85, 1, 2, 3, 4, 5]).is_err());
        // truncated extension
        assert!(decode_all(&[0x82, 0x01]).is_err());
        assert!(decode_all(&[]).is_err());
    }
}
