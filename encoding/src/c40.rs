//! C40 text compression as used by all alphanumeric seal fields.
//!
//! C40 packs three characters of a 40-value alphabet into two bytes:
//! for values `(v1, v2, v3)` the pair encodes `1600·v1 + 40·v2 + v3 + 1`
//! big-endian. Only a subset of the alphabet occurs in seals:
//! value 3 is the space, values 4 to 13 the digits and 14 to 39 the
//! uppercase letters. The filler character `<` shares value 3 with the
//! space on encode; decoding emits value 3 as `<`, which is the seal
//! convention for padded fields.
//!
//! Inputs whose length is not a multiple of three are completed with
//! padding: a trailing pair is encoded with `v3 = 0`, and a single
//! trailing character is written as the two-byte escape
//! `(0xFE, ascii + 1)`.

use crate::buffer::SealCursor;
use snafu::{Backtrace, Snafu};

/// The byte pair lead marking a single-character escape.
const ESCAPE: u8 = 0xFE;

/// An error type for C40 conversion failures.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The input character has no C40 value.
    #[snafu(display("no C40 value for character `{}`", character))]
    UnknownCharacter {
        /// the rejected character
        character: char,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The decoded value maps to no character of the seal alphabet.
    #[snafu(display("no character for C40 value {}", value))]
    UnknownValue {
        /// the rejected C40 value
        value: u16,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The encoded data ends in the middle of a byte pair.
    #[snafu(display("C40 data of {} byte(s) ends in the middle of a byte pair", length))]
    TruncatedPair {
        /// the input length
        length: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// The C40 value of a character, with `<` standing in for the space.
fn value_of(character: u8) -> Result<u16> {
    match character {
        b' ' | b'<' => Ok(3),
        b'0'..=b'9' => Ok(u16::from(character) - 44),
        b'A'..=b'Z' => Ok(u16::from(character) - 51),
        _ => UnknownCharacterSnafu {
            character: character as char,
        }
        .fail(),
    }
}

/// The character for a C40 value, emitting value 3 as `<`.
fn char_of(value: u16) -> Result<char> {
    match value {
        3 => Ok('<'),
        4..=13 => Ok((value as u8 + 44) as char),
        14..=39 => Ok((value as u8 + 51) as char),
        _ => UnknownValueSnafu { value }.fail(),
    }
}

/// Encode a string into C40 byte pairs.
///
/// The output is `ceil(len / 3) * 2` bytes long.
pub fn encode(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut values = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        values.push(value_of(byte)?);
    }

    let mut out = Vec::with_capacity((values.len() + 2) / 3 * 2);
    let mut chunks = values.chunks_exact(3);
    for chunk in &mut chunks {
        let packed = 1600 * chunk[0] + 40 * chunk[1] + chunk[2] + 1;
        out.push((packed / 256) as u8);
        out.push((packed % 256) as u8);
    }
    match *chunks.remainder() {
        [v1, v2] => {
            let packed = 1600 * v1 + 40 * v2 + 1;
            out.push((packed / 256) as u8);
            out.push((packed % 256) as u8);
        }
        [_] => {
            // the escape carries the raw character, so `<` survives as `<`
            out.push(ESCAPE);
            out.push(bytes[bytes.len() - 1] + 1);
        }
        _ => {}
    }
    Ok(out)
}

/// Decode C40 byte pairs into a string.
///
/// The output holds at most `len * 3 / 2` characters.
pub fn decode(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return TruncatedPairSnafu { length: data.len() }.fail();
    }
    let mut out = String::with_capacity(data.len() * 3 / 2);
    let mut cursor = SealCursor::new(data);
    while !cursor.at_end() {
        // the length is even, so a full pair is always available
        let packed = cursor
            .read_u16()
            .map_err(|_| TruncatedPairSnafu { length: data.len() }.build())?;
        let high = (packed >> 8) as u8;
        let low = (packed & 0xFF) as u8;
        if high == ESCAPE {
            // single-character escape: the low byte is the character + 1
            if low == 0 {
                return UnknownValueSnafu { value: packed }.fail();
            }
            out.push((low - 1) as char);
            continue;
        }
        if packed == 0 {
            return UnknownValueSnafu { value: packed }.fail();
        }
        let v1 = (packed - 1) / 1600;
        let v2 = ((packed - 1) % 1600) / 40;
        let v3 = (packed - 1) % 40;
        if v3 == 0 {
            // padded pair: only two characters were stored
            out.push(char_of(v1)?);
            out.push(char_of(v2)?);
        } else {
            out.push(char_of(v1)?);
            out.push(char_of(v2)?);
            out.push(char_of(v3)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_a_full_triple() {
        // 'A' = 14, 'B' = 15, '<' = 3: 1600*14 + 40*15 + 3 + 1 = 23004
        assert_eq!(encode("AB<").unwrap(), vec![0x59, 0xDC]);
        // 'D' = 17, 'E' = 18, 'X' = 37
        assert_eq!(encode("DEX").unwrap(), vec![0x6D, 0x36]);
    }

    #[test]
    fn encodes_padded_forms() {
        // two trailing characters use v3 = 0
        // 'A' = 14, 'B' = 15: 1600*14 + 40*15 + 1 = 23001
        assert_eq!(encode("AB").unwrap(), vec![0x59, 0xD9]);
        // a single trailing character uses the 0xFE escape
        assert_eq!(encode("A").unwrap(), vec![0xFE, b'A' + 1]);
        assert_eq!(encode("<").unwrap(), vec![0xFE, b'<' + 1]);
        assert_eq!(encode("ABCD").unwrap().len(), 4);
    }

    #[test]
    fn output_length_is_two_thirds() {
        for len in 0..10 {
            let text: String = std::iter::repeat('M').take(len).collect();
            assert_eq!(encode(&text).unwrap().len(), (len + 2) / 3 * 2);
        }
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        assert!(encode("abc").is_err());
        assert!(encode("A-B").is_err());
        assert!(encode("Ä").is_err());
    }

    #[test]
    fn decodes_what_it_encodes() {
        for text in ["", "A", "AB", "ABC", "ABCD", "D<<", "X12K9", "MUSTERMANN<<ERIKA"] {
            let decoded = decode(&encode(text).unwrap()).unwrap();
            assert_eq!(decoded, text);
        }
    }

    #[test]
    fn space_decodes_as_filler() {
        // the space shares value 3 with `<`; decoding picks the seal convention
        assert_eq!(decode(&encode("A B").unwrap()).unwrap(), "A<B");
    }

    #[test]
    fn rejects_malformed_pairs() {
        // a packed value of zero cannot result from any character triple
        assert!(decode(&[0x00, 0x00]).is_err());
        // value 40 and up is outside the alphabet: 1600*40 + 1 = 64001
        assert!(decode(&[0xFA, 0x01]).is_err());
        // odd number of bytes
        assert!(decode(&[0x59]).is_err());
    }
}
