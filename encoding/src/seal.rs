//! Assembling a signed seal and splitting it back apart.
//!
//! A seal is `encoded profile || 0xFF || length tag || signature`.
//! Splitting requires the caller to know the signature length:
//! the signature tag is located from the end of the seal,
//! and the embedded length tag must agree with the expected length.

use crate::buffer::SealCursor;
use crate::length::{self, decode_length, encode_length, encoded_length_size};
use crate::SIGNATURE_TAG;
use snafu::{Backtrace, ResultExt, Snafu};

/// An error type for seal assembly and parsing failures.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The expected signature length is zero or disagrees with the seal.
    #[snafu(display("invalid signature length {}", length))]
    InvalidSignatureLength {
        /// the offending length
        length: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The byte before the signature block is not the signature tag.
    #[snafu(display("signature tag not found at position {}", position))]
    SignatureTagNotFound {
        /// the position where `0xFF` was expected
        position: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The seal is too short to hold a signature of the expected length.
    #[snafu(display(
        "no signature of {} byte(s) fits into a seal of {} byte(s)",
        signature_length,
        seal_length
    ))]
    SignatureNotFound {
        /// the expected signature length
        signature_length: usize,
        /// the seal length
        seal_length: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The signature length tag could not be written or read.
    #[snafu(display("signature length tag conversion failed"))]
    LengthTag {
        /// The underlying length tag error.
        #[snafu(backtrace)]
        source: length::Error,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// Append a signature to an encoded profile, producing a seal.
pub fn append_signature(encoded_profile: &[u8], signature: &[u8]) -> Result<Vec<u8>> {
    let length_tag = encode_length(signature.len()).context(LengthTagSnafu)?;
    let mut seal =
        Vec::with_capacity(encoded_profile.len() + 1 + length_tag.len() + signature.len());
    seal.extend_from_slice(encoded_profile);
    seal.push(SIGNATURE_TAG);
    seal.extend_from_slice(&length_tag);
    seal.extend_from_slice(signature);
    Ok(seal)
}

/// Split a seal into its encoded-profile and signature parts.
///
/// `signature_length` is the expected signature size in bytes;
/// the signature tag position is computed from the end of the seal.
pub fn parse_seal(seal: &[u8], signature_length: usize) -> Result<(&[u8], &[u8])> {
    if signature_length == 0 {
        return InvalidSignatureLengthSnafu {
            length: signature_length,
        }
        .fail();
    }
    let tag_size = encoded_length_size(signature_length);
    let suffix = signature_length + tag_size + 1;
    if seal.len() < suffix {
        return SignatureNotFoundSnafu {
            signature_length,
            seal_length: seal.len(),
        }
        .fail();
    }
    let tag_position = seal.len() - suffix;
    if seal[tag_position] != SIGNATURE_TAG {
        return SignatureTagNotFoundSnafu {
            position: tag_position,
        }
        .fail();
    }
    let mut cursor = SealCursor::with_position(seal, tag_position + 1);
    let embedded = decode_length(&mut cursor).context(LengthTagSnafu)?;
    if embedded != signature_length {
        return InvalidSignatureLengthSnafu { length: embedded }.fail();
    }
    Ok((
        &seal[..tag_position],
        &seal[seal.len() - signature_length..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_tag_length_and_signature() {
        let profile = [0xAA; 10];
        let signature = [0xBB; 5];
        let seal = append_signature(&profile, &signature).unwrap();
        assert_eq!(seal.len(), 16);
        assert_eq!(&seal[..10], &profile);
        assert_eq!(seal[10], 0xFF);
        assert_eq!(seal[11], 0x05);
        assert_eq!(&seal[12..], &signature);
    }

    #[test]
    fn splits_what_it_assembled() {
        let profile = [0x11; 23];
        let signature = [0x22; 64];
        let seal = append_signature(&profile, &signature).unwrap();
        let (parsed_profile, parsed_signature) = parse_seal(&seal, 64).unwrap();
        assert_eq!(parsed_profile, &profile[..]);
        assert_eq!(parsed_signature, &signature[..]);
    }

    #[test]
    fn long_signatures_use_long_length_tags() {
        let profile = [0x01; 4];
        let signature = vec![0x5A; 300];
        let seal = append_signature(&profile, &signature).unwrap();
        // 0xFF || 0x82 0x01 0x2C || signature
        assert_eq!(seal[4], 0xFF);
        assert_eq!(&seal[5..8], &[0x82, 0x01, 0x2C]);
        let (parsed_profile, parsed_signature) = parse_seal(&seal, 300).unwrap();
        assert_eq!(parsed_profile, &profile[..]);
        assert_eq!(parsed_signature, &signature[..]);
    }

    #[test]
    fn rejects_mismatched_expectations() {
        let seal = append_signature(&[0xAA; 10], &[0xBB; 5]).unwrap();
        assert!(matches!(
            parse_seal(&seal, 0),
            Err(Error::InvalidSignatureLength { .. })
        ));
        // wrong expected length lands the tag position elsewhere
        assert!(parse_seal(&seal, 4).is_err());
        assert!(matches!(
            parse_seal(&seal[..6], 5),
            Err(Error::SignatureNotFound { .. })
        ));

        let mut tampered = seal;
        tampered[10] = 0xFE;
        assert!(matches!(
            parse_seal(&tampered, 5),
            Err(Error::SignatureTagNotFound { .. })
        ));
    }
}
