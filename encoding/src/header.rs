//! The fixed-layout seal header codec.
//!
//! Wire layout, bytes in order: the magic constant `0xDC`, the header
//! version (`0x02` legacy or `0x03` current), the C40-compressed issuing
//! country, the signer/certificate block, the packed issue and signature
//! dates, and the feature reference and document type bytes whose
//! combination (together with the version) discriminates the profile.
//!
//! The signer block depends on the version: legacy headers carry
//! `signer country (2) || signer id (2) || certificate reference (5)`
//! as nine C40 characters, current headers carry the certificate
//! reference length as two decimal digits inside the block and the
//! reference itself separately C40-compressed behind it.

use crate::buffer::{self, SealCursor};
use crate::c40;
use crate::date::{self, decode_date, encode_date};
use crate::{SealWriter, MAGIC};
use seal_core::date::Date;
use seal_core::profile::ProfileType;
use seal_core::validation;
use seal_core::HeaderInfo;
use snafu::{Backtrace, ResultExt, Snafu};

/// An error type for header encoding and decoding failures.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The first byte is not the seal magic constant.
    #[snafu(display("invalid header: bad magic byte {:#04X}", byte))]
    InvalidMagic {
        /// the rejected byte
        byte: u8,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The header version is not one fixed by the standard.
    #[snafu(display("unsupported header version {:#04X}", version))]
    UnsupportedVersion {
        /// the rejected version byte
        version: u8,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The discriminator triple maps to no known profile.
    #[snafu(display(
        "unknown profile type for header ({:#04X}, {:#04X}, {:#04X})",
        version,
        feature_ref,
        document_type
    ))]
    UnknownProfile {
        /// the header version byte
        version: u8,
        /// the feature reference byte
        feature_ref: u8,
        /// the document type byte
        document_type: u8,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The certificate reference length is not representable in this version.
    #[snafu(display("invalid value length of certificate reference ({})", length))]
    CertificateRefLength {
        /// the rejected length
        length: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The signer block did not decompress to the expected character count.
    #[snafu(display("invalid header: malformed signer block"))]
    InvalidSignerBlock {
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The certificate reference length digits are not decimal.
    #[snafu(display("invalid header: certificate reference length `{}` is not decimal", text))]
    CertRefLengthDigits {
        /// the rejected digit pair
        text: String,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A header field failed validation.
    #[snafu(display("invalid header data"))]
    Validation {
        /// The underlying validation error.
        #[snafu(backtrace)]
        source: validation::Error,
    },
    /// A header field failed C40 conversion.
    #[snafu(display("header C40 conversion failed"))]
    C40 {
        /// The underlying C40 error.
        #[snafu(backtrace)]
        source: c40::Error,
    },
    /// A header date could not be converted.
    #[snafu(display("header date conversion failed"))]
    DateCodec {
        /// The underlying date codec error.
        #[snafu(backtrace)]
        source: date::Error,
    },
    /// The input ended inside the header.
    #[snafu(display("header is truncated"))]
    Truncated {
        /// The underlying cursor error.
        #[snafu(backtrace)]
        source: buffer::Error,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// The outcome of decoding a seal header.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedHeader {
    /// The decoded header fields.
    pub info: HeaderInfo,
    /// The profile type identified by the discriminator triple.
    pub profile_type: ProfileType,
    /// The header length in bytes; feature data starts at this offset.
    pub byte_len: usize,
}

fn required_date(date: Option<Date>) -> Result<Date> {
    date.ok_or_else(|| Error::Validation {
        source: validation::InvalidDateSnafu {
            name: "header information",
        }
        .build(),
    })
}

/// Encode the header of a profile.
///
/// The header fields are validated first
/// (see [`check_header`](seal_core::validation::check_header));
/// the issuing country is right-padded with `<` to three characters.
pub fn encode_header(profile_type: ProfileType, header: &HeaderInfo) -> Result<Vec<u8>> {
    validation::check_header(header).context(ValidationSnafu)?;

    let mut country = header.issuing_country.clone();
    while country.len() < 3 {
        country.push('<');
    }

    let (version, feature_ref, document_type) = profile_type.discriminator();
    let mut writer = SealWriter::with_capacity(18);
    writer.put_u8(MAGIC);
    writer.put_u8(version);
    writer.put_slice(&c40::encode(&country).context(C40Snafu)?);

    if version == 0x03 {
        let length = header.certificate_ref.len();
        if length < 1 || length > 99 {
            return CertificateRefLengthSnafu { length }.fail();
        }
        let signer_block = format!(
            "{}{}{:02}",
            header.signer_country, header.signer_id, length
        );
        writer.put_slice(&c40::encode(&signer_block).context(C40Snafu)?);
        writer.put_slice(&c40::encode(&header.certificate_ref).context(C40Snafu)?);
    } else {
        let length = header.certificate_ref.len();
        if length != 5 {
            return CertificateRefLengthSnafu { length }.fail();
        }
        let signer_block = format!(
            "{}{}{}",
            header.signer_country, header.signer_id, header.certificate_ref
        );
        writer.put_slice(&c40::encode(&signer_block).context(C40Snafu)?);
    }

    let issue = required_date(header.issue_date)?;
    let signature = required_date(header.signature_date)?;
    writer.put_slice(&encode_date(issue).context(DateCodecSnafu)?);
    writer.put_slice(&encode_date(signature).context(DateCodecSnafu)?);
    writer.put_u8(feature_ref);
    writer.put_u8(document_type);
    Ok(writer.into_bytes())
}

/// Decode a seal header.
///
/// The input may be an encoded profile or a complete seal;
/// bytes past the header are not touched.
pub fn decode_header(data: &[u8]) -> Result<DecodedHeader> {
    let mut cursor = SealCursor::new(data);

    let magic = cursor.read_u8().context(TruncatedSnafu)?;
    if magic != MAGIC {
        return InvalidMagicSnafu { byte: magic }.fail();
    }
    let version = cursor.read_u8().context(TruncatedSnafu)?;
    if version != 0x02 && version != 0x03 {
        return UnsupportedVersionSnafu { version }.fail();
    }

    let country_bytes = cursor.read_slice(2).context(TruncatedSnafu)?;
    let issuing_country = c40::decode(country_bytes).context(C40Snafu)?;

    let (signer_country, signer_id, certificate_ref) = if version == 0x02 {
        let block_bytes = cursor.read_slice(6).context(TruncatedSnafu)?;
        let block = c40::decode(block_bytes).context(C40Snafu)?;
        if block.len() < 9 {
            return InvalidSignerBlockSnafu.fail();
        }
        (
            block[0..2].to_string(),
            block[2..4].to_string(),
            block[4..9].to_string(),
        )
    } else {
        let block_bytes = cursor.read_slice(4).context(TruncatedSnafu)?;
        let block = c40::decode(block_bytes).context(C40Snafu)?;
        if block.len() < 6 {
            return InvalidSignerBlockSnafu.fail();
        }
        let digits = &block[4..6];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CertRefLengthDigitsSnafu { text: digits }.fail();
        }
        let length: usize = digits.parse().unwrap_or(0);
        let encoded_len = (length + 2) / 3 * 2;
        let cert_bytes = cursor.read_slice(encoded_len).context(TruncatedSnafu)?;
        let mut certificate_ref = c40::decode(cert_bytes).context(C40Snafu)?;
        certificate_ref.truncate(length);
        (
            block[0..2].to_string(),
            block[2..4].to_string(),
            certificate_ref,
        )
    };

    let issue_bytes = cursor.read_slice(3).context(TruncatedSnafu)?;
    let issue_date =
        decode_date([issue_bytes[0], issue_bytes[1], issue_bytes[2]]).context(DateCodecSnafu)?;
    let signature_bytes = cursor.read_slice(3).context(TruncatedSnafu)?;
    let signature_date =
        decode_date([signature_bytes[0], signature_bytes[1], signature_bytes[2]])
            .context(DateCodecSnafu)?;

    let feature_ref = cursor.read_u8().context(TruncatedSnafu)?;
    let document_type = cursor.read_u8().context(TruncatedSnafu)?;
    let profile_type = ProfileType::from_discriminator(version, feature_ref, document_type)
        .ok_or_else(|| {
            UnknownProfileSnafu {
                version,
                feature_ref,
                document_type,
            }
            .build()
        })?;

    Ok(DecodedHeader {
        info: HeaderInfo {
            issuing_country,
            signer_country,
            signer_id,
            certificate_ref,
            issue_date: Some(issue_date),
            signature_date: Some(signature_date),
        },
        profile_type,
        byte_len: cursor.position(),
    })
}
