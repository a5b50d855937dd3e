//! The validation layer applied to a profile before it is encoded.
//!
//! Every check here guards a wire invariant:
//! text features must fit the restricted C40 alphabet or be well-formed
//! UTF-8, integers must fit the byte width given by their length bounds,
//! and the header fields must obey the country code and signer rules.

use crate::date::Date;
use crate::header::HeaderInfo;
use crate::profile::{FeatureType, ProfileInfo};
use snafu::{Backtrace, Snafu};

/// An error type for rejected profile or header data.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum Error {
    /// A value is shorter or longer than its schema allows.
    #[snafu(display("invalid value length of {}", name))]
    ValueLength {
        /// the feature or header field name
        name: String,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A value contains characters outside its declared type.
    #[snafu(display("invalid value type of {}", name))]
    ValueType {
        /// the feature or header field name
        name: String,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A date-valued feature or header date is missing or not a calendar date.
    #[snafu(display("invalid date of {}", name))]
    InvalidDate {
        /// the feature or header field name
        name: String,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// Check whether all characters are in the seal alphabet `[0-9A-Z<]`.
pub fn is_alphanumeric(s: &str) -> bool {
    s.bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'Z' | b'<'))
}

/// Check whether all characters are decimal digits.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check whether a byte sequence is well-formed UTF-8 per RFC 3629.
///
/// Overlong encodings, surrogate code points, bytes `0xF8..=0xFF`
/// and continuation bytes without a leader are all rejected.
pub fn is_utf8(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

/// Check every feature value against its schema length bounds.
///
/// For text values the bound is the character count;
/// for integers the bounds give the admissible byte width,
/// so the value must satisfy `v < 2^(max·8)`
/// and, when `min > 1`, `v >= 2^((min-1)·8)`;
/// date values must be populated.
pub fn check_length(profile: &ProfileInfo) -> Result<()> {
    for feature in &profile.features {
        match feature.value_type {
            FeatureType::Alphanumeric
            | FeatureType::Numeric
            | FeatureType::Binary
            | FeatureType::BinaryUtf8 => {
                let len = feature.value_str().len();
                if len < feature.min_length || len > feature.max_length {
                    return ValueLengthSnafu { name: feature.name }.fail();
                }
            }
            FeatureType::Integer => {
                let value = u64::from(feature.value_int());
                let upper = 1u64 << (feature.max_length as u32 * 8);
                if value >= upper {
                    return ValueLengthSnafu { name: feature.name }.fail();
                }
                if feature.min_length > 1 {
                    let lower = 1u64 << ((feature.min_length as u32 - 1) * 8);
                    if value < lower {
                        return ValueLengthSnafu { name: feature.name }.fail();
                    }
                }
            }
            FeatureType::Date => {
                if feature.value_date().is_none() {
                    return InvalidDateSnafu { name: feature.name }.fail();
                }
            }
        }
    }
    Ok(())
}

/// Check every feature value against its declared value type.
pub fn check_value_type(profile: &ProfileInfo) -> Result<()> {
    for feature in &profile.features {
        match feature.value_type {
            FeatureType::Alphanumeric => {
                if !is_alphanumeric(feature.value_str()) {
                    return ValueTypeSnafu { name: feature.name }.fail();
                }
            }
            FeatureType::Numeric => {
                if !is_numeric(feature.value_str()) {
                    return ValueTypeSnafu { name: feature.name }.fail();
                }
            }
            // UTF-8 well-formedness is guaranteed for `String` values;
            // raw bytes are checked with `is_utf8` at the decoding boundary.
            FeatureType::BinaryUtf8 | FeatureType::Binary => {}
            // bounds already covered by `check_length`
            FeatureType::Integer | FeatureType::Date => {}
        }
    }
    Ok(())
}

fn require_date(date: Option<Date>) -> Result<()> {
    if date.is_none() {
        return InvalidDateSnafu {
            name: "header information",
        }
        .fail();
    }
    Ok(())
}

/// Check the header fields for length and value type.
///
/// The issuing country is 1 to 3 characters of uppercase letters or `<`,
/// must not start with `<`,
/// and must not have the form `X<X` with a letter after the gap.
pub fn check_header(header: &HeaderInfo) -> Result<()> {
    let country = header.issuing_country.as_bytes();
    if country.is_empty() || country.len() > 3 {
        return ValueLengthSnafu {
            name: "issuing country",
        }
        .fail();
    }
    require_date(header.issue_date)?;
    require_date(header.signature_date)?;
    if header.signer_country.len() != 2 {
        return ValueLengthSnafu {
            name: "signer country",
        }
        .fail();
    }
    if header.signer_id.len() != 2 {
        return ValueLengthSnafu { name: "signer id" }.fail();
    }

    if !is_alphanumeric(&header.certificate_ref) {
        return ValueTypeSnafu {
            name: "certificate reference",
        }
        .fail();
    }
    if !is_alphanumeric(&header.signer_id) {
        return ValueTypeSnafu { name: "signer id" }.fail();
    }

    if country[0] == b'<' {
        return ValueTypeSnafu {
            name: "issuing country",
        }
        .fail();
    }
    if country.len() == 3 && country[1] == b'<' && country[2].is_ascii_uppercase() {
        return ValueTypeSnafu {
            name: "issuing country",
        }
        .fail();
    }
    if !country
        .iter()
        .all(|&b| b.is_ascii_uppercase() || b == b'<')
    {
        return ValueTypeSnafu {
            name: "issuing country",
        }
        .fail();
    }
    if !header
        .signer_country
        .bytes()
        .all(|b| b.is_ascii_uppercase())
    {
        return ValueTypeSnafu {
            name: "signer country",
        }
        .fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    fn sample_header() -> HeaderInfo {
        HeaderInfo {
            issuing_country: "D".into(),
            signer_country: "DE".into(),
            signer_id: "TS".into(),
            certificate_ref: "ABCDE".into(),
            issue_date: Some(Date::new(2022, 2, 9).unwrap()),
            signature_date: Some(Date::new(2022, 3, 1).unwrap()),
        }
    }

    #[test]
    fn alphanumeric_alphabet_is_exact() {
        assert!(is_alphanumeric("ABCXYZ0129<"));
        assert!(is_alphanumeric(""));
        // lowercase letters are above ASCII 90
        assert!(!is_alphanumeric("abc"));
        // '[' is ASCII 91, the first byte past 'Z'
        assert!(!is_alphanumeric("["));
        assert!(!is_alphanumeric("A B"));
        assert!(!is_alphanumeric("Ä"));
    }

    #[test]
    fn numeric_alphabet_is_exact() {
        assert!(is_numeric("0123456789"));
        assert!(!is_numeric("12A4"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn utf8_rejects_malformed_sequences() {
        assert!(is_utf8(b"Mustermann"));
        assert!(is_utf8("Müller-Lüdenscheidt".as_bytes()));
        // overlong 2-byte encodings (C0/C1 leads)
        assert!(!is_utf8(&[0xC0, 0xAF]));
        assert!(!is_utf8(&[0xC1, 0x81]));
        // overlong 3-byte encoding
        assert!(!is_utf8(&[0xE0, 0x80, 0xAF]));
        // continuation byte without a leader
        assert!(!is_utf8(&[0x80]));
        // truncated continuation
        assert!(!is_utf8(&[0xC3]));
        assert!(!is_utf8(&[0xE2, 0x82]));
        // 5-byte lead bytes are not valid UTF-8
        assert!(!is_utf8(&[0xF8, 0x88, 0x80, 0x80, 0x80]));
        // surrogate range
        assert!(!is_utf8(&[0xED, 0xA0, 0x80]));
    }

    #[test]
    fn header_accepts_valid_data() {
        assert!(check_header(&sample_header()).is_ok());
        let mut header = sample_header();
        header.issuing_country = "UTO".into();
        assert!(check_header(&header).is_ok());
        header.issuing_country = "DE<".into();
        assert!(check_header(&header).is_ok());
    }

    #[test]
    fn header_rejects_bad_country_codes() {
        let mut header = sample_header();
        header.issuing_country = "".into();
        assert!(check_header(&header).is_err());
        header.issuing_country = "ABCD".into();
        assert!(check_header(&header).is_err());
        header.issuing_country = "<DE".into();
        assert!(check_header(&header).is_err());
        // an uppercase letter after the gap is not padding
        header.issuing_country = "D<E".into();
        assert!(check_header(&header).is_err());
        header.issuing_country = "d".into();
        assert!(check_header(&header).is_err());
    }

    #[test]
    fn header_rejects_bad_signer_fields() {
        let mut header = sample_header();
        header.signer_country = "DEU".into();
        assert!(check_header(&header).is_err());
        header = sample_header();
        header.signer_country = "de".into();
        assert!(check_header(&header).is_err());
        header = sample_header();
        header.signer_id = "T".into();
        assert!(check_header(&header).is_err());
        header = sample_header();
        header.certificate_ref = "abc".into();
        assert!(check_header(&header).is_err());
        header = sample_header();
        header.issue_date = None;
        assert!(check_header(&header).is_err());
    }
}
