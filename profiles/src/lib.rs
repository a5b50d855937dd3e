#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]
//! The digital seal profile registry.
//!
//! The registry maps each [`ProfileType`] to its codec:
//! the feature schema (names, length bounds, value types),
//! the crypto declarations,
//! and the profile-specific encode and decode routines.
//! Callers obtain a blank [`ProfileInfo`] from [`profile_template`],
//! fill in the header and feature values,
//! and pass it to [`encode_profile`];
//! [`decode_profile`] runs the reverse direction,
//! identifying the profile from the header discriminator
//! and routing each feature tag to its decoder.
//!
//! Feature order on the wire follows the schema declaration order,
//! but decoding never relies on it: values are routed by tag byte,
//! and unknown tags are skipped over their length tag.
//!
//! ```
//! use seal_core::{Date, ProfileType};
//! use seal_profiles::{decode_profile, encode_profile, profile_template};
//!
//! let mut profile = profile_template(ProfileType::ResidencePermit)?;
//! profile.header.issuing_country = "D".into();
//! profile.header.signer_country = "DE".into();
//! profile.header.signer_id = "TS".into();
//! profile.header.certificate_ref = "A1B2C".into();
//! profile.header.issue_date = Some(Date::new(2022, 2, 9)?);
//! profile.header.signature_date = Some(Date::new(2022, 3, 1)?);
//! // a TD2 machine readable zone is two lines of 36 characters
//! let mrz = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".repeat(2);
//! profile.set_text("Machine readable zone", mrz);
//! profile.set_text("Passport number", "C01X00T47");
//! let encoded = encode_profile(&profile)?;
//! let decoded = decode_profile(&encoded)?;
//! assert_eq!(decoded.feature("Passport number").unwrap().value_str(), "C01X00T47");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use lazy_static::lazy_static;
use seal_core::profile::{FeatureInfo, ProfileInfo, ProfileType};
use seal_core::validation;
use seal_core::{CryptoInfo, HeaderInfo};
use seal_encoding::header::{self, DecodedHeader};
use snafu::ResultExt;
use std::collections::HashMap;

mod arrival_attestation;
mod codec;
pub mod crypto;
mod error;
mod residence_permit;
mod social_insurance_card;
mod sticker;
mod visa;

pub use crate::error::{Error, Result};

/// A registry row: a profile type with its human readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileEntry {
    /// The profile type.
    pub profile_type: ProfileType,
    /// The profile name.
    pub name: &'static str,
}

/// The codec of a single profile type.
struct ProfileCodec {
    features: fn() -> Vec<FeatureInfo>,
    crypto: CryptoInfo,
    encode: fn(&ProfileInfo) -> Result<Vec<u8>>,
    decode: fn(&[u8], DecodedHeader) -> Result<ProfileInfo>,
}

lazy_static! {
    static ref REGISTRY: HashMap<ProfileType, ProfileCodec> = {
        let mut registry = HashMap::new();
        registry.insert(
            ProfileType::Visa,
            ProfileCodec {
                features: visa::features,
                crypto: crypto::VISA,
                encode: visa::encode,
                decode: visa::decode,
            },
        );
        registry.insert(
            ProfileType::ArrivalAttestation,
            ProfileCodec {
                features: arrival_attestation::features,
                crypto: crypto::DEFAULT,
                encode: arrival_attestation::encode,
                decode: arrival_attestation::decode,
            },
        );
        registry.insert(
            ProfileType::SocialInsuranceCard,
            ProfileCodec {
                features: social_insurance_card::features,
                crypto: crypto::DEFAULT,
                encode: social_insurance_card::encode,
                decode: social_insurance_card::decode,
            },
        );
        registry.insert(
            ProfileType::ResidencePermit,
            ProfileCodec {
                features: residence_permit::features,
                crypto: crypto::DEFAULT,
                encode: residence_permit::encode,
                decode: residence_permit::decode,
            },
        );
        registry.insert(
            ProfileType::SupplementarySheet,
            ProfileCodec {
                features: residence_permit::features,
                crypto: crypto::DEFAULT,
                encode: residence_permit::encode,
                decode: residence_permit::decode,
            },
        );
        registry.insert(
            ProfileType::AddressStickerIdCard,
            ProfileCodec {
                features: sticker::features,
                crypto: crypto::STICKER,
                encode: sticker::encode,
                decode: sticker::decode,
            },
        );
        registry.insert(
            ProfileType::PlaceOfResidenceStickerPassport,
            ProfileCodec {
                features: sticker::features,
                crypto: crypto::STICKER,
                encode: sticker::encode,
                decode: sticker::decode,
            },
        );
        registry
    };
}

fn codec_for(profile_type: ProfileType) -> Result<&'static ProfileCodec> {
    REGISTRY
        .get(&profile_type)
        .ok_or_else(|| error::UnsupportedProfileTypeSnafu { profile_type }.build())
}

/// List the profiles this registry can encode and decode.
pub fn supported_profiles() -> Vec<ProfileEntry> {
    ProfileType::ALL
        .iter()
        .map(|&profile_type| ProfileEntry {
            profile_type,
            name: profile_type.name(),
        })
        .collect()
}

/// A blank profile of the given type: schema and crypto only, no values.
pub fn profile_template(profile_type: ProfileType) -> Result<ProfileInfo> {
    let codec = codec_for(profile_type)?;
    Ok(ProfileInfo {
        profile_type,
        header: HeaderInfo::new(),
        features: (codec.features)(),
        crypto: codec.crypto,
    })
}

/// Encode a profile into its wire bytes (header plus feature blocks).
///
/// The feature list is first compared against the registry schema:
/// a name match with differing type or length bounds is an error,
/// as is a schema feature missing from the input.
/// All values are then validated before any byte is produced.
pub fn encode_profile(profile: &ProfileInfo) -> Result<Vec<u8>> {
    let codec = codec_for(profile.profile_type)?;
    let schema = (codec.features)();

    let mut found = 0;
    for expected in &schema {
        if let Some(actual) = profile.feature(expected.name) {
            if actual.value_type != expected.value_type
                || actual.min_length != expected.min_length
                || actual.max_length != expected.max_length
            {
                return error::FeatureDataDoesNotMatchProfileSnafu {
                    name: expected.name,
                }
                .fail();
            }
            found += 1;
        }
    }
    if found != schema.len() {
        return error::InvalidFeatureCountSnafu {
            expected: schema.len(),
            found,
        }
        .fail();
    }

    validation::check_length(profile).context(error::ValidationSnafu)?;
    validation::check_value_type(profile).context(error::ValidationSnafu)?;
    (codec.encode)(profile)
}

/// Decode an encoded profile into a populated [`ProfileInfo`].
///
/// The input may also be a complete seal;
/// the feature loop stops at the signature tag.
/// Decoded values are checked against the schema invariants
/// before the profile is returned.
pub fn decode_profile(data: &[u8]) -> Result<ProfileInfo> {
    let decoded_header = header::decode_header(data).context(error::HeaderSnafu)?;
    let codec = codec_for(decoded_header.profile_type)?;
    let profile = (codec.decode)(data, decoded_header)?;
    validation::check_length(&profile).context(error::ValidationSnafu)?;
    validation::check_value_type(&profile).context(error::ValidationSnafu)?;
    Ok(profile)
}

impl std::fmt::Debug for ProfileCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCodec")
            .field("crypto", &self.crypto)
            .finish()
    }
}
