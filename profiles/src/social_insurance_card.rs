//! The social insurance card profile codec.
//!
//! The social insurance number is C40-compressed; the three name
//! features are verbatim UTF-8. The name at birth is left off the wire
//! entirely when it equals the surname, and a decoder reading a profile
//! without it reports it equal to the surname. Like the arrival
//! attestation, this profile uses single raw length bytes.

use crate::codec::{next_feature_legacy, put_c40_feature_legacy, put_utf8_feature_legacy};
use crate::crypto;
use crate::error::{self, C40Snafu, Error, HeaderSnafu, RequiredFeatureNotFoundSnafu, Result};
use seal_core::profile::{FeatureInfo, FeatureType, FeatureValue, ProfileInfo, ProfileType};
use seal_encoding::header::{encode_header, DecodedHeader};
use seal_encoding::{c40, SealCursor, SealWriter};
use snafu::ResultExt;

const TAG_SIN: u8 = 0x01;
const TAG_SURNAME: u8 = 0x02;
const TAG_FIRST_NAME: u8 = 0x03;
const TAG_NAME_AT_BIRTH: u8 = 0x04;

/// Features decoded from the wire; the name at birth may be implied.
const REQUIRED_ON_WIRE: usize = 3;

pub(crate) const NAME_SIN: &str = "Social insurance number";
pub(crate) const NAME_SURNAME: &str = "Surname";
pub(crate) const NAME_FIRST_NAME: &str = "First name";
pub(crate) const NAME_NAME_AT_BIRTH: &str = "Name at birth";

pub(crate) fn features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo::new(NAME_SIN, 12, 12, true, FeatureType::Alphanumeric),
        FeatureInfo::new(NAME_SURNAME, 1, 90, true, FeatureType::BinaryUtf8),
        FeatureInfo::new(NAME_FIRST_NAME, 1, 90, true, FeatureType::BinaryUtf8),
        FeatureInfo::new(NAME_NAME_AT_BIRTH, 1, 90, true, FeatureType::BinaryUtf8),
    ]
}

pub(crate) fn encode(profile: &ProfileInfo) -> Result<Vec<u8>> {
    let sin = profile
        .feature(NAME_SIN)
        .ok_or_else(|| missing(profile.profile_type))?;
    let surname = profile
        .feature(NAME_SURNAME)
        .ok_or_else(|| missing(profile.profile_type))?;
    let first_name = profile
        .feature(NAME_FIRST_NAME)
        .ok_or_else(|| missing(profile.profile_type))?;
    let name_at_birth = profile
        .feature(NAME_NAME_AT_BIRTH)
        .ok_or_else(|| missing(profile.profile_type))?;

    let mut writer = SealWriter::new();
    writer.put_slice(&encode_header(profile.profile_type, &profile.header).context(HeaderSnafu)?);
    put_c40_feature_legacy(&mut writer, TAG_SIN, sin.value_str())?;
    put_utf8_feature_legacy(&mut writer, TAG_SURNAME, surname.value_str());
    put_utf8_feature_legacy(&mut writer, TAG_FIRST_NAME, first_name.value_str());
    if name_at_birth.value_str() != surname.value_str() {
        put_utf8_feature_legacy(&mut writer, TAG_NAME_AT_BIRTH, name_at_birth.value_str());
    }
    Ok(writer.into_bytes())
}

fn utf8_value(data: &[u8], name: &str) -> Result<String> {
    match std::str::from_utf8(data) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Err(error::value_type(name)),
    }
}

pub(crate) fn decode(data: &[u8], header: DecodedHeader) -> Result<ProfileInfo> {
    let mut profile = ProfileInfo {
        profile_type: ProfileType::SocialInsuranceCard,
        header: header.info,
        features: features(),
        crypto: crypto::DEFAULT,
    };

    let mut cursor = SealCursor::with_position(data, header.byte_len);
    let mut decoded_required = 0;
    while let Some(feature) = next_feature_legacy(&mut cursor)? {
        match feature.tag {
            TAG_SIN => {
                let sin = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_SIN, FeatureValue::Text(sin));
                decoded_required += 1;
            }
            TAG_SURNAME => {
                let surname = utf8_value(feature.data, NAME_SURNAME)?;
                profile.set_value(NAME_SURNAME, FeatureValue::Text(surname));
                decoded_required += 1;
            }
            TAG_FIRST_NAME => {
                let first_name = utf8_value(feature.data, NAME_FIRST_NAME)?;
                profile.set_value(NAME_FIRST_NAME, FeatureValue::Text(first_name));
                decoded_required += 1;
            }
            TAG_NAME_AT_BIRTH => {
                let name_at_birth = utf8_value(feature.data, NAME_NAME_AT_BIRTH)?;
                profile.set_value(NAME_NAME_AT_BIRTH, FeatureValue::Text(name_at_birth));
            }
            tag => {
                tracing::debug!(
                    "skipping unknown social insurance card feature tag {:#04X}",
                    tag
                );
            }
        }
    }

    if decoded_required != REQUIRED_ON_WIRE {
        return Err(missing(ProfileType::SocialInsuranceCard));
    }
    // an omitted name at birth is implied equal to the surname
    if profile
        .feature(NAME_NAME_AT_BIRTH)
        .map_or(true, |f| f.value.is_none())
    {
        let surname = profile
            .feature(NAME_SURNAME)
            .map(|f| f.value_str().to_string())
            .unwrap_or_default();
        profile.set_value(NAME_NAME_AT_BIRTH, FeatureValue::Text(surname));
    }
    Ok(profile)
}

fn missing(profile_type: ProfileType) -> Error {
    RequiredFeatureNotFoundSnafu { profile_type }.build()
}
