//! The arrival attestation document profile codec.
//!
//! Two required features, both C40-compressed: the machine readable zone
//! of the TD2-sized document and the ARZ number. This profile predates
//! the DER length tags; lengths are single raw bytes.

use crate::codec::{next_feature_legacy, put_c40_feature_legacy};
use crate::crypto;
use crate::error::{C40Snafu, Error, HeaderSnafu, RequiredFeatureNotFoundSnafu, Result};
use seal_core::profile::{FeatureInfo, FeatureType, FeatureValue, ProfileInfo, ProfileType};
use seal_encoding::header::{encode_header, DecodedHeader};
use seal_encoding::{c40, SealCursor, SealWriter};
use snafu::ResultExt;

const TAG_MRZ: u8 = 0x02;
const TAG_ARZ_NUMBER: u8 = 0x03;

pub(crate) const NAME_MRZ: &str = "Machine readable zone";
pub(crate) const NAME_ARZ_NUMBER: &str = "ARZ-number";

pub(crate) fn features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo::new(NAME_MRZ, 72, 72, true, FeatureType::Alphanumeric),
        FeatureInfo::new(NAME_ARZ_NUMBER, 12, 12, true, FeatureType::Alphanumeric),
    ]
}

pub(crate) fn encode(profile: &ProfileInfo) -> Result<Vec<u8>> {
    let mrz = profile
        .feature(NAME_MRZ)
        .ok_or_else(|| missing(profile.profile_type))?;
    let arz = profile
        .feature(NAME_ARZ_NUMBER)
        .ok_or_else(|| missing(profile.profile_type))?;

    let mut writer = SealWriter::new();
    writer.put_slice(&encode_header(profile.profile_type, &profile.header).context(HeaderSnafu)?);
    put_c40_feature_legacy(&mut writer, TAG_MRZ, mrz.value_str())?;
    put_c40_feature_legacy(&mut writer, TAG_ARZ_NUMBER, arz.value_str())?;
    Ok(writer.into_bytes())
}

pub(crate) fn decode(data: &[u8], header: DecodedHeader) -> Result<ProfileInfo> {
    let mut profile = ProfileInfo {
        profile_type: ProfileType::ArrivalAttestation,
        header: header.info,
        features: features(),
        crypto: crypto::DEFAULT,
    };

    let mut cursor = SealCursor::with_position(data, header.byte_len);
    let mut decoded_required = 0;
    while let Some(feature) = next_feature_legacy(&mut cursor)? {
        match feature.tag {
            TAG_MRZ => {
                let mrz = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_MRZ, FeatureValue::Text(mrz));
                decoded_required += 1;
            }
            TAG_ARZ_NUMBER => {
                let arz = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_ARZ_NUMBER, FeatureValue::Text(arz));
                decoded_required += 1;
            }
            tag => {
                tracing::debug!(
                    "skipping unknown arrival attestation feature tag {:#04X}",
                    tag
                );
            }
        }
    }

    if decoded_required != profile.features.len() {
        return Err(missing(ProfileType::ArrivalAttestation));
    }
    Ok(profile)
}

fn missing(profile_type: ProfileType) -> Error {
    RequiredFeatureNotFoundSnafu { profile_type }.build()
}
