//! The residence permit profile codec.
//!
//! Two required features, both C40-compressed with DER length tags: the
//! machine readable zone of the TD2-sized document and the passport
//! number. The residence permit supplementary sheet shares this layout
//! byte for byte; only the header discriminator differs, so the same
//! codec serves both profiles.

use crate::codec::{next_feature_der, put_c40_feature};
use crate::crypto;
use crate::error::{C40Snafu, Error, HeaderSnafu, RequiredFeatureNotFoundSnafu, Result};
use seal_core::profile::{FeatureInfo, FeatureType, FeatureValue, ProfileInfo, ProfileType};
use seal_encoding::header::{encode_header, DecodedHeader};
use seal_encoding::{c40, SealCursor, SealWriter};
use snafu::ResultExt;

const TAG_MRZ: u8 = 0x02;
const TAG_PASSPORT_NUMBER: u8 = 0x03;

pub(crate) const NAME_MRZ: &str = "Machine readable zone";
pub(crate) const NAME_PASSPORT_NUMBER: &str = "Passport number";

pub(crate) fn features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo::new(NAME_MRZ, 72, 72, true, FeatureType::Alphanumeric),
        FeatureInfo::new(NAME_PASSPORT_NUMBER, 9, 9, true, FeatureType::Alphanumeric),
    ]
}

pub(crate) fn encode(profile: &ProfileInfo) -> Result<Vec<u8>> {
    let mrz = profile
        .feature(NAME_MRZ)
        .ok_or_else(|| missing(profile.profile_type))?;
    let passport = profile
        .feature(NAME_PASSPORT_NUMBER)
        .ok_or_else(|| missing(profile.profile_type))?;

    let mut writer = SealWriter::new();
    writer.put_slice(&encode_header(profile.profile_type, &profile.header).context(HeaderSnafu)?);
    put_c40_feature(&mut writer, TAG_MRZ, mrz.value_str())?;
    put_c40_feature(&mut writer, TAG_PASSPORT_NUMBER, passport.value_str())?;
    Ok(writer.into_bytes())
}

pub(crate) fn decode(data: &[u8], header: DecodedHeader) -> Result<ProfileInfo> {
    let profile_type = header.profile_type;
    let mut profile = ProfileInfo {
        profile_type,
        header: header.info,
        features: features(),
        crypto: crypto::DEFAULT,
    };

    let mut cursor = SealCursor::with_position(data, header.byte_len);
    let mut decoded_required = 0;
    while let Some(feature) = next_feature_der(&mut cursor)? {
        match feature.tag {
            TAG_MRZ => {
                let mrz = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_MRZ, FeatureValue::Text(mrz));
                decoded_required += 1;
            }
            TAG_PASSPORT_NUMBER => {
                let number = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_PASSPORT_NUMBER, FeatureValue::Text(number));
                decoded_required += 1;
            }
            tag => {
                tracing::debug!(
                    "skipping unknown residence permit feature tag {:#04X}",
                    tag
                );
            }
        }
    }

    if decoded_required != profile.features.len() {
        return Err(missing(profile_type));
    }
    Ok(profile)
}

fn missing(profile_type: ProfileType) -> Error {
    RequiredFeatureNotFoundSnafu { profile_type }.build()
}
