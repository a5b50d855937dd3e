//! The address sticker (ID card) and place-of-residence sticker
//! (passport) profile codecs.
//!
//! Both stickers carry the same three required features, C40-compressed
//! with DER length tags: the document number, the official municipality
//! code number and the postal code. Only the header discriminator and
//! the crypto declarations tell the two apart, so one codec serves both.

use crate::codec::{next_feature_der, put_c40_feature};
use crate::crypto;
use crate::error::{C40Snafu, Error, HeaderSnafu, RequiredFeatureNotFoundSnafu, Result};
use seal_core::profile::{FeatureInfo, FeatureType, FeatureValue, ProfileInfo, ProfileType};
use seal_encoding::header::{encode_header, DecodedHeader};
use seal_encoding::{c40, SealCursor, SealWriter};
use snafu::ResultExt;

const TAG_DOCUMENT_NUMBER: u8 = 0x01;
const TAG_MUNICIPALITY_CODE: u8 = 0x02;
const TAG_POSTAL_CODE: u8 = 0x03;

pub(crate) const NAME_DOCUMENT_NUMBER: &str = "Document number";
pub(crate) const NAME_MUNICIPALITY_CODE: &str = "Official municipality code number";
pub(crate) const NAME_POSTAL_CODE: &str = "Postal code";

pub(crate) fn features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo::new(NAME_DOCUMENT_NUMBER, 9, 9, true, FeatureType::Alphanumeric),
        FeatureInfo::new(NAME_MUNICIPALITY_CODE, 8, 8, true, FeatureType::Numeric),
        FeatureInfo::new(NAME_POSTAL_CODE, 5, 5, true, FeatureType::Numeric),
    ]
}

pub(crate) fn encode(profile: &ProfileInfo) -> Result<Vec<u8>> {
    let document_number = profile
        .feature(NAME_DOCUMENT_NUMBER)
        .ok_or_else(|| missing(profile.profile_type))?;
    let municipality_code = profile
        .feature(NAME_MUNICIPALITY_CODE)
        .ok_or_else(|| missing(profile.profile_type))?;
    let postal_code = profile
        .feature(NAME_POSTAL_CODE)
        .ok_or_else(|| missing(profile.profile_type))?;

    let mut writer = SealWriter::new();
    writer.put_slice(&encode_header(profile.profile_type, &profile.header).context(HeaderSnafu)?);
    put_c40_feature(&mut writer, TAG_DOCUMENT_NUMBER, document_number.value_str())?;
    put_c40_feature(
        &mut writer,
        TAG_MUNICIPALITY_CODE,
        municipality_code.value_str(),
    )?;
    put_c40_feature(&mut writer, TAG_POSTAL_CODE, postal_code.value_str())?;
    Ok(writer.into_bytes())
}

pub(crate) fn decode(data: &[u8], header: DecodedHeader) -> Result<ProfileInfo> {
    let profile_type = header.profile_type;
    let mut profile = ProfileInfo {
        profile_type,
        header: header.info,
        features: features(),
        crypto: crypto::STICKER,
    };

    let mut cursor = SealCursor::with_position(data, header.byte_len);
    let mut decoded_required = 0;
    while let Some(feature) = next_feature_der(&mut cursor)? {
        match feature.tag {
            TAG_DOCUMENT_NUMBER => {
                let number = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_DOCUMENT_NUMBER, FeatureValue::Text(number));
                decoded_required += 1;
            }
            TAG_MUNICIPALITY_CODE => {
                let code = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_MUNICIPALITY_CODE, FeatureValue::Text(code));
                decoded_required += 1;
            }
            TAG_POSTAL_CODE => {
                let code = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_POSTAL_CODE, FeatureValue::Text(code));
                decoded_required += 1;
            }
            tag => {
                tracing::debug!("skipping unknown sticker feature tag {:#04X}", tag);
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
