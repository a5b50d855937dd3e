//! The visa (type B) profile codec.
//!
//! Five required features: the machine readable zone, the three
//! duration-of-stay components and the passport number. Only the first 64
//! MRZ characters are put on the wire; decoding restores the eight
//! trailing filler characters. The duration of stay is written as one
//! 3-byte block of `(day, month, year)`, where the all-`0xFF` triple
//! means "unknown" and the all-`0xFE` triple marks an air transit visa.

use crate::codec::{next_feature_der, put_c40_feature};
use crate::crypto;
use crate::error::{
    self, C40Snafu, Error, HeaderSnafu, RequiredFeatureNotFoundSnafu, Result, WrongInputSnafu,
};
use seal_core::profile::{FeatureInfo, FeatureType, FeatureValue, ProfileInfo, ProfileType};
use seal_encoding::header::{encode_header, DecodedHeader};
use seal_encoding::{c40, SealCursor, SealWriter};
use snafu::ResultExt;

const TAG_MRZ: u8 = 0x02;
const TAG_DURATION_OF_STAY: u8 = 0x04;
const TAG_PASSPORT_NUMBER: u8 = 0x05;

/// The number of MRZ characters carried on the wire (visa type B).
const MRZ_ENCODED_CHARS: usize = 64;
/// The full MRZ length presented to callers.
const MRZ_CHARS: usize = 72;

pub(crate) const NAME_MRZ: &str = "Machine readable zone";
pub(crate) const NAME_DURATION_DAY: &str = "Duration of stay (Day)";
pub(crate) const NAME_DURATION_MONTH: &str = "Duration of stay (Month)";
pub(crate) const NAME_DURATION_YEAR: &str = "Duration of stay (Year)";
pub(crate) const NAME_PASSPORT_NUMBER: &str = "Passport number";

pub(crate) fn features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo::new(NAME_MRZ, 72, 72, true, FeatureType::Alphanumeric),
        FeatureInfo::new(NAME_DURATION_DAY, 1, 1, true, FeatureType::Integer),
        FeatureInfo::new(NAME_DURATION_MONTH, 1, 1, true, FeatureType::Integer),
        FeatureInfo::new(NAME_DURATION_YEAR, 1, 1, true, FeatureType::Integer),
        FeatureInfo::new(NAME_PASSPORT_NUMBER, 9, 9, true, FeatureType::Alphanumeric),
    ]
}

fn duration_block(day: u32, month: u32, year: u32) -> Result<[u8; 3]> {
    if day == 0xFF && month == 0xFF && year == 0xFF {
        return Ok([0xFF, 0xFF, 0xFF]);
    }
    if day == 0xFE && month == 0xFE && year == 0xFE {
        // air transit visa
        return Ok([0xFE, 0xFE, 0xFE]);
    }
    if day == 0xFF || month == 0xFF || year == 0xFF {
        return WrongInputSnafu {
            name: "duration of stay",
        }
        .fail();
    }
    Ok([day as u8, month as u8, year as u8])
}

pub(crate) fn encode(profile: &ProfileInfo) -> Result<Vec<u8>> {
    let mrz = profile
        .feature(NAME_MRZ)
        .ok_or_else(|| missing(profile.profile_type))?;
    let passport = profile
        .feature(NAME_PASSPORT_NUMBER)
        .ok_or_else(|| missing(profile.profile_type))?;
    let day = profile
        .feature(NAME_DURATION_DAY)
        .map_or(0, |f| f.value_int());
    let month = profile
        .feature(NAME_DURATION_MONTH)
        .map_or(0, |f| f.value_int());
    let year = profile
        .feature(NAME_DURATION_YEAR)
        .map_or(0, |f| f.value_int());

    let mut writer = SealWriter::new();
    writer.put_slice(&encode_header(profile.profile_type, &profile.header).context(HeaderSnafu)?);

    // visa type B: only the first 64 MRZ characters are encoded
    let mrz_cut: String = mrz.value_str().chars().take(MRZ_ENCODED_CHARS).collect();
    put_c40_feature(&mut writer, TAG_MRZ, &mrz_cut)?;

    let duration = duration_block(day, month, year)?;
    writer.put_u8(TAG_DURATION_OF_STAY);
    writer.put_u8(duration.len() as u8);
    writer.put_slice(&duration);

    put_c40_feature(&mut writer, TAG_PASSPORT_NUMBER, passport.value_str())?;
    Ok(writer.into_bytes())
}

pub(crate) fn decode(data: &[u8], header: DecodedHeader) -> Result<ProfileInfo> {
    let mut profile = ProfileInfo {
        profile_type: ProfileType::Visa,
        header: header.info,
        features: features(),
        crypto: crypto::VISA,
    };

    let mut cursor = SealCursor::with_position(data, header.byte_len);
    let mut decoded_required = 0;
    while let Some(feature) = next_feature_der(&mut cursor)? {
        match feature.tag {
            TAG_MRZ => {
                let mut mrz: String = c40::decode(feature.data)
                    .context(C40Snafu)?
                    .chars()
                    .take(MRZ_ENCODED_CHARS)
                    .collect();
                while mrz.len() < MRZ_CHARS {
                    mrz.push('<');
                }
                profile.set_value(NAME_MRZ, FeatureValue::Text(mrz));
                decoded_required += 1;
            }
            TAG_DURATION_OF_STAY => {
                if feature.data.len() != 3 {
                    return Err(error::value_length("duration of stay"));
                }
                profile.set_int(NAME_DURATION_DAY, u32::from(feature.data[0]));
                profile.set_int(NAME_DURATION_MONTH, u32::from(feature.data[1]));
                profile.set_int(NAME_DURATION_YEAR, u32::from(feature.data[2]));
                decoded_required += 3;
            }
            TAG_PASSPORT_NUMBER => {
                let number = c40::decode(feature.data).context(C40Snafu)?;
                profile.set_value(NAME_PASSPORT_NUMBER, FeatureValue::Text(number));
                decoded_required += 1;
            }
            tag => {
                tracing::debug!("skipping unknown visa feature tag {:#04X}", tag);
            }
        }
    }

    if decoded_required != profile.features.len() {
        return Err(missing(ProfileType::Visa));
    }
    Ok(profile)
}

fn missing(profile_type: ProfileType) -> Error {
    RequiredFeatureNotFoundSnafu { profile_type }.build()
}
