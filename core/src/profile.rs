//! Profile records and their document features.
//!
//! A profile couples a [`HeaderInfo`] with an ordered list of
//! [`FeatureInfo`] entries and the crypto declarations for its type.
//! The feature list is fixed per profile type;
//! only the values are filled in by the caller (before encoding)
//! or by the decoder (after decoding).

use crate::crypto::CryptoInfo;
use crate::date::Date;
use crate::header::HeaderInfo;
use std::fmt;

/// The profile types supported by the standard.
///
/// Each variant maps bijectively to a fixed
/// `(header version, feature reference, document type)` triple
/// which discriminates the profile on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileType {
    /// Visa (type B).
    Visa,
    /// Arrival attestation document.
    ArrivalAttestation,
    /// Social insurance card.
    SocialInsuranceCard,
    /// Residence permit.
    ResidencePermit,
    /// Residence permit supplementary sheet.
    SupplementarySheet,
    /// Address sticker for ID card.
    AddressStickerIdCard,
    /// Place of residence sticker for passport.
    PlaceOfResidenceStickerPassport,
}

impl ProfileType {
    /// All supported profile types, in registry order.
    pub const ALL: [ProfileType; 7] = [
        ProfileType::Visa,
        ProfileType::ArrivalAttestation,
        ProfileType::SocialInsuranceCard,
        ProfileType::ResidencePermit,
        ProfileType::SupplementarySheet,
        ProfileType::AddressStickerIdCard,
        ProfileType::PlaceOfResidenceStickerPassport,
    ];

    /// The human readable profile name.
    pub fn name(self) -> &'static str {
        match self {
            ProfileType::Visa => "Visa",
            ProfileType::ArrivalAttestation => "Arrival attestation document",
            ProfileType::SocialInsuranceCard => "Social insurance card",
            ProfileType::ResidencePermit => "Residence permit",
            ProfileType::SupplementarySheet => "Residence permit supplementary sheet",
            ProfileType::AddressStickerIdCard => "Address sticker for ID card",
            ProfileType::PlaceOfResidenceStickerPassport => {
                "Place of residence sticker for Passport"
            }
        }
    }

    /// The `(header version, feature reference, document type)` triple
    /// identifying this profile in an encoded header.
    pub fn discriminator(self) -> (u8, u8, u8) {
        match self {
            ProfileType::ArrivalAttestation => (0x02, 0xFD, 0x02),
            ProfileType::SocialInsuranceCard => (0x02, 0xFC, 0x04),
            ProfileType::Visa => (0x03, 0x5D, 0x01),
            ProfileType::ResidencePermit => (0x03, 0xFB, 0x06),
            ProfileType::SupplementarySheet => (0x03, 0xFA, 0x06),
            ProfileType::AddressStickerIdCard => (0x03, 0xF9, 0x08),
            ProfileType::PlaceOfResidenceStickerPassport => (0x03, 0xF8, 0x0A),
        }
    }

    /// The header version byte this profile is encoded with.
    pub fn header_version(self) -> u8 {
        self.discriminator().0
    }

    /// Look up the profile type for a header discriminator triple.
    ///
    /// Returns `None` for any triple not fixed by the standard.
    pub fn from_discriminator(version: u8, feature_ref: u8, document_type: u8) -> Option<Self> {
        ProfileType::ALL
            .iter()
            .copied()
            .find(|ty| ty.discriminator() == (version, feature_ref, document_type))
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value type of a document feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    /// Characters in `[0-9A-Z<]`, C40-compressed on the wire.
    Alphanumeric,
    /// Decimal digits only, C40-compressed on the wire.
    Numeric,
    /// Unsigned integer, written big-endian.
    Integer,
    /// A calendar date, packed into three bytes.
    Date,
    /// Raw bytes.
    Binary,
    /// Well-formed UTF-8 text, written verbatim.
    BinaryUtf8,
}

/// The value carried by a populated feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    /// Text value, for alphanumeric, numeric, binary and UTF-8 features.
    Text(String),
    /// Integer value.
    Integer(u32),
    /// Date value.
    Date(Date),
}

/// A document feature: its schema entry plus an optional value.
///
/// The schema part (name, length bounds, required flag, value type)
/// comes from the profile registry and must not be altered;
/// encoding cross-checks it against the registry copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfo {
    /// Feature name as listed by the profile registry.
    pub name: &'static str,
    /// Minimal value length in bytes (characters for text values).
    pub min_length: usize,
    /// Maximal value length in bytes (characters for text values).
    pub max_length: usize,
    /// Whether the feature must be present in a complete profile.
    pub required: bool,
    /// The feature value type.
    pub value_type: FeatureType,
    /// The value, if populated.
    pub value: Option<FeatureValue>,
}

impl FeatureInfo {
    /// Create an unpopulated schema entry.
    pub fn new(
        name: &'static str,
        min_length: usize,
        max_length: usize,
        required: bool,
        value_type: FeatureType,
    ) -> Self {
        FeatureInfo {
            name,
            min_length,
            max_length,
            required,
            value_type,
            value: None,
        }
    }

    /// The text value, or `""` if the feature is unpopulated or not textual.
    pub fn value_str(&self) -> &str {
        match &self.value {
            Some(FeatureValue::Text(s)) => s,
            _ => "",
        }
    }

    /// The integer value, or `0` if the feature is unpopulated or not an integer.
    pub fn value_int(&self) -> u32 {
        match self.value {
            Some(FeatureValue::Integer(v)) => v,
            _ => 0,
        }
    }

    /// The date value, if populated.
    pub fn value_date(&self) -> Option<Date> {
        match self.value {
            Some(FeatureValue::Date(d)) => Some(d),
            _ => None,
        }
    }
}

/// A complete profile record: type, header, features and crypto metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    /// The profile type.
    pub profile_type: ProfileType,
    /// The header information.
    pub header: HeaderInfo,
    /// The document features, in the schema's declaration order.
    pub features: Vec<FeatureInfo>,
    /// The algorithms this profile is signed with.
    pub crypto: CryptoInfo,
}

impl ProfileInfo {
    /// Find a feature by name.
    pub fn feature(&self, name: &str) -> Option<&FeatureInfo> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Find a feature by name, mutably.
    pub fn feature_mut(&mut self, name: &str) -> Option<&mut FeatureInfo> {
        self.features.iter_mut().find(|f| f.name == name)
    }

    /// Set the value of the named feature.
    ///
    /// Returns `false` if the profile has no feature of that name.
    pub fn set_value(&mut self, name: &str, value: FeatureValue) -> bool {
        match self.feature_mut(name) {
            Some(feature) => {
                feature.value = Some(value);
                true
            }
            None => false,
        }
    }

    /// Set the named feature to a text value.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.set_value(name, FeatureValue::Text(value.into()))
    }

    /// Set the named feature to an integer value.
    pub fn set_int(&mut self, name: &str, value: u32) -> bool {
        self.set_value(name, FeatureValue::Integer(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_are_bijective() {
        for ty in ProfileType::ALL {
            let (v, f, d) = ty.discriminator();
            assert_eq!(ProfileType::from_discriminator(v, f, d), Some(ty));
        }
        assert_eq!(ProfileType::from_discriminator(0x03, 0xFD, 0x02), None);
        assert_eq!(ProfileType::from_discriminator(0x02, 0xFB, 0x06), None);
        assert_eq!(ProfileType::from_discriminator(0x04, 0x5D, 0x01), None);
    }

    #[test]
    fn feature_accessors_default_when_unpopulated() {
        let feature = FeatureInfo::new("Postal code", 5, 5, true, FeatureType::Numeric);
        assert_eq!(feature.value_str(), "");
        assert_eq!(feature.value_int(), 0);
        assert_eq!(feature.value_date(), None);
    }
}
