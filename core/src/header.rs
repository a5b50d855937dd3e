//! The decoded form of a seal header.

use crate::date::Date;

/// Header information common to every profile.
///
/// The header identifies the issuing state, the signer and its certificate,
/// and carries the document issue and signature creation dates.
/// A freshly created template has empty strings and unset dates;
/// all fields must be populated before encoding
/// (see [`check_header`](crate::validation::check_header)).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Issuing country code, 1 to 3 uppercase letters.
    ///
    /// On the wire the code is right-padded with `<` to three characters;
    /// decoding returns the padded form.
    pub issuing_country: String,
    /// Signer country code, exactly 2 uppercase letters.
    pub signer_country: String,
    /// Signer identifier, exactly 2 alphanumeric characters.
    pub signer_id: String,
    /// Certificate reference, alphanumeric.
    ///
    /// Legacy (version `0x02`) headers fix the length at 5 characters;
    /// current (version `0x03`) headers allow 1 to 99 characters.
    pub certificate_ref: String,
    /// Document issue date.
    pub issue_date: Option<Date>,
    /// Signature creation date.
    pub signature_date: Option<Date>,
}

impl HeaderInfo {
    /// Create an empty header to be filled in before encoding.
    pub fn new() -> Self {
        HeaderInfo::default()
    }
}
