//! Shared feature framing helpers used by the per-profile codecs.
//!
//! Two framings exist on the wire. Profiles introduced with the current
//! header version frame every feature as `tag || DER length tag || value`.
//! The arrival attestation and social insurance card profiles predate the
//! DER framing and store the length as a single raw byte; that asymmetry
//! is part of the wire format and is preserved here exactly.

use crate::error::{C40Snafu, LengthSnafu, Result, TruncatedSnafu};
use seal_encoding::{c40, length, SealCursor, SealWriter, SIGNATURE_TAG};
use snafu::ResultExt;

/// One feature block as read from the wire.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawFeature<'a> {
    /// The feature tag byte.
    pub tag: u8,
    /// The value bytes.
    pub data: &'a [u8],
}

/// Append a C40-compressed feature framed with a DER length tag.
pub(crate) fn put_c40_feature(writer: &mut SealWriter, tag: u8, text: &str) -> Result<()> {
    let encoded = c40::encode(text).context(C40Snafu)?;
    writer.put_u8(tag);
    writer.put_slice(&length::encode_length(encoded.len()).context(LengthSnafu)?);
    writer.put_slice(&encoded);
    Ok(())
}

/// Append a C40-compressed feature with the legacy single-byte length.
pub(crate) fn put_c40_feature_legacy(writer: &mut SealWriter, tag: u8, text: &str) -> Result<()> {
    let encoded = c40::encode(text).context(C40Snafu)?;
    writer.put_u8(tag);
    writer.put_u8(encoded.len() as u8);
    writer.put_slice(&encoded);
    Ok(())
}

/// Append verbatim UTF-8 bytes with the legacy single-byte length.
pub(crate) fn put_utf8_feature_legacy(writer: &mut SealWriter, tag: u8, text: &str) {
    writer.put_u8(tag);
    writer.put_u8(text.len() as u8);
    writer.put_slice(text.as_bytes());
}

/// Read the next feature framed with a DER length tag.
///
/// Returns `None` at the end of the profile region or at the signature tag.
pub(crate) fn next_feature_der<'a>(
    cursor: &mut SealCursor<'a>,
) -> Result<Option<RawFeature<'a>>> {
    if cursor.at_end() || cursor.peek_u8() == Some(SIGNATURE_TAG) {
        return Ok(None);
    }
    let tag = cursor.read_u8().context(TruncatedSnafu)?;
    let len = length::decode_length(cursor).context(LengthSnafu)?;
    let data = cursor.read_slice(len).context(TruncatedSnafu)?;
    Ok(Some(RawFeature { tag, data }))
}

/// Read the next feature framed with the legacy single-byte length.
///
/// Returns `None` at the end of the profile region or at the signature tag.
pub(crate) fn next_feature_legacy<'a>(
    cursor: &mut SealCursor<'a>,
) -> Result<Option<RawFeature<'a>>> {
    if cursor.at_end() || cursor.peek_u8() == Some(SIGNATURE_TAG) {
        return Ok(None);
    }
    let tag = cursor.read_u8().context(TruncatedSnafu)?;
    let len = usize::from(cursor.read_u8().context(TruncatedSnafu)?);
    let data = cursor.read_slice(len).context(TruncatedSnafu)?;
    Ok(Some(RawFeature { tag, data }))
}
