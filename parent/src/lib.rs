//! # Seal-rs library
//!
//! This crate serves as a parent for the library crates of the seal-rs
//! project, a pure Rust codec for digital seals as defined by
//! BSI TR-03137.
//!
//! The modules are also available as crates which can be fetched
//! independently, in complement or as an alternative to using the `seal`
//! crate:
//!
//! - The [`core`] module holds the data structures the other crates rely
//!   on: profile records ([`ProfileInfo`](seal_core::ProfileInfo)) with
//!   their headers, features and crypto declarations, and the validated
//!   [`Date`](seal_core::Date) type.
//! - The [`encoding`] module holds the wire primitives: the C40 text
//!   compression, the DER style length tags, the packed date and header
//!   codecs, and the seal assembly routines.
//! - The [`profiles`] module holds the profile registry and the
//!   per-profile encoders and decoders.
//!
//! The most common operations are re-exported at the crate root:
//!
//! - [`profile_template`] and [`supported_profiles`] to enumerate and
//!   instantiate profiles,
//! - [`encode_profile`] and [`decode_profile`] for the profile codec,
//! - [`append_signature`] and [`parse_seal`] for seal assembly,
//! - [`decode_header`] to identify a seal without decoding its features.

pub use seal_core as core;
pub use seal_encoding as encoding;
pub use seal_profiles as profiles;

pub use seal_core::{
    CryptoAlgo, CryptoInfo, Date, FeatureInfo, FeatureType, FeatureValue, HeaderInfo, ProfileInfo,
    ProfileType,
};
pub use seal_encoding::header::decode_header;
pub use seal_encoding::seal::{append_signature, parse_seal};
pub use seal_profiles::{
    decode_profile, encode_profile, profile_template, supported_profiles, ProfileEntry,
};
