#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]
//! This is the core digital seal library,
//! containing the data structures shared by the encoding and profile layers:
//! the profile record with its header and document features,
//! the packed calendar date,
//! the cryptographic algorithm declarations,
//! and the validation routines which every profile must pass
//! before it is put on the wire.
//!
//! A *seal* is the complete signed byte sequence printed on a document;
//! a *profile* is the seal without its signature suffix.
//! The types in this crate describe the decoded, in-memory form of a profile.

pub mod crypto;
pub mod date;
pub mod header;
pub mod profile;
pub mod validation;

pub use crate::crypto::{CryptoAlgo, CryptoInfo};
pub use crate::date::Date;
pub use crate::header::HeaderInfo;
pub use crate::profile::{FeatureInfo, FeatureType, FeatureValue, ProfileInfo, ProfileType};
