//! Crate-level error type for profile encoding and decoding.

use seal_core::profile::ProfileType;
use seal_core::validation;
use seal_encoding::{buffer, c40, date, header, length};
use snafu::{Backtrace, Snafu};

/// An error type covering every way a profile can fail to encode or decode.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// The profile type has no registered codec.
    #[snafu(display("profile type {} is not supported", profile_type))]
    UnsupportedProfileType {
        /// the unregistered profile type
        profile_type: ProfileType,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The input feature list does not cover the profile schema.
    #[snafu(display(
        "invalid amount of mandatory features: expected {}, found {}",
        expected,
        found
    ))]
    InvalidFeatureCount {
        /// the number of schema features
        expected: usize,
        /// the number of schema features present in the input
        found: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A feature carries schema data differing from the registry schema.
    #[snafu(display("feature data of `{}` does not match the profile", name))]
    FeatureDataDoesNotMatchProfile {
        /// the feature name
        name: String,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A required feature is missing from the input or the wire bytes.
    #[snafu(display("required feature not found in {} profile", profile_type))]
    RequiredFeatureNotFound {
        /// the profile being processed
        profile_type: ProfileType,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A feature value was rejected for the duration-of-stay sentinel rule.
    #[snafu(display("wrong input for {}", name))]
    WrongInput {
        /// the feature name
        name: String,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A feature or header value failed validation.
    #[snafu(display("profile data failed validation"))]
    Validation {
        /// The underlying validation error.
        #[snafu(backtrace)]
        source: validation::Error,
    },
    /// The header could not be encoded or decoded.
    #[snafu(display("header conversion failed"))]
    Header {
        /// The underlying header codec error.
        #[snafu(backtrace)]
        source: header::Error,
    },
    /// A feature value failed C40 conversion.
    #[snafu(display("feature C40 conversion failed"))]
    C40 {
        /// The underlying C40 error.
        #[snafu(backtrace)]
        source: c40::Error,
    },
    /// A feature length tag could not be written or read.
    #[snafu(display("feature length tag conversion failed"))]
    Length {
        /// The underlying length tag error.
        #[snafu(backtrace)]
        source: length::Error,
    },
    /// A date-valued feature could not be converted.
    #[snafu(display("feature date conversion failed"))]
    DateCodec {
        /// The underlying date codec error.
        #[snafu(backtrace)]
        source: date::Error,
    },
    /// The profile bytes ended inside a feature block.
    #[snafu(display("encoded profile is truncated"))]
    Truncated {
        /// The underlying cursor error.
        #[snafu(backtrace)]
        source: buffer::Error,
    },
}

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An invalid-value-length validation error for the named field.
pub(crate) fn value_length(name: impl Into<String>) -> Error {
    Error::Validation {
        source: validation::ValueLengthSnafu { name: name.into() }.build(),
    }
}

/// An invalid-value-type validation error for the named field.
pub(crate) fn value_type(name: impl Into<String>) -> Error {
    Error::Validation {
        source: validation::ValueTypeSnafu { name: name.into() }.build(),
    }
}
