#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]
//! Wire format primitives for digital seals.
//!
//! This crate implements the byte-level codecs the profile layer is built
//! on: the C40 text compression shared by all alphanumeric fields,
//! the DER style length tags framing variable-length features,
//! the 3-byte packed date, and the fixed-layout seal header.
//! It also provides [`buffer::SealWriter`] and [`buffer::SealCursor`],
//! the append-only sink and bounds-checked cursor
//! every encoder and decoder in the workspace goes through,
//! and the seal assembly routines splitting a signed seal
//! into its encoded-profile and signature parts.
//!
//! Every multi-byte quantity on the wire is big-endian.

pub mod buffer;
pub mod c40;
pub mod date;
pub mod header;
pub mod length;
pub mod seal;

pub use crate::buffer::{SealCursor, SealWriter};

/// The tag byte marking the signature section of a seal.
pub const SIGNATURE_TAG: u8 = 0xFF;

/// The magic constant opening every seal header.
pub const MAGIC: u8 = 0xDC;
