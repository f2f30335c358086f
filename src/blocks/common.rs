// blocks/common.rs
//! Format constants and small helpers shared by the header decoders.
//!
//! This module provides:
//! - The fixed layout constants of the Catman container
//! - [`TextEncoding`]: the single-byte character set used by every text field
//! - Count validation for length and count fields read from the file

use crate::{Error, Result};

/// Highest version that is rejected. Only files with `version > VERSION_FLOOR`
/// (Catman 5.0 and later) are decoded.
pub const VERSION_FLOOR: i16 = 5010;

/// Number of length-prefixed text slots in the legacy reserved area of the
/// file header.
pub const RESERVED_SLOT_COUNT: usize = 32;

/// Size of one stored sample in bytes. Every sample is a native `f64`.
pub const SAMPLE_SIZE: u64 = 8;

/// Character encoding of all text fields. Fixed, never detected.
pub const TEXT_ENCODING: TextEncoding = TextEncoding::Latin1;

/// Single-byte-per-character encodings understood by the text reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextEncoding {
    /// ISO-8859-1. Every byte maps to the code point of the same value.
    Latin1,
}

impl TextEncoding {
    /// Decode `bytes` into a `String`. Decoding never fails because every
    /// byte value has a mapping.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

impl core::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TextEncoding::Latin1 => write!(f, "latin-1"),
        }
    }
}

/// Convert a signed count read from the file into a `usize`.
///
/// # Arguments
/// * `field` - Name of the field, used in the error message.
/// * `value` - Raw decoded value.
///
/// # Returns
/// The count, or [`Error::InvalidCount`] when `value` is negative.
#[inline]
pub fn to_count(field: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::InvalidCount { field, value })
}

/// Convert a signed byte offset read from the file into a `u64`.
#[inline]
pub fn to_offset(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::InvalidCount { field, value })
}
