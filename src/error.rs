//! Error types for Catman decoding.
//!
//! This module defines the [`Error`] enum which represents all possible failures
//! that can occur while decoding a Catman file.
//!
//! # Example
//!
//! ```no_run
//! use catman_rs::{CatmanFile, Error, Result};
//!
//! fn load(path: &str) -> Result<()> {
//!     match CatmanFile::from_file(path) {
//!         Ok(file) => {
//!             println!("Loaded {} channels", file.channels().len());
//!             Ok(())
//!         }
//!         Err(Error::FormatVersion { found }) => {
//!             eprintln!("Catman version {found} is too old");
//!             Err(Error::FormatVersion { found })
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

use crate::blocks::VERSION_FLOOR;

/// Errors that can occur while decoding a Catman file.
#[derive(Debug)]
pub enum Error {
    /// The file version is at or below the oldest supported revision.
    ///
    /// Raised directly after the leading version field is read; nothing past
    /// that field has been touched.
    FormatVersion {
        /// Version number found in the file
        found: i16,
    },

    /// The stream ended before a field could be read completely.
    Truncated {
        /// Absolute stream offset where the failed read started
        offset: u64,
        /// Number of bytes the read required
        expected: usize,
        /// Number of bytes that were still available
        actual: usize,
    },

    /// A caller supplied bound does not fit a channel's declared length.
    ///
    /// Both the head limit and the sampling budget must be strictly smaller
    /// than the length of every channel in the file.
    Range {
        /// Name of the offending parameter (`"head limit"` or `"sample budget"`)
        parameter: &'static str,
        /// The value requested by the caller
        requested: usize,
        /// Position of the channel in header order
        channel: usize,
        /// Declared sample count of that channel
        length: usize,
    },

    /// A count, length or offset field decoded to a negative value.
    InvalidCount {
        /// Field that carried the value
        field: &'static str,
        /// Raw decoded value
        value: i64,
    },

    /// No channel matched a lookup by name or id.
    ChannelNotFound(String),

    /// The header index could not be converted to or from JSON.
    IndexSerialization(String),

    /// An I/O error occurred while opening or positioning the stream.
    IOError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FormatVersion { found } => write!(
                f,
                "Unsupported Catman version: expected > {VERSION_FLOOR}, found {found}"
            ),
            Error::Truncated {
                offset,
                expected,
                actual,
            } => write!(
                f,
                "Stream truncated at offset {offset}: need {expected} bytes, got {actual}"
            ),
            Error::Range {
                parameter,
                requested,
                channel,
                length,
            } => write!(
                f,
                "{parameter} {requested} must be smaller than the length of channel {channel} ({length})"
            ),
            Error::InvalidCount { field, value } => {
                write!(f, "Invalid {field}: {value} is negative")
            }
            Error::ChannelNotFound(name) => write!(f, "Channel not found: {name}"),
            Error::IndexSerialization(s) => write!(f, "Index serialization error: {s}"),
            Error::IOError(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

/// A specialized Result type for Catman operations.
pub type Result<T> = core::result::Result<T, Error>;
