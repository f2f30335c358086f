#![forbid(unsafe_code)]

//! # catman-rs
//!
//! A Rust library for decoding Catman binary measurement files (version 5.0
//! and later).
//!
//! A Catman file is a file header, followed by one header per channel,
//! followed by the channels' sample blocks stored back to back. Every sample
//! is a native-endian `f64`, and all text fields are Latin-1.
//!
//! ## Features
//!
//! - **Full decode**: every sample of every channel
//! - **Header-only decode**: metadata without touching sample blocks
//! - **Head decode**: the first `k` samples of each channel
//! - **Strided sampling**: an evenly spaced subset of each channel, read by
//!   seeking to each picked sample instead of loading whole channels
//! - **Indexing**: a JSON-serializable header index for reading single
//!   channels later
//!
//! ## Quick Start
//!
//! ```no_run
//! use catman_rs::{CatmanFile, Result};
//!
//! fn main() -> Result<()> {
//!     let file = CatmanFile::from_file("measurement.bin")?;
//!
//!     for channel in file.channels() {
//!         println!(
//!             "{} [{}]: {} samples",
//!             channel.name(),
//!             channel.units(),
//!             channel.data().len()
//!         );
//!     }
//!
//!     // Roughly 500 evenly spaced samples per channel
//!     let preview = CatmanFile::from_file_sampled("measurement.bin", 500)?;
//!     println!("{:?}", preview.channel_names());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`blocks`] | File and channel header records and format constants |
//! | [`parsing`] | Byte cursor, decode pass stages, data and sampling readers |
//! | [`index`] | Header index and range readers for single-channel access |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. A failed decode returns no
//! partial data, and the underlying file is always closed when the pass ends.

pub mod blocks;
pub mod parsing;

mod catman;
mod channel;

pub mod error;
pub mod index;

// Re-export commonly used types at the crate root
pub use blocks::{ChannelHeader, FileHeader};
pub use catman::{CatmanFile, ReadMode};
pub use channel::Channel;
pub use error::{Error, Result};
pub use index::{ByteRangeReader, CatmanIndex, FileRangeReader};
