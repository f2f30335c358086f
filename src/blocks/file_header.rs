// file_header.rs
use super::{RESERVED_SLOT_COUNT, VERSION_FLOOR, to_count, to_offset};
use crate::{Error, Result, parsing::ByteCursor};
use log::debug;
use std::io::{Read, Seek};

/// File-level header at offset 0 of every Catman file.
///
/// # Layout
/// All integers are native-endian.
/// - `version`: i16, must be greater than [`VERSION_FLOOR`]
/// - `data_offset`: i32, absolute offset of the first channel's data block
/// - `comment`: text with an i16 length prefix
/// - reserved area: 32 texts, each with an i16 length prefix
/// - `channel_count`: i16
/// - `max_channel_length`: i32
/// - channel header offsets: `channel_count` x i32
/// - `reduction_factor`: i32
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    /// Format revision (e.g. 5020).
    pub version: i16,
    /// Absolute byte offset where the first data block begins.
    pub data_offset: u64,
    /// Free-form file comment.
    pub comment: String,
    /// Legacy reserved text slots, always [`RESERVED_SLOT_COUNT`] entries.
    pub reserved: Vec<String>,
    /// Upper bound on any channel's sample count, as stored.
    pub max_channel_length: i32,
    /// Channel header offsets as stored. Kept as metadata only; data offsets
    /// are derived from the channel lengths instead.
    pub channel_header_offsets: Vec<i32>,
    /// Reduction factor, opaque to the decoder.
    pub reduction_factor: i32,
}

impl FileHeader {
    /// Decode the file header from a cursor positioned at byte 0.
    ///
    /// Fails with [`Error::FormatVersion`] right after the version field when
    /// the file predates Catman 5.0; no further bytes are read in that case.
    pub fn read_from<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Self> {
        let version = cursor.read_i16()?;
        if version <= VERSION_FLOOR {
            return Err(Error::FormatVersion { found: version });
        }

        let data_offset = to_offset("data offset", cursor.read_i32()?.into())?;
        let comment = cursor.read_short_text("file comment length")?;

        let mut reserved = Vec::with_capacity(RESERVED_SLOT_COUNT);
        for _ in 0..RESERVED_SLOT_COUNT {
            reserved.push(cursor.read_short_text("reserved text length")?);
        }

        let channel_count = to_count("channel count", cursor.read_i16()?.into())?;
        let max_channel_length = cursor.read_i32()?;
        let channel_header_offsets = cursor.read_i32_vec(channel_count)?;
        let reduction_factor = cursor.read_i32()?;

        debug!(
            "Catman header: version {version}, {channel_count} channels, data at offset {data_offset}"
        );

        Ok(Self {
            version,
            data_offset,
            comment,
            reserved,
            max_channel_length,
            channel_header_offsets,
            reduction_factor,
        })
    }

    /// Number of channels declared by the header.
    pub fn channel_count(&self) -> usize {
        self.channel_header_offsets.len()
    }
}
