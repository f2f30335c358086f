// channel_header.rs
use super::{SAMPLE_SIZE, to_count};
use crate::{Result, parsing::ByteCursor};
use log::trace;
use std::io::{Read, Seek};

/// Metadata record of one measurement channel.
///
/// Channel headers follow the file header back to back, in channel order.
///
/// # Layout
/// - `id`: i16
/// - `length`: i32, declared sample count
/// - `name`, `units`, `comment`: texts with i16 length prefixes
/// - `format`, `width`: i16 each
/// - `date`: f64
/// - `header_text`: text with an i32 length prefix
/// - linearization mode, scale and point count: i8 each
/// - linearization points: `point count` x f64
/// - `thermocouple_type`: i16
/// - `formula`: text with an i16 length prefix
/// - `sodb_info`: text with an i32 length prefix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelHeader {
    /// Channel identifier. Not guaranteed unique or contiguous.
    pub id: i16,
    /// Declared number of samples; governs the size of the data block.
    pub length: usize,
    pub name: String,
    pub units: String,
    pub comment: String,
    /// Format descriptor code, stored as-is.
    pub format: i16,
    /// Width descriptor code, stored as-is.
    pub width: i16,
    /// Timestamp in the producer's epoch, stored as-is.
    pub date: f64,
    pub header_text: String,
    pub linearization_mode: i8,
    pub linearization_scale: i8,
    /// Linearization support points; the stored point count is its length.
    pub linearization_points: Vec<f64>,
    pub thermocouple_type: i16,
    pub formula: String,
    pub sodb_info: String,
}

/// Borrowed view of a channel's linearization settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linearization<'a> {
    pub mode: i8,
    pub scale: i8,
    pub points: &'a [f64],
}

impl ChannelHeader {
    /// Decode one channel header at the cursor's current position.
    pub fn read_from<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Self> {
        let start = cursor.position();

        let id = cursor.read_i16()?;
        let length = to_count("channel length", cursor.read_i32()?.into())?;
        let name = cursor.read_short_text("channel name length")?;
        let units = cursor.read_short_text("channel units length")?;
        let comment = cursor.read_short_text("channel comment length")?;
        let format = cursor.read_i16()?;
        let width = cursor.read_i16()?;
        let date = cursor.read_f64()?;
        let header_text = cursor.read_long_text("channel header length")?;

        let linearization_mode = cursor.read_i8()?;
        let linearization_scale = cursor.read_i8()?;
        let point_count = to_count("linearization point count", cursor.read_i8()?.into())?;
        let linearization_points = cursor.read_f64_vec(point_count)?;

        let thermocouple_type = cursor.read_i16()?;
        let formula = cursor.read_short_text("formula length")?;
        let sodb_info = cursor.read_long_text("SODB info length")?;

        trace!(
            "channel {id} '{name}': {length} samples, header bytes {start}..{}",
            cursor.position()
        );

        Ok(Self {
            id,
            length,
            name,
            units,
            comment,
            format,
            width,
            date,
            header_text,
            linearization_mode,
            linearization_scale,
            linearization_points,
            thermocouple_type,
            formula,
            sodb_info,
        })
    }

    /// Number of linearization points declared for this channel.
    pub fn linearization_point_count(&self) -> usize {
        self.linearization_points.len()
    }

    /// Linearization mode, scale and points together.
    pub fn linearization(&self) -> Linearization<'_> {
        Linearization {
            mode: self.linearization_mode,
            scale: self.linearization_scale,
            points: &self.linearization_points,
        }
    }

    /// Size of this channel's data block in bytes.
    pub fn data_byte_len(&self) -> u64 {
        self.length as u64 * SAMPLE_SIZE
    }
}
