use crate::blocks::{ChannelHeader, Linearization};

/// One decoded measurement channel.
///
/// Holds the channel's header, the computed position of its data block and
/// whatever samples the decode pass materialized: all of them, a leading
/// slice, a strided subset, or none for header-only reads.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    header: ChannelHeader,
    data_byte_offset: u64,
    data: Vec<f64>,
}

impl Channel {
    pub(crate) fn new(header: ChannelHeader, data_byte_offset: u64, data: Vec<f64>) -> Self {
        Channel {
            header,
            data_byte_offset,
            data,
        }
    }

    /// Full header record as stored in the file.
    pub fn header(&self) -> &ChannelHeader {
        &self.header
    }

    pub fn id(&self) -> i16 {
        self.header.id
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn units(&self) -> &str {
        &self.header.units
    }

    pub fn comment(&self) -> &str {
        &self.header.comment
    }

    /// Declared sample count. This is the authoritative length of the channel,
    /// independent of how many samples were decoded.
    pub fn length(&self) -> usize {
        self.header.length
    }

    pub fn linearization(&self) -> Linearization<'_> {
        self.header.linearization()
    }

    /// Absolute file offset of this channel's first sample.
    pub fn data_byte_offset(&self) -> u64 {
        self.data_byte_offset
    }

    /// Decoded samples.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Consume the channel and keep only its samples.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}
