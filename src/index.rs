//! Catman Header Index
//!
//! This module provides a lightweight index of a Catman file: the file header
//! fields and, per channel, its metadata and the absolute position of its data
//! block. The index can be serialized to JSON and used later to read single
//! channels without decoding the rest of the file.
//!
//! ```no_run
//! use catman_rs::{CatmanIndex, FileRangeReader, Result};
//!
//! fn read_one_channel() -> Result<()> {
//!     let index = CatmanIndex::from_file("measurement.bin")?;
//!     index.save_to_file("measurement.index.json")?;
//!
//!     let index = CatmanIndex::load_from_file("measurement.index.json")?;
//!     let mut reader = FileRangeReader::new("measurement.bin")?;
//!     let force = index.read_channel_values_by_name("Force", &mut reader)?;
//!     println!("Read {} values", force.len());
//!     Ok(())
//! }
//! ```

use crate::{
    CatmanFile, Error, Result,
    blocks::SAMPLE_SIZE,
    parsing::sampler,
};
use byteorder::{ByteOrder, NativeEndian};
use log::debug;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Channel metadata and data location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedChannel {
    /// Channel identifier
    pub id: i16,
    /// Channel name
    pub name: String,
    /// Physical unit
    pub units: String,
    /// Declared number of samples
    pub length: usize,
    /// Absolute file offset of the first sample
    pub data_byte_offset: u64,
}

impl IndexedChannel {
    /// Byte range `(offset, length)` of this channel's data block.
    pub fn byte_range(&self) -> (u64, u64) {
        (self.data_byte_offset, self.length as u64 * SAMPLE_SIZE)
    }
}

/// Complete Catman file index
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatmanIndex {
    /// Size of the indexed file. Range reads that would end past it fail
    /// with [`Error::Truncated`] before the reader is touched.
    pub file_size: u64,
    /// Format version of the indexed file
    pub version: i16,
    /// File comment
    pub comment: String,
    /// Offset of the first data block
    pub data_offset: u64,
    /// Channels in header order
    pub channels: Vec<IndexedChannel>,
}

/// Trait for reading byte ranges from different sources (files, HTTP, etc.)
pub trait ByteRangeReader {
    type Error;

    /// Read bytes from the specified range
    /// Returns the requested bytes or an error
    fn read_range(
        &mut self,
        offset: u64,
        length: u64,
    ) -> core::result::Result<Vec<u8>, Self::Error>;
}

/// Local file reader implementation
pub struct FileRangeReader {
    file: std::fs::File,
}

impl FileRangeReader {
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(file_path).map_err(Error::IOError)?;
        Ok(Self { file })
    }
}

impl ByteRangeReader for FileRangeReader {
    type Error = Error;

    fn read_range(
        &mut self,
        offset: u64,
        length: u64,
    ) -> core::result::Result<Vec<u8>, Self::Error> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(Error::IOError)?;

        let mut buffer = Vec::new();
        (&mut self.file)
            .take(length)
            .read_to_end(&mut buffer)
            .map_err(Error::IOError)?;

        if (buffer.len() as u64) < length {
            return Err(Error::Truncated {
                offset,
                expected: length as usize,
                actual: buffer.len(),
            });
        }
        Ok(buffer)
    }
}

impl CatmanIndex {
    /// Create an index from a Catman file by decoding its headers only.
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let file = CatmanFile::from_file_header_only(file_path)?;
        let file_size = std::fs::metadata(file_path).map_err(Error::IOError)?.len();
        Ok(Self::from_catman(&file, file_size))
    }

    /// Build an index from an already decoded file.
    pub fn from_catman(file: &CatmanFile, file_size: u64) -> Self {
        let channels = file
            .channels()
            .iter()
            .map(|channel| IndexedChannel {
                id: channel.id(),
                name: channel.name().to_string(),
                units: channel.units().to_string(),
                length: channel.length(),
                data_byte_offset: channel.data_byte_offset(),
            })
            .collect();

        CatmanIndex {
            file_size,
            version: file.version(),
            comment: file.comment().to_string(),
            data_offset: file.header().data_offset,
            channels,
        }
    }

    /// Save the index to a JSON file.
    ///
    /// Requires the `serde` feature.
    #[cfg(feature = "serde")]
    pub fn save_to_file(&self, index_path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::IndexSerialization(format!("JSON serialization failed: {}", e)))?;

        std::fs::write(index_path, json).map_err(Error::IOError)?;

        Ok(())
    }

    /// Load an index from a JSON file.
    ///
    /// Requires the `serde` feature.
    #[cfg(feature = "serde")]
    pub fn load_from_file(index_path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(index_path).map_err(Error::IOError)?;

        let index: CatmanIndex = serde_json::from_str(&json).map_err(|e| {
            Error::IndexSerialization(format!("JSON deserialization failed: {}", e))
        })?;

        Ok(index)
    }

    fn channel(&self, channel_index: usize) -> Result<&IndexedChannel> {
        self.channels
            .get(channel_index)
            .ok_or_else(|| Error::ChannelNotFound(format!("index {channel_index}")))
    }

    /// Read `length` bytes at `offset`, refusing ranges past the indexed file
    /// size.
    fn read_checked<R: ByteRangeReader<Error = Error>>(
        &self,
        reader: &mut R,
        offset: u64,
        length: u64,
    ) -> Result<Vec<u8>> {
        if offset.saturating_add(length) > self.file_size {
            return Err(Error::Truncated {
                offset,
                expected: length as usize,
                actual: self.file_size.saturating_sub(offset) as usize,
            });
        }
        reader.read_range(offset, length)
    }

    /// Read every sample of one channel with a single range read.
    pub fn read_channel_values<R: ByteRangeReader<Error = Error>>(
        &self,
        channel_index: usize,
        reader: &mut R,
    ) -> Result<Vec<f64>> {
        let channel = self.channel(channel_index)?;
        let (offset, len) = channel.byte_range();
        Ok(decode_samples(&self.read_checked(reader, offset, len)?))
    }

    /// Read the first `head_limit` samples of one channel.
    ///
    /// Fails with [`Error::Range`] unless `head_limit` is smaller than the
    /// channel's length.
    pub fn read_channel_head<R: ByteRangeReader<Error = Error>>(
        &self,
        channel_index: usize,
        head_limit: usize,
        reader: &mut R,
    ) -> Result<Vec<f64>> {
        let channel = self.channel(channel_index)?;
        if head_limit >= channel.length {
            return Err(Error::Range {
                parameter: "head limit",
                requested: head_limit,
                channel: channel_index,
                length: channel.length,
            });
        }
        let bytes =
            self.read_checked(reader, channel.data_byte_offset, head_limit as u64 * SAMPLE_SIZE)?;
        Ok(decode_samples(&bytes))
    }

    /// Read a strided subset of one channel, one range read per sample.
    pub fn sample_channel_values<R: ByteRangeReader<Error = Error>>(
        &self,
        channel_index: usize,
        n_points: usize,
        reader: &mut R,
    ) -> Result<Vec<f64>> {
        let channel = self.channel(channel_index)?;
        let stride = sampler::stride(channel.length, n_points).ok_or(Error::Range {
            parameter: "sample budget",
            requested: n_points,
            channel: channel_index,
            length: channel.length,
        })?;
        debug!("sampling channel {channel_index} with stride {stride}");

        sampler::sample_offsets(channel.data_byte_offset, channel.length, stride)
            .into_iter()
            .map(|offset| {
                let bytes = self.read_checked(reader, offset, SAMPLE_SIZE)?;
                Ok(NativeEndian::read_f64(&bytes))
            })
            .collect()
    }

    /// Find the first channel with the given name.
    pub fn find_channel_by_name(&self, channel_name: &str) -> Option<usize> {
        self.channels
            .iter()
            .position(|channel| channel.name == channel_name)
    }

    /// Read every sample of the channel with the given name.
    pub fn read_channel_values_by_name<R: ByteRangeReader<Error = Error>>(
        &self,
        channel_name: &str,
        reader: &mut R,
    ) -> Result<Vec<f64>> {
        let channel_index = self
            .find_channel_by_name(channel_name)
            .ok_or_else(|| Error::ChannelNotFound(channel_name.to_string()))?;
        self.read_channel_values(channel_index, reader)
    }

    /// Byte range `(offset, length)` of every channel's data block.
    pub fn channel_byte_ranges(&self) -> Vec<(u64, u64)> {
        self.channels.iter().map(IndexedChannel::byte_range).collect()
    }

    /// Whether the stored data offsets follow the back-to-back block layout.
    pub fn is_contiguous(&self) -> bool {
        let mut expected = self.data_offset;
        for channel in &self.channels {
            if channel.data_byte_offset != expected {
                return false;
            }
            expected += channel.length as u64 * SAMPLE_SIZE;
        }
        true
    }
}

fn decode_samples(bytes: &[u8]) -> Vec<f64> {
    let mut out = vec![0f64; bytes.len() / SAMPLE_SIZE as usize];
    NativeEndian::read_f64_into(&bytes[..out.len() * SAMPLE_SIZE as usize], &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory range reader over a byte vector.
    struct MemoryRangeReader {
        bytes: Vec<u8>,
        reads: usize,
    }

    impl ByteRangeReader for MemoryRangeReader {
        type Error = Error;

        fn read_range(&mut self, offset: u64, length: u64) -> Result<Vec<u8>> {
            self.reads += 1;
            let start = offset as usize;
            let end = start + length as usize;
            if end > self.bytes.len() {
                return Err(Error::Truncated {
                    offset,
                    expected: length as usize,
                    actual: self.bytes.len().saturating_sub(start),
                });
            }
            Ok(self.bytes[start..end].to_vec())
        }
    }

    fn index_with(lengths: &[usize], data_offset: u64) -> CatmanIndex {
        let mut offset = data_offset;
        let channels = lengths
            .iter()
            .enumerate()
            .map(|(i, &length)| {
                let channel = IndexedChannel {
                    id: i as i16,
                    name: format!("ch{i}"),
                    units: "V".to_string(),
                    length,
                    data_byte_offset: offset,
                };
                offset += length as u64 * SAMPLE_SIZE;
                channel
            })
            .collect();
        CatmanIndex {
            file_size: offset,
            version: 5020,
            comment: String::new(),
            data_offset,
            channels,
        }
    }

    fn reader_for(values: &[f64], data_offset: usize) -> MemoryRangeReader {
        let mut bytes = vec![0u8; data_offset];
        bytes.extend(values.iter().flat_map(|v| v.to_ne_bytes()));
        MemoryRangeReader { bytes, reads: 0 }
    }

    #[test]
    fn reads_one_channel_with_one_range() -> Result<()> {
        let index = index_with(&[2, 3], 16);
        let mut reader = reader_for(&[1.0, 2.0, 5.0, 6.0, 7.0], 16);

        assert_eq!(index.read_channel_values(1, &mut reader)?, vec![5.0, 6.0, 7.0]);
        assert_eq!(reader.reads, 1);
        assert_eq!(index.read_channel_values_by_name("ch0", &mut reader)?, vec![1.0, 2.0]);
        assert!(index.is_contiguous());
        Ok(())
    }

    #[test]
    fn head_and_sampling_follow_the_range_rules() -> Result<()> {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        let index = index_with(&[10], 0);
        let mut reader = reader_for(&values, 0);

        assert_eq!(index.read_channel_head(0, 3, &mut reader)?, vec![0.0, 1.0, 2.0]);
        assert!(matches!(
            index.read_channel_head(0, 10, &mut reader),
            Err(Error::Range { .. })
        ));

        reader.reads = 0;
        assert_eq!(
            index.sample_channel_values(0, 3, &mut reader)?,
            vec![0.0, 3.0, 6.0, 9.0]
        );
        assert_eq!(reader.reads, 4);
        assert!(matches!(
            index.sample_channel_values(0, 11, &mut reader),
            Err(Error::Range { .. })
        ));
        Ok(())
    }

    #[test]
    fn unknown_channels_are_reported() {
        let index = index_with(&[1], 0);
        let mut reader = reader_for(&[1.0], 0);
        assert!(matches!(
            index.read_channel_values(4, &mut reader),
            Err(Error::ChannelNotFound(_))
        ));
        assert!(matches!(
            index.read_channel_values_by_name("missing", &mut reader),
            Err(Error::ChannelNotFound(_))
        ));
    }

    #[test]
    fn reads_past_the_indexed_size_are_refused() -> Result<()> {
        let mut index = index_with(&[2, 3], 0);
        index.file_size -= 8;
        let mut reader = reader_for(&[1.0, 2.0, 5.0, 6.0, 7.0], 0);

        match index.read_channel_values(1, &mut reader) {
            Err(Error::Truncated {
                offset,
                expected,
                actual,
            }) => {
                assert_eq!(offset, 16);
                assert_eq!(expected, 24);
                assert_eq!(actual, 16);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(reader.reads, 0);

        assert_eq!(index.read_channel_head(1, 2, &mut reader)?, vec![5.0, 6.0]);
        assert!(matches!(
            index.sample_channel_values(1, 2, &mut reader),
            Err(Error::Truncated { .. })
        ));
        Ok(())
    }
}
