use super::{ByteCursor, data, sampler};
use crate::{
    CatmanFile, Channel, ReadMode, Result,
    blocks::{ChannelHeader, FileHeader},
};
use log::debug;
use std::io::{Read, Seek};

/// A decode pass over one open stream.
///
/// A pass moves through its stages exactly once:
/// `DecodePass` (stream open) -> [`HeadersDecoded`] (file and channel headers
/// read, data offsets known) -> [`CatmanFile`] (data read, stream closed).
/// Each step consumes the previous stage, so a pass cannot be re-entered and
/// the stream is dropped as soon as the pass ends, including on failure.
pub struct DecodePass<R> {
    cursor: ByteCursor<R>,
}

impl<R: Read + Seek> DecodePass<R> {
    /// Start a pass at byte 0 of `reader`.
    pub fn new(reader: R) -> Result<Self> {
        let mut cursor = ByteCursor::new(reader)?;
        cursor.seek(0)?;
        Ok(Self { cursor })
    }

    /// Decode the file header followed by every channel header.
    pub fn read_headers(mut self) -> Result<HeadersDecoded<R>> {
        let header = FileHeader::read_from(&mut self.cursor)?;

        let mut channels = Vec::with_capacity(header.channel_count());
        for _ in 0..header.channel_count() {
            channels.push(ChannelHeader::read_from(&mut self.cursor)?);
        }

        let offsets = data::data_byte_offsets(header.data_offset, &channels);
        debug!(
            "decoded {} channel headers, headers end at {}",
            channels.len(),
            self.cursor.position()
        );

        Ok(HeadersDecoded {
            cursor: self.cursor,
            header,
            channels,
            offsets,
        })
    }
}

/// A pass whose headers are decoded and whose data offsets are known.
pub struct HeadersDecoded<R> {
    cursor: ByteCursor<R>,
    header: FileHeader,
    channels: Vec<ChannelHeader>,
    offsets: Vec<u64>,
}

impl<R: Read + Seek> HeadersDecoded<R> {
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn channel_headers(&self) -> &[ChannelHeader] {
        &self.channels
    }

    /// Data offset of each channel, in header order.
    pub fn data_byte_offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Materialize data according to `mode` and end the pass.
    pub fn read(self, mode: ReadMode) -> Result<CatmanFile> {
        match mode {
            ReadMode::HeaderOnly => Ok(self.finish()),
            ReadMode::Full => self.read_full(None),
            ReadMode::Head(limit) => self.read_full(Some(limit)),
            ReadMode::Sampled(n_points) => self.read_sampled(n_points),
        }
    }

    /// End the pass without reading any samples.
    pub fn finish(self) -> CatmanFile {
        let data = vec![Vec::new(); self.channels.len()];
        Self::assemble(ReadMode::HeaderOnly, self.header, self.channels, self.offsets, data)
    }

    /// Read every channel contiguously, optionally only its first samples.
    ///
    /// A head limit of zero is no limit.
    pub fn read_full(mut self, head_limit: Option<usize>) -> Result<CatmanFile> {
        let head_limit = head_limit.filter(|&limit| limit > 0);
        let data = data::read_full(&mut self.cursor, &self.channels, &self.offsets, head_limit)?;
        let mode = head_limit.map_or(ReadMode::Full, ReadMode::Head);
        Ok(Self::assemble(mode, self.header, self.channels, self.offsets, data))
    }

    /// Read a strided subset of every channel.
    pub fn read_sampled(mut self, n_points: usize) -> Result<CatmanFile> {
        let data = sampler::read_sampled(&mut self.cursor, &self.channels, &self.offsets, n_points)?;
        Ok(Self::assemble(
            ReadMode::Sampled(n_points),
            self.header,
            self.channels,
            self.offsets,
            data,
        ))
    }

    fn assemble(
        mode: ReadMode,
        header: FileHeader,
        channels: Vec<ChannelHeader>,
        offsets: Vec<u64>,
        data: Vec<Vec<f64>>,
    ) -> CatmanFile {
        let channels = channels
            .into_iter()
            .zip(offsets)
            .zip(data)
            .map(|((channel, offset), samples)| Channel::new(channel, offset, samples))
            .collect();
        CatmanFile::new(header, channels, mode)
    }
}
