use crate::{
    Channel, Error, Result,
    blocks::FileHeader,
    parsing::DecodePass,
};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// How much channel data a decode pass materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadMode {
    /// Every sample of every channel.
    #[default]
    Full,
    /// Headers only; every channel's data is empty.
    HeaderOnly,
    /// The first `k` samples of every channel. `k` must be smaller than every
    /// channel's length; `Head(0)` reads everything.
    Head(usize),
    /// A strided subset of about `n` samples per channel. `n` must be
    /// non-zero and smaller than every channel's length.
    Sampled(usize),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A decoded Catman file.
///
/// Produced by one decode pass and never modified afterwards. Decoding again
/// means creating a new value.
pub struct CatmanFile {
    header: FileHeader,
    channels: Vec<Channel>,
    mode: ReadMode,
}

impl CatmanFile {
    pub(crate) fn new(header: FileHeader, channels: Vec<Channel>, mode: ReadMode) -> Self {
        CatmanFile {
            header,
            channels,
            mode,
        }
    }

    /// Decode a Catman file from disk, reading every sample.
    ///
    /// # Arguments
    /// * `path` - Path to the Catman file.
    ///
    /// # Returns
    /// A new [`CatmanFile`] on success or [`crate::Error`] on failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with(path, ReadMode::Full)
    }

    /// Decode only the file and channel headers.
    pub fn from_file_header_only(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with(path, ReadMode::HeaderOnly)
    }

    /// Decode the first `head_limit` samples of every channel.
    pub fn from_file_head(path: impl AsRef<Path>, head_limit: usize) -> Result<Self> {
        Self::from_file_with(path, ReadMode::Head(head_limit))
    }

    /// Decode a strided subset of every channel with a per-channel budget of
    /// `n_points` samples.
    pub fn from_file_sampled(path: impl AsRef<Path>, n_points: usize) -> Result<Self> {
        Self::from_file_with(path, ReadMode::Sampled(n_points))
    }

    /// Decode a Catman file from disk with an explicit [`ReadMode`].
    ///
    /// The file is opened for this pass only and closed before returning,
    /// whether decoding succeeded or not.
    pub fn from_file_with(path: impl AsRef<Path>, mode: ReadMode) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Catman file: {} ({mode:?})", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), mode)
    }

    /// Decode from any seekable source.
    ///
    /// The reader is consumed and dropped when the pass ends.
    pub fn from_reader<R: Read + Seek>(reader: R, mode: ReadMode) -> Result<Self> {
        DecodePass::new(reader)?.read_headers()?.read(mode)
    }

    /// File-level header.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn version(&self) -> i16 {
        self.header.version
    }

    pub fn comment(&self) -> &str {
        &self.header.comment
    }

    /// Mode this file was decoded with.
    pub fn mode(&self) -> ReadMode {
        self.mode
    }

    /// Channels in header order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Channel> {
        self.channels
    }

    /// Names of all channels in header order.
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(Channel::name).collect()
    }

    /// First channel with the given name.
    pub fn channel_by_name(&self, name: &str) -> Result<&Channel> {
        self.channels
            .iter()
            .find(|channel| channel.name() == name)
            .ok_or_else(|| Error::ChannelNotFound(name.to_string()))
    }

    /// First channel with the given id. Ids are not guaranteed unique.
    pub fn channel_by_id(&self, id: i16) -> Result<&Channel> {
        self.channels
            .iter()
            .find(|channel| channel.id() == id)
            .ok_or_else(|| Error::ChannelNotFound(format!("id {id}")))
    }
}
