//! Contiguous decoding of channel data blocks.
//!
//! Data blocks are stored back to back after the channel headers, in header
//! order, each holding `length` native `f64` samples. The position of every
//! block is the prefix sum of the preceding blocks' sizes, starting at the
//! file header's data offset.

use super::ByteCursor;
use crate::{Error, Result, blocks::ChannelHeader};
use std::io::{Read, Seek};

/// Compute the absolute data offset of every channel.
///
/// The stored channel header offsets are not consulted.
pub fn data_byte_offsets(data_offset: u64, channels: &[ChannelHeader]) -> Vec<u64> {
    channels
        .iter()
        .scan(data_offset, |next, channel| {
            let offset = *next;
            *next += channel.data_byte_len();
            Some(offset)
        })
        .collect()
}

/// Check a head limit against every channel before any sample is read.
///
/// The limit must be strictly smaller than each channel's declared length.
pub fn check_head_limit(limit: usize, channels: &[ChannelHeader]) -> Result<()> {
    for (index, channel) in channels.iter().enumerate() {
        if limit >= channel.length {
            return Err(Error::Range {
                parameter: "head limit",
                requested: limit,
                channel: index,
                length: channel.length,
            });
        }
    }
    Ok(())
}

/// Read the samples of every channel in header order.
///
/// # Arguments
/// * `cursor` - Stream cursor; repositioned before each channel.
/// * `channels` - Decoded channel headers.
/// * `offsets` - Data offsets from [`data_byte_offsets`].
/// * `head_limit` - When `Some(k)`, only the first `k` samples of each channel
///   are read. `k` must be smaller than every channel's length.
///
/// # Returns
/// One sample vector per channel.
pub fn read_full<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    channels: &[ChannelHeader],
    offsets: &[u64],
    head_limit: Option<usize>,
) -> Result<Vec<Vec<f64>>> {
    if let Some(limit) = head_limit {
        check_head_limit(limit, channels)?;
    }

    let mut out = Vec::with_capacity(channels.len());
    for (channel, &offset) in channels.iter().zip(offsets) {
        let count = head_limit.map_or(channel.length, |limit| limit.min(channel.length));
        cursor.seek(offset)?;
        out.push(cursor.read_f64_vec(count)?);
    }
    Ok(out)
}
