//! Strided sub-sampling of channel data blocks.
//!
//! Instead of materializing a whole channel, the sampler picks every
//! `stride`-th sample, where `stride = length / n_points`, and seeks to each
//! picked sample individually. The number of samples produced is
//! `ceil(length / stride)`, which approximates but rarely equals `n_points`.

use super::ByteCursor;
use crate::{
    Error, Result,
    blocks::{ChannelHeader, SAMPLE_SIZE},
};
use log::debug;
use std::io::{Read, Seek};

/// Sample index step for a channel of `length` samples and a budget of
/// `n_points`.
///
/// Returns `None` when the budget is zero or not smaller than `length`; in
/// both cases no meaningful stride exists.
pub fn stride(length: usize, n_points: usize) -> Option<usize> {
    if n_points == 0 || n_points >= length {
        return None;
    }
    Some(length / n_points)
}

/// Check a sampling budget against every channel before any sample is read.
pub fn check_budget(n_points: usize, channels: &[ChannelHeader]) -> Result<()> {
    for (index, channel) in channels.iter().enumerate() {
        if stride(channel.length, n_points).is_none() {
            return Err(Error::Range {
                parameter: "sample budget",
                requested: n_points,
                channel: index,
                length: channel.length,
            });
        }
    }
    Ok(())
}

/// Absolute byte offsets of the samples picked from one channel.
///
/// # Arguments
/// * `data_byte_offset` - Offset of the channel's first sample.
/// * `length` - Declared sample count.
/// * `stride` - Step between picked samples, as returned by [`stride`].
pub fn sample_offsets(data_byte_offset: u64, length: usize, stride: usize) -> Vec<u64> {
    (0..length)
        .step_by(stride)
        .map(|index| data_byte_offset + index as u64 * SAMPLE_SIZE)
        .collect()
}

/// Read a strided subset of every channel.
///
/// Performs one seek and one scalar read per picked sample.
pub fn read_sampled<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    channels: &[ChannelHeader],
    offsets: &[u64],
    n_points: usize,
) -> Result<Vec<Vec<f64>>> {
    check_budget(n_points, channels)?;

    let mut out = Vec::with_capacity(channels.len());
    for (index, (channel, &offset)) in channels.iter().zip(offsets).enumerate() {
        // check_budget guarantees a stride for every channel
        let step = stride(channel.length, n_points).unwrap_or(1);
        let positions = sample_offsets(offset, channel.length, step);
        debug!(
            "channel {index}: stride {step}, {} of {} samples",
            positions.len(),
            channel.length
        );

        let mut values = Vec::with_capacity(positions.len());
        for position in positions {
            cursor.seek(position)?;
            values.push(cursor.read_f64()?);
        }
        out.push(values);
    }
    Ok(out)
}
