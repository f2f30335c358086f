//! Position-tracking reader for native-endian Catman fields.

use crate::{
    Error, Result,
    blocks::{TEXT_ENCODING, TextEncoding, to_count},
};
use byteorder::{ByteOrder, NativeEndian, ReadBytesExt};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom};

/// Forward hops up to this many bytes are read through instead of seeking,
/// so a buffered reader keeps its buffer.
const SKIP_THRESHOLD: u64 = 8 * 1024;

/// Sequential reader over a seekable byte stream.
///
/// Every read starts at the current position and advances past the bytes it
/// consumed. Scalar reads and counted reads are separate methods; a counted
/// read with `count == 0` returns an empty vector without touching the stream.
///
/// A read that runs past the end of the stream fails with
/// [`Error::Truncated`] instead of returning a partial value. Counted reads
/// are checked against the stream length before any buffer is allocated.
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
    len: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wrap `inner`, starting at its current stream position.
    pub fn new(mut inner: R) -> Result<Self> {
        let position = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(position))?;
        Ok(Self {
            inner,
            position,
            len,
        })
    }

    /// Absolute stream offset of the next read.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total stream length in bytes, measured when the cursor was created.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes between the current position and the end of the stream.
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.position)
    }

    /// Move to `offset` (absolute) without decoding anything in between.
    ///
    /// Short forward hops are consumed from the stream rather than seeked.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if offset == self.position {
            return Ok(());
        }
        if offset > self.position && offset - self.position <= SKIP_THRESHOLD {
            let gap = offset - self.position;
            let skipped = io::copy(&mut (&mut self.inner).take(gap), &mut io::sink())?;
            self.position += skipped;
            if skipped == gap {
                return Ok(());
            }
        }
        self.position = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Give back the wrapped stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fail with [`Error::Truncated`] unless `count` items of `size` bytes
    /// remain in the stream.
    fn ensure_available(&self, count: usize, size: usize) -> Result<usize> {
        let remaining = self.remaining();
        match count.checked_mul(size) {
            Some(bytes) if bytes as u64 <= remaining => Ok(bytes),
            bytes => Err(Error::Truncated {
                offset: self.position,
                expected: bytes.unwrap_or(usize::MAX),
                actual: remaining as usize,
            }),
        }
    }

    /// Map a failed typed read of `expected` bytes starting at `start`.
    fn read_error(&self, err: io::Error, start: u64, expected: usize) -> Error {
        if err.kind() == ErrorKind::UnexpectedEof {
            Error::Truncated {
                offset: start,
                expected,
                actual: self.len.saturating_sub(start) as usize,
            }
        } else {
            Error::IOError(err)
        }
    }

    /// Fill `buf` completely or report how many bytes were left.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let start = self.position;
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.position += filled as u64;
                    return Err(Error::Truncated {
                        offset: start,
                        expected: buf.len(),
                        actual: filled,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::IOError(e)),
            }
        }
        self.position += filled as u64;
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.ensure_available(count, 1)?;
        let mut buf = vec![0u8; count];
        if count > 0 {
            self.fill(&mut buf)?;
        }
        Ok(buf)
    }

    /// Read one signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        let [b] = self.read_array::<1>()?;
        Ok(b as i8)
    }

    /// Read one native-endian `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(NativeEndian::read_i16(&self.read_array::<2>()?))
    }

    /// Read one native-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(NativeEndian::read_i32(&self.read_array::<4>()?))
    }

    /// Read one native-endian `f32`.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(NativeEndian::read_f32(&self.read_array::<4>()?))
    }

    /// Read one native-endian `f64`.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(NativeEndian::read_f64(&self.read_array::<8>()?))
    }

    /// Read `count` signed bytes.
    pub fn read_i8_vec(&mut self, count: usize) -> Result<Vec<i8>> {
        let bytes = self.ensure_available(count, 1)?;
        let mut out = vec![0i8; count];
        let start = self.position;
        self.inner
            .read_i8_into(&mut out)
            .map_err(|e| self.read_error(e, start, bytes))?;
        self.position += bytes as u64;
        Ok(out)
    }

    /// Read `count` native-endian `i16` values.
    pub fn read_i16_vec(&mut self, count: usize) -> Result<Vec<i16>> {
        let bytes = self.ensure_available(count, 2)?;
        let mut out = vec![0i16; count];
        let start = self.position;
        self.inner
            .read_i16_into::<NativeEndian>(&mut out)
            .map_err(|e| self.read_error(e, start, bytes))?;
        self.position += bytes as u64;
        Ok(out)
    }

    /// Read `count` native-endian `i32` values.
    pub fn read_i32_vec(&mut self, count: usize) -> Result<Vec<i32>> {
        let bytes = self.ensure_available(count, 4)?;
        let mut out = vec![0i32; count];
        let start = self.position;
        self.inner
            .read_i32_into::<NativeEndian>(&mut out)
            .map_err(|e| self.read_error(e, start, bytes))?;
        self.position += bytes as u64;
        Ok(out)
    }

    /// Read `count` native-endian `f32` values.
    pub fn read_f32_vec(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.ensure_available(count, 4)?;
        let mut out = vec![0f32; count];
        let start = self.position;
        self.inner
            .read_f32_into::<NativeEndian>(&mut out)
            .map_err(|e| self.read_error(e, start, bytes))?;
        self.position += bytes as u64;
        Ok(out)
    }

    /// Read `count` native-endian `f64` values straight into the result.
    pub fn read_f64_vec(&mut self, count: usize) -> Result<Vec<f64>> {
        let bytes = self.ensure_available(count, 8)?;
        let mut out = vec![0f64; count];
        let start = self.position;
        self.inner
            .read_f64_into::<NativeEndian>(&mut out)
            .map_err(|e| self.read_error(e, start, bytes))?;
        self.position += bytes as u64;
        Ok(out)
    }

    /// Read exactly `count` bytes and decode them with `encoding`.
    ///
    /// `count == 0` yields an empty string without reading.
    pub fn read_fixed_text(&mut self, count: usize, encoding: TextEncoding) -> Result<String> {
        if count == 0 {
            return Ok(String::new());
        }
        let bytes = self.read_bytes(count)?;
        Ok(encoding.decode(&bytes))
    }

    /// Read a text field whose byte length is stored as a leading `i16`.
    pub fn read_short_text(&mut self, field: &'static str) -> Result<String> {
        let len = to_count(field, self.read_i16()?.into())?;
        self.read_fixed_text(len, TEXT_ENCODING)
    }

    /// Read a text field whose byte length is stored as a leading `i32`.
    pub fn read_long_text(&mut self, field: &'static str) -> Result<String> {
        let len = to_count(field, self.read_i32()?.into())?;
        self.read_fixed_text(len, TEXT_ENCODING)
    }
}
