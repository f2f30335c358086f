//! Synthetic Catman file generation shared by the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

pub struct ChannelSpec {
    pub id: i16,
    pub name: Vec<u8>,
    pub units: Vec<u8>,
    pub samples: Vec<f64>,
    pub linearization_points: Vec<f64>,
    /// Length written to the header instead of `samples.len()`.
    pub declared_length: Option<i32>,
}

impl ChannelSpec {
    pub fn new(id: i16, name: &str, units: &str, samples: Vec<f64>) -> Self {
        ChannelSpec {
            id,
            name: latin1(name),
            units: latin1(units),
            samples,
            linearization_points: Vec::new(),
            declared_length: None,
        }
    }
}

pub struct CatmanBuilder {
    pub version: i16,
    pub comment: Vec<u8>,
    pub channels: Vec<ChannelSpec>,
    /// Padding inserted between the last channel header and the data blocks.
    pub gap: usize,
}

impl CatmanBuilder {
    pub fn new() -> Self {
        CatmanBuilder {
            version: 5020,
            comment: b"synthetic".to_vec(),
            channels: Vec::new(),
            gap: 0,
        }
    }

    pub fn version(mut self, version: i16) -> Self {
        self.version = version;
        self
    }

    pub fn gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    pub fn channel(mut self, channel: ChannelSpec) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.version.to_ne_bytes());
        let data_offset_pos = buf.len();
        buf.extend_from_slice(&0i32.to_ne_bytes());
        short_text(&mut buf, &self.comment);
        for slot in 0..32 {
            let text = format!("r{slot}");
            short_text(&mut buf, if slot % 8 == 0 { text.as_bytes() } else { b"" });
        }
        buf.extend_from_slice(&(self.channels.len() as i16).to_ne_bytes());
        let max_len = self.channels.iter().map(|c| c.samples.len()).max().unwrap_or(0);
        buf.extend_from_slice(&(max_len as i32).to_ne_bytes());
        let offsets_pos = buf.len();
        for _ in &self.channels {
            buf.extend_from_slice(&0i32.to_ne_bytes());
        }
        buf.extend_from_slice(&1i32.to_ne_bytes());

        for (i, ch) in self.channels.iter().enumerate() {
            let header_pos = buf.len() as i32;
            let slot = offsets_pos + i * 4;
            buf[slot..slot + 4].copy_from_slice(&header_pos.to_ne_bytes());

            buf.extend_from_slice(&ch.id.to_ne_bytes());
            let length = ch.declared_length.unwrap_or(ch.samples.len() as i32);
            buf.extend_from_slice(&length.to_ne_bytes());
            short_text(&mut buf, &ch.name);
            short_text(&mut buf, &ch.units);
            short_text(&mut buf, b"channel comment");
            buf.extend_from_slice(&1i16.to_ne_bytes());
            buf.extend_from_slice(&8i16.to_ne_bytes());
            buf.extend_from_slice(&44000.25f64.to_ne_bytes());
            long_text(&mut buf, b"");
            buf.push(0);
            buf.push(1);
            buf.push(ch.linearization_points.len() as u8);
            for p in &ch.linearization_points {
                buf.extend_from_slice(&p.to_ne_bytes());
            }
            buf.extend_from_slice(&0i16.to_ne_bytes());
            short_text(&mut buf, b"");
            long_text(&mut buf, b"sodb");
        }

        buf.extend(std::iter::repeat_n(0u8, self.gap));
        let data_offset = buf.len() as i32;
        buf[data_offset_pos..data_offset_pos + 4].copy_from_slice(&data_offset.to_ne_bytes());

        for ch in &self.channels {
            for v in &ch.samples {
                buf.extend_from_slice(&v.to_ne_bytes());
            }
        }
        buf
    }

    /// Write the file to the temp directory and return its path.
    pub fn write(&self, name: &str) -> PathBuf {
        write_bytes(name, &self.build())
    }
}

pub fn write_bytes(name: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("catman_{}_{}.bin", std::process::id(), name));
    std::fs::write(&path, bytes).unwrap();
    path
}

/// One channel, `version = 5020`, samples `[1.0, 2.0, 3.0, 4.0]`.
pub fn four_sample_file() -> CatmanBuilder {
    CatmanBuilder::new().channel(ChannelSpec::new(1, "Force", "kN", vec![1.0, 2.0, 3.0, 4.0]))
}

/// Three channels of different lengths with distinct values.
pub fn three_channel_file() -> CatmanBuilder {
    let ramp = |start: f64, n: usize| (0..n).map(|i| start + i as f64).collect::<Vec<_>>();
    let mut strain = ChannelSpec::new(2, "Strain", "\u{B5}m/m", ramp(100.0, 7));
    strain.linearization_points = vec![0.0, 0.5, 1.0];
    CatmanBuilder::new()
        .gap(5)
        .channel(ChannelSpec::new(1, "Time", "s", ramp(0.0, 10)))
        .channel(strain)
        .channel(ChannelSpec::new(1, "Temp", "\u{B0}C", ramp(-20.0, 25)))
}

/// Encode text whose characters are all below U+0100 as Latin-1 bytes.
pub fn latin1(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u8).collect()
}

fn short_text(buf: &mut Vec<u8>, text: &[u8]) {
    buf.extend_from_slice(&(text.len() as i16).to_ne_bytes());
    buf.extend_from_slice(text);
}

fn long_text(buf: &mut Vec<u8>, text: &[u8]) {
    buf.extend_from_slice(&(text.len() as i32).to_ne_bytes());
    buf.extend_from_slice(text);
}
