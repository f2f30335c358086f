//! Full decode vs strided sampling.
//!
//! Run with: cargo bench --bench sampling_benchmark

#[path = "../tests/common/mod.rs"]
mod common;

use catman_rs::{CatmanFile, CatmanIndex, FileRangeReader};
use common::{CatmanBuilder, ChannelSpec};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Write a file with `num_channels` channels of `length` samples each.
fn create_test_file(name: &str, num_channels: usize, length: usize) -> std::path::PathBuf {
    let mut builder = CatmanBuilder::new();
    for i in 0..num_channels {
        let samples = (0..length).map(|s| (s as f64 * 0.001 + i as f64).sin()).collect();
        builder = builder.channel(ChannelSpec::new(i as i16, &format!("Channel_{i}"), "V", samples));
    }
    builder.write(name)
}

fn bench_decode_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("catman_decode");
    group.sample_size(20);

    for (num_channels, length) in [(4, 10_000), (8, 100_000)] {
        let path = create_test_file(&format!("bench_{num_channels}x{length}"), num_channels, length);
        let label = format!("{num_channels}ch_{length}");
        group.throughput(Throughput::Bytes((num_channels * length * 8) as u64));

        group.bench_with_input(BenchmarkId::new("full", &label), &path, |b, path| {
            b.iter(|| black_box(CatmanFile::from_file(path).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("header_only", &label), &path, |b, path| {
            b.iter(|| black_box(CatmanFile::from_file_header_only(path).unwrap()))
        });

        for n_points in [100, 1_000] {
            group.bench_with_input(
                BenchmarkId::new(format!("sampled_{n_points}"), &label),
                &path,
                |b, path| b.iter(|| black_box(CatmanFile::from_file_sampled(path, n_points).unwrap())),
            );
        }

        let index = CatmanIndex::from_file(&path).unwrap();
        group.bench_with_input(BenchmarkId::new("index_one_channel", &label), &path, |b, path| {
            b.iter(|| {
                let mut reader = FileRangeReader::new(path).unwrap();
                black_box(index.read_channel_values(num_channels - 1, &mut reader).unwrap())
            })
        });

        let _ = std::fs::remove_file(&path);
    }

    group.finish();
}

criterion_group!(benches, bench_decode_modes);
criterion_main!(benches);
