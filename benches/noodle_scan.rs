//! Benchmarks for the anchor scan loops.
//!
//! ## Inputs
//!
//! - **Sparse**: random lowercase text where the anchor occurs about once
//!   per kilobyte (the common prefilter case)
//! - **Dense**: every eighth byte is an anchor, so reporting dominates
//!
//! ## Widths
//!
//! Each loop runs with the native lane vector and the 16/32/64-byte portable
//! vectors, to show what the SIMD tier buys.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use noodle::lane::{LaneVector, NativeVector, Portable16, Portable32, Portable64};
use noodle::{scan_double_with, scan_single_with, MatchAction, ScanKey};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIZES: [usize; 4] = [1024, 64 * 1024, 1024 * 1024, 16 * 1024 * 1024];

/// Random lowercase text with `anchor` planted every `period` bytes.
fn generate(size: usize, anchor: &[u8], period: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6E6F6F646C65);
    let mut data: Vec<u8> = (0..size).map(|_| rng.gen_range(b'a'..=b'z')).collect();
    // Keep the planted anchors the only hits.
    for byte in data.iter_mut() {
        if anchor.iter().any(|a| a.eq_ignore_ascii_case(byte)) {
            *byte = b'_';
        }
    }
    let mut i = period / 2;
    while i + anchor.len() <= size {
        data[i..i + anchor.len()].copy_from_slice(anchor);
        i += period;
    }
    data
}

fn count_single<V: LaneVector>(key: &ScanKey, data: &[u8]) -> usize {
    let mut hits = 0;
    scan_single_with::<V, _>(key, data, 0, &mut |_: usize, _: bool| {
        hits += 1;
        MatchAction::Continue
    })
    .expect("in-bounds scan");
    hits
}

fn count_double<V: LaneVector>(key: &ScanKey, data: &[u8]) -> usize {
    let mut hits = 0;
    scan_double_with::<V, _>(key, data, 0, &mut |_: usize, _: bool| {
        hits += 1;
        MatchAction::Continue
    })
    .expect("in-bounds scan");
    hits
}

fn bench_single_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_sparse");
    let key = ScanKey::single(b'q');

    for size in SIZES {
        let data = generate(size, b"q", 1024);
        let size_name = format_size(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("native", &size_name), &data, |b, data| {
            b.iter(|| count_single::<NativeVector>(&key, black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("portable16", &size_name), &data, |b, data| {
            b.iter(|| count_single::<Portable16>(&key, black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("portable64", &size_name), &data, |b, data| {
            b.iter(|| count_single::<Portable64>(&key, black_box(data)));
        });
    }

    group.finish();
}

fn bench_single_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_dense");
    let key = ScanKey::single(b'q').with_case_insensitive(true);

    for size in SIZES {
        let data = generate(size, b"Q", 8);
        let size_name = format_size(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(&size_name), &data, |b, data| {
            b.iter(|| count_single::<NativeVector>(&key, black_box(data)));
        });
    }

    group.finish();
}

fn bench_double_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("double_sparse");
    let key = ScanKey::double(b'q', b'z', 2);

    for size in SIZES {
        let data = generate(size, b"qz", 1024);
        let size_name = format_size(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("native", &size_name), &data, |b, data| {
            b.iter(|| count_double::<NativeVector>(&key, black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("portable32", &size_name), &data, |b, data| {
            b.iter(|| count_double::<Portable32>(&key, black_box(data)));
        });
    }

    group.finish();
}

fn bench_double_gaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("double_gaps_1mb");
    let size = 1024 * 1024;

    group.throughput(Throughput::Bytes(size as u64));
    for key_offset in [2, 4, 8, 16] {
        let mut anchor = vec![b'.'; key_offset];
        anchor[0] = b'q';
        anchor[key_offset - 1] = b'z';
        let data = generate(size, &anchor, 1024);
        let key = ScanKey::double(b'q', b'z', key_offset);
        group.bench_with_input(
            BenchmarkId::from_parameter(key_offset),
            &data,
            |b, data| {
                b.iter(|| count_double::<NativeVector>(&key, black_box(data)));
            },
        );
    }

    group.finish();
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{}mb", bytes / (1024 * 1024))
    } else if bytes >= 1024 {
        format!("{}kb", bytes / 1024)
    } else {
        format!("{}b", bytes)
    }
}

criterion_group!(
    benches,
    bench_single_sparse,
    bench_single_dense,
    bench_double_sparse,
    bench_double_gaps,
);

criterion_main!(benches);
