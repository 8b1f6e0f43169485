//! Criterion benchmarks
//! Compress and decompress throughput on repetitive and low-redundancy input

use criterion::{criterion_group, criterion_main, Criterion};

fn bench_compress(c: &mut Criterion) {
    let repetitive = b"the the the and the and the and the cat sat on the mat".repeat(2000);
    let random_ish: Vec<u8> = (0u32..200_000)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8)
        .collect();

    c.bench_function("lzss_compress_repetitive", |b| {
        b.iter(|| lzss::compress(&repetitive).unwrap())
    });

    c.bench_function("lzss_compress_random", |b| {
        b.iter(|| lzss::compress(&random_ish).unwrap())
    });
}

fn bench_decompress(c: &mut Criterion) {
    let repetitive = b"the the the and the and the and the cat sat on the mat".repeat(2000);
    let packed = lzss::compress(&repetitive).unwrap();

    c.bench_function("lzss_decompress_repetitive", |b| {
        b.iter(|| lzss::decompress(&packed).unwrap())
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
