use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_std::compression::{deflate, lz4, snappy, zstd};
use tessera_std::traits::compression::{Compress, CompressionLevel, Decompress};

const PAYLOAD: &str = "{\"sensor\":\"thermo-04\",\"reading\":21.5,\"unit\":\"celsius\"}";

fn batch_sized_payload() -> Bytes {
    Bytes::from(PAYLOAD.repeat(1024))
}

pub fn deflate_benchmarks(c: &mut Criterion) {
    c.bench_function("DEFLATE | zlib | fastest", |b| {
        let payload = batch_sized_payload();

        b.iter(|| {
            let compressed = deflate::DeflateComp::zlib()
                .fastest()
                .compress(black_box(payload.clone()))
                .unwrap();

            deflate::DeflateDecomp::zlib()
                .decompress(black_box(compressed))
                .unwrap();
        })
    });

    c.bench_function("DEFLATE | zlib | balanced", |b| {
        let payload = batch_sized_payload();

        b.iter(|| {
            let compressed = deflate::DeflateComp::zlib()
                .balanced()
                .compress(black_box(payload.clone()))
                .unwrap();

            deflate::DeflateDecomp::zlib()
                .decompress(black_box(compressed))
                .unwrap();
        })
    });
}

pub fn zstd_benchmarks(c: &mut Criterion) {
    c.bench_function("zstd | fastest", |b| {
        let payload = batch_sized_payload();

        b.iter(|| {
            let compressed = zstd::ZstdComp::new()
                .fastest()
                .compress(black_box(payload.clone()))
                .unwrap();

            zstd::ZstdDecomp.decompress(black_box(compressed)).unwrap();
        })
    });

    c.bench_function("zstd | balanced", |b| {
        let payload = batch_sized_payload();

        b.iter(|| {
            let compressed = zstd::ZstdComp::new()
                .balanced()
                .compress(black_box(payload.clone()))
                .unwrap();

            zstd::ZstdDecomp.decompress(black_box(compressed)).unwrap();
        })
    });
}

pub fn lz4_benchmarks(c: &mut Criterion) {
    c.bench_function("lz4", |b| {
        let payload = batch_sized_payload();

        b.iter(|| {
            let compressed = lz4::Lz4Comp.compress(black_box(payload.clone())).unwrap();
            lz4::Lz4Decomp.decompress(black_box(compressed)).unwrap();
        })
    });
}

pub fn snappy_benchmarks(c: &mut Criterion) {
    c.bench_function("snappy", |b| {
        let payload = batch_sized_payload();

        b.iter(|| {
            let compressed = snappy::SnappyComp
                .compress(black_box(payload.clone()))
                .unwrap();
            snappy::SnappyDecomp.decompress(black_box(compressed)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    deflate_benchmarks,
    zstd_benchmarks,
    lz4_benchmarks,
    snappy_benchmarks
);
criterion_main!(benches);
