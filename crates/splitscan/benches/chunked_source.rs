//! Benchmark – line scanning when the source hands out small reads
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use splitscan::{
    Scanner,
    chunk_utils::{Chunked, Trickle},
};

fn make_lines(count: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..count {
        out.extend_from_slice(format!("{i:08} {}\n", "x".repeat(i % 120)).as_bytes());
    }
    out
}

fn bench_chunked_source(c: &mut Criterion) {
    let payload = make_lines(2_000);

    let mut group = c.benchmark_group("chunked_source");
    for &parts in &[1usize, 100, 10_000] {
        group.bench_with_input(BenchmarkId::new("chunked", parts), &parts, |b, &parts| {
            b.iter(|| {
                let mut scanner = Scanner::new(Chunked::split(black_box(&payload), parts));
                let mut lines = 0usize;
                while scanner.advance() {
                    lines += 1;
                }
                black_box(lines);
            });
        });
    }
    for &max_read in &[16usize, 512] {
        group.bench_with_input(BenchmarkId::new("trickle", max_read), &max_read, |b, &max_read| {
            b.iter(|| {
                let mut scanner = Scanner::new(Trickle::new(black_box(&payload[..]), max_read));
                scanner.set_limits(64, 4096).unwrap();
                let mut lines = 0usize;
                while scanner.advance() {
                    lines += 1;
                }
                black_box(lines);
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_chunked_source }
criterion_main!(benches);
