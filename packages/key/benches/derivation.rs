//! Derivation throughput per slice size

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use paced_key::{Pbkdf2Config, Pbkdf2Engine};
use std::hint::black_box;

const ITERATIONS: u32 = 4096;

fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pbkdf2_sha1");
    group.throughput(Throughput::Elements(u64::from(ITERATIONS)));

    for chunk in [1u32, 10, 100, 1_000, ITERATIONS] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let config = Pbkdf2Config::default().with_chunk_size(chunk);
                Pbkdf2Engine::with_config("password", "salt", ITERATIONS, 20, config)
                    .and_then(|engine| engine.run_to_completion(|p| {
                        black_box(p);
                    }))
                    .map(|key| black_box(key.len()))
            });
        });
    }

    group.finish();
}

fn bench_key_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("pbkdf2_sha1_blocks");

    for key_length in [20usize, 64, 128] {
        group.bench_with_input(
            BenchmarkId::from_parameter(key_length),
            &key_length,
            |b, &key_length| {
                b.iter(|| {
                    Pbkdf2Engine::with_config(
                        "password",
                        "salt",
                        1_000,
                        key_length,
                        Pbkdf2Config::batch(),
                    )
                    .and_then(|engine| engine.run_to_completion(|_| {}))
                    .map(|key| black_box(key.len()))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_chunk_sizes, bench_key_length);
criterion_main!(benches);
