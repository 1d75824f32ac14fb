// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use rampart_vec::RampartVec;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench vec
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

const SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];

// =============================================================================
// Vec vs RampartVec
// =============================================================================

fn bench_push_from_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_from_empty");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = RampartVec::new();
                for i in 0..s {
                    vec.push(i as u64).expect("Failed to push(..)");
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_push_within_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_within_capacity");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::<u64>::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            let mut vec = RampartVec::<u64>::try_with_len(s).expect("Failed to try_with_len(..)");
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64).expect("Failed to push(..)");
                }
                black_box(&vec);
            });
        });
    }

    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let source: Vec<String> = (0..size).map(|i| i.to_string()).collect();

        group.bench_with_input(BenchmarkId::new("Vec", size), &source, |b, source| {
            b.iter(|| black_box(source.clone()));
        });

        let rampart = RampartVec::try_from_slice(&source).expect("Failed to try_from_slice(..)");

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &rampart, |b, source| {
            b.iter(|| black_box(source.try_clone().expect("Failed to try_clone()")));
        });
    }

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                Vec::<u64>::new,
                |mut vec| {
                    vec.resize(s, 0);
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            b.iter_batched(
                RampartVec::<u64>::new,
                |mut vec| {
                    vec.resize(s).expect("Failed to resize(..)");
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || vec![String::from("x"); s],
                |mut vec| {
                    vec.clear();
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("RampartVec", size), &size, |b, &s| {
            b.iter_batched(
                || {
                    RampartVec::try_from_elem(s, &String::from("x"))
                        .expect("Failed to try_from_elem(..)")
                },
                |mut vec| {
                    vec.clear();
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    vec_benches,
    bench_push_from_empty,
    bench_push_within_capacity,
    bench_clone,
    bench_resize,
    bench_clear
);

criterion_main!(vec_benches);
