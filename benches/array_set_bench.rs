//! ArraySet benchmarks.
//!
//! Compares lookup and insertion against `std::collections::HashSet` at the
//! small sizes the set is meant for, and measures the cost of churn at the
//! canonical capacities served by the pool.

use std::collections::HashSet;
use std::hint::black_box;

use arrayset::ArraySet;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

const SIZES: [u32; 4] = [8, 32, 128, 512];

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("array_set_insert");

    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("ArraySet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = ArraySet::new();
                for value in 0..size {
                    set.insert(black_box(value));
                }
                black_box(set)
            });
        });

        group.bench_with_input(BenchmarkId::new("HashSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut set = HashSet::new();
                for value in 0..size {
                    set.insert(black_box(value));
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("array_set_contains");

    for size in SIZES {
        let array_set: ArraySet<u32> = (0..size).collect();
        let hash_set: HashSet<u32> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("ArraySet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for value in 0..size {
                    black_box(array_set.contains(black_box(&value)));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("HashSet", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for value in 0..size {
                    black_box(hash_set.contains(black_box(&value)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_add_all(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("array_set_add_all");

    for size in SIZES {
        let values: Vec<u32> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("add_all", size), &size, |bencher, _| {
            bencher.iter_batched(
                || values.clone(),
                |values| {
                    let mut set = ArraySet::new();
                    set.add_all(values);
                    black_box(set)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_small_churn(criterion: &mut Criterion) {
    criterion.bench_function("array_set_small_churn", |bencher| {
        bencher.iter(|| {
            let mut set = ArraySet::new();
            for value in 0..6_u32 {
                set.insert(black_box(value));
            }
            for value in 0..6_u32 {
                set.remove(black_box(&value));
            }
            black_box(set)
        });
    });
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_contains,
    benchmark_add_all,
    benchmark_small_churn
);
criterion_main!(benches);
