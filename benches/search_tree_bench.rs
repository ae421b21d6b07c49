//! Benchmark for TreeMap and TreeSet vs standard BTreeMap and BTreeSet.
//!
//! Keys are inserted in a scrambled order: the tree does not rebalance, so
//! sorted input would measure the degenerate case instead.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};
use strata::ordered::{TreeMap, TreeSet};

fn scrambled(size: i32) -> impl Iterator<Item = i32> {
    (0..size).map(move |index| (index * 7919) % size)
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        // TreeMap insert
        group.bench_with_input(BenchmarkId::new("TreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = TreeMap::new();
                for key in scrambled(size) {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });

        // Standard BTreeMap insert
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for key in scrambled(size) {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let tree_map: TreeMap<i32, i32> = scrambled(size).map(|key| (key, key * 2)).collect();
        let standard_map: BTreeMap<i32, i32> = scrambled(size).map(|key| (key, key * 2)).collect();

        group.bench_with_input(BenchmarkId::new("TreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for key in 0..size {
                    black_box(tree_map.get(&key));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for key in 0..size {
                    black_box(standard_map.get(&key));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in [100, 1000, 10000] {
        let tree_map: TreeMap<i32, i32> = scrambled(size).map(|key| (key, key)).collect();
        let standard_map: BTreeMap<i32, i32> = scrambled(size).map(|key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("TreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = tree_map.clone();
                for key in 0..size {
                    black_box(map.remove(&key));
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = standard_map.clone();
                for key in 0..size {
                    black_box(map.remove(&key));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// iter Benchmark
// =============================================================================

fn benchmark_iter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iter");

    for size in [100, 1000, 10000] {
        let tree_set: TreeSet<i32> = scrambled(size).collect();
        let standard_set: BTreeSet<i32> = scrambled(size).collect();

        group.bench_with_input(BenchmarkId::new("TreeSet", size), &size, |bencher, _| {
            bencher.iter(|| black_box(tree_set.iter().sum::<i32>()));
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, _| {
            bencher.iter(|| black_box(standard_set.iter().sum::<i32>()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_get,
    benchmark_remove,
    benchmark_iter
);

criterion_main!(benches);
