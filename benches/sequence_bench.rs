//! Benchmark for the linear containers vs their standard counterparts.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::collections::{LinkedList, VecDeque};
use strata::sequence::{Deque, List, Vector};

// =============================================================================
// push_back Benchmark
// =============================================================================

fn benchmark_push_back(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("push_back");

    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("Vector", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vector::new();
                for index in 0..size {
                    vector.push_back(black_box(index));
                }
                black_box(vector)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for index in 0..size {
                    vector.push(black_box(index));
                }
                black_box(vector)
            });
        });

        group.bench_with_input(BenchmarkId::new("List", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut list = List::new();
                for index in 0..size {
                    list.push_back(black_box(index));
                }
                black_box(list)
            });
        });

        group.bench_with_input(BenchmarkId::new("LinkedList", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut list = LinkedList::new();
                for index in 0..size {
                    list.push_back(black_box(index));
                }
                black_box(list)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Deque Benchmark
// =============================================================================

fn benchmark_deque_alternating(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("deque_alternating");

    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("Deque", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut deque = Deque::new();
                for index in 0..size {
                    deque.push_back(black_box(index));
                }
                while let Ok(front) = deque.pop_front() {
                    black_box(front);
                    if let Ok(back) = deque.pop_back() {
                        black_box(back);
                    }
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("VecDeque", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut deque = VecDeque::new();
                for index in 0..size {
                    deque.push_back(black_box(index));
                }
                while let Some(front) = deque.pop_front() {
                    black_box(front);
                    if let Some(back) = deque.pop_back() {
                        black_box(back);
                    }
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// sort Benchmark
// =============================================================================

fn benchmark_list_sort(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("list_sort");

    for size in [100, 1000, 10000] {
        let values: Vec<i32> = (0..size).map(|index| (index * 7919) % size).collect();

        group.bench_with_input(BenchmarkId::new("List", size), &values, |bencher, values| {
            bencher.iter(|| {
                let mut list: List<i32> = values.iter().copied().collect();
                list.sort();
                black_box(list)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &values, |bencher, values| {
            bencher.iter(|| {
                let mut vector = values.clone();
                vector.sort();
                black_box(vector)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_push_back,
    benchmark_deque_alternating,
    benchmark_list_sort
);

criterion_main!(benches);
