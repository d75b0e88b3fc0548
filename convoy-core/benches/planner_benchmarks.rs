//! Criterion benchmarks for the route planner.
//!
//! Measures end-to-end planning time across customer counts, sequentially and
//! on a worker pool.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package convoy-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;
use std::time::Duration;

use convoy_core::{PlannerConfig, RoutePlanner, build_distance_matrix};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};


use bench_support::{BENCHMARK_SEED, generate_customers};

/// Customer counts to benchmark.
const PROBLEM_SIZES: &[usize] = &[50, 200, 500];

/// Worker counts compared for the full pipeline.
const WORKER_COUNTS: &[usize] = &[1, 4];

fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");
    for &size in PROBLEM_SIZES {
        let customers = generate_customers(size, BENCHMARK_SEED);
        let latitudes = customers.latitudes();
        let longitudes = customers.longitudes();
        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| build_distance_matrix(black_box(&latitudes), black_box(&longitudes)));
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    group.measurement_time(Duration::from_secs(10));
    for &size in PROBLEM_SIZES {
        let customers = generate_customers(size, BENCHMARK_SEED);
        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        for &workers in WORKER_COUNTS {
            let config = PlannerConfig::default()
                .with_max_cost(150.0)
                .with_workers(workers);
            let planner = RoutePlanner::with_config(config)
                .unwrap_or_else(|err| panic!("benchmark config invalid: {err}"));
            group.bench_with_input(
                BenchmarkId::new(format!("workers_{workers}"), size),
                &size,
                |b, _| b.iter(|| planner.plan(black_box(&customers))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_distance_matrix, bench_plan);
criterion_main!(benches);
