//! Criterion benchmarks for the VRP solver.
//!
//! Measures single-group solve time across group sizes, against the built-in
//! cheapest-arc solver as a baseline.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package convoy-solver-vrp
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;
use std::time::Duration;

use convoy_core::{CheapestArcSolver, RouteSolver};
use convoy_solver_vrp::VrpRouteSolver;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};


use bench_support::{BENCHMARK_SEED, generate_group_matrix};

/// Group sizes to benchmark, in customers.
const GROUP_SIZES: &[usize] = &[10, 25, 50];

fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_circuit");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let vrp = VrpRouteSolver::new();
    let cheapest_arc = CheapestArcSolver::default();

    for &size in GROUP_SIZES {
        // Pre-generate inputs outside the benchmark loop.
        let matrix = generate_group_matrix(size, BENCHMARK_SEED);

        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("vrp_core", size), &size, |b, _| {
            b.iter(|| vrp.solve_circuit(black_box(&matrix), 0));
        });
        group.bench_with_input(BenchmarkId::new("cheapest_arc", size), &size, |b, _| {
            b.iter(|| cheapest_arc.solve_circuit(black_box(&matrix), 0));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
