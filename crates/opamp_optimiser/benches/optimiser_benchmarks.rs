//! Benchmarks for opamp_optimiser.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use opamp_core::types::ReferenceTable;
use opamp_models::logistic::{GeneralisedLogistic, LogisticParams};
use opamp_optimiser::monte_carlo::{MonteCarloConfig, MonteCarloFitter, NullSink};
use opamp_optimiser::rng::FitRng;
use opamp_optimiser::scoring::score;

fn reference_table() -> ReferenceTable {
    ReferenceTable::from_pairs(&[
        (0.81, 10.31),
        (2.40, 9.80),
        (4.00, 8.20),
        (4.54, 4.54),
        (5.20, 1.90),
        (7.00, 0.95),
        (10.31, 0.81),
    ])
    .unwrap()
}

fn benchmark_score(c: &mut Criterion) {
    let table = reference_table();
    let curve = GeneralisedLogistic::anchored(
        LogisticParams::new(5.5285312141864937e-5, 2.1608922897100533, 0.67181935418132133),
        &table,
    );

    c.bench_function("score_7_points", |b| {
        b.iter(|| score(black_box(&curve), black_box(&table)))
    });
}

fn benchmark_fit(c: &mut Criterion) {
    let table = reference_table();
    let mut group = c.benchmark_group("monte_carlo_fit");

    for budget in [1_000u64, 10_000] {
        let fitter = MonteCarloFitter::new(MonteCarloConfig {
            max_iterations: budget,
            sigma: 0.02,
        })
        .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(budget), &fitter, |b, fitter| {
            b.iter(|| {
                let mut rng = FitRng::from_seed(42);
                fitter.fit(
                    black_box(&table),
                    LogisticParams::reset(),
                    &mut rng,
                    &mut NullSink,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_score, benchmark_fit);
criterion_main!(benches);
