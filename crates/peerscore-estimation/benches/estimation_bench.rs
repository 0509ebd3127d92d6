use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use peerscore_estimation::{EmpiricalBayesParams, Estimator, OracleParams, PerformanceEvaluator};
use peerscore_fixtures::{generate_population, GeneratorConfig, PopulationSize};

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    for size in [PopulationSize::Small, PopulationSize::Medium] {
        let snapshot = generate_population(&GeneratorConfig::sized(size, 42)).unwrap();
        let users = size.user_count();

        for parallel in [false, true] {
            let mode = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(
                BenchmarkId::new(format!("simple_mean_{mode}"), users),
                &snapshot,
                |b, s| {
                    let mut estimator = Estimator::simple_mean().with_parallel(parallel);
                    b.iter(|| {
                        estimator.compute(s).unwrap();
                    });
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("oracle_bayes", users), &snapshot, |b, s| {
            let mut estimator = Estimator::oracle_bayes(OracleParams::default());
            b.iter(|| {
                estimator.compute(s).unwrap();
            });
        });

        let mut reference = Estimator::simple_mean();
        reference.compute(&snapshot).unwrap();
        group.bench_with_input(BenchmarkId::new("empirical_bayes", users), &snapshot, |b, s| {
            let mut estimator =
                Estimator::empirical_bayes(&reference, EmpiricalBayesParams::default()).unwrap();
            b.iter(|| {
                estimator.compute(s).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let snapshot = generate_population(&GeneratorConfig::sized(PopulationSize::Medium, 42)).unwrap();
    let mut estimator = Estimator::simple_mean();
    estimator.compute(&snapshot).unwrap();
    let evaluator = PerformanceEvaluator::new(0.01).unwrap();

    c.bench_function("evaluate_1k_users_resolution_0.01", |b| {
        b.iter(|| {
            evaluator.evaluate(&estimator, &snapshot).unwrap();
        });
    });
}

criterion_group!(benches, bench_compute, bench_evaluate);
criterion_main!(benches);
