use std::collections::HashSet;

use proptest::prelude::*;

use peerscore_core::{ContentId, PopulationSnapshot};
use peerscore_estimation::{EmpiricalBayesParams, Estimator, OracleParams};
use peerscore_fixtures::{generate_population, GeneratorConfig};

fn population(seed: u64, users: usize, bot_fraction: f64) -> PopulationSnapshot {
    generate_population(&GeneratorConfig {
        users,
        bot_fraction,
        seed,
        ..GeneratorConfig::default()
    })
    .unwrap()
}

/// Every variant, the empirical one referencing a computed simple mean.
fn all_variants(snapshot: &PopulationSnapshot, threshold: f64) -> Vec<Estimator> {
    let mut reference = Estimator::simple_mean();
    reference.compute(snapshot).unwrap();
    vec![
        Estimator::simple_mean(),
        Estimator::thresholded_mean(threshold).unwrap(),
        Estimator::oracle_bayes(OracleParams::new(threshold, 0.18).unwrap()),
        Estimator::empirical_bayes(
            &reference,
            EmpiricalBayesParams::new(0.5, 0.1)
                .unwrap()
                .with_threshold(threshold)
                .unwrap(),
        )
        .unwrap(),
    ]
}

proptest! {
    #[test]
    fn prop_commitment_order_is_permutation(
        seed in 1u64..500,
        users in 0usize..40,
        bots in 0.0f64..0.3,
        threshold in 0.0f64..99.0,
    ) {
        let snapshot = population(seed, users, bots);
        for mut estimator in all_variants(&snapshot, threshold) {
            let state = estimator.compute(&snapshot).unwrap();
            let order = &state.content_commitment_order;
            prop_assert_eq!(order.len(), snapshot.content_count());
            let distinct: HashSet<ContentId> = order.iter().copied().collect();
            prop_assert_eq!(distinct.len(), snapshot.content_count());
            prop_assert!(order.iter().all(|id| id.index() < snapshot.content_count()));
        }
    }
}

proptest! {
    #[test]
    fn prop_unsupported_content_is_undefined_and_last(
        seed in 1u64..500,
        users in 1usize..40,
        threshold in 0.0f64..99.0,
    ) {
        let snapshot = population(seed, users, 0.0);
        for mut estimator in all_variants(&snapshot, threshold) {
            let state = estimator.compute(&snapshot).unwrap();
            let mut seen_unsupported = false;
            for id in &state.content_commitment_order {
                let unsupported = state.selected_reviews_for_content[id.index()].is_empty();
                if unsupported {
                    prop_assert_eq!(state.content_quality_estimates[id.index()], None);
                    seen_unsupported = true;
                } else {
                    // Nothing supported comes after an unsupported item.
                    prop_assert!(!seen_unsupported, "{} out of order", estimator.name());
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_compute_is_idempotent(seed in 1u64..500, users in 0usize..40) {
        let snapshot = population(seed, users, 0.1);
        for mut estimator in all_variants(&snapshot, 30.0) {
            let first = estimator.compute(&snapshot).unwrap().clone();
            let second = estimator.compute(&snapshot).unwrap();
            prop_assert_eq!(&first, second);
        }
    }
}

proptest! {
    #[test]
    fn prop_simple_mean_is_threshold_zero(seed in 1u64..500, users in 0usize..40) {
        let snapshot = population(seed, users, 0.1);
        let mut simple = Estimator::simple_mean();
        let mut thresholded = Estimator::thresholded_mean(0.0).unwrap();
        prop_assert_eq!(
            simple.compute(&snapshot).unwrap(),
            thresholded.compute(&snapshot).unwrap()
        );
    }
}

proptest! {
    #[test]
    fn prop_parallel_matches_sequential(seed in 1u64..500, users in 0usize..40) {
        let snapshot = population(seed, users, 0.1);
        let sequential = all_variants(&snapshot, 20.0)
            .into_iter()
            .map(|e| e.with_parallel(false));
        let parallel = all_variants(&snapshot, 20.0)
            .into_iter()
            .map(|e| e.with_parallel(true));
        for (mut a, mut b) in sequential.zip(parallel) {
            prop_assert_eq!(a.compute(&snapshot).unwrap(), b.compute(&snapshot).unwrap());
        }
    }
}

proptest! {
    #[test]
    fn prop_oracle_weight_follows_true_quality(seed in 1u64..500, users in 2usize..40) {
        let snapshot = population(seed, users, 0.2);
        let mut oracle = Estimator::oracle_bayes(OracleParams::default());
        let weights = oracle.compute(&snapshot).unwrap().reviewer_weights.clone();

        let mut by_quality: Vec<(f64, f64)> = snapshot
            .users
            .iter()
            .zip(&weights)
            .map(|(u, w)| (u.reviewer_quality, w.unwrap()))
            .collect();
        by_quality.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in by_quality.windows(2) {
            if pair[0].0 < pair[1].0 {
                prop_assert!(
                    pair[0].1 < pair[1].1,
                    "quality {} -> weight {}, quality {} -> weight {}",
                    pair[0].0, pair[0].1, pair[1].0, pair[1].1
                );
            }
        }
    }
}
