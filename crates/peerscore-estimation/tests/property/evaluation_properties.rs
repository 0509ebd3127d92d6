use proptest::prelude::*;

use peerscore_estimation::{Estimator, PerformanceEvaluator};
use peerscore_fixtures::{generate_population, GeneratorConfig};

proptest! {
    #[test]
    fn prop_report_shape(
        seed in 1u64..500,
        users in 0usize..40,
        resolution in 0.01f64..=1.0,
        threshold in 0.0f64..99.0,
    ) {
        let snapshot = generate_population(&GeneratorConfig {
            users,
            seed,
            ..GeneratorConfig::default()
        })
        .unwrap();
        let mut estimator = Estimator::thresholded_mean(threshold).unwrap();
        estimator.compute(&snapshot).unwrap();
        let report = PerformanceEvaluator::new(resolution)
            .unwrap()
            .evaluate(&estimator, &snapshot)
            .unwrap();

        prop_assert_eq!(report.commitment_fractions.len(), report.content_correlations.len());
        prop_assert!(report.commitment_fractions.windows(2).all(|w| w[0] < w[1]));
        if report.content_estimated == 0 {
            prop_assert!(report.commitment_fractions.is_empty());
        } else {
            let last = *report.commitment_fractions.last().unwrap();
            let expected = report.content_estimated as f64 / snapshot.content_count() as f64;
            prop_assert!((last - expected).abs() < 1e-12);
        }
        for corr in report
            .content_correlations
            .iter()
            .chain(std::iter::once(&report.reviewer_correlation))
            .flatten()
        {
            prop_assert!((-1.0..=1.0).contains(corr));
        }
        prop_assert!(report.reviewer_coverage >= 0.0);
    }
}
