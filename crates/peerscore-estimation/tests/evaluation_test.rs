//! Performance evaluation against ground truth.

use peerscore_core::config::EvaluationConfig;
use peerscore_core::tracing_setup::init_tracing;
use peerscore_core::EstimationError;
use peerscore_estimation::{Estimator, OracleParams, PerformanceEvaluator};
use peerscore_fixtures::{generate_population, load_population, scenarios, GeneratorConfig};

fn setup() {
    init_tracing("warn");
}

#[test]
fn evaluate_before_compute_is_rejected() {
    setup();
    let snapshot = scenarios::minimal().unwrap();
    let estimator = Estimator::simple_mean();
    let err = PerformanceEvaluator::with_defaults()
        .evaluate(&estimator, &snapshot)
        .unwrap_err();
    assert!(matches!(err, EstimationError::NotComputed { .. }));
}

#[test]
fn minimal_population_report() {
    setup();
    let snapshot = scenarios::minimal().unwrap();
    let mut estimator = Estimator::simple_mean();
    estimator.compute(&snapshot).unwrap();
    let report = estimator.evaluate(&snapshot, 0.1).unwrap();

    assert_eq!(report.estimator, "simple mean");
    // Truth (0.9, 0.3) against estimates (0.8, 0.2).
    assert!((report.reviewer_correlation.unwrap() - 1.0).abs() < 1e-9);
    // Two estimated reviewers over one content item.
    assert_eq!(report.reviewer_coverage, 2.0);
    assert_eq!(report.reviewers_estimated, 2);
    assert_eq!(report.commitment_fractions, vec![1.0]);
    assert_eq!(report.content_correlations, vec![None]);
}

#[test]
fn empty_population_report() {
    setup();
    let snapshot = scenarios::empty();
    let mut estimator = Estimator::simple_mean();
    estimator.compute(&snapshot).unwrap();
    let report = PerformanceEvaluator::with_defaults()
        .evaluate(&estimator, &snapshot)
        .unwrap();

    assert_eq!(report.reviewer_correlation, None);
    assert_eq!(report.reviewer_coverage, 0.0);
    assert!(report.commitment_fractions.is_empty());
    assert!(report.content_correlations.is_empty());
}

#[test]
fn zero_variance_truth_is_undefined() {
    setup();
    let snapshot = scenarios::zero_variance().unwrap();
    let mut estimator = Estimator::simple_mean();
    estimator.compute(&snapshot).unwrap();
    let report = estimator.evaluate(&snapshot, 0.1).unwrap();

    assert_eq!(report.reviewers_estimated, 4);
    assert_eq!(report.reviewer_correlation, None);
    assert_eq!(report.commitment_fractions, vec![0.25, 0.5, 0.75, 1.0]);
    assert!(report.content_correlations.iter().all(Option::is_none));
}

#[test]
fn commitment_prefixes_follow_the_order() {
    setup();
    let snapshot = load_population("populations/partially_reviewed.json");
    let mut estimator = Estimator::simple_mean();
    estimator.compute(&snapshot).unwrap();
    let report = estimator.evaluate(&snapshot, 0.1).unwrap();

    assert_eq!(report.content_estimated, 2);
    assert_eq!(report.commitment_fractions, vec![0.25, 0.5]);
    assert_eq!(report.content_correlations[0], None);
    assert!((report.content_correlations[1].unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(report.reviewer_coverage, 0.25);
}

#[test]
fn snapshot_of_another_size_is_rejected() {
    setup();
    let mut estimator = Estimator::simple_mean();
    estimator.compute(&scenarios::minimal().unwrap()).unwrap();
    let other = load_population("populations/partially_reviewed.json");
    let err = estimator.evaluate(&other, 0.1).unwrap_err();
    assert!(matches!(
        err,
        EstimationError::SnapshotMismatch { entity: "content items", expected: 1, actual: 4, .. }
    ));
}

#[test]
fn generated_population_report_is_well_formed() {
    setup();
    let snapshot = generate_population(&GeneratorConfig::default()).unwrap();
    let evaluator = PerformanceEvaluator::from_config(&EvaluationConfig::default()).unwrap();

    for mut estimator in [
        Estimator::simple_mean(),
        Estimator::thresholded_mean(80.0).unwrap(),
        Estimator::oracle_bayes(OracleParams::default()),
    ] {
        estimator.compute(&snapshot).unwrap();
        let report = evaluator.evaluate(&estimator, &snapshot).unwrap();

        assert_eq!(report.commitment_fractions.len(), report.content_correlations.len());
        assert!(report.commitment_fractions.windows(2).all(|w| w[0] < w[1]));
        let last = *report.commitment_fractions.last().unwrap();
        assert!((last - report.content_estimated as f64 / 100.0).abs() < 1e-12);
        for corr in report.content_correlations.iter().flatten() {
            assert!((-1.0..=1.0).contains(corr));
        }
        let json = report.to_json().unwrap();
        assert!(json.contains(&report.estimator));
    }
}
