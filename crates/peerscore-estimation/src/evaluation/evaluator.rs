//! Reviewer and content accuracy of a computed estimator.

use tracing::{debug, info};

use peerscore_core::config::EvaluationConfig;
use peerscore_core::{constants, ContentId, EstimationError, PopulationSnapshot};

use super::report::PerformanceReport;
use crate::estimator::Estimator;
use crate::stats;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceEvaluator {
    commitment_resolution: f64,
}

impl Default for PerformanceEvaluator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PerformanceEvaluator {
    /// `commitment_resolution` is the step between evaluated prefixes of the
    /// commitment order, as a share of all content; must be in (0, 1].
    pub fn new(commitment_resolution: f64) -> Result<Self, EstimationError> {
        if !(commitment_resolution > 0.0 && commitment_resolution <= 1.0) {
            return Err(EstimationError::invalid(
                "commitment_resolution",
                format!("{commitment_resolution} is outside (0, 1]"),
            ));
        }
        Ok(Self {
            commitment_resolution,
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            commitment_resolution: constants::DEFAULT_COMMITMENT_RESOLUTION,
        }
    }

    pub fn from_config(config: &EvaluationConfig) -> Result<Self, EstimationError> {
        Self::new(config.effective_commitment_resolution())
    }

    pub fn commitment_resolution(&self) -> f64 {
        self.commitment_resolution
    }

    /// Prefix sizes to evaluate: multiples of the step strictly below
    /// `max_commitment`, then `max_commitment` itself.
    pub fn commitment_sizes(&self, content_count: usize, max_commitment: usize) -> Vec<usize> {
        if max_commitment == 0 {
            return Vec::new();
        }
        let step = ((self.commitment_resolution * content_count as f64).floor() as usize).max(1);
        let mut sizes: Vec<usize> = (1..)
            .map(|k| k * step)
            .take_while(|&size| size < max_commitment)
            .collect();
        sizes.push(max_commitment);
        sizes
    }

    pub fn evaluate(
        &self,
        estimator: &Estimator,
        snapshot: &PopulationSnapshot,
    ) -> Result<PerformanceReport, EstimationError> {
        let state = estimator.state()?;
        check_population(
            estimator,
            "users",
            state.reviewer_quality_estimates.len(),
            snapshot.user_count(),
        )?;
        check_population(
            estimator,
            "content items",
            state.content_quality_estimates.len(),
            snapshot.content_count(),
        )?;

        let span = peerscore_core::evaluate_span!(estimator.name(), self.commitment_resolution);
        let _guard = span.enter();

        let (true_reviewer, estimated_reviewer): (Vec<f64>, Vec<f64>) = snapshot
            .users
            .iter()
            .zip(&state.reviewer_quality_estimates)
            .filter_map(|(user, estimate)| estimate.map(|e| (user.reviewer_quality, e)))
            .unzip();
        let reviewer_correlation = stats::pearson(&true_reviewer, &estimated_reviewer);
        let content_count = snapshot.content_count();
        let reviewer_coverage = if content_count == 0 {
            0.0
        } else {
            true_reviewer.len() as f64 / content_count as f64
        };

        let content_estimated = state.defined_content_estimates();
        let sizes = self.commitment_sizes(content_count, content_estimated);
        let content_correlations: Vec<Option<f64>> = sizes
            .iter()
            .map(|&size| {
                let corr = prefix_correlation(
                    snapshot,
                    &state.content_quality_estimates,
                    &state.content_commitment_order[..size],
                );
                debug!(committed = size, correlation = ?corr, "commitment prefix");
                corr
            })
            .collect();
        let commitment_fractions = sizes
            .iter()
            .map(|&size| size as f64 / content_count as f64)
            .collect();

        let report = PerformanceReport {
            estimator: estimator.name().to_string(),
            reviewer_correlation,
            reviewer_coverage,
            reviewers_estimated: true_reviewer.len(),
            content_estimated,
            commitment_fractions,
            content_correlations,
        };
        info!(
            reviewer_correlation = ?report.reviewer_correlation,
            content_correlation = ?report.final_content_correlation(),
            "evaluation complete"
        );
        Ok(report)
    }
}

fn check_population(
    estimator: &Estimator,
    entity: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), EstimationError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EstimationError::SnapshotMismatch {
            estimator: estimator.name().to_string(),
            entity,
            expected,
            actual,
        })
    }
}

/// Correlation of truth and estimate over the defined estimates in a
/// committed prefix.
fn prefix_correlation(
    snapshot: &PopulationSnapshot,
    estimates: &[Option<f64>],
    prefix: &[ContentId],
) -> Option<f64> {
    let (truth, estimated): (Vec<f64>, Vec<f64>) = prefix
        .iter()
        .filter_map(|&id| estimates[id.index()].map(|e| (snapshot.content_item(id).quality, e)))
        .unzip();
    stats::pearson(&truth, &estimated)
}
