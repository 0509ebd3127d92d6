//! Reviewer variance estimated from data.
//!
//! Reviewers are grouped by the percentile rank of their reputation. Within
//! each group, the spread of their evaluations around a reference
//! estimator's most trusted content estimates stands in for their noise.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use peerscore_core::{ContentId, EstimationError};

use crate::estimator::context::RunContext;
use crate::estimator::pipeline::Estimator;
use crate::estimator::state::{BinReport, BinStatistics, ReviewerWeights};
use crate::estimator::strategy::WeightStrategy;
use crate::stats::{self, SampleSummary};

/// Snapshot of the reference estimator's outputs taken at construction.
///
/// Holding a copy keeps the empirical estimator independent of the
/// reference's lifetime: recomputing the reference later has no effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEstimates {
    pub name: String,
    pub content_quality_estimates: Vec<Option<f64>>,
    pub commitment_order: Vec<ContentId>,
}

impl ReferenceEstimates {
    /// Copy what the empirical variant needs out of a computed estimator.
    pub fn from_estimator(reference: &Estimator) -> Result<Self, EstimationError> {
        let state = reference
            .state()
            .map_err(|_| EstimationError::ReferenceNotComputed {
                reference: reference.name().to_string(),
            })?;
        Ok(Self {
            name: reference.name().to_string(),
            content_quality_estimates: state.content_quality_estimates.clone(),
            commitment_order: state.content_commitment_order.clone(),
        })
    }

    pub fn content_count(&self) -> usize {
        self.content_quality_estimates.len()
    }
}

#[derive(Debug, Clone)]
pub struct EmpiricalBayesWeighting {
    reference: ReferenceEstimates,
    reference_commitment_fraction: f64,
    bin_width: f64,
}

impl EmpiricalBayesWeighting {
    pub fn new(
        reference: ReferenceEstimates,
        reference_commitment_fraction: f64,
        bin_width: f64,
    ) -> Self {
        Self {
            reference,
            reference_commitment_fraction,
            bin_width,
        }
    }

    pub fn reference(&self) -> &ReferenceEstimates {
        &self.reference
    }

    /// Number of bins of width `bin_width` needed to cover [0, 1). Saturates
    /// for very narrow bins; only occupied bins are ever materialized.
    pub fn bin_count(&self) -> usize {
        ((1.0 / self.bin_width) - 1e-9).ceil().max(1.0) as usize
    }

    /// Bin holding a percentile rank in [0, 1).
    pub fn bin_of(&self, rank: f64) -> usize {
        let bin = (rank / self.bin_width).floor().max(0.0) as usize;
        bin.min(self.bin_count() - 1)
    }

    /// How many items from the head of the reference commitment order feed
    /// the residuals.
    pub fn considered_content(&self, content_count: usize) -> usize {
        ((content_count as f64) * self.reference_commitment_fraction).floor() as usize
    }
}

impl WeightStrategy for EmpiricalBayesWeighting {
    fn label(&self) -> &'static str {
        "empirical-bayes"
    }

    fn weigh(&self, ctx: &RunContext<'_>) -> Result<ReviewerWeights, EstimationError> {
        let snapshot = ctx.snapshot;
        let content_count = snapshot.content_count();
        if self.reference.content_count() != content_count
            || self.reference.commitment_order.len() != content_count
        {
            return Err(EstimationError::ReferenceMismatch {
                reference: self.reference.name.clone(),
                expected: self.reference.content_count(),
                actual: content_count,
            });
        }

        // Step 1: percentile bins over defined reputations.
        let user_percentiles = stats::percentile_ranks(ctx.reputations);
        let user_bins: Vec<Option<usize>> = user_percentiles
            .iter()
            .map(|rank| rank.map(|r| self.bin_of(r)))
            .collect();

        // Step 2: residuals around the reference's most trusted items.
        let reference_content: Vec<ContentId> = self
            .reference
            .commitment_order
            .iter()
            .take(self.considered_content(content_count))
            .copied()
            .collect();

        let mut residuals: BTreeMap<usize, Vec<f64>> =
            user_bins.iter().flatten().map(|&b| (b, Vec::new())).collect();
        for &content_id in &reference_content {
            let Some(reference_estimate) =
                self.reference.content_quality_estimates[content_id.index()]
            else {
                continue;
            };
            for review in snapshot.reviews_of(content_id) {
                if let Some(bin) = user_bins[review.author_id.index()] {
                    residuals
                        .entry(bin)
                        .or_default()
                        .push(review.evaluation - reference_estimate);
                }
            }
        }

        // Step 3: one spread per occupied bin.
        let summaries: BTreeMap<usize, SampleSummary> = residuals
            .iter()
            .map(|(&index, values)| (index, SampleSummary::of(values)))
            .collect();

        for (&index, summary) in &summaries {
            debug!(
                bin = index,
                samples = summary.samples,
                std_dev = ?summary.std_dev,
                "residual bin"
            );
            if summary.samples > 0 && summary.precision().is_none() {
                warn!(
                    bin = index,
                    samples = summary.samples,
                    "degenerate residual bin, its reviewers get no weight"
                );
            }
        }

        let weights = user_bins
            .iter()
            .map(|bin| bin.and_then(|b| summaries.get(&b)?.precision()))
            .collect();
        let sd_estimates = user_bins
            .iter()
            .map(|bin| bin.and_then(|b| summaries.get(&b)?.std_dev.filter(|&sd| sd > 0.0)))
            .collect();

        let bins = summaries
            .into_iter()
            .map(|(index, residuals)| BinStatistics {
                index,
                lower: (index as f64 * self.bin_width).min(1.0),
                upper: ((index + 1) as f64 * self.bin_width).min(1.0),
                residuals,
            })
            .collect();

        Ok(ReviewerWeights {
            weights,
            sd_estimates,
            bins: Some(BinReport {
                bin_width: self.bin_width,
                bins,
                user_percentiles,
                user_bins,
                reference_content,
            }),
        })
    }
}
