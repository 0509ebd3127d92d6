//! Per-run derived state owned by an estimator.

use serde::{Deserialize, Serialize};

use peerscore_core::{ContentId, ReviewId};

use crate::stats::SampleSummary;

/// Stage-2 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerWeights {
    /// Indexed by user id. `None` excludes the reviewer from aggregation.
    pub weights: Vec<Option<f64>>,
    /// Standard deviation behind each weight, for variants that model one.
    pub sd_estimates: Vec<Option<f64>>,
    /// Percentile-bin diagnostics, empirical Bayes only.
    pub bins: Option<BinReport>,
}

impl ReviewerWeights {
    /// The same weight for every user, with no variance model.
    pub fn uniform(users: usize, weight: f64) -> Self {
        Self {
            weights: vec![Some(weight); users],
            sd_estimates: vec![None; users],
            bins: None,
        }
    }
}

/// Stage-3 output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEstimates {
    /// Indexed by content id.
    pub estimates: Vec<Option<f64>>,
    /// Reviews that passed the filter and contributed, per content id.
    pub selected_reviews: Vec<Vec<ReviewId>>,
    /// Reputation a reviewer needed to be counted; `None` when no reviewer
    /// had a defined reputation.
    pub reputation_threshold: Option<f64>,
}

/// Residual statistics of one reviewer percentile bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinStatistics {
    /// Position of the bin along [0, 1), counted in bin widths.
    pub index: usize,
    /// Inclusive lower edge of the bin's percentile range.
    pub lower: f64,
    /// Exclusive upper edge, capped at 1.
    pub upper: f64,
    #[serde(flatten)]
    pub residuals: SampleSummary,
}

/// How the empirical Bayes variant binned reviewers and what it measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinReport {
    pub bin_width: f64,
    /// Bins holding at least one reviewer, ascending by index.
    pub bins: Vec<BinStatistics>,
    /// Percentile rank of each user's reputation, indexed by user id.
    pub user_percentiles: Vec<Option<f64>>,
    /// Bin of each user, indexed by user id.
    pub user_bins: Vec<Option<usize>>,
    /// Reference content items whose reviews produced residuals.
    pub reference_content: Vec<ContentId>,
}

impl BinReport {
    /// Statistics of the bin at `index`, if any reviewer fell into it.
    pub fn bin(&self, index: usize) -> Option<&BinStatistics> {
        self.bins
            .binary_search_by_key(&index, |b| b.index)
            .ok()
            .map(|i| &self.bins[i])
    }
}

/// Everything one `compute()` call derives. Replaced wholesale by the next call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorState {
    pub reviewer_quality_estimates: Vec<Option<f64>>,
    pub reviewer_weights: Vec<Option<f64>>,
    pub reviewer_sd_estimates: Vec<Option<f64>>,
    pub content_quality_estimates: Vec<Option<f64>>,
    pub selected_reviews_for_content: Vec<Vec<ReviewId>>,
    pub reputation_threshold: Option<f64>,
    pub content_commitment_order: Vec<ContentId>,
    pub bin_report: Option<BinReport>,
}

impl EstimatorState {
    pub fn defined_reviewer_estimates(&self) -> usize {
        self.reviewer_quality_estimates.iter().flatten().count()
    }

    pub fn defined_content_estimates(&self) -> usize {
        self.content_quality_estimates.iter().flatten().count()
    }
}
