//! The estimator: stage 1 plus three injected strategies, and the state
//! one `compute()` call leaves behind.

use std::fmt;

use tracing::{debug, info};

use peerscore_core::config::EstimationConfig;
use peerscore_core::{ContentId, EstimationError, PopulationSnapshot, ReviewId};

use super::context::RunContext;
use super::reputation::reviewer_reputations;
use super::state::{BinReport, EstimatorState};
use super::strategy::{CommitmentOrdering, ContentAggregation, WeightStrategy};
use crate::evaluation::{PerformanceEvaluator, PerformanceReport};

pub struct Estimator {
    name: String,
    weighting: Box<dyn WeightStrategy>,
    aggregation: Box<dyn ContentAggregation>,
    ordering: Box<dyn CommitmentOrdering>,
    parallel: bool,
    state: Option<EstimatorState>,
}

impl fmt::Debug for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Estimator")
            .field("name", &self.name)
            .field("weighting", &self.weighting.label())
            .field("aggregation", &self.aggregation.label())
            .field("ordering", &self.ordering.label())
            .field("parallel", &self.parallel)
            .field("computed", &self.state.is_some())
            .finish()
    }
}

impl Estimator {
    /// Assemble an estimator from its stage strategies. Stage work runs on
    /// the rayon pool unless disabled with [`Estimator::with_parallel`].
    pub fn new(
        name: impl Into<String>,
        weighting: Box<dyn WeightStrategy>,
        aggregation: Box<dyn ContentAggregation>,
        ordering: Box<dyn CommitmentOrdering>,
    ) -> Self {
        Self {
            name: name.into(),
            weighting,
            aggregation,
            ordering,
            parallel: true,
            state: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Apply the run settings of an estimation config section.
    pub fn with_config(self, config: &EstimationConfig) -> Self {
        self.with_parallel(config.effective_parallel())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn is_computed(&self) -> bool {
        self.state.is_some()
    }

    /// Run the four stages over `snapshot`, replacing any previous state.
    ///
    /// On error the estimator is left uncomputed.
    pub fn compute(
        &mut self,
        snapshot: &PopulationSnapshot,
    ) -> Result<&EstimatorState, EstimationError> {
        self.state = None;
        snapshot.validate()?;

        let span = peerscore_core::estimate_span!(
            self.name,
            snapshot.user_count(),
            snapshot.content_count(),
            snapshot.review_count()
        );
        let _guard = span.enter();

        let reputations = reviewer_reputations(snapshot, self.parallel);
        debug!(
            defined = reputations.iter().flatten().count(),
            "stage 1: reviewer reputations"
        );

        let ctx = RunContext {
            snapshot,
            reputations: &reputations,
            parallel: self.parallel,
        };

        let weights = self.weighting.weigh(&ctx)?;
        debug!(
            strategy = self.weighting.label(),
            defined = weights.weights.iter().flatten().count(),
            "stage 2: reviewer weights"
        );

        let estimates = self.aggregation.aggregate(&ctx, &weights.weights);
        debug!(
            strategy = self.aggregation.label(),
            threshold = ?estimates.reputation_threshold,
            defined = estimates.estimates.iter().flatten().count(),
            "stage 3: content estimates"
        );

        let order = self.ordering.order(&ctx, &weights.weights, &estimates);
        debug!(
            strategy = self.ordering.label(),
            committed = order.len(),
            "stage 4: commitment order"
        );

        let state = EstimatorState {
            reviewer_quality_estimates: reputations,
            reviewer_weights: weights.weights,
            reviewer_sd_estimates: weights.sd_estimates,
            content_quality_estimates: estimates.estimates,
            selected_reviews_for_content: estimates.selected_reviews,
            reputation_threshold: estimates.reputation_threshold,
            content_commitment_order: order,
            bin_report: weights.bins,
        };
        info!(
            reviewers_estimated = state.defined_reviewer_estimates(),
            content_estimated = state.defined_content_estimates(),
            "estimation complete"
        );

        Ok(&*self.state.insert(state))
    }

    /// State of the last successful `compute()`.
    pub fn state(&self) -> Result<&EstimatorState, EstimationError> {
        self.state.as_ref().ok_or_else(|| EstimationError::NotComputed {
            estimator: self.name.clone(),
        })
    }

    pub fn reviewer_quality_estimates(&self) -> Result<&[Option<f64>], EstimationError> {
        Ok(&self.state()?.reviewer_quality_estimates)
    }

    pub fn reviewer_weights(&self) -> Result<&[Option<f64>], EstimationError> {
        Ok(&self.state()?.reviewer_weights)
    }

    pub fn reviewer_sd_estimates(&self) -> Result<&[Option<f64>], EstimationError> {
        Ok(&self.state()?.reviewer_sd_estimates)
    }

    pub fn content_quality_estimates(&self) -> Result<&[Option<f64>], EstimationError> {
        Ok(&self.state()?.content_quality_estimates)
    }

    pub fn selected_reviews_for_content(&self) -> Result<&[Vec<ReviewId>], EstimationError> {
        Ok(&self.state()?.selected_reviews_for_content)
    }

    pub fn content_commitment_order(&self) -> Result<&[ContentId], EstimationError> {
        Ok(&self.state()?.content_commitment_order)
    }

    /// Bin diagnostics; `None` for variants that do not bin reviewers.
    pub fn bin_report(&self) -> Result<Option<&BinReport>, EstimationError> {
        Ok(self.state()?.bin_report.as_ref())
    }

    /// Compare the computed state against the ground truth of `snapshot`.
    pub fn evaluate(
        &self,
        snapshot: &PopulationSnapshot,
        commitment_resolution: f64,
    ) -> Result<PerformanceReport, EstimationError> {
        PerformanceEvaluator::new(commitment_resolution)?.evaluate(self, snapshot)
    }
}
