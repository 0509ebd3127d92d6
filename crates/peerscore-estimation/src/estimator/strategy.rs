//! Strategy seams for stages 2–4.

use peerscore_core::{ContentId, EstimationError};

use super::context::RunContext;
use super::state::{ContentEstimates, ReviewerWeights};

/// Stage 2: how much each reviewer's evaluations count.
pub trait WeightStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn label(&self) -> &'static str;

    /// One weight per user. `None` excludes the user from stage 3.
    fn weigh(&self, ctx: &RunContext<'_>) -> Result<ReviewerWeights, EstimationError>;
}

/// Stage 3: which reviews count for a content item and how they combine.
pub trait ContentAggregation: Send + Sync {
    fn label(&self) -> &'static str;

    fn aggregate(&self, ctx: &RunContext<'_>, weights: &[Option<f64>]) -> ContentEstimates;
}

/// Stage 4: the order in which content estimates are trusted, most
/// confident first. Must return a permutation of all content ids.
pub trait CommitmentOrdering: Send + Sync {
    fn label(&self) -> &'static str;

    fn order(
        &self,
        ctx: &RunContext<'_>,
        weights: &[Option<f64>],
        estimates: &ContentEstimates,
    ) -> Vec<ContentId>;
}
