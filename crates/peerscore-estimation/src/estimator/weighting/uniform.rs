use peerscore_core::EstimationError;

use crate::estimator::context::RunContext;
use crate::estimator::state::ReviewerWeights;
use crate::estimator::strategy::WeightStrategy;

/// Weight 1 for every user: a plain mean over whoever passes the filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformWeighting;

impl WeightStrategy for UniformWeighting {
    fn label(&self) -> &'static str {
        "uniform"
    }

    fn weigh(&self, ctx: &RunContext<'_>) -> Result<ReviewerWeights, EstimationError> {
        Ok(ReviewerWeights::uniform(ctx.snapshot.user_count(), 1.0))
    }
}
