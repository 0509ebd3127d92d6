//! Inverse-variance weights computed from the hidden true reviewer quality.
//!
//! Not a realizable estimator: it reads ground truth and only serves as an
//! upper bound for the others. It also assumes unbounded normal noise,
//! although evaluations may be clamped to [0, 1].

use peerscore_core::EstimationError;

use crate::estimator::context::RunContext;
use crate::estimator::state::ReviewerWeights;
use crate::estimator::strategy::WeightStrategy;

#[derive(Debug, Clone, Copy)]
pub struct OracleWeighting {
    noise_scale: f64,
}

impl OracleWeighting {
    pub fn new(noise_scale: f64) -> Self {
        Self { noise_scale }
    }

    /// `sd = noise_scale / reviewer_quality`; `None` for a non-positive or
    /// non-finite quality.
    pub fn standard_deviation(&self, reviewer_quality: f64) -> Option<f64> {
        if !(reviewer_quality > 0.0) || !reviewer_quality.is_finite() {
            return None;
        }
        let sd = self.noise_scale / reviewer_quality;
        sd.is_finite().then_some(sd)
    }

    /// `1 / sd²`, kept only when strictly positive and finite.
    pub fn weight(&self, reviewer_quality: f64) -> Option<f64> {
        let sd = self.standard_deviation(reviewer_quality)?;
        let w = 1.0 / (sd * sd);
        (w > 0.0 && w.is_finite()).then_some(w)
    }
}

impl WeightStrategy for OracleWeighting {
    fn label(&self) -> &'static str {
        "oracle"
    }

    fn weigh(&self, ctx: &RunContext<'_>) -> Result<ReviewerWeights, EstimationError> {
        let users = &ctx.snapshot.users;
        Ok(ReviewerWeights {
            weights: users.iter().map(|u| self.weight(u.reviewer_quality)).collect(),
            sd_estimates: users
                .iter()
                .map(|u| self.standard_deviation(u.reviewer_quality))
                .collect(),
            bins: None,
        })
    }
}
