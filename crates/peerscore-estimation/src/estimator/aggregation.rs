//! Stage 3: reputation-thresholded weighted mean of evaluations.

use peerscore_core::{ContentId, ReviewId};

use super::context::RunContext;
use super::state::ContentEstimates;
use super::strategy::ContentAggregation;
use crate::stats;

/// Counts a review only when its author's reputation is defined and at or
/// above the `threshold_percentile`-th percentile of all defined
/// reputations, and the author has a defined weight. The estimate is the
/// weighted mean of the counted evaluations.
#[derive(Debug, Clone)]
pub struct ThresholdedWeightedMean {
    threshold_percentile: f64,
}

impl ThresholdedWeightedMean {
    pub fn new(threshold_percentile: f64) -> Self {
        Self {
            threshold_percentile,
        }
    }

    pub fn threshold_percentile(&self) -> f64 {
        self.threshold_percentile
    }
}

impl ContentAggregation for ThresholdedWeightedMean {
    fn label(&self) -> &'static str {
        "thresholded-weighted-mean"
    }

    fn aggregate(&self, ctx: &RunContext<'_>, weights: &[Option<f64>]) -> ContentEstimates {
        let snapshot = ctx.snapshot;
        let defined: Vec<f64> = ctx.reputations.iter().flatten().copied().collect();

        let Some(threshold) = stats::percentile(&defined, self.threshold_percentile) else {
            return ContentEstimates {
                estimates: vec![None; snapshot.content_count()],
                selected_reviews: vec![Vec::new(); snapshot.content_count()],
                reputation_threshold: None,
            };
        };

        let per_content: Vec<(Option<f64>, Vec<ReviewId>)> =
            ctx.map_indexed(snapshot.content_count(), |i| {
                let mut selected = Vec::new();
                let mut pairs = Vec::new();
                for review in snapshot.reviews_of(ContentId(i)) {
                    let author = review.author_id.index();
                    let passes = ctx.reputations[author].is_some_and(|r| r >= threshold);
                    if let (true, Some(weight)) = (passes, weights[author]) {
                        pairs.push((review.evaluation, weight));
                        selected.push(review.id);
                    }
                }
                (stats::weighted_mean(&pairs), selected)
            });

        let (estimates, selected_reviews) = per_content.into_iter().unzip();
        ContentEstimates {
            estimates,
            selected_reviews,
            reputation_threshold: Some(threshold),
        }
    }
}
