//! Stage 4: commitment orderings.
//!
//! Both orderings start from ascending ids and sort stably, so ties keep
//! ascending id order and the result is always a permutation.

use std::cmp::Reverse;

use peerscore_core::ContentId;

use super::context::RunContext;
use super::state::ContentEstimates;
use super::strategy::CommitmentOrdering;

/// Content with more contributing reviews first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostCorroboratedFirst;

impl CommitmentOrdering for MostCorroboratedFirst {
    fn label(&self) -> &'static str {
        "most-corroborated-first"
    }

    fn order(
        &self,
        ctx: &RunContext<'_>,
        _weights: &[Option<f64>],
        estimates: &ContentEstimates,
    ) -> Vec<ContentId> {
        let mut order: Vec<ContentId> = (0..ctx.snapshot.content_count()).map(ContentId).collect();
        order.sort_by_key(|id| Reverse(estimates.selected_reviews[id.index()].len()));
        order
    }
}

/// Content with the smallest pooled variance first.
///
/// Pooled precision is the sum of the weights of a content item's
/// contributing reviewers; pooled variance is its inverse. Items with no
/// precision have no variance and go last.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestPooledVarianceFirst;

impl LowestPooledVarianceFirst {
    pub fn pooled_variances(
        ctx: &RunContext<'_>,
        weights: &[Option<f64>],
        estimates: &ContentEstimates,
    ) -> Vec<Option<f64>> {
        estimates
            .selected_reviews
            .iter()
            .map(|selected| {
                let precision: f64 = selected
                    .iter()
                    .filter_map(|&r| weights[ctx.snapshot.review(r).author_id.index()])
                    .sum();
                (precision > 0.0).then(|| 1.0 / precision)
            })
            .collect()
    }
}

impl CommitmentOrdering for LowestPooledVarianceFirst {
    fn label(&self) -> &'static str {
        "lowest-pooled-variance-first"
    }

    fn order(
        &self,
        ctx: &RunContext<'_>,
        weights: &[Option<f64>],
        estimates: &ContentEstimates,
    ) -> Vec<ContentId> {
        let variances = Self::pooled_variances(ctx, weights, estimates);
        let mut order: Vec<ContentId> = (0..ctx.snapshot.content_count()).map(ContentId).collect();
        order.sort_by(|a, b| {
            match (variances[a.index()], variances[b.index()]) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerscore_core::{PopulationBuilder, ReviewId};

    fn three_items() -> peerscore_core::PopulationSnapshot {
        let mut b = PopulationBuilder::new();
        let u0 = b.add_user(0.5, 0.5);
        let u1 = b.add_user(0.5, 0.5);
        let c0 = b.publish(u0, 0.5).unwrap();
        let c1 = b.publish(u0, 0.5).unwrap();
        b.publish(u1, 0.5).unwrap();
        b.review(u0, c1, 0.5).unwrap();
        b.review(u1, c1, 0.5).unwrap();
        b.review(u1, c0, 0.5).unwrap();
        b.build()
    }

    fn estimates(selected: Vec<Vec<ReviewId>>) -> ContentEstimates {
        ContentEstimates {
            estimates: selected.iter().map(|s| (!s.is_empty()).then_some(0.5)).collect(),
            selected_reviews: selected,
            reputation_threshold: Some(0.0),
        }
    }

    #[test]
    fn test_most_corroborated_first() {
        let snapshot = three_items();
        let reps = vec![Some(0.5), Some(0.5)];
        let ctx = RunContext { snapshot: &snapshot, reputations: &reps, parallel: false };
        let est = estimates(vec![vec![ReviewId(2)], vec![ReviewId(0), ReviewId(1)], vec![]]);
        let order = MostCorroboratedFirst.order(&ctx, &[Some(1.0), Some(1.0)], &est);
        assert_eq!(order, vec![ContentId(1), ContentId(0), ContentId(2)]);
    }

    #[test]
    fn test_pooled_variance_orders_by_precision() {
        let snapshot = three_items();
        let reps = vec![Some(0.5), Some(0.5)];
        let ctx = RunContext { snapshot: &snapshot, reputations: &reps, parallel: false };
        // c0 only has u1 (weight 10); c1 has u0 (1) + u1 (10).
        let weights = [Some(1.0), Some(10.0)];
        let est = estimates(vec![vec![ReviewId(2)], vec![ReviewId(0), ReviewId(1)], vec![]]);
        let variances = LowestPooledVarianceFirst::pooled_variances(&ctx, &weights, &est);
        assert!((variances[0].unwrap() - 0.1).abs() < 1e-12);
        assert!((variances[1].unwrap() - 1.0 / 11.0).abs() < 1e-12);
        assert_eq!(variances[2], None);

        let order = LowestPooledVarianceFirst.order(&ctx, &weights, &est);
        assert_eq!(order, vec![ContentId(1), ContentId(0), ContentId(2)]);
    }

    #[test]
    fn test_undefined_variance_goes_last_even_against_tiny_precision() {
        let snapshot = three_items();
        let reps = vec![Some(0.5), Some(0.5)];
        let ctx = RunContext { snapshot: &snapshot, reputations: &reps, parallel: false };
        let weights = [Some(1e-30), Some(1e-30)];
        let est = estimates(vec![vec![], vec![ReviewId(0)], vec![]]);
        let order = LowestPooledVarianceFirst.order(&ctx, &weights, &est);
        assert_eq!(order, vec![ContentId(1), ContentId(0), ContentId(2)]);
    }
}
