//! Stage 1: reviewer reputation.
//!
//! A user's reputation is the mean of every score other users gave to the
//! reviews that user wrote; undefined when no such score exists.

use peerscore_core::{PopulationSnapshot, UserId};

use super::context::map_indexed;
use crate::stats;

pub fn reviewer_reputations(snapshot: &PopulationSnapshot, parallel: bool) -> Vec<Option<f64>> {
    map_indexed(parallel, snapshot.user_count(), |i| {
        let scores: Vec<f64> = snapshot.scores_received_by(UserId(i)).collect();
        stats::mean(&scores)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerscore_core::PopulationBuilder;

    #[test]
    fn test_scores_pooled_across_reviews() {
        let mut b = PopulationBuilder::new();
        let author = b.add_user(0.5, 0.5);
        let reviewer = b.add_user(0.5, 0.5);
        let silent = b.add_user(0.5, 0.5);
        let c1 = b.publish(author, 0.5).unwrap();
        let c2 = b.publish(author, 0.5).unwrap();
        let r1 = b.review(reviewer, c1, 0.5).unwrap();
        let r2 = b.review(reviewer, c2, 0.5).unwrap();
        b.review(silent, c2, 0.5).unwrap();
        b.score(r1, 1.0).unwrap();
        b.score(r1, 0.5).unwrap();
        b.score(r2, 0.0).unwrap();
        let snapshot = b.build();

        for parallel in [false, true] {
            let reps = reviewer_reputations(&snapshot, parallel);
            assert_eq!(reps[0], None);
            assert!((reps[1].unwrap() - 0.5).abs() < 1e-12);
            // Reviewed but never scored.
            assert_eq!(reps[2], None);
        }
    }
}
