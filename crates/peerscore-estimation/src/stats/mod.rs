//! Small statistics toolkit shared by the estimators and the evaluator.
//!
//! Every function returns `None` instead of a fabricated number when its
//! input cannot support the statistic (empty input, fewer than two points,
//! zero variance).

pub mod correlation;
pub mod percentile;
pub mod summary;

pub use correlation::pearson;
pub use percentile::{percentile, percentile_ranks};
pub use summary::{mean, weighted_mean, SampleSummary};
