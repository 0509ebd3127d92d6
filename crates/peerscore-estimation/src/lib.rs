//! # peerscore-estimation
//!
//! Recovers reviewer accuracy and content quality from observed scores.
//!
//! Every estimator runs the same four-stage pipeline:
//! 1. reviewer reputation (mean of scores received by the reviewer's reviews),
//! 2. reviewer weights (pluggable [`WeightStrategy`]),
//! 3. content estimates (pluggable [`ContentAggregation`]),
//! 4. commitment order (pluggable [`CommitmentOrdering`]).
//!
//! The [`PerformanceEvaluator`] compares a computed estimator against the
//! hidden ground truth of the same snapshot.

pub mod estimator;
pub mod evaluation;
pub mod stats;

pub use estimator::{
    CommitmentOrdering, ContentAggregation, EmpiricalBayesParams, Estimator, EstimatorState,
    OracleParams, ReferenceEstimates, ThresholdParams, WeightStrategy,
};
pub use evaluation::{PerformanceEvaluator, PerformanceReport};
