//! The four-stage estimator pipeline and its pluggable strategies.
//!
//! Stage 1 (reviewer reputation) is fixed. Stages 2–4 are strategies
//! injected into one concrete [`Estimator`]; the variants in [`variants`]
//! are just particular combinations of them.

pub mod aggregation;
pub mod context;
pub mod ordering;
pub mod pipeline;
pub mod reputation;
pub mod state;
pub mod strategy;
pub mod variants;
pub mod weighting;

pub use aggregation::ThresholdedWeightedMean;
pub use context::RunContext;
pub use ordering::{LowestPooledVarianceFirst, MostCorroboratedFirst};
pub use pipeline::Estimator;
pub use state::{BinReport, BinStatistics, ContentEstimates, EstimatorState, ReviewerWeights};
pub use strategy::{CommitmentOrdering, ContentAggregation, WeightStrategy};
pub use variants::{EmpiricalBayesParams, OracleParams, ThresholdParams};
pub use weighting::{EmpiricalBayesWeighting, OracleWeighting, ReferenceEstimates, UniformWeighting};
