//! Accuracy of a computed estimator against the snapshot's ground truth.

pub mod evaluator;
pub mod report;

pub use evaluator::PerformanceEvaluator;
pub use report::PerformanceReport;
