//! Stage 2 strategies.

pub mod empirical;
pub mod oracle;
pub mod uniform;

pub use empirical::{EmpiricalBayesWeighting, ReferenceEstimates};
pub use oracle::OracleWeighting;
pub use uniform::UniformWeighting;
