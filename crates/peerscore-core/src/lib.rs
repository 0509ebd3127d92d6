//! # peerscore-core
//!
//! Foundation crate for the peerscore estimation engine.
//! Defines the population snapshot model, errors, config, constants and
//! tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::PeerscoreConfig;
pub use errors::{ConfigError, EstimationError, SnapshotError};
pub use model::{
    Content, ContentId, PopulationBuilder, PopulationSnapshot, Review, ReviewId, User, UserId,
};
