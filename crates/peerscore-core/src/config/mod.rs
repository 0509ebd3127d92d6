//! Configuration system for peerscore.
//! TOML-based, 3-layer resolution: overrides > env > project > defaults.

pub mod estimation_config;
pub mod evaluation_config;
pub mod peerscore_config;

pub use estimation_config::EstimationConfig;
pub use evaluation_config::EvaluationConfig;
pub use peerscore_config::{ConfigOverrides, PeerscoreConfig};
