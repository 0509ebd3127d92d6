//! Error handling for peerscore.
//! One error enum per subsystem, `thiserror` only.
//!
//! Missing data is never an error: insufficient inputs resolve to an
//! undefined (`None`) estimate inside the engine. These enums cover broken
//! inputs, bad configuration and calls made in the wrong order.

pub mod config_error;
pub mod error_code;
pub mod estimation_error;
pub mod snapshot_error;

pub use config_error::ConfigError;
pub use error_code::PeerscoreErrorCode;
pub use estimation_error::EstimationError;
pub use snapshot_error::SnapshotError;
