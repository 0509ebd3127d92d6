//! Stable error codes shared by every error enum.

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SNAPSHOT_ERROR: &str = "SNAPSHOT_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const INVALID_CONFIGURATION: &str = "INVALID_CONFIGURATION";
pub const ORDERING_VIOLATION: &str = "ORDERING_VIOLATION";
pub const POPULATION_MISMATCH: &str = "POPULATION_MISMATCH";

/// Maps an error to a stable, machine-readable code.
pub trait PeerscoreErrorCode {
    fn error_code(&self) -> &'static str;
}
