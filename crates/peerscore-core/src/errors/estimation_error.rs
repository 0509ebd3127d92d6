//! Estimation engine errors.

use super::error_code::{self, PeerscoreErrorCode};
use super::SnapshotError;

/// Errors raised by estimators and the performance evaluator.
///
/// Only misconfiguration and out-of-order calls fail; an entity without
/// enough data simply ends up with an undefined estimate.
#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfiguration { field: &'static str, message: String },

    #[error("Estimator '{estimator}' has not been computed yet")]
    NotComputed { estimator: String },

    #[error("Reference estimator '{reference}' must be computed before it can be referenced")]
    ReferenceNotComputed { reference: String },

    #[error("Reference estimator '{reference}' covers {expected} content items, snapshot has {actual}")]
    ReferenceMismatch {
        reference: String,
        expected: usize,
        actual: usize,
    },

    #[error("Estimator '{estimator}' was computed over {expected} {entity}, snapshot has {actual}")]
    SnapshotMismatch {
        estimator: String,
        entity: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl EstimationError {
    /// Shorthand for an out-of-range parameter.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            message: message.into(),
        }
    }
}

impl PeerscoreErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => error_code::INVALID_CONFIGURATION,
            Self::NotComputed { .. } | Self::ReferenceNotComputed { .. } => {
                error_code::ORDERING_VIOLATION
            }
            Self::ReferenceMismatch { .. } | Self::SnapshotMismatch { .. } => {
                error_code::POPULATION_MISMATCH
            }
            Self::Snapshot(e) => e.error_code(),
        }
    }
}
