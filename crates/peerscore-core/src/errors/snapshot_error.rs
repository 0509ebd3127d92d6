//! Population snapshot errors.

use super::error_code::{self, PeerscoreErrorCode};

/// A population snapshot that breaks the invariants the engine relies on.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("{entity} at position {position} has id {found}; ids must be dense and zero-based")]
    NonDenseId {
        entity: &'static str,
        position: usize,
        found: usize,
    },

    #[error("{entity} {id} references missing {target} {target_id} via `{field}`")]
    DanglingReference {
        entity: &'static str,
        id: usize,
        field: &'static str,
        target: &'static str,
        target_id: usize,
    },

    #[error("{entity} {id} lists {target} {target_id}, which does not link back")]
    InconsistentLink {
        entity: &'static str,
        id: usize,
        target: &'static str,
        target_id: usize,
    },

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PeerscoreErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
            _ => error_code::SNAPSHOT_ERROR,
        }
    }
}
