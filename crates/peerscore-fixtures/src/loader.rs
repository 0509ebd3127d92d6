//! Population snapshots stored as JSON under the workspace `test-fixtures/`.

use std::path::{Path, PathBuf};

use peerscore_core::PopulationSnapshot;

const FIXTURES_DIR: &str = "test-fixtures";

/// First `test-fixtures/` found walking up from the calling crate.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    Path::new(&manifest_dir)
        .ancestors()
        .map(|dir| dir.join(FIXTURES_DIR))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| panic!("no {FIXTURES_DIR}/ above {manifest_dir}"))
}

/// Read a population snapshot, relative to `test-fixtures/`, and validate it.
///
/// # Panics
/// Panics if the file is missing, malformed, or breaks a snapshot invariant.
pub fn load_population(relative_path: &str) -> PopulationSnapshot {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read population {}: {e}", path.display()));
    PopulationSnapshot::from_json(&content)
        .unwrap_or_else(|e| panic!("invalid population {}: {e}", path.display()))
}
