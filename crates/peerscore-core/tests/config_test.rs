//! Tests for the peerscore configuration system.

use std::sync::Mutex;

use peerscore_core::config::peerscore_config::ENV_VARS;
use peerscore_core::config::{ConfigOverrides, PeerscoreConfig};
use peerscore_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_peerscore_env_vars() {
    for key in ENV_VARS {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_peerscore_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("peerscore.toml"),
        r#"
[estimation]
threshold_percentile = 40.0
bin_width = 0.2

[evaluation]
commitment_resolution = 0.05
"#,
    )
    .unwrap();

    std::env::set_var("PEERSCORE_ESTIMATION_BIN_WIDTH", "0.25");

    let overrides = ConfigOverrides {
        threshold_percentile: Some(80.0),
        ..Default::default()
    };
    let config = PeerscoreConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Overrides beat the project file.
    assert_eq!(config.estimation.effective_threshold_percentile(), 80.0);
    // Env beats the project file.
    assert_eq!(config.estimation.effective_bin_width(), 0.25);
    // Project file beats defaults.
    assert_eq!(config.evaluation.effective_commitment_resolution(), 0.05);
    // Untouched fields keep compiled defaults.
    assert_eq!(config.estimation.effective_noise_scale(), 0.18);

    clear_peerscore_env_vars();
}

#[test]
fn test_missing_project_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_peerscore_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = PeerscoreConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.estimation.effective_threshold_percentile(), 0.0);
    assert_eq!(config.estimation.effective_reference_commitment_fraction(), 0.5);
    assert_eq!(config.estimation.effective_bin_width(), 0.1);
    assert_eq!(config.evaluation.effective_commitment_resolution(), 0.1);
}

#[test]
fn test_unparseable_env_value_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_peerscore_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::env::set_var("PEERSCORE_ESTIMATION_PARALLEL", "sometimes");
    let config = PeerscoreConfig::load(dir.path(), None).unwrap();
    assert!(config.estimation.effective_parallel());

    clear_peerscore_env_vars();
}

#[test]
fn test_out_of_range_env_value_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_peerscore_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::env::set_var("PEERSCORE_EVALUATION_COMMITMENT_RESOLUTION", "1.5");
    let err = PeerscoreConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "evaluation.commitment_resolution"
    ));

    clear_peerscore_env_vars();
}

#[test]
fn test_invalid_toml_reports_path() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_peerscore_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("peerscore.toml"), "[estimation\nbin_width = ").unwrap();
    let err = PeerscoreConfig::load(dir.path(), None).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("peerscore.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_toml_roundtrip() {
    let config = PeerscoreConfig::from_toml(
        "[estimation]\nthreshold_percentile = 20.0\nparallel = false\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = PeerscoreConfig::from_toml(&text).unwrap();
    assert_eq!(back.estimation.threshold_percentile, Some(20.0));
    assert_eq!(back.estimation.parallel, Some(false));
}
