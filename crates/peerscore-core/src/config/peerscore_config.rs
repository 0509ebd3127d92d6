//! Top-level peerscore configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EstimationConfig, EvaluationConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`PEERSCORE_*`)
/// 3. Project config (`peerscore.toml` in the given root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PeerscoreConfig {
    pub estimation: EstimationConfig,
    pub evaluation: EvaluationConfig,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub threshold_percentile: Option<f64>,
    pub reference_commitment_fraction: Option<f64>,
    pub bin_width: Option<f64>,
    pub commitment_resolution: Option<f64>,
}

const ENV_THRESHOLD_PERCENTILE: &str = "PEERSCORE_ESTIMATION_THRESHOLD_PERCENTILE";
const ENV_NOISE_SCALE: &str = "PEERSCORE_ESTIMATION_NOISE_SCALE";
const ENV_REFERENCE_COMMITMENT_FRACTION: &str =
    "PEERSCORE_ESTIMATION_REFERENCE_COMMITMENT_FRACTION";
const ENV_BIN_WIDTH: &str = "PEERSCORE_ESTIMATION_BIN_WIDTH";
const ENV_PARALLEL: &str = "PEERSCORE_ESTIMATION_PARALLEL";
const ENV_COMMITMENT_RESOLUTION: &str = "PEERSCORE_EVALUATION_COMMITMENT_RESOLUTION";

/// Every environment variable the loader reads.
pub const ENV_VARS: &[&str] = &[
    ENV_THRESHOLD_PERCENTILE,
    ENV_NOISE_SCALE,
    ENV_REFERENCE_COMMITMENT_FRACTION,
    ENV_BIN_WIDTH,
    ENV_PARALLEL,
    ENV_COMMITMENT_RESOLUTION,
];

impl PeerscoreConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PeerscoreConfig) -> Result<(), ConfigError> {
        if let Some(p) = config.estimation.threshold_percentile {
            if !(0.0..100.0).contains(&p) {
                return Err(ConfigError::ValidationFailed {
                    field: "estimation.threshold_percentile".to_string(),
                    message: "must be in [0, 100)".to_string(),
                });
            }
        }
        if let Some(scale) = config.estimation.noise_scale {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(ConfigError::ValidationFailed {
                    field: "estimation.noise_scale".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        for (field, value) in [
            (
                "estimation.reference_commitment_fraction",
                config.estimation.reference_commitment_fraction,
            ),
            ("estimation.bin_width", config.estimation.bin_width),
            (
                "evaluation.commitment_resolution",
                config.evaluation.commitment_resolution,
            ),
        ] {
            if let Some(v) = value {
                if !(v > 0.0 && v <= 1.0) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be in (0, 1]".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn merge_toml_file(config: &mut PeerscoreConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PeerscoreConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut PeerscoreConfig, other: &PeerscoreConfig) {
        if other.estimation.threshold_percentile.is_some() {
            base.estimation.threshold_percentile = other.estimation.threshold_percentile;
        }
        if other.estimation.noise_scale.is_some() {
            base.estimation.noise_scale = other.estimation.noise_scale;
        }
        if other.estimation.reference_commitment_fraction.is_some() {
            base.estimation.reference_commitment_fraction =
                other.estimation.reference_commitment_fraction;
        }
        if other.estimation.bin_width.is_some() {
            base.estimation.bin_width = other.estimation.bin_width;
        }
        if other.estimation.parallel.is_some() {
            base.estimation.parallel = other.estimation.parallel;
        }
        if other.evaluation.commitment_resolution.is_some() {
            base.evaluation.commitment_resolution = other.evaluation.commitment_resolution;
        }
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut PeerscoreConfig) {
        if let Some(v) = env_f64(ENV_THRESHOLD_PERCENTILE) {
            config.estimation.threshold_percentile = Some(v);
        }
        if let Some(v) = env_f64(ENV_NOISE_SCALE) {
            config.estimation.noise_scale = Some(v);
        }
        if let Some(v) = env_f64(ENV_REFERENCE_COMMITMENT_FRACTION) {
            config.estimation.reference_commitment_fraction = Some(v);
        }
        if let Some(v) = env_f64(ENV_BIN_WIDTH) {
            config.estimation.bin_width = Some(v);
        }
        if let Ok(val) = std::env::var(ENV_PARALLEL) {
            if let Ok(v) = val.parse::<bool>() {
                config.estimation.parallel = Some(v);
            }
        }
        if let Some(v) = env_f64(ENV_COMMITMENT_RESOLUTION) {
            config.evaluation.commitment_resolution = Some(v);
        }
    }

    fn apply_overrides(config: &mut PeerscoreConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.threshold_percentile {
            config.estimation.threshold_percentile = Some(v);
        }
        if let Some(v) = overrides.reference_commitment_fraction {
            config.estimation.reference_commitment_fraction = Some(v);
        }
        if let Some(v) = overrides.bin_width {
            config.estimation.bin_width = Some(v);
        }
        if let Some(v) = overrides.commitment_resolution {
            config.evaluation.commitment_resolution = Some(v);
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok()?.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PeerscoreConfig::default();
        assert_eq!(config.estimation.effective_threshold_percentile(), 0.0);
        assert_eq!(config.estimation.effective_noise_scale(), 0.18);
        assert_eq!(config.estimation.effective_bin_width(), 0.1);
        assert_eq!(config.evaluation.effective_commitment_resolution(), 0.1);
        assert!(config.estimation.effective_parallel());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = PeerscoreConfig::from_toml(
            r#"
[estimation]
threshold_percentile = 80.0
"#,
        )
        .unwrap();
        assert_eq!(config.estimation.effective_threshold_percentile(), 80.0);
        assert_eq!(config.estimation.effective_reference_commitment_fraction(), 0.5);
    }

    #[test]
    fn test_threshold_of_100_rejected() {
        let err = PeerscoreConfig::from_toml("[estimation]\nthreshold_percentile = 100.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "estimation.threshold_percentile"));
    }

    #[test]
    fn test_zero_bin_width_rejected() {
        let err = PeerscoreConfig::from_toml("[estimation]\nbin_width = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut base = PeerscoreConfig::default();
        base.estimation.bin_width = Some(0.25);
        let mut other = PeerscoreConfig::default();
        other.estimation.threshold_percentile = Some(50.0);
        PeerscoreConfig::merge(&mut base, &other);
        assert_eq!(base.estimation.bin_width, Some(0.25));
        assert_eq!(base.estimation.threshold_percentile, Some(50.0));
    }
}
