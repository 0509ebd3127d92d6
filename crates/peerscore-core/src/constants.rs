//! Compiled defaults and fixed model constants.

/// Noise scale of a reviewer with unit quality: a reviewer with true quality
/// `q` submits evaluations with standard deviation `NOISE_SCALE / q`.
pub const NOISE_SCALE: f64 = 0.18;

/// True reviewer and author quality given to bot users.
pub const BOT_TRUE_QUALITY: f64 = 1e-10;

/// Default reputation percentile below which reviewers are ignored.
pub const DEFAULT_THRESHOLD_PERCENTILE: f64 = 0.0;

/// Default share of the reference commitment order used to fit reviewer variances.
pub const DEFAULT_REFERENCE_COMMITMENT_FRACTION: f64 = 0.5;

/// Default width of a reviewer percentile bin.
pub const DEFAULT_BIN_WIDTH: f64 = 0.1;

/// Default step between evaluated commitment prefixes, as a share of all content.
pub const DEFAULT_COMMITMENT_RESOLUTION: f64 = 0.1;

/// Name of the project-level config file.
pub const CONFIG_FILE_NAME: &str = "peerscore.toml";

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "PEERSCORE_LOG";
