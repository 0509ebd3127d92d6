//! Estimator configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Parameters shared by the estimator variants.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EstimationConfig {
    /// Reputation percentile a reviewer must reach to be counted. Default: 0.
    pub threshold_percentile: Option<f64>,
    /// Evaluation noise of a unit-quality reviewer (oracle weighting). Default: 0.18.
    pub noise_scale: Option<f64>,
    /// Share of the reference commitment order used to fit variances. Default: 0.5.
    pub reference_commitment_fraction: Option<f64>,
    /// Width of a reviewer percentile bin. Default: 0.1.
    pub bin_width: Option<f64>,
    /// Run per-entity stage work on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl EstimationConfig {
    /// Returns the effective threshold percentile, defaulting to 0.
    pub fn effective_threshold_percentile(&self) -> f64 {
        self.threshold_percentile
            .unwrap_or(constants::DEFAULT_THRESHOLD_PERCENTILE)
    }

    /// Returns the effective noise scale, defaulting to 0.18.
    pub fn effective_noise_scale(&self) -> f64 {
        self.noise_scale.unwrap_or(constants::NOISE_SCALE)
    }

    /// Returns the effective reference commitment fraction, defaulting to 0.5.
    pub fn effective_reference_commitment_fraction(&self) -> f64 {
        self.reference_commitment_fraction
            .unwrap_or(constants::DEFAULT_REFERENCE_COMMITMENT_FRACTION)
    }

    /// Returns the effective bin width, defaulting to 0.1.
    pub fn effective_bin_width(&self) -> f64 {
        self.bin_width.unwrap_or(constants::DEFAULT_BIN_WIDTH)
    }

    /// Returns whether stage work may run in parallel, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
