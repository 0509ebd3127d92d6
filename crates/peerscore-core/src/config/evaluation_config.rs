//! Performance evaluation configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Step between evaluated commitment prefixes, as a share of all content. Default: 0.1.
    pub commitment_resolution: Option<f64>,
}

impl EvaluationConfig {
    /// Returns the effective commitment resolution, defaulting to 0.1.
    pub fn effective_commitment_resolution(&self) -> f64 {
        self.commitment_resolution
            .unwrap_or(constants::DEFAULT_COMMITMENT_RESOLUTION)
    }
}
