//! Means and dispersion of small samples.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Arithmetic mean, or `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = values.mean();
    m.is_finite().then_some(m)
}

/// Weighted arithmetic mean of `(value, weight)` pairs.
///
/// `None` when there are no pairs or the weights sum to zero.
pub fn weighted_mean(pairs: &[(f64, f64)]) -> Option<f64> {
    let total_weight: f64 = pairs.iter().map(|&(_, w)| w).sum();
    if pairs.is_empty() || !(total_weight > 0.0) || !total_weight.is_finite() {
        return None;
    }
    let weighted_sum: f64 = pairs.iter().map(|&(v, w)| v * w).sum();
    let m = weighted_sum / total_weight;
    m.is_finite().then_some(m)
}

/// True when every value equals the first. Such samples have exactly zero
/// spread, whatever rounding a streaming variance would accumulate.
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Mean, population standard deviation and size of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// `None` for an empty sample.
    pub mean: Option<f64>,
    /// Population standard deviation; `None` below two samples.
    pub std_dev: Option<f64>,
    pub samples: usize,
}

impl SampleSummary {
    pub fn of(values: &[f64]) -> Self {
        let std_dev = if values.len() >= 2 {
            if is_constant(values) {
                Some(0.0)
            } else {
                let sd = values.population_std_dev();
                sd.is_finite().then_some(sd)
            }
        } else {
            None
        };
        Self {
            mean: mean(values),
            std_dev,
            samples: values.len(),
        }
    }

    /// Inverse variance `1 / sd²`, defined only for a strictly positive sd.
    pub fn precision(&self) -> Option<f64> {
        let sd = self.std_dev?;
        if sd > 0.0 {
            let p = 1.0 / (sd * sd);
            p.is_finite().then_some(p)
        } else {
            None
        }
    }
}
