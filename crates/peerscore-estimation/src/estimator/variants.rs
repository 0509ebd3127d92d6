//! The estimator variants as combinations of stage strategies, with their
//! validated parameters.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use peerscore_core::config::EstimationConfig;
use peerscore_core::constants;
use peerscore_core::EstimationError;

use super::aggregation::ThresholdedWeightedMean;
use super::ordering::{LowestPooledVarianceFirst, MostCorroboratedFirst};
use super::pipeline::Estimator;
use super::weighting::{EmpiricalBayesWeighting, OracleWeighting, ReferenceEstimates, UniformWeighting};

const SIMPLE_MEAN_NAME: &str = "simple mean";
const ORACLE_NAME: &str = "bayes-optimal w/ oracle";
const EMPIRICAL_NAME: &str = "bayes-optimal w/ measure estimate of SD";

fn check_threshold(p: f64) -> Result<f64, EstimationError> {
    if (0.0..100.0).contains(&p) {
        Ok(p)
    } else {
        Err(EstimationError::invalid(
            "threshold_percentile",
            format!("{p} is outside [0, 100)"),
        ))
    }
}

fn check_fraction(field: &'static str, v: f64) -> Result<f64, EstimationError> {
    if v > 0.0 && v <= 1.0 {
        Ok(v)
    } else {
        Err(EstimationError::invalid(field, format!("{v} is outside (0, 1]")))
    }
}

/// Whole percent of reviewers kept by a threshold, truncated.
fn top_share(threshold_percentile: f64) -> i64 {
    (100.0 - threshold_percentile) as i64
}

fn with_threshold_suffix(base: &str, threshold_percentile: f64) -> String {
    if threshold_percentile > 0.0 {
        format!("{base} (top {}% reviewers)", top_share(threshold_percentile))
    } else {
        base.to_string()
    }
}

/// Parameters of the thresholded mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdParams {
    threshold_percentile: f64,
}

impl ThresholdParams {
    pub fn new(threshold_percentile: f64) -> Result<Self, EstimationError> {
        Ok(Self {
            threshold_percentile: check_threshold(threshold_percentile)?,
        })
    }

    pub fn from_config(config: &EstimationConfig) -> Result<Self, EstimationError> {
        Self::new(config.effective_threshold_percentile())
    }

    pub fn threshold_percentile(&self) -> f64 {
        self.threshold_percentile
    }
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            threshold_percentile: constants::DEFAULT_THRESHOLD_PERCENTILE,
        }
    }
}

/// Parameters of the oracle Bayes variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OracleParams {
    threshold_percentile: f64,
    noise_scale: f64,
}

impl OracleParams {
    pub fn new(threshold_percentile: f64, noise_scale: f64) -> Result<Self, EstimationError> {
        if !(noise_scale > 0.0 && noise_scale.is_finite()) {
            return Err(EstimationError::invalid(
                "noise_scale",
                format!("{noise_scale} is not a positive finite number"),
            ));
        }
        Ok(Self {
            threshold_percentile: check_threshold(threshold_percentile)?,
            noise_scale,
        })
    }

    pub fn from_config(config: &EstimationConfig) -> Result<Self, EstimationError> {
        Self::new(
            config.effective_threshold_percentile(),
            config.effective_noise_scale(),
        )
    }

    pub fn threshold_percentile(&self) -> f64 {
        self.threshold_percentile
    }

    pub fn noise_scale(&self) -> f64 {
        self.noise_scale
    }
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            threshold_percentile: constants::DEFAULT_THRESHOLD_PERCENTILE,
            noise_scale: constants::NOISE_SCALE,
        }
    }
}

/// Parameters of the empirical Bayes variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmpiricalBayesParams {
    threshold_percentile: f64,
    reference_commitment_fraction: f64,
    bin_width: f64,
}

impl EmpiricalBayesParams {
    pub fn new(
        reference_commitment_fraction: f64,
        bin_width: f64,
    ) -> Result<Self, EstimationError> {
        Ok(Self {
            threshold_percentile: constants::DEFAULT_THRESHOLD_PERCENTILE,
            reference_commitment_fraction: check_fraction(
                "reference_commitment_fraction",
                reference_commitment_fraction,
            )?,
            bin_width: check_fraction("bin_width", bin_width)?,
        })
    }

    /// Also filter reviewers by reputation percentile, as the thresholded mean does.
    pub fn with_threshold(mut self, threshold_percentile: f64) -> Result<Self, EstimationError> {
        self.threshold_percentile = check_threshold(threshold_percentile)?;
        Ok(self)
    }

    pub fn from_config(config: &EstimationConfig) -> Result<Self, EstimationError> {
        Self::new(
            config.effective_reference_commitment_fraction(),
            config.effective_bin_width(),
        )?
        .with_threshold(config.effective_threshold_percentile())
    }

    pub fn threshold_percentile(&self) -> f64 {
        self.threshold_percentile
    }

    pub fn reference_commitment_fraction(&self) -> f64 {
        self.reference_commitment_fraction
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }
}

impl Default for EmpiricalBayesParams {
    fn default() -> Self {
        Self {
            threshold_percentile: constants::DEFAULT_THRESHOLD_PERCENTILE,
            reference_commitment_fraction: constants::DEFAULT_REFERENCE_COMMITMENT_FRACTION,
            bin_width: constants::DEFAULT_BIN_WIDTH,
        }
    }
}

/// Field layout shared by the parameter types on the wire. Deserialized
/// values go through the same range checks as `new`.
#[derive(Deserialize)]
struct RawParams {
    threshold_percentile: Option<f64>,
    noise_scale: Option<f64>,
    reference_commitment_fraction: Option<f64>,
    bin_width: Option<f64>,
}

fn required<E: serde::de::Error>(value: Option<f64>, field: &'static str) -> Result<f64, E> {
    value.ok_or_else(|| E::missing_field(field))
}

impl<'de> Deserialize<'de> for ThresholdParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawParams::deserialize(deserializer)?;
        Self::new(required(raw.threshold_percentile, "threshold_percentile")?)
            .map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for OracleParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawParams::deserialize(deserializer)?;
        Self::new(
            raw.threshold_percentile
                .unwrap_or(constants::DEFAULT_THRESHOLD_PERCENTILE),
            required(raw.noise_scale, "noise_scale")?,
        )
        .map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for EmpiricalBayesParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawParams::deserialize(deserializer)?;
        Self::new(
            required(raw.reference_commitment_fraction, "reference_commitment_fraction")?,
            required(raw.bin_width, "bin_width")?,
        )
        .and_then(|params| {
            params.with_threshold(
                raw.threshold_percentile
                    .unwrap_or(constants::DEFAULT_THRESHOLD_PERCENTILE),
            )
        })
        .map_err(D::Error::custom)
    }
}

impl Estimator {
    /// Plain mean over reviewers at or above the given reputation percentile,
    /// content ordered by number of contributing reviews.
    pub fn thresholded_mean(threshold_percentile: f64) -> Result<Self, EstimationError> {
        Ok(Self::thresholded(ThresholdParams::new(threshold_percentile)?))
    }

    pub fn thresholded(params: ThresholdParams) -> Self {
        let p = params.threshold_percentile();
        Self::new(
            format!("mean of top {}% reviewers", top_share(p)),
            Box::new(UniformWeighting),
            Box::new(ThresholdedWeightedMean::new(p)),
            Box::new(MostCorroboratedFirst),
        )
    }

    /// The thresholded mean with no threshold.
    pub fn simple_mean() -> Self {
        Self::thresholded(ThresholdParams::default()).with_name(SIMPLE_MEAN_NAME)
    }

    /// Inverse-variance weights read from the hidden true reviewer quality.
    /// A benchmark, not a realizable estimator.
    pub fn oracle_bayes(params: OracleParams) -> Self {
        let p = params.threshold_percentile();
        Self::new(
            with_threshold_suffix(ORACLE_NAME, p),
            Box::new(OracleWeighting::new(params.noise_scale())),
            Box::new(ThresholdedWeightedMean::new(p)),
            Box::new(LowestPooledVarianceFirst),
        )
    }

    /// Inverse-variance weights estimated per reputation percentile bin
    /// against `reference`, which must already be computed over the
    /// population this estimator will run on.
    pub fn empirical_bayes(
        reference: &Estimator,
        params: EmpiricalBayesParams,
    ) -> Result<Self, EstimationError> {
        let reference = ReferenceEstimates::from_estimator(reference)?;
        let p = params.threshold_percentile();
        Ok(Self::new(
            with_threshold_suffix(EMPIRICAL_NAME, p),
            Box::new(EmpiricalBayesWeighting::new(
                reference,
                params.reference_commitment_fraction(),
                params.bin_width(),
            )),
            Box::new(ThresholdedWeightedMean::new(p)),
            Box::new(LowestPooledVarianceFirst),
        ))
    }
}
