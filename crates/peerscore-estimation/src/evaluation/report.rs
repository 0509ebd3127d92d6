use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of one performance evaluation.
///
/// Correlations are `None` wherever fewer than two points or a constant
/// side made them undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub estimator: String,
    /// Pearson correlation of true reviewer quality and reputation estimate.
    pub reviewer_correlation: Option<f64>,
    /// Users with a defined reputation estimate divided by the number of
    /// content items (not users). 0 when there is no content.
    pub reviewer_coverage: f64,
    pub reviewers_estimated: usize,
    pub content_estimated: usize,
    /// Committed prefix sizes as a share of all content, ascending.
    pub commitment_fractions: Vec<f64>,
    /// Content correlation over each committed prefix, parallel to
    /// `commitment_fractions`.
    pub content_correlations: Vec<Option<f64>>,
}

impl PerformanceReport {
    /// Correlation at full commitment, if any content was estimated.
    pub fn final_content_correlation(&self) -> Option<f64> {
        self.content_correlations.last().copied().flatten()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn fmt_corr(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format!("{v:.4}"))
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.estimator)?;
        writeln!(
            f,
            "  reviewers: correlation {} coverage {:.4} ({} estimated)",
            fmt_corr(self.reviewer_correlation),
            self.reviewer_coverage,
            self.reviewers_estimated
        )?;
        writeln!(f, "  content: {} estimated", self.content_estimated)?;
        for (fraction, corr) in self.commitment_fractions.iter().zip(&self.content_correlations) {
            writeln!(f, "    {:>6.1}% committed: {}", fraction * 100.0, fmt_corr(*corr))?;
        }
        Ok(())
    }
}
