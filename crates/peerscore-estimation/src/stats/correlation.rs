//! Linear correlation between paired samples.

use statrs::statistics::Statistics;

use super::summary::is_constant;

/// Pearson correlation coefficient of two equally long samples.
///
/// `None` when there are fewer than two pairs, the lengths differ, or either
/// side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    if is_constant(xs) || is_constant(ys) {
        return None;
    }
    let sd_x = xs.population_std_dev();
    let sd_y = ys.population_std_dev();
    if !(sd_x > 0.0) || !(sd_y > 0.0) {
        return None;
    }
    let r = xs.population_covariance(ys) / (sd_x * sd_y);
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
