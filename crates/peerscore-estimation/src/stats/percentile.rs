//! Percentiles and percentile ranks over defined values.

/// `p`-th percentile (`p` in [0, 100]) using linear interpolation between
/// the two closest ranks. `None` for an empty sample.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Percentile rank of every defined value within the defined values: the
/// share of defined values strictly below it, in [0, 1).
///
/// Undefined entries stay undefined; positions are preserved.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(f64::total_cmp);
    let population = sorted.len() as f64;

    values
        .iter()
        .map(|v| {
            v.map(|x| {
                let below = sorted.partition_point(|&s| s < x);
                below as f64 / population
            })
        })
        .collect()
}
