//! Numeric helpers shared by the cleaner and summarizer.
//!
//! All functions operate on finite slices of plain `f64` values and return
//! 0.0 on empty input so the pipeline stages stay total.

/// Method used to compute percentiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileMethod {
    /// Linear interpolation between the two closest ranks. The default.
    Linear,
    /// Nearest-rank: the smallest value with at least p·N values below it.
    NearestRank,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample standard deviation (N−1 denominator). A single
/// observation has no spread and reports 0.0.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

pub fn median(values: &[f64]) -> f64 {
    percentile(values, 0.5, PercentileMethod::Linear)
}

/// Percentile of `values` for `p` in `[0, 1]`.
pub fn percentile(values: &[f64], p: f64, method: PercentileMethod) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    match method {
        PercentileMethod::Linear => {
            let rank = p * (sorted.len() - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            if lo == hi {
                sorted[lo]
            } else {
                let weight = rank - lo as f64;
                sorted[lo] * (1.0 - weight) + sorted[hi] * weight
            }
        }
        PercentileMethod::NearestRank => {
            let rank = (p * sorted.len() as f64).ceil() as usize;
            sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
        }
    }
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_one_to_five() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
    }

    #[test]
    fn std_dev_of_one_to_five() {
        // Sample std dev with N−1 denominator.
        let sd = sample_std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((sd - 1.5811).abs() < 1e-4);
    }

    #[test]
    fn std_dev_of_single_value_is_zero() {
        assert_eq!(sample_std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn median_odd_count() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn median_even_count_interpolates() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn linear_percentiles_interpolate() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.25, PercentileMethod::Linear), 1.75);
        assert_eq!(percentile(&values, 0.75, PercentileMethod::Linear), 3.25);
    }

    #[test]
    fn nearest_rank_percentiles() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.25, PercentileMethod::NearestRank), 1.0);
        assert_eq!(percentile(&values, 0.75, PercentileMethod::NearestRank), 3.0);
        assert_eq!(percentile(&values, 1.0, PercentileMethod::NearestRank), 4.0);
    }

    #[test]
    fn percentile_extremes_hit_min_and_max() {
        let values = [7.0, 1.0, 4.0];
        assert_eq!(percentile(&values, 0.0, PercentileMethod::Linear), 1.0);
        assert_eq!(percentile(&values, 1.0, PercentileMethod::Linear), 7.0);
    }

    #[test]
    fn empty_inputs_report_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(min(&[]), 0.0);
        assert_eq!(max(&[]), 0.0);
    }

    #[test]
    fn min_max_basic() {
        assert_eq!(min(&[3.0, -1.0, 2.0]), -1.0);
        assert_eq!(max(&[3.0, -1.0, 2.0]), 3.0);
    }
}
