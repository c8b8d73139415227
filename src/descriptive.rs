//! Descriptive statistics over finite `f64` slices
//!
//! Mean, sample standard deviation, median and extrema come from `statrs`,
//! wrapped so empty or spread-free input yields 0.0 instead of NaN.
//!
//! The rest is computed here because `statrs` either lacks it or uses a
//! different convention: percentiles interpolate linearly between order
//! statistics (statrs quantiles use R type 8), MAD is raw rather than scaled,
//! skewness and kurtosis are the biased moment ratios, and Pearson
//! correlation falls back to the neutral 1.0 on zero variance.

use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    Statistics::mean(data)
}

/// Sample standard deviation with `n - 1` in the denominator
///
/// Returns 0.0 when fewer than two samples are available or every sample is
/// identical. The streaming variance can leave a rounding residue on constant
/// non-integer data, so no spread is detected up front.
pub fn sample_std(data: &[f64]) -> f64 {
    if data.len() < 2 || data.iter().all(|&x| x == data[0]) {
        return 0.0;
    }
    Statistics::std_dev(data)
}

/// Median of a scratch buffer, partially reordering it
///
/// Returns 0.0 for an empty buffer.
pub fn median_in_place(data: &mut [f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    OrderStatistics::median(&mut Data::new(data))
}

/// Median of a slice (copies the data)
pub fn median(data: &[f64]) -> f64 {
    let mut scratch = data.to_vec();
    median_in_place(&mut scratch)
}

/// Median and raw (unscaled) median absolute deviation of a scratch buffer
///
/// The buffer is overwritten with absolute deviations.
pub fn median_and_mad_in_place(data: &mut [f64]) -> (f64, f64) {
    let med = median_in_place(data);
    for x in data.iter_mut() {
        *x = (*x - med).abs();
    }
    (med, median_in_place(data))
}

/// Raw median absolute deviation of a slice (copies the data)
pub fn mad(data: &[f64]) -> f64 {
    let mut scratch = data.to_vec();
    median_and_mad_in_place(&mut scratch).1
}

/// Sort a copy of the data ascending
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile (0-100) of ascending data with linear interpolation
pub fn percentile_sorted(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0).clamp(0.0, 1.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Central moments m2, m3, m4 (population convention)
fn central_moments(data: &[f64]) -> (f64, f64, f64) {
    let n = data.len() as f64;
    let m = mean(data);
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for x in data {
        let d = x - m;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}

/// Biased sample skewness g1 = m3 / m2^1.5 (0.0 when the data has no spread)
pub fn skewness(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let (m2, m3, _) = central_moments(data);
    if m2 <= 0.0 {
        return 0.0;
    }
    m3 / m2.powf(1.5)
}

/// Biased excess kurtosis g2 = m4 / m2^2 - 3 (0.0 when the data has no spread)
pub fn excess_kurtosis(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let (m2, _, m4) = central_moments(data);
    if m2 <= 0.0 {
        return 0.0;
    }
    m4 / (m2 * m2) - 3.0
}

/// Pearson correlation of two equal-length slices
///
/// Degenerate inputs (fewer than two pairs, or a side with zero variance)
/// return the neutral value 1.0.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 1.0;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let (ma, mb) = (mean(a), mean(b));

    let (mut cov, mut va, mut vb) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - ma, y - mb);
        cov += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }

    if va <= 0.0 || vb <= 0.0 {
        return 1.0;
    }
    cov / (va.sqrt() * vb.sqrt())
}

/// Correlation between `data[..n-lag]` and `data[lag..]`
///
/// Lags at or beyond the data length carry no information and return 0.0.
pub fn lag_correlation(data: &[f64], lag: usize) -> f64 {
    if lag == 0 {
        return 1.0;
    }
    if lag >= data.len() {
        return 0.0;
    }
    pearson(&data[..data.len() - lag], &data[lag..])
}

/// Minimum and maximum of a slice ((0.0, 0.0) when empty)
pub fn min_max(data: &[f64]) -> (f64, f64) {
    if data.is_empty() {
        return (0.0, 0.0);
    }
    (Statistics::min(data), Statistics::max(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&data) - 5.0).abs() < 1e-12);
        // Sample std (n-1): sqrt(32 / 7)
        assert!((sample_std(&data) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_std_single_sample() {
        assert_eq!(sample_std(&[3.0]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[9.0, 1.0, 5.0, 3.0, 7.0]), 5.0);
    }

    #[test]
    fn test_median_even_length() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_mad() {
        // median = 2, deviations = [1, 1, 0, 0, 2, 4, 7] -> median 1
        assert_eq!(mad(&[1.0, 1.0, 2.0, 2.0, 4.0, 6.0, 9.0]), 1.0);
    }

    #[test]
    fn test_mad_constant() {
        assert_eq!(mad(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_percentile_interpolation() {
        let data = sorted(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(percentile_sorted(&data, 0.0), 1.0);
        assert_eq!(percentile_sorted(&data, 100.0), 4.0);
        assert!((percentile_sorted(&data, 25.0) - 1.75).abs() < 1e-12);
        assert!((percentile_sorted(&data, 75.0) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_symmetric() {
        assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_right_tail() {
        assert!(skewness(&[1.0, 1.0, 1.0, 1.0, 10.0]) > 1.0);
    }

    #[test]
    fn test_kurtosis_uniform_is_negative() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        // Discrete uniform excess kurtosis is about -1.2
        assert!((excess_kurtosis(&data) + 1.2).abs() < 0.01);
    }

    #[test]
    fn test_pearson_perfect() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-12);

        let c = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&a, &c) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_degenerate_is_neutral() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 1.0);
        assert_eq!(pearson(&[1.0], &[2.0]), 1.0);
    }

    #[test]
    fn test_lag_correlation_alternating() {
        let data: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert!((lag_correlation(&data, 1) + 1.0).abs() < 1e-12);
        assert!((lag_correlation(&data, 2) - 1.0).abs() < 1e-12);
        assert_eq!(lag_correlation(&data, 50), 0.0);
    }

    #[test]
    fn test_std_constant_fraction_is_zero() {
        // 0.1 is inexact in binary; the spread must still come out as zero
        assert_eq!(sample_std(&[0.1; 37]), 0.0);
        assert_eq!(sample_std(&[15.3; 1000]), 0.0);
    }

    #[test]
    fn test_median_in_place_keeps_values() {
        let mut scratch = vec![6.0, 2.0, 9.0, 4.0, 1.0, 8.0];
        assert_eq!(median_in_place(&mut scratch), 5.0);
        let mut resorted = scratch.clone();
        resorted.sort_by(f64::total_cmp);
        assert_eq!(resorted, vec![1.0, 2.0, 4.0, 6.0, 8.0, 9.0]);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[3.0, -1.0, 7.5]), (-1.0, 7.5));
        assert_eq!(min_max(&[]), (0.0, 0.0));
    }
}
