// Baseline profile over the leading reference window
//
// The first `window_size` samples stand in for unedited footage. Everything
// downstream (standardization in the detectors, the choice of test branch,
// effect sizes) is expressed relative to this snapshot.

use crate::baseline::autocorr::ljung_box;
use crate::baseline::normality::{anderson_darling, shapiro_wilk};
use crate::config::AnalysisConfig;
use crate::descriptive::{
    excess_kurtosis, lag_correlation, mean, median_and_mad_in_place, min_max, percentile_sorted,
    sample_std, skewness, sorted,
};
use crate::error::Result;
use crate::series::Series;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Read-only statistical snapshot of the baseline window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineProfile {
    pub n_samples: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub median: f64,
    /// Raw median absolute deviation (not scaled to sigma)
    pub mad: f64,
    pub q25: f64,
    pub q75: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    pub skewness: f64,
    /// Excess kurtosis (0 for a normal distribution)
    pub kurtosis: f64,

    /// Shapiro-Wilk W
    pub shapiro_statistic: f64,
    pub shapiro_p: f64,
    /// Shapiro-Wilk p-value above the significance level
    pub is_normal: bool,
    /// Anderson-Darling A^2
    pub anderson_statistic: f64,
    pub anderson_critical_5pct: f64,
    pub anderson_rejects_normality: bool,

    /// Pearson correlation between consecutive samples
    pub autocorr_lag1: f64,
    pub ljung_box_statistic: f64,
    pub ljung_box_p: f64,
    pub ljung_box_lags: usize,
    /// Ljung-Box p-value below the significance level
    pub has_autocorrelation: bool,

    /// Window size the profile was computed over
    pub window_size: usize,
    /// Significance level used for both verdicts
    pub significance_level: f64,
}

impl BaselineProfile {
    /// Establish the baseline from `series[0..config.window_size]`
    ///
    /// Fails with [`AnalysisError::InsufficientData`](crate::AnalysisError)
    /// when the series is shorter than the window; no partial profile is
    /// produced.
    ///
    /// # Example
    /// ```
    /// use framestat::{AnalysisConfig, BaselineProfile, Series};
    ///
    /// let values: Vec<f64> = (0..100).map(|i| 15.0 + ((i * 37) % 11) as f64 * 0.3).collect();
    /// let series = Series::new(values).unwrap();
    /// let config = AnalysisConfig { window_size: 50, ..AnalysisConfig::default() };
    ///
    /// let profile = BaselineProfile::estimate(&series, &config).unwrap();
    /// assert_eq!(profile.n_samples, 50);
    /// ```
    pub fn estimate(series: &Series, config: &AnalysisConfig) -> Result<Self> {
        let window = series.baseline_window(config.window_size)?;
        let alpha = config.significance_level;

        let ascending = sorted(window);
        let q25 = percentile_sorted(&ascending, 25.0);
        let q75 = percentile_sorted(&ascending, 75.0);
        let (min, max) = min_max(window);

        let mut scratch = window.to_vec();
        let (median, mad) = median_and_mad_in_place(&mut scratch);

        let shapiro = shapiro_wilk(window);
        let anderson = anderson_darling(window);
        let ljung = ljung_box(window, config.ljung_box_lags);

        let profile = Self {
            n_samples: window.len(),
            mean: mean(window),
            std: sample_std(window),
            median,
            mad,
            q25,
            q75,
            iqr: q75 - q25,
            min,
            max,
            skewness: skewness(window),
            kurtosis: excess_kurtosis(window),
            shapiro_statistic: shapiro.statistic,
            shapiro_p: shapiro.p_value,
            is_normal: shapiro.p_value > alpha,
            anderson_statistic: anderson.statistic,
            anderson_critical_5pct: anderson.critical_5pct,
            anderson_rejects_normality: anderson.rejects_normality(),
            autocorr_lag1: lag_correlation(window, 1),
            ljung_box_statistic: ljung.statistic,
            ljung_box_p: ljung.p_value,
            ljung_box_lags: ljung.lags,
            has_autocorrelation: ljung.p_value < alpha,
            window_size: config.window_size,
            significance_level: alpha,
        };

        debug!(
            n = profile.n_samples,
            mean = profile.mean,
            std = profile.std,
            is_normal = profile.is_normal,
            has_autocorrelation = profile.has_autocorrelation,
            "baseline established"
        );

        Ok(profile)
    }

    /// Shapiro-Wilk and Anderson-Darling reach different verdicts
    pub fn normality_tests_disagree(&self) -> bool {
        self.is_normal == self.anderson_rejects_normality
    }

    /// Standard deviation or MAD is zero, so z-scores are undefined
    pub fn is_degenerate(&self) -> bool {
        self.std <= 0.0 || self.mad <= 0.0
    }

    /// Whether this profile may be reused under `config`
    pub fn is_valid_for(&self, config: &AnalysisConfig) -> bool {
        self.window_size == config.window_size
            && self.significance_level == config.significance_level
            && self.ljung_box_lags == config.ljung_box_lags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn config(window_size: usize) -> AnalysisConfig {
        AnalysisConfig {
            window_size,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_insufficient_data() {
        let series = Series::new(vec![1.0; 99]).unwrap();
        let err = BaselineProfile::estimate(&series, &config(100)).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                required: 100,
                available: 99
            }
        ));
    }

    #[test]
    fn test_only_window_is_used() {
        let mut values: Vec<f64> = (1..=20).map(f64::from).collect();
        values.extend(std::iter::repeat(1000.0).take(50));
        let series = Series::new(values).unwrap();

        let profile = BaselineProfile::estimate(&series, &config(20)).unwrap();
        assert_eq!(profile.n_samples, 20);
        assert_eq!(profile.mean, 10.5);
        assert_eq!(profile.median, 10.5);
        assert_eq!(profile.mad, 5.0);
        assert_eq!((profile.min, profile.max), (1.0, 20.0));
        assert!((profile.q25 - 5.75).abs() < 1e-12);
        assert!((profile.q75 - 15.25).abs() < 1e-12);
        assert!((profile.iqr - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_trend_is_autocorrelated() {
        let series = Series::new((0..200).map(f64::from).collect()).unwrap();
        let profile = BaselineProfile::estimate(&series, &config(200)).unwrap();
        assert!(profile.autocorr_lag1 > 0.99);
        assert!(profile.has_autocorrelation);
    }

    #[test]
    fn test_constant_window_is_degenerate() {
        let series = Series::new(vec![3.0; 60]).unwrap();
        let profile = BaselineProfile::estimate(&series, &config(50)).unwrap();
        assert_eq!(profile.std, 0.0);
        assert_eq!(profile.mad, 0.0);
        assert!(profile.is_degenerate());
        assert!(profile.is_normal);
        assert!(!profile.anderson_rejects_normality);
    }

    #[test]
    fn test_validity_tracks_config() {
        let series = Series::new((0..80).map(|i| f64::from(i % 7)).collect()).unwrap();
        let profile = BaselineProfile::estimate(&series, &config(50)).unwrap();
        assert!(profile.is_valid_for(&config(50)));
        assert!(!profile.is_valid_for(&config(60)));

        let stricter = AnalysisConfig {
            significance_level: 0.01,
            ..config(50)
        };
        assert!(!profile.is_valid_for(&stricter));
    }
}
