// Configuration for baseline estimation, change-point detection and testing
//
// Every knob that changes a statistical result lives here. Results record the
// configuration they were computed under; they are not valid across changes
// to the significance level or the baseline window size.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the analysis engine
///
/// # Example
/// ```
/// use framestat::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.window_size, 1000);
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of leading samples treated as the reference ("unedited") region
    ///
    /// All baseline moments and percentiles are computed over
    /// `series[0..window_size]` only. Change points are never reported inside
    /// this window.
    pub window_size: usize,

    /// Statistical significance level (alpha)
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: stricter (fewer false positives, more false negatives)
    /// - 0.10: looser (more false positives, fewer false negatives)
    ///
    /// Used for the normality verdict, the autocorrelation verdict and the
    /// per-candidate significance flag.
    pub significance_level: f64,

    /// CUSUM decision threshold on the standardized cumulative sum
    pub cusum_threshold: f64,

    /// CUSUM slack (k), subtracted from every standardized increment
    pub cusum_drift: f64,

    /// Prior probability of a change at any step (constant hazard)
    pub prior_change_probability: f64,

    /// Steps evaluated by the Bayesian detector past the baseline window
    ///
    /// The run-length recursion is quadratic in the number of steps, so the
    /// detector stops at `window_size + bayesian_horizon` and flags the
    /// outcome as truncated when the series is longer.
    pub bayesian_horizon: usize,

    /// Bootstrap resamples for the robust-branch p-value
    pub pvalue_bootstrap_iterations: usize,

    /// Bootstrap resamples for the effect-size confidence interval
    pub ci_bootstrap_iterations: usize,

    /// Maximum candidates tested per detection method
    pub max_candidates_per_method: usize,

    /// Number of lags in the Ljung-Box autocorrelation test
    pub ljung_box_lags: usize,

    /// Baseline size below which the sample-size assumption is reported as unmet
    pub min_sample_size: usize,

    /// Fixed bootstrap seed; `None` draws a fresh seed per test
    ///
    /// Without a seed, p-values and confidence intervals vary slightly between
    /// runs.
    pub bootstrap_seed: Option<u64>,

    /// Minimum |effect size| for a significant candidate to become a finding
    pub min_effect_size: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: 1000,
            significance_level: 0.05,
            cusum_threshold: 5.0,
            cusum_drift: 0.5,
            prior_change_probability: 1.0 / 250.0,
            bayesian_horizon: 1000,
            pvalue_bootstrap_iterations: 10_000,
            ci_bootstrap_iterations: 1_000,
            max_candidates_per_method: 5,
            ljung_box_lags: 10,
            min_sample_size: 30,
            bootstrap_seed: None,
            min_effect_size: 0.5,
        }
    }
}

impl AnalysisConfig {
    /// Create a strict configuration (fewer false positives, more false negatives)
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01, // 99% confidence
            cusum_threshold: 8.0,
            min_effect_size: 0.8,
            ..Self::default()
        }
    }

    /// Create a permissive configuration (more false positives, fewer false negatives)
    pub fn permissive() -> Self {
        Self {
            significance_level: 0.10, // 90% confidence
            cusum_threshold: 4.0,
            min_effect_size: 0.2,
            ..Self::default()
        }
    }

    /// Same configuration with a fixed bootstrap seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.bootstrap_seed = Some(seed);
        self
    }

    /// Parse a configuration from TOML and validate it
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Example
    /// ```
    /// use framestat::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::from_toml_str("window_size = 200\ncusum_threshold = 6.5").unwrap();
    /// assert_eq!(config.window_size, 200);
    /// assert_eq!(config.significance_level, 0.05);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AnalysisError::InvalidConfig(msg));

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return invalid(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        // Anderson-Darling's size adjustment 1 + 4/n - 25/n^2 is negative below 4
        if self.window_size < 4 {
            return invalid(format!(
                "window_size must be >= 4, got {}",
                self.window_size
            ));
        }

        if !(self.cusum_threshold > 0.0) {
            return invalid(format!(
                "cusum_threshold must be positive, got {}",
                self.cusum_threshold
            ));
        }

        if !(self.cusum_drift >= 0.0) {
            return invalid(format!(
                "cusum_drift must be non-negative, got {}",
                self.cusum_drift
            ));
        }

        if !(self.prior_change_probability > 0.0 && self.prior_change_probability < 1.0) {
            return invalid(format!(
                "prior_change_probability must be in (0, 1), got {}",
                self.prior_change_probability
            ));
        }

        if self.pvalue_bootstrap_iterations == 0 || self.ci_bootstrap_iterations == 0 {
            return invalid("bootstrap iteration counts must be positive".to_string());
        }

        if self.ljung_box_lags == 0 || self.ljung_box_lags >= self.window_size {
            return invalid(format!(
                "ljung_box_lags must be in [1, window_size), got {}",
                self.ljung_box_lags
            ));
        }

        if !(self.min_effect_size >= 0.0) {
            return invalid(format!(
                "min_effect_size must be non-negative, got {}",
                self.min_effect_size
            ));
        }

        Ok(())
    }

    /// Whether results computed under `other` remain valid under `self`
    ///
    /// Baseline-derived results depend on the window size and the
    /// significance level; a change to either invalidates them.
    pub fn baseline_compatible(&self, other: &AnalysisConfig) -> bool {
        self.window_size == other.window_size
            && self.significance_level == other.significance_level
            && self.ljung_box_lags == other.ljung_box_lags
    }
}
