// Significance testing of a single candidate position
//
// The baseline's assumptions pick the strategy; the strategy supplies the
// statistic, p-value and effect size; the bootstrap supplies the interval.
// Every caveat that weakens the result is recorded as a limitation rather
// than hidden.

use crate::baseline::BaselineProfile;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::hypothesis::bootstrap::effect_size_interval;
use crate::hypothesis::result::{Assumptions, EffectSizeInterpretation, StatisticalTestResult};
use crate::hypothesis::strategy::TestStrategy;
use crate::series::Series;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

/// Tests candidates against a baseline under one configuration
#[derive(Debug, Clone)]
pub struct HypothesisTester {
    config: AnalysisConfig,
}

impl HypothesisTester {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Test `series[index]` against `baseline`
    ///
    /// Fails with [`AnalysisError::InvalidConfig`] when `baseline` was
    /// estimated under a different window size, significance level or lag
    /// count than this tester's configuration, and with
    /// [`AnalysisError::IndexOutOfRange`] for an index past the end of the
    /// series. A zero-spread baseline is not an error: the statistic
    /// and effect size come back as `None`, p = 1, and a limitation says why.
    pub fn test(
        &self,
        series: &Series,
        baseline: &BaselineProfile,
        index: usize,
    ) -> Result<StatisticalTestResult> {
        if !baseline.is_valid_for(&self.config) {
            return Err(AnalysisError::InvalidConfig(format!(
                "baseline estimated with window_size={}, significance_level={}, ljung_box_lags={} \
                 does not match window_size={}, significance_level={}, ljung_box_lags={}",
                baseline.window_size,
                baseline.significance_level,
                baseline.ljung_box_lags,
                self.config.window_size,
                self.config.significance_level,
                self.config.ljung_box_lags
            )));
        }

        let value = series.get(index).ok_or(AnalysisError::IndexOutOfRange {
            index,
            len: series.len(),
        })?;
        let window = series.baseline_window(baseline.window_size)?;

        let assumptions = Assumptions {
            normality: baseline.is_normal,
            independence: !baseline.has_autocorrelation,
            sufficient_sample_size: baseline.n_samples >= self.config.min_sample_size,
        };
        let strategy =
            TestStrategy::select(&assumptions, self.config.pvalue_bootstrap_iterations);

        let seed = self.config.bootstrap_seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let outcome = strategy.evaluate(value, baseline, window, &mut rng);
        let effect_size = strategy.effect_size(value, baseline);
        let confidence_interval = match effect_size {
            Some(_) => effect_size_interval(
                window,
                value,
                &strategy,
                self.config.ci_bootstrap_iterations,
                &mut rng,
            ),
            None => None,
        };

        let alpha = self.config.significance_level;
        let result = StatisticalTestResult {
            candidate_index: index,
            candidate_value: value,
            strategy,
            test_type: strategy.name().to_string(),
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            effect_size,
            effect_size_interpretation: EffectSizeInterpretation::from_effect_size(effect_size),
            confidence_interval,
            is_significant: outcome.statistic.is_some() && outcome.p_value < alpha,
            significance_level: alpha,
            assumptions,
            limitations: limitations(baseline, index),
            seed,
        };

        debug!(
            index,
            test_type = %result.test_type,
            p_value = result.p_value,
            significant = result.is_significant,
            "candidate tested"
        );

        Ok(result)
    }
}

fn limitations(baseline: &BaselineProfile, index: usize) -> Vec<String> {
    let mut notes = Vec::new();

    if !baseline.is_normal {
        notes.push(format!(
            "Baseline is not normally distributed (Shapiro-Wilk p = {:.4}); robust test used",
            baseline.shapiro_p
        ));
    }
    if baseline.has_autocorrelation {
        notes.push(format!(
            "Baseline is autocorrelated (Ljung-Box p = {:.4}); samples are not independent",
            baseline.ljung_box_p
        ));
    }
    let near = 2 * baseline.window_size;
    if index < near {
        notes.push(format!(
            "Candidate index {} is close to the baseline window (< {})",
            index, near
        ));
    }
    if baseline.is_degenerate() {
        notes.push(format!(
            "Baseline has zero variance (std = {}, MAD = {}); z-scores are undefined",
            baseline.std, baseline.mad
        ));
    }

    notes
}
