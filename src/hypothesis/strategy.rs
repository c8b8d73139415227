// Test strategies for a single candidate value
//
// The branch is chosen from the baseline's assumptions, not from the
// candidate. Each variant owns its statistic, p-value and effect-size
// definitions so the two paths can be exercised independently.

use crate::baseline::BaselineProfile;
use crate::descriptive::{mean, median_and_mad_in_place, sample_std};
use crate::hypothesis::bootstrap::modified_z_p_value;
use crate::hypothesis::result::Assumptions;
use crate::probability::normal_sf;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scales (x - median) / MAD to be comparable with a standard z-score
/// (Iglewicz & Hoaglin 1993)
pub const MODIFIED_Z_SCALE: f64 = 0.6745;

/// How a candidate is tested against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestStrategy {
    /// Two-tailed Z-test on (x - mean) / std
    Parametric,
    /// Modified Z-score with a bootstrap p-value over baseline resamples
    RobustBootstrap { iterations: usize },
}

/// Statistic and p-value produced by a strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyOutcome {
    pub statistic: Option<f64>,
    pub p_value: f64,
}

impl StrategyOutcome {
    /// Zero baseline spread: nothing to standardize against
    const UNDEFINED: StrategyOutcome = StrategyOutcome {
        statistic: None,
        p_value: 1.0,
    };
}

impl TestStrategy {
    /// Parametric when the baseline is normal and independent, robust otherwise
    pub fn select(assumptions: &Assumptions, bootstrap_iterations: usize) -> Self {
        if assumptions.parametric_ok() {
            TestStrategy::Parametric
        } else {
            TestStrategy::RobustBootstrap {
                iterations: bootstrap_iterations,
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TestStrategy::Parametric => "Z-test (two-tailed)",
            TestStrategy::RobustBootstrap { .. } => "Modified Z-score (bootstrap)",
        }
    }

    /// Center and spread this strategy standardizes against
    pub fn baseline_location_scale(&self, baseline: &BaselineProfile) -> (f64, f64) {
        match self {
            TestStrategy::Parametric => (baseline.mean, baseline.std),
            TestStrategy::RobustBootstrap { .. } => (baseline.median, baseline.mad),
        }
    }

    /// Center and spread of a scratch sample, which may be reordered
    pub fn sample_location_scale(&self, sample: &mut [f64]) -> (f64, f64) {
        match self {
            TestStrategy::Parametric => (mean(sample), sample_std(sample)),
            TestStrategy::RobustBootstrap { .. } => median_and_mad_in_place(sample),
        }
    }

    /// Standardized deviation of `value`; `None` for zero spread
    pub fn effect_size(&self, value: f64, baseline: &BaselineProfile) -> Option<f64> {
        let (center, scale) = self.baseline_location_scale(baseline);
        standardize(value, center, scale)
    }

    /// Test statistic and p-value for `value`
    ///
    /// `window` is the baseline window; only the robust branch resamples it.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        value: f64,
        baseline: &BaselineProfile,
        window: &[f64],
        rng: &mut R,
    ) -> StrategyOutcome {
        let Some(d) = self.effect_size(value, baseline) else {
            return StrategyOutcome::UNDEFINED;
        };

        match self {
            TestStrategy::Parametric => StrategyOutcome {
                statistic: Some(d),
                p_value: (2.0 * normal_sf(d.abs())).min(1.0),
            },
            TestStrategy::RobustBootstrap { iterations } => {
                let modified_z = MODIFIED_Z_SCALE * d;
                StrategyOutcome {
                    statistic: Some(modified_z),
                    p_value: modified_z_p_value(window, modified_z, *iterations, rng),
                }
            }
        }
    }
}

pub(crate) fn standardize(value: f64, center: f64, scale: f64) -> Option<f64> {
    (scale > 0.0).then(|| (value - center) / scale)
}
