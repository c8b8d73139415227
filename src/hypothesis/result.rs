// Per-candidate test outcome and its supporting records

use crate::hypothesis::strategy::TestStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cohen-style reading of |effect size| (thresholds 0.2 / 0.5 / 0.8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSizeInterpretation {
    Negligible,
    Small,
    Medium,
    Large,
    /// Baseline spread is zero so no standardized effect exists
    Undefined,
}

impl EffectSizeInterpretation {
    pub fn from_effect_size(effect_size: Option<f64>) -> Self {
        match effect_size.map(f64::abs) {
            None => Self::Undefined,
            Some(d) if d < 0.2 => Self::Negligible,
            Some(d) if d < 0.5 => Self::Small,
            Some(d) if d < 0.8 => Self::Medium,
            Some(_) => Self::Large,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for EffectSizeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assumptions a parametric Z-test depends on, as judged from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assumptions {
    pub normality: bool,
    pub independence: bool,
    pub sufficient_sample_size: bool,
}

impl Assumptions {
    /// Both conditions for the parametric branch hold
    pub fn parametric_ok(&self) -> bool {
        self.normality && self.independence
    }
}

/// Bootstrap interval for the effect size
///
/// Built from baseline resamples compared against the fixed candidate value,
/// so it describes what a baseline-only resample would have shown against this
/// candidate. It need not bracket the point estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Nominal coverage, e.g. 0.95
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Outcome of testing one candidate position against the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalTestResult {
    pub candidate_index: usize,
    pub candidate_value: f64,
    pub strategy: TestStrategy,
    /// Human-readable test name
    pub test_type: String,
    /// z or modified z; `None` when the baseline spread is zero
    pub statistic: Option<f64>,
    pub p_value: f64,
    /// `None` when the baseline spread is zero
    pub effect_size: Option<f64>,
    pub effect_size_interpretation: EffectSizeInterpretation,
    pub confidence_interval: Option<ConfidenceInterval>,
    pub is_significant: bool,
    pub significance_level: f64,
    pub assumptions: Assumptions,
    /// Ordered caveats on how far the result can be trusted
    pub limitations: Vec<String>,
    /// Seed the bootstrap generator was started from
    pub seed: u64,
}
