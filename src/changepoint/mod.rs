//! Change-point detection over a series relative to its baseline
//!
//! Two independent detectors flag positions past the baseline window:
//!
//! - [`CusumDetector`]: two-sided cumulative sum control chart on
//!   standardized values
//! - [`BayesianDetector`]: online run-length posterior with a constant hazard
//!
//! Both are pure functions of `(series, baseline)` and never report indices
//! inside the baseline window.

mod bayesian;
mod cusum;

pub use bayesian::{BayesianDetector, BayesianOutcome};
pub use cusum::{CusumDetector, CusumOutcome, Standardization};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detector that flagged a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DetectionMethod {
    #[serde(rename = "CUSUM")]
    Cusum,
    Bayesian,
}

impl DetectionMethod {
    pub fn name(&self) -> &'static str {
        match self {
            DetectionMethod::Cusum => "CUSUM",
            DetectionMethod::Bayesian => "Bayesian",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
