// Two-sided CUSUM control chart
//
// Each value is standardized against the baseline, then folded into an upper
// and a lower cumulative sum with slack k:
//
//   pos[i] = max(0, pos[i-1] + z[i] - k)
//   neg[i] = min(0, neg[i-1] + z[i] + k)
//
// Both sums start at zero and run over the whole series (the baseline window
// included), but only indices at or past the window are reported.
//
// Reference: Page, E. S. (1954). Continuous inspection schemes.
//            Biometrika 41(1/2), 100-115.

use crate::baseline::BaselineProfile;
use crate::config::AnalysisConfig;
use crate::series::Series;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How values were standardized before accumulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standardization {
    /// (x - mean) / std, used when the baseline is normal
    MeanStd,
    /// (x - median) / MAD, used otherwise
    MedianMad,
    /// Baseline scale is zero; every z is 0 and nothing is reported
    Degenerate,
}

/// CUSUM detector parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CusumDetector {
    pub threshold: f64,
    pub drift: f64,
}

/// Result of a CUSUM pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CusumOutcome {
    /// Ascending indices >= window size where either sum exceeds the threshold
    pub change_points: Vec<usize>,
    /// Upper cumulative sum at every index
    pub positive: Vec<f64>,
    /// Lower cumulative sum at every index
    pub negative: Vec<f64>,
    pub threshold: f64,
    pub standardization: Standardization,
}

impl CusumOutcome {
    /// Raw detection statistic max(|pos[i]|, |neg[i]|)
    pub fn statistic_at(&self, index: usize) -> Option<f64> {
        let pos = self.positive.get(index)?;
        let neg = self.negative.get(index)?;
        Some(pos.abs().max(neg.abs()))
    }
}

impl Default for CusumDetector {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            drift: 0.5,
        }
    }
}

impl CusumDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            threshold: config.cusum_threshold,
            drift: config.cusum_drift,
        }
    }

    /// Run the chart over the whole series
    pub fn detect(&self, series: &Series, baseline: &BaselineProfile) -> CusumOutcome {
        let (center, scale, standardization) = if baseline.is_normal {
            (baseline.mean, baseline.std, Standardization::MeanStd)
        } else {
            (baseline.median, baseline.mad, Standardization::MedianMad)
        };
        let standardization = if scale > 0.0 {
            standardization
        } else {
            Standardization::Degenerate
        };

        let k = self.drift;
        let (positive, negative): (Vec<f64>, Vec<f64>) = series
            .values()
            .iter()
            .map(|&x| match standardization {
                Standardization::Degenerate => 0.0,
                _ => (x - center) / scale,
            })
            .scan((0.0f64, 0.0f64), |(pos, neg), z| {
                *pos = (*pos + z - k).max(0.0);
                *neg = (*neg + z + k).min(0.0);
                Some((*pos, *neg))
            })
            .unzip();

        let change_points: Vec<usize> = (baseline.window_size..series.len())
            .filter(|&i| positive[i].abs() > self.threshold || negative[i].abs() > self.threshold)
            .collect();

        debug!(
            candidates = change_points.len(),
            threshold = self.threshold,
            ?standardization,
            "CUSUM detection complete"
        );

        CusumOutcome {
            change_points,
            positive,
            negative,
            threshold: self.threshold,
            standardization,
        }
    }
}
