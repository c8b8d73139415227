//! Immutable per-frame measurement series
//!
//! The feature-extraction side hands over one scalar per sampled frame
//! (compression ratio, noise variance, ...). Position in the series is the
//! proxy for time.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// How series positions map back to video time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingInfo {
    /// Source frames between consecutive samples (e.g. 30 = every 30th frame)
    pub frame_step: usize,
    /// Frames per second of the source video
    pub fps: f64,
}

impl SamplingInfo {
    /// Video time in seconds of series position `index`
    pub fn timestamp_of(&self, index: usize) -> f64 {
        index as f64 * self.frame_step as f64 / self.fps
    }
}

/// Ordered, finite, read-only sequence of measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    values: Vec<f64>,
    sampling: Option<SamplingInfo>,
}

impl Series {
    /// Build a series, rejecting NaN and infinite values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteValue { index });
        }
        Ok(Self {
            values,
            sampling: None,
        })
    }

    /// Build a series that can report positions as timestamps
    pub fn with_sampling(values: Vec<f64>, sampling: SamplingInfo) -> Result<Self> {
        if sampling.frame_step == 0 || !(sampling.fps > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "sampling requires frame_step > 0 and fps > 0, got {} / {}",
                sampling.frame_step, sampling.fps
            )));
        }
        let mut series = Self::new(values)?;
        series.sampling = Some(sampling);
        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn sampling(&self) -> Option<SamplingInfo> {
        self.sampling
    }

    /// Leading `window_size` samples
    pub fn baseline_window(&self, window_size: usize) -> Result<&[f64]> {
        if self.values.len() < window_size {
            return Err(AnalysisError::InsufficientData {
                required: window_size,
                available: self.values.len(),
            });
        }
        Ok(&self.values[..window_size])
    }

    /// Video time in seconds of the sample at `index`, when sampling is known
    pub fn timestamp_of(&self, index: usize) -> Option<f64> {
        self.sampling.map(|s| s.timestamp_of(index))
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = AnalysisError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}
