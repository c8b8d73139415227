//! Temporal dependence in the baseline window.
//!
//! Adjacent video frames are rarely independent. The Ljung-Box portmanteau
//! test flags dependence that would invalidate a plain Z-test, which assumes
//! IID samples.

use crate::descriptive::lag_correlation;
use crate::probability::chi_square_sf;
use serde::{Deserialize, Serialize};

/// Ljung-Box test outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LjungBox {
    /// Q = n(n+2) * sum_{k=1..lags} r_k^2 / (n-k)
    pub statistic: f64,
    /// Upper tail of chi-square with `lags` degrees of freedom at Q
    pub p_value: f64,
    /// Number of lags summed
    pub lags: usize,
}

/// Ljung-Box test over lags 1..=`lags`.
///
/// Each r_k is the Pearson correlation between `data[..n-k]` and `data[k..]`.
/// Lags at or beyond the sample length contribute nothing.
pub fn ljung_box(data: &[f64], lags: usize) -> LjungBox {
    let n = data.len();
    let nf = n as f64;

    let sum: f64 = (1..=lags)
        .filter(|&k| k < n)
        .map(|k| lag_correlation(data, k).powi(2) / (n - k) as f64)
        .sum();
    let statistic = nf * (nf + 2.0) * sum;

    LjungBox {
        statistic,
        p_value: chi_square_sf(statistic, lags as f64),
        lags,
    }
}
