// Baseline estimation for per-frame measurement series
//
// The leading window of a series is treated as the reference distribution.
// This module summarizes it (moments, robust spread, percentiles), checks the
// two assumptions a plain Z-test depends on, and records both verdicts on the
// profile so callers can pick a test branch:
//
// - Normality: Shapiro-Wilk (verdict) and Anderson-Darling (cross-check)
// - Independence: lag-1 autocorrelation and the Ljung-Box portmanteau test
//
// Scientific Foundation:
// [1] Royston, P. (1995). Remark AS R94. Applied Statistics 44(4).
// [2] Ljung, G. M. & Box, G. E. P. (1978). On a measure of lack of fit in
//     time series models. Biometrika 65(2), 297-303.

mod autocorr;
mod estimator;
mod normality;

pub use autocorr::{ljung_box, LjungBox};
pub use estimator::BaselineProfile;
pub use normality::{anderson_darling, shapiro_wilk, AndersonDarling, ShapiroWilk};

#[cfg(test)]
mod tests;
