//! Thin wrappers over `statrs` distribution functions
//!
//! Fallible distribution constructors are resolved here so that callers get
//! plain `f64` answers; an invalid parameterization yields the neutral
//! probability 1.0.

use statrs::distribution::{ChiSquared, Continuous, ContinuousCDF, StudentsT};
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{PI, SQRT_2};

/// Standard normal CDF
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Standard normal upper tail, accurate far into the tail
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

/// Standard normal quantile for p in (0, 1)
pub fn normal_quantile(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Normal density with the given mean and standard deviation
pub fn normal_pdf(x: f64, mean: f64, std: f64) -> f64 {
    let z = (x - mean) / std;
    (-0.5 * z * z).exp() / (std * (2.0 * PI).sqrt())
}

/// Chi-square upper tail probability
pub fn chi_square_sf(statistic: f64, degrees_of_freedom: f64) -> f64 {
    ChiSquared::new(degrees_of_freedom)
        .map(|dist| (1.0 - dist.cdf(statistic)).clamp(0.0, 1.0))
        .unwrap_or(1.0)
}

/// Student-t density with location, scale and degrees of freedom
pub fn students_t_pdf(x: f64, location: f64, scale: f64, freedom: f64) -> f64 {
    StudentsT::new(location, scale, freedom)
        .map(|dist| dist.pdf(x))
        .unwrap_or(0.0)
}
