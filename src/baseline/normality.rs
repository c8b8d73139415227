// Normality tests for the baseline window
//
// Two independent tests are run so the profile can record when they disagree:
//
// - Shapiro-Wilk W with Royston's (1995) coefficient and p-value
//   approximations (algorithm AS R94), valid for 3 <= n <= 5000.
// - Anderson-Darling A^2 against a normal with estimated mean and variance,
//   compared with the 5% critical value adjusted for sample size
//   (Stephens 1974).
//
// Scientific Foundation:
// [1] Royston, P. (1995). Remark AS R94: A remark on algorithm AS 181.
//     Applied Statistics 44(4), 547-551.
// [2] Stephens, M. A. (1974). EDF statistics for goodness of fit and some
//     comparisons. JASA 69, 730-737.

use crate::descriptive::{mean, sample_std, sorted};
use crate::probability::{normal_cdf, normal_quantile, normal_sf};
use serde::{Deserialize, Serialize};

/// Shapiro-Wilk polynomial coefficients (Royston 1995)
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Anderson-Darling 5% critical value for the normal case before size adjustment
const AD_CRITICAL_5PCT: f64 = 0.787;

/// Shapiro-Wilk test outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapiroWilk {
    /// W statistic in (0, 1]; values near 1 are consistent with normality
    pub statistic: f64,
    /// Probability of a W this small under normality
    pub p_value: f64,
}

/// Anderson-Darling test outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AndersonDarling {
    /// A^2 statistic (uncorrected)
    pub statistic: f64,
    /// Size-adjusted critical value at the 5% level
    pub critical_5pct: f64,
}

impl AndersonDarling {
    /// Whether A^2 exceeds the 5% critical value
    pub fn rejects_normality(&self) -> bool {
        self.statistic > self.critical_5pct
    }
}

/// Evaluate c[0] + c[1] x + c[2] x^2 + ...
fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Shapiro-Wilk normality test
///
/// Samples with fewer than 3 values or zero range carry no evidence against
/// normality and return the neutral outcome W = 1, p = 1.
pub fn shapiro_wilk(data: &[f64]) -> ShapiroWilk {
    let neutral = ShapiroWilk {
        statistic: 1.0,
        p_value: 1.0,
    };

    let n = data.len();
    if n < 3 {
        return neutral;
    }

    let x = sorted(data);
    if x[n - 1] - x[0] <= 0.0 {
        return neutral;
    }

    let an = n as f64;
    let half = n / 2;

    // Coefficients for the lower half; the upper half is antisymmetric
    let mut a = vec![0.0; half];
    if n == 3 {
        a[0] = 0.5f64.sqrt();
    } else {
        let an25 = an + 0.25;
        let m: Vec<f64> = (0..half)
            .map(|i| normal_quantile((i as f64 + 1.0 - 0.375) / an25))
            .collect();
        let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
        let ssumm2 = summ2.sqrt();
        let rsn = 1.0 / an.sqrt();
        let a1 = poly(&C1, rsn) - m[0] / ssumm2;

        let (first_plain, fac) = if n > 5 {
            let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
            let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
                / (1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2)))
            .sqrt();
            a[1] = a2;
            (2, fac)
        } else {
            let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a1.powi(2))).sqrt();
            (1, fac)
        };
        a[0] = a1;
        for i in first_plain..half {
            a[i] = -m[i] / fac;
        }
    }

    let mu = mean(&x);
    let ssq: f64 = x.iter().map(|v| (v - mu).powi(2)).sum();
    let numerator: f64 = (0..half).map(|i| a[i] * (x[n - 1 - i] - x[i])).sum();
    let w = (numerator * numerator / ssq).min(1.0);

    ShapiroWilk {
        statistic: w,
        p_value: shapiro_wilk_p_value(w, n),
    }
}

fn shapiro_wilk_p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        const SIX_OVER_PI: f64 = 6.0 / std::f64::consts::PI;
        let stqr = (0.75f64).sqrt().asin();
        return (SIX_OVER_PI * (w.sqrt().asin() - stqr)).clamp(0.0, 1.0);
    }
    if w >= 1.0 {
        return 1.0;
    }

    let an = n as f64;
    let w1 = (1.0 - w).ln();

    let (y, m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if w1 >= gamma {
            return 0.0;
        }
        (-(gamma - w1).ln(), poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (w1, poly(&C5, xx), poly(&C6, xx).exp())
    };

    normal_sf((y - m) / s).clamp(0.0, 1.0)
}

/// Anderson-Darling test against a normal with estimated parameters
pub fn anderson_darling(data: &[f64]) -> AndersonDarling {
    let n = data.len();
    let an = n as f64;
    let adjustment = if n == 0 {
        1.0
    } else {
        1.0 + 4.0 / an - 25.0 / (an * an)
    };
    // Below n = 4 the adjustment is non-positive; use the unadjusted value
    let critical_5pct = if adjustment > 0.0 {
        (AD_CRITICAL_5PCT / adjustment * 1000.0).round() / 1000.0
    } else {
        AD_CRITICAL_5PCT
    };

    let std = sample_std(data);
    if n < 2 || std <= 0.0 {
        return AndersonDarling {
            statistic: 0.0,
            critical_5pct,
        };
    }

    let mu = mean(data);
    let z: Vec<f64> = sorted(data).iter().map(|x| (x - mu) / std).collect();

    let ln_floor = |p: f64| p.max(f64::MIN_POSITIVE).ln();
    let sum: f64 = (0..n)
        .map(|i| {
            let weight = (2 * i + 1) as f64;
            let log_cdf = ln_floor(normal_cdf(z[i]));
            let log_sf = ln_floor(normal_sf(z[n - 1 - i]));
            weight * (log_cdf + log_sf)
        })
        .sum();

    AndersonDarling {
        statistic: -an - sum / an,
        critical_5pct,
    }
}
