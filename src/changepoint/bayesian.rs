// Bayesian online change-point detection (Adams & MacKay 2007)
//
// State is the run-length posterior P(r_t = r | x_0..x_t), where r counts the
// observations of the current run that precede x_t. One step folds the next
// observation into a fresh posterior vector:
//
//   growth:  P(r+1) ∝ P(r) × pred(x | run r) × (1 - h)
//   change:  P(0)   ∝ h × π0(x)
//
// pred(x | run r) is a Gaussian with the mean and sample standard deviation
// of the run's own observations. Runs with fewer than two observations (or no
// spread) fall back to the baseline Gaussian. π0 is the fresh-run predictive:
// a Student-t (ν = 2) at the baseline mean, heavy-tailed so that a value the
// current run cannot explain is absorbed by a new run.
//
// Each step is O(t), so the recursion is bounded to
// `window_size + bayesian_horizon` steps. Longer series are truncated with a
// warning and the outcome is marked as such.
//
// Reference: Adams, R. P. & MacKay, D. J. C. (2007). Bayesian Online
//            Changepoint Detection. arXiv:0710.3742.

use crate::baseline::BaselineProfile;
use crate::config::AnalysisConfig;
use crate::probability::{normal_pdf, students_t_pdf};
use crate::series::Series;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Posterior mass below which a run length is dropped
const PRUNE_BELOW: f64 = 1e-10;

/// Degrees of freedom of the fresh-run predictive
const FRESH_RUN_FREEDOM: f64 = 2.0;

/// Scales raw MAD to a consistent sigma estimate under normality
const MAD_TO_SIGMA: f64 = 1.4826;

/// Bayesian detector parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesianDetector {
    /// Constant hazard h
    pub prior_change_probability: f64,
    /// Steps evaluated past the baseline window
    pub horizon: usize,
}

/// Result of a Bayesian pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayesianOutcome {
    /// Ascending indices >= window size with P(r = 0) > 0.5
    pub change_points: Vec<usize>,
    /// P(r_t = 0) for every evaluated step t
    pub change_probabilities: Vec<f64>,
    pub evaluated_steps: usize,
    pub series_len: usize,
    /// The series extended past the evaluation horizon
    pub truncated: bool,
}

impl Default for BayesianDetector {
    fn default() -> Self {
        Self {
            prior_change_probability: 1.0 / 250.0,
            horizon: 1000,
        }
    }
}

/// Prefix sums of baseline-centered values and their squares
struct PrefixMoments {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl PrefixMoments {
    fn new(values: &[f64], center: f64) -> Self {
        let mut sum = Vec::with_capacity(values.len() + 1);
        let mut sum_sq = Vec::with_capacity(values.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);
        for (i, x) in values.iter().enumerate() {
            let c = x - center;
            sum.push(sum[i] + c);
            sum_sq.push(sum_sq[i] + c * c);
        }
        Self { sum, sum_sq }
    }

    /// Centered mean and sample std of `values[start..end]`
    fn mean_std(&self, start: usize, end: usize) -> (f64, f64) {
        let m = (end - start) as f64;
        let mean = (self.sum[end] - self.sum[start]) / m;
        let ss = (self.sum_sq[end] - self.sum_sq[start]) - m * mean * mean;
        (mean, (ss.max(0.0) / (m - 1.0)).sqrt())
    }
}

impl BayesianDetector {
    pub fn new(prior_change_probability: f64) -> Self {
        Self {
            prior_change_probability,
            ..Self::default()
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            prior_change_probability: config.prior_change_probability,
            horizon: config.bayesian_horizon,
        }
    }

    /// Run the recursion over the first `window_size + horizon` values
    pub fn detect(&self, series: &Series, baseline: &BaselineProfile) -> BayesianOutcome {
        let values = series.values();
        let window = baseline.window_size;
        let evaluated_steps = values.len().min(window.saturating_add(self.horizon));
        let truncated = evaluated_steps < values.len();

        if truncated {
            warn!(
                series_len = values.len(),
                evaluated_steps,
                "Bayesian detection truncated at horizon; later indices are not evaluated"
            );
        }

        let hazard = self.prior_change_probability;
        let scale = baseline_scale(baseline);
        let center = baseline.mean;
        let prefix = PrefixMoments::new(&values[..evaluated_steps], center);

        let fallback = |x: f64| normal_pdf(x, center, scale);
        let fresh_run = |x: f64| students_t_pdf(x, center, scale, FRESH_RUN_FREEDOM);

        // The first observation always opens a run
        let mut posterior = vec![1.0];
        let mut change_probabilities = Vec::with_capacity(evaluated_steps);
        if evaluated_steps > 0 {
            change_probabilities.push(1.0);
        }

        for t in 1..evaluated_steps {
            let x = values[t];
            // prior[r] covers a run of values[t-1-r..t]
            let run_density = |r: usize| {
                let run_start = t - 1 - r;
                if t - run_start < 2 {
                    return fallback(x);
                }
                let (mean, std) = prefix.mean_std(run_start, t);
                if std > 0.0 {
                    normal_pdf(x - center, mean, std)
                } else {
                    fallback(x)
                }
            };
            posterior = step(&posterior, hazard, fresh_run(x), run_density);
            change_probabilities.push(posterior[0]);
        }

        let change_points: Vec<usize> = change_probabilities
            .iter()
            .enumerate()
            .skip(window)
            .filter(|(_, &p)| p > 0.5)
            .map(|(t, _)| t)
            .collect();

        debug!(
            candidates = change_points.len(),
            evaluated_steps,
            truncated,
            "Bayesian detection complete"
        );

        BayesianOutcome {
            change_points,
            change_probabilities,
            evaluated_steps,
            series_len: values.len(),
            truncated,
        }
    }
}

/// Fold one observation into the posterior from the previous step
///
/// `run_density(r)` is the density of the observation under the run that
/// `prior[r]` describes.
fn step(
    prior: &[f64],
    hazard: f64,
    fresh_run_density: f64,
    run_density: impl Fn(usize) -> f64,
) -> Vec<f64> {
    let mut next = vec![0.0; prior.len() + 1];
    next[0] = hazard * fresh_run_density;
    for (r, &mass) in prior.iter().enumerate() {
        if mass > 0.0 {
            next[r + 1] = mass * run_density(r) * (1.0 - hazard);
        }
    }

    let total: f64 = next.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        // Nothing explains the observation; it opens a run
        let mut reset = vec![0.0; next.len()];
        reset[0] = 1.0;
        return reset;
    }

    for p in next.iter_mut() {
        *p /= total;
        if *p < PRUNE_BELOW {
            *p = 0.0;
        }
    }
    next
}

/// Baseline spread used for the fallback and fresh-run predictives
fn baseline_scale(baseline: &BaselineProfile) -> f64 {
    if baseline.std > 0.0 {
        baseline.std
    } else if baseline.mad > 0.0 {
        baseline.mad * MAD_TO_SIGMA
    } else {
        1.0
    }
}
