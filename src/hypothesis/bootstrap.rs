// Bootstrap resampling of the baseline window
//
// Resamples are drawn with replacement into a reused scratch buffer. A
// resample with zero spread cannot standardize anything and is skipped; if no
// resample survives, the neutral answer is returned (p = 1, no interval).
//
// Reference: Efron, B. & Tibshirani, R. (1993). An Introduction to the
//            Bootstrap. Chapman & Hall.

use crate::descriptive::{median_and_mad_in_place, percentile_sorted};
use crate::hypothesis::result::ConfidenceInterval;
use crate::hypothesis::strategy::{standardize, TestStrategy, MODIFIED_Z_SCALE};
use rand::Rng;
use tracing::debug;

/// Coverage of the effect-size interval
const INTERVAL_LEVEL: f64 = 0.95;

fn resample_into<R: Rng + ?Sized>(source: &[f64], scratch: &mut [f64], rng: &mut R) {
    for slot in scratch.iter_mut() {
        *slot = source[rng.gen_range(0..source.len())];
    }
}

/// Bootstrap p-value for an observed modified z-score
///
/// Each resample contributes the modified z of one of its own points against
/// its own median and MAD. The p-value is the fraction of surviving resamples
/// with |stat| >= |observed|.
pub fn modified_z_p_value<R: Rng + ?Sized>(
    window: &[f64],
    observed: f64,
    iterations: usize,
    rng: &mut R,
) -> f64 {
    if window.is_empty() {
        return 1.0;
    }

    let threshold = observed.abs();
    let mut scratch = vec![0.0; window.len()];
    let mut kept = 0usize;
    let mut extreme = 0usize;

    for _ in 0..iterations {
        resample_into(window, &mut scratch, rng);
        let point = scratch[rng.gen_range(0..scratch.len())];
        let (median, mad) = median_and_mad_in_place(&mut scratch);
        let Some(d) = standardize(point, median, mad) else {
            continue;
        };
        kept += 1;
        if (MODIFIED_Z_SCALE * d).abs() >= threshold {
            extreme += 1;
        }
    }

    if kept < iterations {
        debug!(
            rejected = iterations - kept,
            iterations, "bootstrap resamples with zero MAD skipped"
        );
    }
    if kept == 0 {
        return 1.0;
    }
    extreme as f64 / kept as f64
}

/// 95% percentile interval of the effect size of `candidate` across baseline resamples
///
/// Each resample supplies its own center and spread (as `strategy` defines
/// them); the candidate value stays fixed.
pub fn effect_size_interval<R: Rng + ?Sized>(
    window: &[f64],
    candidate: f64,
    strategy: &TestStrategy,
    iterations: usize,
    rng: &mut R,
) -> Option<ConfidenceInterval> {
    if window.is_empty() {
        return None;
    }

    let mut scratch = vec![0.0; window.len()];
    let mut effects: Vec<f64> = (0..iterations)
        .filter_map(|_| {
            resample_into(window, &mut scratch, rng);
            let (center, scale) = strategy.sample_location_scale(&mut scratch);
            standardize(candidate, center, scale)
        })
        .collect();

    if effects.len() < iterations {
        debug!(
            rejected = iterations - effects.len(),
            iterations, "interval resamples with zero spread skipped"
        );
    }
    if effects.is_empty() {
        return None;
    }

    effects.sort_by(f64::total_cmp);
    let tail = (1.0 - INTERVAL_LEVEL) / 2.0 * 100.0;
    Some(ConfidenceInterval {
        lower: percentile_sorted(&effects, tail),
        upper: percentile_sorted(&effects, 100.0 - tail),
        level: INTERVAL_LEVEL,
    })
}
