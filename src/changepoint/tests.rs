// Scenario tests for both change-point detectors
//
// Baselines are estimated from synthetic footage rather than hand-built, so
// these exercise the detectors the way the analyzer drives them.

use super::*;
use crate::baseline::BaselineProfile;
use crate::config::AnalysisConfig;
use crate::series::Series;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

const WINDOW: usize = 300;

fn footage(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let dist = Normal::new(15.0, 2.0).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// 300 baseline frames, a spliced block of 5 frames near 85, then 200 more
fn spliced_footage(seed: u64) -> Series {
    let mut values = footage(WINDOW + 205, seed);
    for v in &mut values[WINDOW..WINDOW + 5] {
        *v += 70.0;
    }
    Series::new(values).unwrap()
}

fn config() -> AnalysisConfig {
    AnalysisConfig {
        window_size: WINDOW,
        ..AnalysisConfig::default()
    }
}

#[test]
fn test_method_names() {
    assert_eq!(DetectionMethod::Cusum.to_string(), "CUSUM");
    assert_eq!(DetectionMethod::Bayesian.name(), "Bayesian");
    assert_eq!(
        serde_json::to_string(&DetectionMethod::Cusum).unwrap(),
        "\"CUSUM\""
    );
    assert!(DetectionMethod::Cusum < DetectionMethod::Bayesian);
}

#[test]
fn test_cusum_flags_spliced_block() {
    let series = spliced_footage(1);
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();
    let outcome = CusumDetector::from_config(&config()).detect(&series, &baseline);

    assert_eq!(outcome.change_points.first(), Some(&WINDOW));
    assert!(outcome.change_points.iter().all(|&i| i >= WINDOW));
    assert!(outcome.statistic_at(WINDOW).unwrap() > 20.0);
    assert_eq!(outcome.positive.len(), series.len());
}

#[test]
fn test_cusum_quiet_on_clean_footage() {
    let series = Series::new(footage(800, 2)).unwrap();
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();
    let outcome = CusumDetector::new(12.0).detect(&series, &baseline);
    assert!(outcome.change_points.len() < 40);
}

#[test]
fn test_cusum_threshold_monotonicity() {
    let series = spliced_footage(3);
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();

    let loose = CusumDetector::new(3.0).detect(&series, &baseline);
    let tight = CusumDetector::new(12.0).detect(&series, &baseline);
    assert!(tight
        .change_points
        .iter()
        .all(|i| loose.change_points.contains(i)));
}

#[test]
fn test_bayesian_flags_spliced_block() {
    let series = spliced_footage(4);
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();
    let outcome = BayesianDetector::from_config(&config()).detect(&series, &baseline);

    assert!(!outcome.truncated);
    assert_eq!(outcome.evaluated_steps, series.len());
    assert_eq!(outcome.change_probabilities.len(), series.len());
    assert!(outcome.change_probabilities[WINDOW] > 0.99);
    assert!(outcome.change_points.contains(&WINDOW));
    assert!(outcome.change_points.iter().all(|&i| i >= WINDOW));
}

#[test]
fn test_bayesian_quiet_on_clean_footage() {
    let series = Series::new(footage(700, 5)).unwrap();
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();
    let outcome = BayesianDetector::default().detect(&series, &baseline);

    assert!(outcome.change_points.len() <= 2);
    let typical = &outcome.change_probabilities[WINDOW..];
    let mean_p = typical.iter().sum::<f64>() / typical.len() as f64;
    assert!(mean_p < 0.05, "mean P(r=0) = {}", mean_p);
}

#[test]
fn test_bayesian_horizon_truncates() {
    let series = Series::new(footage(WINDOW + 50, 6)).unwrap();
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();
    let detector = BayesianDetector {
        horizon: 20,
        ..BayesianDetector::default()
    };
    let outcome = detector.detect(&series, &baseline);

    assert!(outcome.truncated);
    assert_eq!(outcome.evaluated_steps, WINDOW + 20);
    assert_eq!(outcome.series_len, WINDOW + 50);
    assert_eq!(outcome.change_probabilities.len(), WINDOW + 20);
    assert!(outcome.change_points.iter().all(|&i| i < WINDOW + 20));
}

#[test]
fn test_bayesian_posterior_is_probability() {
    let series = spliced_footage(7);
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();
    let outcome = BayesianDetector::default().detect(&series, &baseline);
    assert!(outcome
        .change_probabilities
        .iter()
        .all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn test_detectors_are_deterministic() {
    let series = spliced_footage(8);
    let baseline = BaselineProfile::estimate(&series, &config()).unwrap();

    let cusum = CusumDetector::default();
    assert_eq!(
        cusum.detect(&series, &baseline),
        cusum.detect(&series, &baseline)
    );

    let bayes = BayesianDetector::default();
    assert_eq!(
        bayes.detect(&series, &baseline),
        bayes.detect(&series, &baseline)
    );
}
