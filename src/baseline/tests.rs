// Scenario tests for baseline estimation
//
// Synthetic footage measurements: compression ratios around 15 with a
// standard deviation of 2, the regime typical of unedited H.264 frames.

use super::*;
use crate::config::AnalysisConfig;
use crate::series::Series;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

fn footage(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let dist = Normal::new(15.0, 2.0).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

fn window(size: usize) -> AnalysisConfig {
    AnalysisConfig {
        window_size: size,
        ..AnalysisConfig::default()
    }
}

/// IID normal footage: profile matches the generating distribution
#[test]
fn test_normal_footage_profile() {
    let series = Series::new(footage(1500, 42)).unwrap();
    let profile = BaselineProfile::estimate(&series, &AnalysisConfig::default()).unwrap();

    assert_eq!(profile.n_samples, 1000);
    assert!((profile.mean - 15.0).abs() < 0.3);
    assert!((profile.std - 2.0).abs() < 0.2);
    assert!((profile.median - 15.0).abs() < 0.3);
    // Raw MAD of N(mu, sigma) is about 0.6745 sigma
    assert!((profile.mad - 1.349).abs() < 0.2);
    assert!(profile.skewness.abs() < 0.3);
    assert!(profile.kurtosis.abs() < 0.5);
    assert!(profile.autocorr_lag1.abs() < 0.15);
    assert_eq!(profile.ljung_box_lags, 10);
    assert!(profile.q25 < profile.median && profile.median < profile.q75);
}

/// Rejection rate of the normality verdict on normal data tracks alpha
#[test]
fn test_normality_false_rejection_rate() {
    let config = window(500);
    let trials = 200;

    let rejections = (0..trials)
        .filter(|&trial| {
            let series = Series::new(footage(500, 1000 + trial)).unwrap();
            !BaselineProfile::estimate(&series, &config).unwrap().is_normal
        })
        .count();

    // Expect about 10 of 200 at alpha = 0.05
    assert!(
        (1..=25).contains(&rejections),
        "{} of {} normal windows rejected",
        rejections,
        trials
    );
}

/// One extreme frame moves mean/std far more than median/MAD
#[test]
fn test_single_outlier_robustness() {
    let clean = footage(500, 9);
    let mut spiked = clean.clone();
    spiked[250] = 10_000.0;

    let config = window(500);
    let before = BaselineProfile::estimate(&Series::new(clean).unwrap(), &config).unwrap();
    let after = BaselineProfile::estimate(&Series::new(spiked).unwrap(), &config).unwrap();

    assert!((after.mean - before.mean).abs() > 15.0);
    assert!(after.std > 10.0 * before.std);

    assert!((after.median - before.median).abs() < 0.1);
    assert!((after.mad - before.mad).abs() < 0.1);

    // The spike also breaks normality
    assert!(!after.is_normal);
    assert!(after.anderson_rejects_normality);
}

/// Slowly drifting footage (e.g. gradual exposure change) violates independence
#[test]
fn test_drifting_footage_is_autocorrelated() {
    let values: Vec<f64> = footage(600, 17)
        .into_iter()
        .enumerate()
        .map(|(i, x)| x + (i as f64 / 40.0).sin() * 6.0)
        .collect();
    let profile = BaselineProfile::estimate(&Series::new(values).unwrap(), &window(600)).unwrap();

    assert!(profile.autocorr_lag1 > 0.5);
    assert!(profile.has_autocorrelation);
    assert!(profile.ljung_box_p < 0.05);
}

#[test]
fn test_profile_serializes_to_json() {
    let series = Series::new(footage(100, 3)).unwrap();
    let profile = BaselineProfile::estimate(&series, &window(100)).unwrap();

    let json = serde_json::to_string(&profile).unwrap();
    assert!(json.contains("\"shapiro_p\""));
    let back: BaselineProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back.n_samples, 100);
    assert_eq!(back.is_normal, profile.is_normal);
}
