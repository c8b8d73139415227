// Scenario tests for the full analysis pass

use super::*;
use crate::changepoint::DetectionMethod;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::hypothesis::EffectSizeInterpretation;
use crate::series::{SamplingInfo, Series};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

const WINDOW: usize = 300;

fn config() -> AnalysisConfig {
    AnalysisConfig {
        window_size: WINDOW,
        pvalue_bootstrap_iterations: 1_000,
        ci_bootstrap_iterations: 200,
        ..AnalysisConfig::default()
    }
    .with_seed(11)
}

/// 300 baseline frames, 3 spliced frames near 85, then 150 more
fn spliced_values(seed: u64) -> Vec<f64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let dist = Normal::new(15.0, 2.0).unwrap();
    let mut values: Vec<f64> = (0..WINDOW + 153).map(|_| dist.sample(&mut rng)).collect();
    for v in &mut values[WINDOW..WINDOW + 3] {
        *v += 70.0;
    }
    values
}

fn analyze(series: &Series) -> AnalysisReport {
    Analyzer::new(config()).unwrap().analyze(series).unwrap()
}

#[test]
fn test_spliced_block_reported_and_significant() {
    let report = analyze(&Series::new(spliced_values(1)).unwrap());

    assert_eq!(report.series_len, WINDOW + 153);
    assert!(report.is_valid_for(&config()));

    let block = WINDOW..WINDOW + 3;
    assert!(report.cusum.change_points.iter().any(|i| block.contains(i)));
    assert!(report.bayesian.change_points.iter().any(|i| block.contains(i)));

    let first = &report.tested[0];
    assert_eq!(first.candidate.index, WINDOW);
    assert!(first.candidate.flagged_by(DetectionMethod::Cusum));
    assert!(first.candidate.flagged_by(DetectionMethod::Bayesian));
    assert!(first.result.is_significant);
    assert_eq!(
        first.result.effect_size_interpretation,
        EffectSizeInterpretation::Large
    );
}

#[test]
fn test_candidates_are_unique_and_capped() {
    let report = analyze(&Series::new(spliced_values(2)).unwrap());

    let indices: Vec<usize> = report.tested.iter().map(|t| t.candidate.index).collect();
    let mut deduped = indices.clone();
    deduped.dedup();
    assert_eq!(indices, deduped);
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
    assert!(indices.len() <= 2 * config().max_candidates_per_method);
    assert!(indices.iter().all(|&i| i >= WINDOW));
}

#[test]
fn test_insufficient_data() {
    let series = Series::new(vec![15.0; WINDOW - 1]).unwrap();
    let err = Analyzer::new(config()).unwrap().analyze(&series).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData { required, available }
            if required == WINDOW && available == WINDOW - 1
    ));
}

#[test]
fn test_findings_carry_timestamps() {
    let sampling = SamplingInfo {
        frame_step: 30,
        fps: 30.0,
    };
    let series = Series::with_sampling(spliced_values(3), sampling).unwrap();
    let report = analyze(&series);

    let findings = report.findings();
    let first = findings.first().unwrap();
    assert_eq!(first.index, WINDOW);
    assert_eq!(first.timestamp_secs, Some(WINDOW as f64));
    assert_eq!(first.confidence, 1.0);
    assert!(first.deviation_from_mean > 60.0);
    assert!(findings
        .iter()
        .all(|f| f.effect_size.abs() >= config().min_effect_size));
}

#[test]
fn test_report_string_sections() {
    let report = analyze(&Series::new(spliced_values(4)).unwrap());
    let text = report.to_report_string();

    assert!(text.contains("BASELINE"));
    assert!(text.contains("Shapiro-Wilk"));
    assert!(text.contains("CUSUM ("));
    assert!(text.contains("Bayesian ("));
    assert!(text.contains(&format!("Frame {}", WINDOW)));
    assert!(text.contains("baseline-resample interval"));
    assert!(text.contains("Significant:"));
}

#[test]
fn test_report_json_round_trip() {
    let report = analyze(&Series::new(spliced_values(5)).unwrap());
    let json = report.to_json().unwrap();

    assert!(json.contains("\"change_probabilities\""));
    assert!(json.contains("\"CUSUM\""));
    let back: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tested.len(), report.tested.len());
    assert_eq!(back.cusum.change_points, report.cusum.change_points);
}

#[test]
fn test_report_invalid_under_new_window() {
    let report = analyze(&Series::new(spliced_values(6)).unwrap());
    let wider = AnalysisConfig {
        window_size: WINDOW + 50,
        ..config()
    };
    assert!(!report.is_valid_for(&wider));
    assert!(report.is_valid_for(&config().with_seed(99)));
}

#[test]
fn test_constant_series_reports_undefined() {
    let mut values = vec![15.0; WINDOW + 20];
    values[WINDOW + 5] = 85.0;
    let report = analyze(&Series::new(values).unwrap());

    // Zero spread: CUSUM cannot standardize, nothing is significant
    assert!(report.cusum.change_points.is_empty());
    assert!(report.findings().is_empty());
    assert!(report
        .test_results()
        .all(|r| r.effect_size.is_none() && !r.is_significant));
    if !report.tested.is_empty() {
        assert!(report.to_report_string().contains("undefined"));
    }
}
