// Composite analysis report
//
// Aggregates the baseline profile, both detector outcomes and one test result
// per tested candidate, together with the configuration they were computed
// under. Rendering (text or JSON) is formatting only.

use crate::baseline::BaselineProfile;
use crate::changepoint::{BayesianOutcome, CusumOutcome, DetectionMethod};
use crate::config::AnalysisConfig;
use crate::hypothesis::StatisticalTestResult;
use crate::series::SamplingInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Indices listed per method in the text report
const REPORT_INDEX_LIMIT: usize = 10;

/// A deduplicated change-point candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePointCandidate {
    pub index: usize,
    /// Every method whose change-point list contains this index
    pub methods: Vec<DetectionMethod>,
    /// Raw detection statistic per method: max(|pos|, |neg|) for CUSUM,
    /// P(r = 0) for Bayesian
    pub statistics: BTreeMap<DetectionMethod, f64>,
}

impl ChangePointCandidate {
    pub fn flagged_by(&self, method: DetectionMethod) -> bool {
        self.methods.contains(&method)
    }
}

/// A candidate together with its test result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestedCandidate {
    pub candidate: ChangePointCandidate,
    pub result: StatisticalTestResult,
}

/// Candidate that is both significant and large enough to matter
///
/// A flagged statistical departure only; it says nothing about whether the
/// footage was edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub index: usize,
    pub methods: Vec<DetectionMethod>,
    /// min(1, |effect size| / 2)
    pub confidence: f64,
    /// Video time of the frame when the series carries sampling info
    pub timestamp_secs: Option<f64>,
    /// Candidate value minus the baseline mean
    pub deviation_from_mean: f64,
    pub effect_size: f64,
    pub p_value: f64,
}

/// Everything one analysis pass produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub series_len: usize,
    pub sampling: Option<SamplingInfo>,
    pub baseline: BaselineProfile,
    pub cusum: CusumOutcome,
    pub bayesian: BayesianOutcome,
    /// Tested candidates in ascending index order
    pub tested: Vec<TestedCandidate>,
    pub config: AnalysisConfig,
}

impl AnalysisReport {
    /// Whether the report still holds under `config`
    ///
    /// Changing the window size or significance level invalidates every
    /// baseline-derived result.
    pub fn is_valid_for(&self, config: &AnalysisConfig) -> bool {
        self.config.baseline_compatible(config) && self.baseline.is_valid_for(config)
    }

    /// Test results only, in ascending index order
    pub fn test_results(&self) -> impl Iterator<Item = &StatisticalTestResult> {
        self.tested.iter().map(|t| &t.result)
    }

    pub fn significant_count(&self) -> usize {
        self.test_results().filter(|r| r.is_significant).count()
    }

    /// Significant candidates with |effect size| >= `min_effect_size`
    pub fn findings(&self) -> Vec<Finding> {
        self.tested
            .iter()
            .filter(|t| t.result.is_significant)
            .filter_map(|t| {
                let effect_size = t.result.effect_size?;
                (effect_size.abs() >= self.config.min_effect_size).then(|| Finding {
                    index: t.candidate.index,
                    methods: t.candidate.methods.clone(),
                    confidence: (effect_size.abs() / 2.0).min(1.0),
                    timestamp_secs: self.sampling.map(|s| s.timestamp_of(t.candidate.index)),
                    deviation_from_mean: t.result.candidate_value - self.baseline.mean,
                    effect_size,
                    p_value: t.result.p_value,
                })
            })
            .collect()
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let b = &self.baseline;

        report.push_str("📈 BASELINE\n\n");
        report.push_str(&format!(
            "Window: first {} of {} samples\n",
            b.n_samples, self.series_len
        ));
        report.push_str(&format!("Mean: {:.4}  Std: {:.4}\n", b.mean, b.std));
        report.push_str(&format!("Median: {:.4}  MAD: {:.4}\n", b.median, b.mad));
        report.push_str(&format!(
            "Q25: {:.4}  Q75: {:.4}  IQR: {:.4}\n",
            b.q25, b.q75, b.iqr
        ));
        report.push_str(&format!("Range: [{:.4}, {:.4}]\n", b.min, b.max));
        report.push_str(&format!(
            "Skewness: {:.4}  Kurtosis: {:.4}\n",
            b.skewness, b.kurtosis
        ));
        report.push_str(&format!(
            "Shapiro-Wilk: W={:.4}, p={:.4} ({})\n",
            b.shapiro_statistic,
            b.shapiro_p,
            if b.is_normal { "normal" } else { "not normal" }
        ));
        report.push_str(&format!(
            "Anderson-Darling: A2={:.4}, 5% critical={:.3} ({})\n",
            b.anderson_statistic,
            b.anderson_critical_5pct,
            if b.anderson_rejects_normality {
                "rejects normality"
            } else {
                "consistent with normality"
            }
        ));
        if b.normality_tests_disagree() {
            report.push_str("⚠️  Normality tests disagree\n");
        }
        report.push_str(&format!(
            "Autocorrelation: lag-1 r={:.4}, Ljung-Box Q={:.4} (lags={}), p={:.4}{}\n",
            b.autocorr_lag1,
            b.ljung_box_statistic,
            b.ljung_box_lags,
            b.ljung_box_p,
            if b.has_autocorrelation {
                " (autocorrelated)"
            } else {
                ""
            }
        ));

        report.push_str("\n🔍 CHANGE POINTS\n\n");
        render_indices(&mut report, DetectionMethod::Cusum, &self.cusum.change_points);
        render_indices(
            &mut report,
            DetectionMethod::Bayesian,
            &self.bayesian.change_points,
        );
        if self.bayesian.truncated {
            report.push_str(&format!(
                "⚠️  Bayesian detection evaluated only the first {} of {} samples\n",
                self.bayesian.evaluated_steps, self.bayesian.series_len
            ));
        }

        report.push_str("\n📊 STATISTICAL TESTS\n");
        if self.tested.is_empty() {
            report.push_str("\nNo candidates tested\n");
        }
        for tested in &self.tested {
            render_test(&mut report, tested);
        }

        report.push_str(&format!(
            "\nSignificant: {} of {} tested (significance level {}, {}% confidence)\n",
            self.significant_count(),
            self.tested.len(),
            self.config.significance_level,
            (1.0 - self.config.significance_level) * 100.0
        ));

        report
    }
}

fn render_indices(report: &mut String, method: DetectionMethod, indices: &[usize]) {
    let shown: Vec<String> = indices
        .iter()
        .take(REPORT_INDEX_LIMIT)
        .map(usize::to_string)
        .collect();
    let more = indices.len().saturating_sub(REPORT_INDEX_LIMIT);
    report.push_str(&format!("{} ({}): [{}]", method, indices.len(), shown.join(", ")));
    if more > 0 {
        report.push_str(&format!(" ... and {} more", more));
    }
    report.push('\n');
}

fn render_test(report: &mut String, tested: &TestedCandidate) {
    let r = &tested.result;
    let methods: Vec<&str> = tested.candidate.methods.iter().map(|m| m.name()).collect();

    report.push_str(&format!(
        "\n{} Frame {} (value {:.4}, flagged by {})\n",
        if r.is_significant { "❌" } else { "✅" },
        r.candidate_index,
        r.candidate_value,
        methods.join(" + ")
    ));
    report.push_str(&format!("  Test: {}\n", r.test_type));
    report.push_str(&format!("  Statistic: {}\n", format_optional(r.statistic)));
    report.push_str(&format!(
        "  p-value: {:.6} ({})\n",
        r.p_value,
        if r.is_significant {
            "significant"
        } else {
            "not significant"
        }
    ));
    report.push_str(&format!(
        "  Effect size: {} ({})\n",
        format_optional(r.effect_size),
        r.effect_size_interpretation
    ));
    match &r.confidence_interval {
        Some(ci) => {
            report.push_str(&format!(
                "  {:.0}% baseline-resample interval: [{:.4}, {:.4}]\n",
                ci.level * 100.0,
                ci.lower,
                ci.upper
            ));
        }
        None => report.push_str("  Baseline-resample interval: undefined\n"),
    }
    for limitation in &r.limitations {
        report.push_str(&format!("  - {}\n", limitation));
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format!("{:.4}", v))
}
