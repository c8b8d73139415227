// Full analysis pass: baseline, both detectors, candidate tests
//
// The baseline is computed once. CUSUM and Bayesian detection are independent
// given (series, baseline) and run on two scoped threads; both are joined
// before their candidates are merged. Only the first
// `max_candidates_per_method` indices of each method are tested.

use crate::baseline::BaselineProfile;
use crate::changepoint::{
    BayesianDetector, BayesianOutcome, CusumDetector, CusumOutcome, DetectionMethod,
};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::hypothesis::HypothesisTester;
use crate::orchestrator::report::{AnalysisReport, ChangePointCandidate, TestedCandidate};
use crate::series::Series;
use std::collections::{BTreeMap, BTreeSet};
use std::panic;
use tracing::info;

/// Runs the whole pipeline under one validated configuration
///
/// # Example
/// ```
/// use framestat::{AnalysisConfig, Analyzer, Series};
///
/// let mut values: Vec<f64> = (0..300).map(|i| 15.0 + ((i * 7919) % 13) as f64 * 0.25).collect();
/// values[250] = 90.0;
///
/// let config = AnalysisConfig {
///     window_size: 200,
///     pvalue_bootstrap_iterations: 500,
///     ci_bootstrap_iterations: 200,
///     ..AnalysisConfig::default()
/// }
/// .with_seed(1);
///
/// let report = Analyzer::new(config).unwrap().analyze(&Series::new(values).unwrap()).unwrap();
/// assert!(report.cusum.change_points.contains(&250));
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Validate `config` and build an analyzer around it
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a series end to end
    ///
    /// Fails with `InsufficientData` when the series is shorter than the
    /// baseline window.
    pub fn analyze(&self, series: &Series) -> Result<AnalysisReport> {
        let baseline = BaselineProfile::estimate(series, &self.config)?;
        let (cusum, bayesian) = self.detect(series, &baseline);

        let candidates = merge_candidates(&cusum, &bayesian, self.config.max_candidates_per_method);
        let tester = HypothesisTester::new(&self.config);
        let tested = candidates
            .into_iter()
            .map(|candidate| {
                let result = tester.test(series, &baseline, candidate.index)?;
                Ok(TestedCandidate { candidate, result })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AnalysisReport {
            series_len: series.len(),
            sampling: series.sampling(),
            baseline,
            cusum,
            bayesian,
            tested,
            config: self.config.clone(),
        })
    }

    fn detect(&self, series: &Series, baseline: &BaselineProfile) -> (CusumOutcome, BayesianOutcome) {
        let cusum_detector = CusumDetector::from_config(&self.config);
        let bayesian_detector = BayesianDetector::from_config(&self.config);

        let joined = crossbeam::thread::scope(|scope| {
            let bayesian = scope.spawn(|_| bayesian_detector.detect(series, baseline));
            let cusum = cusum_detector.detect(series, baseline);
            (cusum, bayesian.join())
        });

        // Detectors do not panic on finite input; re-raise if one ever does
        let (cusum, bayesian) = joined.unwrap_or_else(|payload| panic::resume_unwind(payload));
        let bayesian = bayesian.unwrap_or_else(|payload| panic::resume_unwind(payload));
        (cusum, bayesian)
    }
}

/// Union of the first `per_method` indices of each detector
///
/// Each candidate is tagged with every method whose full list contains it.
fn merge_candidates(
    cusum: &CusumOutcome,
    bayesian: &BayesianOutcome,
    per_method: usize,
) -> Vec<ChangePointCandidate> {
    for (method, found) in [
        (DetectionMethod::Cusum, cusum.change_points.len()),
        (DetectionMethod::Bayesian, bayesian.change_points.len()),
    ] {
        if found > per_method {
            info!(
                %method,
                found,
                tested = per_method,
                "capping candidates per method"
            );
        }
    }

    let selected: BTreeSet<usize> = cusum
        .change_points
        .iter()
        .take(per_method)
        .chain(bayesian.change_points.iter().take(per_method))
        .copied()
        .collect();

    selected
        .into_iter()
        .map(|index| {
            let mut statistics = BTreeMap::new();
            if cusum.change_points.binary_search(&index).is_ok() {
                if let Some(stat) = cusum.statistic_at(index) {
                    statistics.insert(DetectionMethod::Cusum, stat);
                }
            }
            if bayesian.change_points.binary_search(&index).is_ok() {
                if let Some(&p) = bayesian.change_probabilities.get(index) {
                    statistics.insert(DetectionMethod::Bayesian, p);
                }
            }
            ChangePointCandidate {
                index,
                methods: statistics.keys().copied().collect(),
                statistics,
            }
        })
        .collect()
}
