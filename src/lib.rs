//! Framestat - statistical baseline, change-point and significance engine
//! for per-frame measurement series
//!
//! Given one scalar per sampled video frame (compression ratio, noise
//! variance, ...), this library establishes a baseline from the leading
//! window, flags candidate change points with two independent detectors, and
//! tests each candidate for significance with documented assumptions and
//! limitations. It never decides whether footage was edited.
//!
//! ```
//! use framestat::{AnalysisConfig, Analyzer, Series};
//!
//! let mut values: Vec<f64> = (0..260).map(|i| 15.0 + (i % 5) as f64 * 0.4).collect();
//! values[230] = 80.0;
//!
//! let config = AnalysisConfig {
//!     window_size: 200,
//!     ljung_box_lags: 10,
//!     pvalue_bootstrap_iterations: 200,
//!     ci_bootstrap_iterations: 100,
//!     ..AnalysisConfig::default()
//! }
//! .with_seed(7);
//! let report = Analyzer::new(config)?.analyze(&Series::new(values)?)?;
//! println!("{}", report.to_report_string());
//! # Ok::<(), framestat::AnalysisError>(())
//! ```

pub mod baseline;
pub mod changepoint;
pub mod config;
pub mod descriptive;
pub mod error;
pub mod hypothesis;
pub mod orchestrator;
pub mod probability;
pub mod series;

pub use baseline::BaselineProfile;
pub use changepoint::{BayesianDetector, BayesianOutcome, CusumDetector, CusumOutcome, DetectionMethod};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use hypothesis::{EffectSizeInterpretation, HypothesisTester, StatisticalTestResult, TestStrategy};
pub use orchestrator::{AnalysisReport, Analyzer, ChangePointCandidate, Finding};
pub use series::{SamplingInfo, Series};
