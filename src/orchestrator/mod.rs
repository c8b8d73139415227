//! Analysis orchestration and reporting
//!
//! [`Analyzer`] ties the pipeline together: one baseline, both detectors,
//! deduplicated candidates, one hypothesis test per candidate. The resulting
//! [`AnalysisReport`] renders as plain text or JSON and can be screened down
//! to [`Finding`]s.

mod analyzer;
mod report;

pub use analyzer::Analyzer;
pub use report::{AnalysisReport, ChangePointCandidate, Finding, TestedCandidate};

#[cfg(test)]
mod tests;
