// Hypothesis testing of change-point candidates
//
// A candidate value is compared against the baseline window with one of two
// strategies:
//
// - Parametric: two-tailed Z-test, when the baseline is normal and independent
// - RobustBootstrap: modified Z-score (median/MAD) with a bootstrap p-value
//
// Each result carries an effect size with a categorical reading, a bootstrap
// interval for that effect size, the assumptions that held, and an ordered
// list of limitations.
//
// Scientific Foundation:
// [1] Iglewicz, B. & Hoaglin, D. (1993). How to Detect and Handle Outliers.
//     ASQC Quality Press. Modified Z-score with the 0.6745 constant.
// [2] Cohen, J. (1988). Statistical Power Analysis for the Behavioral
//     Sciences. Effect-size thresholds 0.2 / 0.5 / 0.8.

mod bootstrap;
mod result;
mod strategy;
mod tester;

pub use bootstrap::{effect_size_interval, modified_z_p_value};
pub use result::{Assumptions, ConfidenceInterval, EffectSizeInterpretation, StatisticalTestResult};
pub use strategy::{StrategyOutcome, TestStrategy, MODIFIED_Z_SCALE};
pub use tester::HypothesisTester;
