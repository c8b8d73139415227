#![no_main]

use framestat::{AnalysisConfig, Analyzer, Series};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every 8 bytes is one sample; non-finite samples are rejected by Series::new
    let values: Vec<f64> = data
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            f64::from_le_bytes(bytes)
        })
        .collect();

    let Ok(series) = Series::new(values) else {
        return;
    };

    let config = AnalysisConfig {
        window_size: 16,
        ljung_box_lags: 4,
        bayesian_horizon: 64,
        pvalue_bootstrap_iterations: 50,
        ci_bootstrap_iterations: 20,
        ..AnalysisConfig::default()
    }
    .with_seed(0);

    // Should never panic: short series fail with InsufficientData
    if let Ok(analyzer) = Analyzer::new(config) {
        if let Ok(report) = analyzer.analyze(&series) {
            let _ = report.to_report_string();
            let _ = report.findings();
        }
    }
});
