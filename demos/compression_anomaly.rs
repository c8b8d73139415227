//! Compression-ratio anomaly walkthrough
//!
//! Simulates per-frame compression ratios for a clip sampled every 30th frame
//! at 30 fps, splices in a short block of heavily recompressed frames, and
//! prints the full analysis report plus the screened findings.
//!
//! ```bash
//! cargo run --example compression_anomaly
//! cargo run --example compression_anomaly -- framestat.toml
//! RUST_LOG=framestat=debug cargo run --example compression_anomaly
//! ```

use anyhow::{Context, Result};
use framestat::{AnalysisConfig, Analyzer, SamplingInfo, Series};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn simulated_clip() -> Result<Series> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2024);
    let unedited = Normal::new(15.0, 2.0)?;
    let recompressed = Normal::new(85.0, 1.5)?;

    let mut values: Vec<f64> = (0..1000).map(|_| unedited.sample(&mut rng)).collect();
    values.extend((0..5).map(|_| recompressed.sample(&mut rng)));
    values.extend((0..500).map(|_| unedited.sample(&mut rng)));

    let sampling = SamplingInfo {
        frame_step: 30,
        fps: 30.0,
    };
    Ok(Series::with_sampling(values, sampling)?)
}

fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => AnalysisConfig::from_toml_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => AnalysisConfig::default().with_seed(7),
    };

    let series = simulated_clip()?;
    let report = Analyzer::new(config)?.analyze(&series)?;

    println!("{}", report.to_report_string());

    let findings = report.findings();
    println!("Findings ({}):", findings.len());
    for finding in &findings {
        let methods: Vec<&str> = finding.methods.iter().map(|m| m.name()).collect();
        println!(
            "  frame {:>5} at {:>7.1}s  deviation {:+.2}  confidence {:.2}  [{}]",
            finding.index,
            finding.timestamp_secs.unwrap_or(f64::NAN),
            finding.deviation_from_mean,
            finding.confidence,
            methods.join(", ")
        );
    }

    Ok(())
}
