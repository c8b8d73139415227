//! Error taxonomy for the analysis engine
//!
//! Only caller-visible failures live here. A baseline with zero spread is not
//! an error: it is reported as a limitation on the test result, with the
//! affected numbers left undefined.

use thiserror::Error;

/// Errors that can occur while establishing a baseline or testing a candidate
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {required} samples for the baseline window, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Candidate index {index} out of range for series of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Series value at index {index} is not finite")]
    NonFiniteValue { index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
