//! Scenario loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for simulation setup.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while loading or checking a scenario.
#[derive(Debug, Error)]
pub enum SimError {
    /// I/O error reading the scenario file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Scenario file not found.
    #[error("scenario file not found: {path}")]
    NotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Scenario parsed but describes something impossible.
    #[error("invalid scenario: {0}")]
    Invalid(String),
}
