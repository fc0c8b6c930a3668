//! Error types for the f1-telemetry CLI

use f1_telemetry_capture::CaptureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Capture error: {0}")]
    CaptureError(#[from] CaptureError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidConfiguration(_) | CliError::YamlError(_) => 2,
            CliError::CaptureError(_) => 3,
            CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }
}
