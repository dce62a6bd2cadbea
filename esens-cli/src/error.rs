//! Error types for the CLI.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read notation file {path}: {source}")]
    NotationFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

pub type CliResult<T> = Result<T, CliError>;
