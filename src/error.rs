//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while running a workload.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to write progress output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid workload: {0}")]
    InvalidWorkload(String),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}
