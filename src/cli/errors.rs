use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input file does not exist or is not a file: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Timeout must be greater than 0 seconds, got: {timeout}")]
    ZeroTimeout { timeout: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Casquery(#[from] casquery::Error),
}
