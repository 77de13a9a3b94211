//! Crate-level error type and `Result` alias for structured error handling.
//! Wraps I/O, CSV, serialization and HTTP-client failures, and provides
//! semantic variants for the usage errors that abort a command.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input CAS RN is not structurally valid: {input:?}")]
    InvalidCasRn { input: String },

    #[error("Input CSV has no rows")]
    EmptyInput,

    #[error("Column '{column}' not found in CSV header")]
    MissingColumn { column: String },

    #[error("No results to write, CSV will not be created")]
    NoRows,
}
