//! Export / Load Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown format '{0}' (expected csv, jsonl or json)")]
    UnknownFormat(String),

    #[error("invalid sample at line {line}: {message}")]
    InvalidSample { line: usize, message: String },
}

pub type ExportResult<T> = Result<T, ExportError>;
