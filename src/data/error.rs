use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning a source file into tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Malformed CSV data")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON data")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read parquet data")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Failed to decode arrow record batch")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Required column '{0}' not found")]
    MissingColumn(String),

    #[error("Row {row}: invalid value in column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: String,
        message: String,
    },

    #[error("Row {row}: null value in required column '{column}'")]
    NullValue { row: usize, column: String },
}
