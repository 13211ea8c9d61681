use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the data layer (loading, filtering, export).
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Data format: {0}")]
    DataFormat(String),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Invalid {field} range: min {min} is greater than max {max}")]
    InvalidRange {
        field: &'static str,
        min: String,
        max: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

impl DatasetError {
    pub(crate) fn invalid_range<T: std::fmt::Display>(field: &'static str, min: T, max: T) -> Self {
        DatasetError::InvalidRange {
            field,
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}
