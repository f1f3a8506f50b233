//! Error types for data operations
//!
//! Provides unified error handling for loading the dataset and computing views.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::constants::MAX_CSV_SIZE_MB;

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// The dataset file is missing or lacks a required column
    #[error("Data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// File is too large to load
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// A value in the file cannot be interpreted
    #[error("Invalid data in row {row}, column `{column}`: {message}")]
    InvalidData {
        /// 1-based data row (header excluded)
        row: usize,
        column: String,
        message: String,
    },

    /// Clustering was asked for zero groups
    #[error("Cluster count must be at least 1 (got {0})")]
    InvalidClusterCount(usize),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl DataError {
    /// Whether this is the "file missing or malformed schema" case.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DataError::DataUnavailable { .. })
    }

    pub(crate) fn invalid(row: usize, column: &str, message: impl Into<String>) -> Self {
        DataError::InvalidData {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
