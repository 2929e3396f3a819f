//! Error types for training-charts
//!
//! Only schema problems are fatal for the engine. Rows with missing values are
//! dropped and counted, never reported as errors.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// training-charts error types
#[derive(Error, Debug)]
pub enum Error {
    /// A structurally required column is absent from the input table
    #[error("Missing required column `{column}` in the training log\nExpected columns: ID, Exercise, Reps, Load, Weight_Used, Good, Timestamp")]
    Schema {
        /// Name of the missing column
        column: String,
    },

    /// Storage error (CSV/Parquet read or decode)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// File extension not recognised by the loader
    #[error("Unsupported training log format: {0}\nUse a .csv or .parquet file")]
    UnsupportedFormat(String),

    /// Invalid engine configuration or argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error must halt processing before any grouping happens.
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}
