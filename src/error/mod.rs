//! Error handling for the availability engine.

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors that can occur while loading tables or computing availability
#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    /// An input table file does not exist or cannot be opened
    #[error("Missing {table} table: {}", path.display())]
    MissingInput {
        /// Which table was being loaded
        table: &'static str,
        /// The path that was tried
        path: PathBuf,
    },

    /// A required column is absent from an input table
    #[error("Column '{column}' not found in {table} table")]
    MissingColumn {
        /// Which table was being read
        table: &'static str,
        /// The missing column
        column: String,
    },

    /// A column has a type that cannot be read as expected
    #[error("Column '{column}' in {table} table has type {actual}, expected {expected}")]
    InvalidColumnType {
        /// Which table was being read
        table: &'static str,
        /// The offending column
        column: String,
        /// Human-readable expected type
        expected: String,
        /// The Arrow type found
        actual: String,
    },

    /// A row has no indicator name
    #[error("Null indicator in {table} table at row {row}")]
    NullIndicator {
        /// Which table was being read
        table: &'static str,
        /// Zero-based row index within the batch
        row: usize,
    },

    /// A criteria row has a threshold that is not a non-negative integer
    #[error("Invalid required years for indicator '{indicator}': {value}")]
    InvalidRequiredYears {
        /// The indicator the threshold belongs to
        indicator: String,
        /// Text rendering of the rejected value
        value: String,
    },

    /// The same indicator appears more than once in the criteria table
    #[error("Indicator '{indicator}' appears more than once in the criteria table")]
    AmbiguousCriteria {
        /// The duplicated indicator
        indicator: String,
    },

    /// A record does not carry one slot per configured dimension
    #[error(
        "Record for indicator '{indicator}' has {actual} dimension values, expected {expected}"
    )]
    DimensionArity {
        /// The indicator of the malformed record
        indicator: String,
        /// Configured dimension count
        expected: usize,
        /// Slots present on the record
        actual: usize,
    },

    /// The engine configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while reading configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AvailabilityError {
    /// Shorthand for an [`AvailabilityError::InvalidConfig`]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type for availability operations
pub type Result<T> = std::result::Result<T, AvailabilityError>;
