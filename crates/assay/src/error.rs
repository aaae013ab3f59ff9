//! Error types for the Assay library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset has no rows or no columns.
    #[error("Empty dataset: {rows} rows x {columns} columns")]
    EmptyDataset { rows: usize, columns: usize },

    /// Input is not a well-formed rectangular table.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A column holds values that are neither numeric nor categorical.
    #[error("Unsupported type '{storage}' for column '{column}'")]
    UnsupportedColumnType { column: String, storage: String },

    /// Too many numeric columns to correlate.
    #[error("Input too large: {numeric_columns} numeric columns exceeds limit of {limit}")]
    InputTooLarge { numeric_columns: usize, limit: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// TOML configuration parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AssayError {
    /// Build an IO error tagged with the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssayError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AssayError::Io { .. } => "io_error",
            AssayError::Csv(_) => "csv_error",
            AssayError::EmptyDataset { .. } => "empty_dataset",
            AssayError::MalformedInput(_) => "malformed_input",
            AssayError::UnsupportedColumnType { .. } => "unsupported_column_type",
            AssayError::InputTooLarge { .. } => "input_too_large",
            AssayError::Config(_) => "config_error",
            AssayError::Json(_) => "json_error",
            AssayError::Regex(_) => "regex_error",
            AssayError::Toml(_) => "toml_error",
        }
    }
}

/// Result type alias for Assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
