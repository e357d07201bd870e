//! Error types for map training, regression and dataset ingestion.

use thiserror::Error;

/// The main error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Required columns missing or misnamed, or a non-numeric cell where a number is required.
    #[error("Malformed dataset: {0}")]
    DatasetMalformed(String),

    /// Too few samples to size or train a map.
    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    /// Map operation invoked before the prototype grid was allocated.
    #[error("Engine not initialized")]
    EngineNotInitialized,

    /// A vector does not have the column count the model was fitted with.
    #[error("Input dimensionality mismatch: expected {expected} columns, got {actual}")]
    DimensionMismatch {
        /// Column count the model expects.
        expected: usize,
        /// Column count that was supplied.
        actual: usize,
    },

    /// The regression normal equations could not be solved.
    #[error("Singular system: {0}")]
    SingularSystem(String),

    /// Invalid configuration or command line value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<crate::ParseEnumError> for Error {
    fn from(err: crate::ParseEnumError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
