//! Core error types for the OAC pipeline.
//!
//! This module defines store-agnostic error types. Backend-specific errors
//! (PostgREST responses, Diesel, SQLite) are converted to these types by the
//! store crates.

use chrono::ParseError as ChronoParseError;
use oac_infopost::InfopostError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Source request failed: {0}")]
    Source(#[from] InfopostError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Store-agnostic error type for write and coverage operations.
///
/// Details are carried as strings so this type stays independent of the
/// backend that produced them.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to reach the store or open a connection.
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// The remote store rejected a request.
    #[error("Store request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// A local query failed to execute.
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// Records could not be encoded or a response could not be decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Schema migration failed.
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// Some batches of a write were rejected.
    #[error("Partial write: {written} rows written, {failed} rows failed")]
    PartialWrite { written: usize, failed: usize },

    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Configuration problems. These are fatal for the command that needs the value.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Input file not found: {0}")]
    MissingInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Serialization(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::InvalidRecord(format!("Invalid date: {}", err))
    }
}

impl From<Error> for String {
    fn from(error: Error) -> Self {
        error.to_string()
    }
}
