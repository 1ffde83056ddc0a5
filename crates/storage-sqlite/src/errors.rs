//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 errors are wrapped here and converted to the store-agnostic
//! [`StoreError`] before leaving the crate.

use diesel::result::Error as DieselError;
use oac_core::errors::{Error, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Writer unavailable: {0}")]
    WriterUnavailable(String),

    #[error("Core error: {0}")]
    CoreError(String),
}

/// Convert core Error to StorageError (for the writer's transaction wrapper)
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        let store_error = match err {
            StorageError::ConnectionFailed(e) => StoreError::ConnectionFailed(e.to_string()),
            StorageError::PoolError(e) => StoreError::ConnectionFailed(e.to_string()),
            StorageError::QueryFailed(e) => StoreError::QueryFailed(e.to_string()),
            StorageError::MigrationFailed(e) => StoreError::MigrationFailed(e),
            StorageError::WriterUnavailable(e) => StoreError::Internal(e),
            StorageError::CoreError(e) => StoreError::Internal(e),
        };
        Error::Store(store_error)
    }
}
