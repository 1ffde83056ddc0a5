use oac_core::errors::{Error, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestStoreError {
    #[error("Invalid API key: {0}")]
    InvalidKey(String),

    #[error("Failed to initialize HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl From<RestStoreError> for StoreError {
    fn from(err: RestStoreError) -> Self {
        match err {
            RestStoreError::Api { status, message } => StoreError::RequestFailed { status, message },
            RestStoreError::Transport(msg) => StoreError::ConnectionFailed(msg),
            RestStoreError::Decode(msg) => StoreError::Serialization(msg),
            other => StoreError::Internal(other.to_string()),
        }
    }
}

impl From<RestStoreError> for Error {
    fn from(err: RestStoreError) -> Self {
        Error::Store(err.into())
    }
}

impl From<reqwest::Error> for RestStoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RestStoreError::Decode(err.to_string())
        } else {
            RestStoreError::Transport(err.to_string())
        }
    }
}
