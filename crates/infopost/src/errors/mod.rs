//! Error types and retry classification for the infopost client.
//!
//! This module provides:
//! - [`InfopostError`]: The error enum for all infopost operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while talking to the infopost router.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which the client uses to decide
/// whether another attempt is worth making.
#[derive(Error, Debug)]
pub enum InfopostError {
    /// The request did not complete in time.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Connection-level failure (DNS, refused, reset, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The router answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Numeric HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The body was not valid JSON.
    /// Retrying reproduces the same body, so this is terminal.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The body was JSON, but not an array or an index-keyed object of records.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Building the request failed (payload serialization, bad URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every allowed attempt failed with a transient error.
    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The error returned by the final attempt
        last: Box<InfopostError>,
    },
}

impl InfopostError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use oac_infopost::errors::{InfopostError, RetryClass};
    ///
    /// let error = InfopostError::Timeout("router".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = InfopostError::Decode("expected value at line 1".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Transport failures - the next attempt may succeed
            Self::Timeout(_) | Self::Network(_) | Self::HttpStatus { .. } => {
                RetryClass::WithBackoff
            }

            // Same request, same answer
            Self::Decode(_)
            | Self::UnexpectedShape(_)
            | Self::InvalidRequest(_)
            | Self::RetriesExhausted { .. } => RetryClass::Never,
        }
    }
}

impl From<reqwest::Error> for InfopostError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            InfopostError::Timeout(error.to_string())
        } else if let Some(status) = error.status() {
            InfopostError::HttpStatus {
                status: status.as_u16(),
                url: error
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "<unknown>".to_string()),
            }
        } else if error.is_decode() {
            InfopostError::Decode(error.to_string())
        } else if error.is_builder() {
            InfopostError::InvalidRequest(error.to_string())
        } else {
            InfopostError::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = InfopostError::Timeout("30s elapsed".to_string());
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_network_retries_with_backoff() {
        let error = InfopostError::Network("connection reset".to_string());
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_http_status_retries_with_backoff() {
        let error = InfopostError::HttpStatus {
            status: 503,
            url: "https://example.test/router".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_decode_never_retries() {
        let error = InfopostError::Decode("trailing characters".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_unexpected_shape_never_retries() {
        let error = InfopostError::UnexpectedShape("string".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_exhausted_never_retries() {
        let error = InfopostError::RetriesExhausted {
            attempts: 4,
            last: Box::new(InfopostError::Network("refused".to_string())),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_error_display() {
        let error = InfopostError::HttpStatus {
            status: 502,
            url: "https://example.test/r".to_string(),
        };
        assert_eq!(format!("{}", error), "HTTP 502 from https://example.test/r");

        let error = InfopostError::RetriesExhausted {
            attempts: 4,
            last: Box::new(InfopostError::Timeout("slow".to_string())),
        };
        assert_eq!(
            format!("{}", error),
            "Gave up after 4 attempts: Timeout: slow"
        );
    }
}
