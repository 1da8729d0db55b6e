//! Transport and signing error types.

use std::time::Duration;
use thiserror::Error;

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Failures that leave the caller without a response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection could not be established.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be read to completion.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TransportError {
    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_)) || matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_)) || matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Classify a reqwest failure, keeping the configured timeout for reporting.
    pub(crate) fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else if error.is_connect() {
            Self::Connection(error.to_string())
        } else {
            Self::Http(error)
        }
    }
}

/// Failures raised while adding authentication to a request.
#[derive(Debug, Error)]
pub enum SignError {
    /// The request URL has no host to sign.
    #[error("Request URL has no host")]
    MissingHost,

    /// A computed header value was not a valid HTTP header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}
