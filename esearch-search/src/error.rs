//! Error types for search engine operations.

use esearch_http::{SignError, TransportError};
use thiserror::Error;

/// Search engine client error type.
#[derive(Error, Debug)]
pub enum EsError {
    /// A required identifier was empty. Raised before any network activity.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The payload could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// No response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response was obtained but its status is outside the success range.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A successful response did not decode into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request could not be signed.
    #[error("Signing error: {0}")]
    Signing(#[from] SignError),

    /// The client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Fieldless classification of [`EsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`EsError::InvalidInput`].
    InvalidInput,
    /// See [`EsError::Serialization`].
    Serialization,
    /// See [`EsError::Transport`].
    Transport,
    /// See [`EsError::Http`].
    Http,
    /// See [`EsError::Decode`].
    Decode,
    /// See [`EsError::Signing`].
    Signing,
    /// See [`EsError::Config`].
    Config,
}

impl EsError {
    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Http,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Signing(_) => ErrorKind::Signing,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Get the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the engine answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    pub(crate) fn invalid_document(index: &str, doc_type: &str, id: &str) -> Self {
        Self::InvalidInput(format!(
            "index: {:?} type: {:?} id: {:?}",
            index, doc_type, id
        ))
    }
}

/// Result type alias for search engine operations.
pub type Result<T> = std::result::Result<T, EsError>;
