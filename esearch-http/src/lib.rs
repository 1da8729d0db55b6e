//! # esearch HTTP primitives
//!
//! The transport layer shared by every esearch operation: a fully built
//! request value, a raw response that has already been read to completion,
//! a [`Transport`] seam that executes one request, and a [`RequestSigner`]
//! seam that may add authentication headers before the request leaves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use esearch_http::{EsRequest, ReqwestTransport, Transport, TransportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::new(TransportConfig::default())?;
//!
//!     let request = EsRequest::post("http://localhost:9200/articles/_refresh")?;
//!     let response = transport.send(request).await?;
//!
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod request;
mod response;
mod signer;
mod transport;

pub use config::{TransportConfig, TransportConfigBuilder, DEFAULT_REQUEST_TIMEOUT};
pub use error::{Result, SignError, TransportError};
pub use request::EsRequest;
pub use response::{is_success_status, RawResponse, SUCCESS_STATUS};
pub use signer::RequestSigner;
pub use transport::{ReqwestTransport, Transport};

// Re-export common types
pub use bytes::Bytes;
pub use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use esearch_http::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{TransportConfig, TransportConfigBuilder};
    pub use crate::error::{Result, SignError, TransportError};
    pub use crate::request::EsRequest;
    pub use crate::response::{is_success_status, RawResponse};
    pub use crate::signer::RequestSigner;
    pub use crate::transport::{ReqwestTransport, Transport};
    pub use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
}
