//! Typed document, search and index operations for Elasticsearch-compatible
//! search engines.
//!
//! This crate provides:
//! - Document put, update and delete addressed by index, type and ID
//! - Search with raw, lazily decoded document sources
//! - Delete-by-query built from a search plus per-hit deletes
//! - Index create, refresh, mapping and delete
//! - Optional AWS Signature Version 4 request signing
//! - A blocking client wrapping the async one
//!
//! # Example
//!
//! ```rust,no_run
//! use esearch_search::{EsClient, EsConfig};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Message {
//!     owner: String,
//!     message: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EsClient::new(EsConfig::new("http://localhost:9200"))?;
//!
//!     client
//!         .put("messages", "message", "1", &json!({"owner": "User-1", "message": "hello"}))
//!         .await?;
//!     client.refresh_index("messages").await?;
//!
//!     let result = client
//!         .search("messages", "message", &json!({"query": {"match": {"owner": "User-1"}}}))
//!         .await?;
//!
//!     for hit in result.iter() {
//!         let message: Message = hit.source_as()?;
//!         println!("{} ({}): {}", hit.id, message.owner, message.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;
mod document;
mod endpoint;
mod error;
mod index;
mod search;

#[cfg(feature = "blocking")]
pub mod blocking;

pub use client::{DeleteFailure, DeleteQueryOutcome, EsClient};
pub use config::{EsConfig, DEFAULT_URL};
pub use document::{DocumentRef, Payload};
pub use endpoint::{encode_body, Endpoint};
pub use error::{ErrorKind, EsError, Result};
pub use index::{IndexManager, IndexSettings};
pub use search::{Hit, Hits, SearchResult};

pub use esearch_http::{RawResponse, RequestSigner, Transport};

#[cfg(feature = "aws-auth")]
pub use esearch_aws::{AwsCredentials, SigV4Signer, SigningConfig};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::client::{DeleteQueryOutcome, EsClient};
    pub use crate::config::EsConfig;
    pub use crate::document::{DocumentRef, Payload};
    pub use crate::error::{ErrorKind, EsError, Result};
    pub use crate::index::IndexSettings;
    pub use crate::search::{Hit, SearchResult};
}
