//! Blocking client.
//!
//! [`EsClient`] runs the async client on a private single-worker runtime,
//! so every call blocks the calling thread until the response arrives or
//! the request timeout elapses. It must not be called from inside an async
//! runtime; use [`crate::EsClient`] there instead.

use crate::{
    client::{DeleteQueryOutcome, EsClient as AsyncClient},
    config::EsConfig,
    error::{EsError, Result},
    index::IndexSettings,
    search::SearchResult,
};
use esearch_http::{RequestSigner, Transport};
use serde::Serialize;
use std::{future::Future, sync::Arc};
use tokio::runtime::{Builder, Runtime};

/// Blocking search engine client.
///
/// Safe to share between threads. Clones share one runtime; calls never
/// share request state.
#[derive(Clone)]
pub struct EsClient {
    inner: AsyncClient,
    runtime: Arc<Runtime>,
}

impl EsClient {
    /// Create a new blocking client.
    pub fn new(config: EsConfig) -> Result<Self> {
        Self::from_async(AsyncClient::new(config)?)
    }

    /// Create a blocking client that sends through the given transport.
    pub fn with_transport(config: EsConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Self::from_async(AsyncClient::with_transport(config, transport)?)
    }

    /// Wrap an existing async client.
    pub fn from_async(inner: AsyncClient) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("esearch-blocking")
            .enable_all()
            .build()
            .map_err(|e| EsError::Config(format!("failed to start runtime: {}", e)))?;

        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    /// Replace the request signer.
    pub fn with_signer(self, signer: Arc<dyn RequestSigner>) -> Self {
        Self {
            inner: self.inner.with_signer(signer),
            runtime: self.runtime,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EsConfig {
        self.inner.config()
    }

    /// Check whether outgoing requests are signed.
    pub fn signing_enabled(&self) -> bool {
        self.inner.signing_enabled()
    }

    /// Get the wrapped async client.
    pub fn as_async(&self) -> &AsyncClient {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Index a document. See [`crate::EsClient::put`].
    pub fn put<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        payload: &T,
    ) -> Result<()> {
        self.block_on(self.inner.put(index, doc_type, id, payload))
    }

    /// Partially update a document. See [`crate::EsClient::update`].
    pub fn update<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        payload: &T,
    ) -> Result<()> {
        self.block_on(self.inner.update(index, doc_type, id, payload))
    }

    /// Delete a single document.
    pub fn delete_document(&self, index: &str, doc_type: &str, id: &str) -> Result<()> {
        self.block_on(self.inner.delete_document(index, doc_type, id))
    }

    /// Run a query. See [`crate::EsClient::search`].
    pub fn search<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        query: &T,
    ) -> Result<SearchResult> {
        self.block_on(self.inner.search(index, doc_type, query))
    }

    /// Delete every document the query matches. See [`crate::EsClient::delete_query`].
    pub fn delete_query<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        query: &T,
    ) -> Result<DeleteQueryOutcome> {
        self.block_on(self.inner.delete_query(index, doc_type, query))
    }

    /// Delete an index.
    pub fn delete_index(&self, index: &str) -> Result<()> {
        self.block_on(self.inner.delete_index(index))
    }

    /// Refresh an index.
    pub fn refresh_index(&self, index: &str) -> Result<()> {
        self.block_on(self.inner.refresh_index(index))
    }

    /// Create an index with default settings.
    pub fn create_index(&self, index: &str) -> Result<()> {
        self.block_on(self.inner.create_index(index))
    }

    /// Create an index with explicit settings.
    pub fn create_index_with(&self, index: &str, settings: &IndexSettings) -> Result<()> {
        self.block_on(self.inner.create_index_with(index, settings))
    }

    /// Put a mapping for a type.
    pub fn put_mapping<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        mapping: &T,
    ) -> Result<()> {
        self.block_on(self.inner.put_mapping(index, doc_type, mapping))
    }
}

impl std::fmt::Debug for EsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::EsClient")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_invalid_input_fails_fast() {
        let client = EsClient::new(EsConfig::new("http://127.0.0.1:1")).unwrap();
        let err = client.put("", "test", "1", &serde_json::json!({})).unwrap_err();
        assert!(matches!(err, EsError::InvalidInput(_)));
    }

    #[test]
    fn test_blocking_config() {
        let client = EsClient::new(EsConfig::new("http://localhost:9200/")).unwrap();
        assert_eq!(client.config().base_url(), "http://localhost:9200");
        assert!(!client.signing_enabled());
    }
}
