//! Search engine client implementation.

use crate::{
    config::EsConfig,
    document::DocumentRef,
    endpoint::{encode_body, Endpoint},
    error::{EsError, Result},
    index::{IndexManager, IndexSettings},
    search::SearchResult,
};
use esearch_http::{RawResponse, RequestSigner, ReqwestTransport, Transport, TransportConfig, Url};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Client for document, search and index operations.
///
/// Cloning is cheap; clones share the configuration, transport and signer.
/// No state other than the immutable configuration survives between calls.
#[derive(Clone)]
pub struct EsClient {
    inner: Arc<ClientInner>,
}

/// Shared request pipeline: build, sign, send, classify.
pub(crate) struct ClientInner {
    config: EsConfig,
    transport: Arc<dyn Transport>,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl ClientInner {
    pub(crate) async fn execute(
        &self,
        endpoint: &Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        let mut request = endpoint.build(self.config.base_url(), body)?;

        if let Some(signer) = &self.signer {
            signer.sign(&mut request)?;
        }

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let status = response.status().as_u16();
            warn!(
                method = %endpoint.method(),
                path = endpoint.path(),
                status,
                "Request failed"
            );
            return Err(EsError::Http {
                status,
                body: response.text(),
            });
        }

        Ok(response)
    }
}

impl EsClient {
    /// Create a new client backed by an HTTP transport.
    pub fn new(config: EsConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(
            TransportConfig::builder()
                .timeout(config.request_timeout)
                .connect_timeout(config.connect_timeout)
                .build(),
        )?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends through the given transport.
    ///
    /// Signing is configured from `config` exactly as in [`EsClient::new`].
    pub fn with_transport(config: EsConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let url = Url::parse(config.base_url())
            .map_err(|e| EsError::Config(format!("invalid URL {:?}: {}", config.url, e)))?;

        let signer = signer_for(&config, &url)?;
        if signer.is_some() {
            info!(url = %config.url, "Using signed requests");
        } else {
            info!(url = %config.url, "Initializing search client");
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                signer,
            }),
        })
    }

    /// Replace the request signer.
    pub fn with_signer(self, signer: Arc<dyn RequestSigner>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config: self.inner.config.clone(),
                transport: self.inner.transport.clone(),
                signer: Some(signer),
            }),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EsConfig {
        &self.inner.config
    }

    /// Check whether outgoing requests are signed.
    pub fn signing_enabled(&self) -> bool {
        self.inner.signer.is_some()
    }

    /// Get an index manager for index operations.
    pub fn indices(&self) -> IndexManager {
        IndexManager::new(self.inner.clone())
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Index a document under `index/doc_type/id`.
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        payload: &T,
    ) -> Result<()> {
        let doc = DocumentRef::new(index, doc_type, id);
        doc.validate()?;
        let body = encode_body(payload)?;

        debug!(index, doc_type, id, "Putting document");
        self.inner
            .execute(&Endpoint::put_document(&doc), Some(body))
            .await?;
        Ok(())
    }

    /// Partially update a document.
    ///
    /// The payload is sent as-is, so partial documents are conventionally
    /// wrapped as `{"doc": {...}}` by the caller.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        payload: &T,
    ) -> Result<()> {
        let doc = DocumentRef::new(index, doc_type, id);
        doc.validate()?;
        let body = encode_body(payload)?;

        debug!(index, doc_type, id, "Updating document");
        self.inner
            .execute(&Endpoint::update_document(&doc), Some(body))
            .await?;
        Ok(())
    }

    /// Delete a single document.
    pub async fn delete_document(&self, index: &str, doc_type: &str, id: &str) -> Result<()> {
        let doc = DocumentRef::new(index, doc_type, id);
        doc.validate()?;

        debug!(index, doc_type, id, "Deleting document");
        self.inner
            .execute(&Endpoint::delete_document(&doc), None)
            .await?;
        Ok(())
    }

    /// Run a query and decode the hits.
    pub async fn search<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        query: &T,
    ) -> Result<SearchResult> {
        if index.is_empty() || doc_type.is_empty() {
            return Err(EsError::InvalidInput(format!(
                "index: {:?} type: {:?}",
                index, doc_type
            )));
        }
        let body = encode_body(query)?;

        debug!(index, doc_type, "Searching");
        let response = self
            .inner
            .execute(&Endpoint::search(index, doc_type), Some(body))
            .await?;
        SearchResult::from_slice(response.bytes())
    }

    /// Delete every document the query matches.
    ///
    /// Runs the search, then deletes each hit in rank order using the hit's
    /// own index, type and ID. A failed search fails the call and nothing is
    /// deleted. Every hit is attempted; per-hit failures are collected in
    /// the returned outcome rather than aborting the remaining deletes.
    pub async fn delete_query<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        query: &T,
    ) -> Result<DeleteQueryOutcome> {
        let result = self.search(index, doc_type, query).await?;
        let mut outcome = DeleteQueryOutcome {
            matched: result.total(),
            deleted: Vec::with_capacity(result.hits.hits.len()),
            failures: Vec::new(),
        };

        for hit in result.iter() {
            let doc = hit.document_ref();
            match self.delete_document(&doc.index, &doc.doc_type, &doc.id).await {
                Ok(()) => outcome.deleted.push(doc),
                Err(error) => {
                    warn!(document = %doc, error = %error, "Failed to delete matched document");
                    outcome.failures.push(DeleteFailure {
                        document: doc,
                        error,
                    });
                }
            }
        }

        debug!(
            deleted = outcome.deleted.len(),
            failed = outcome.failures.len(),
            "Delete by query finished"
        );
        Ok(outcome)
    }

    // =========================================================================
    // Index Operations
    // =========================================================================

    /// Delete an index.
    pub async fn delete_index(&self, index: &str) -> Result<()> {
        self.indices().delete(index).await
    }

    /// Refresh an index so recent writes become searchable.
    pub async fn refresh_index(&self, index: &str) -> Result<()> {
        self.indices().refresh(index).await
    }

    /// Create an index with default settings.
    pub async fn create_index(&self, index: &str) -> Result<()> {
        self.indices().create(index).await
    }

    /// Create an index with explicit settings.
    pub async fn create_index_with(&self, index: &str, settings: &IndexSettings) -> Result<()> {
        self.indices().create_with(index, settings).await
    }

    /// Put a mapping for a type.
    pub async fn put_mapping<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        mapping: &T,
    ) -> Result<()> {
        self.indices().put_mapping(index, doc_type, mapping).await
    }
}

impl std::fmt::Debug for EsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsClient")
            .field("url", &self.inner.config.url)
            .field("signing_enabled", &self.signing_enabled())
            .finish()
    }
}

/// Result of [`EsClient::delete_query`].
#[derive(Debug)]
pub struct DeleteQueryOutcome {
    /// Total matches the engine reported (`hits.total`).
    ///
    /// Only the hits on the returned page are deleted, so this can exceed
    /// [`attempted`](Self::attempted) without any delete having failed.
    pub matched: i64,
    /// Documents that were deleted, in rank order.
    pub deleted: Vec<DocumentRef>,
    /// Documents whose delete failed, in rank order.
    pub failures: Vec<DeleteFailure>,
}

impl DeleteQueryOutcome {
    /// Number of deletes attempted.
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failures.len()
    }

    /// Check if every attempted delete succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A per-hit delete that failed during [`EsClient::delete_query`].
#[derive(Debug)]
pub struct DeleteFailure {
    /// The document that could not be deleted.
    pub document: DocumentRef,
    /// Why the delete failed.
    pub error: EsError,
}

#[cfg(feature = "aws-auth")]
fn signer_for(config: &EsConfig, url: &Url) -> Result<Option<Arc<dyn RequestSigner>>> {
    use esearch_aws::{AwsCredentials, SigV4Signer, SigningConfig};

    if !config.signing_enabled() {
        return Ok(None);
    }

    let mut credentials = AwsCredentials::new(
        config.aws_access_key_id.clone().unwrap_or_default(),
        config.aws_secret_access_key.clone().unwrap_or_default(),
    );
    if let Some(token) = config.aws_session_token.as_deref().filter(|t| !t.is_empty()) {
        credentials = credentials.with_session_token(token);
    }
    let scope = SigningConfig::resolve(config.aws_region.as_deref(), url.host_str().unwrap_or(""));

    Ok(Some(Arc::new(SigV4Signer::new(credentials, scope))))
}

#[cfg(not(feature = "aws-auth"))]
fn signer_for(config: &EsConfig, _url: &Url) -> Result<Option<Arc<dyn RequestSigner>>> {
    if config.signing_enabled() {
        return Err(EsError::Config(
            "AWS credentials are set but the aws-auth feature is disabled".to_string(),
        ));
    }
    Ok(None)
}
