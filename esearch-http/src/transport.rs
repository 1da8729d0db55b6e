//! Transport implementations.

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{EsRequest, RawResponse, Result, TransportConfig, TransportError};

/// Executes one request and returns its status and fully read body.
///
/// A transport never classifies the status; that is the caller's job.
/// It fails only when no complete response was obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and read the whole response body.
    async fn send(&self, request: EsRequest) -> Result<RawResponse>;
}

/// Transport backed by a `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
    config: Arc<TransportConfig>,
}

impl ReqwestTransport {
    /// Create a transport with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    default_headers.insert(name, value);
                }
                _ => warn!(header = %name, "Ignoring invalid default header"),
            }
        }

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: EsRequest) -> Result<RawResponse> {
        let (method, url, headers, body) = request.into_parts();
        debug!(method = %method, url = %url, "Sending request");

        let mut builder = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let timeout = self.config.timeout;
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        // The body is read in full here; the response (and its connection)
        // is dropped on every path out of this function.
        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        debug!(status = %status, bytes = body.len(), "Received response");
        Ok(RawResponse::new(status, body))
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("timeout", &self.config.timeout)
            .finish()
    }
}
