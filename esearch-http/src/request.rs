//! Outbound request value.

use crate::{Result, TransportError};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method};
use url::Url;

/// A fully built request: method, absolute URL, headers and an optional body.
///
/// Method, URL and body are fixed at construction. Only the headers can be
/// changed afterwards, which is what a [`RequestSigner`](crate::RequestSigner)
/// relies on.
#[derive(Debug, Clone)]
pub struct EsRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl EsRequest {
    /// Create a request without a body.
    pub fn new(method: Method, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// Create a GET request.
    pub fn get(url: &str) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    /// Create a POST request.
    pub fn post(url: &str) -> Result<Self> {
        Self::new(Method::POST, url)
    }

    /// Create a PUT request.
    pub fn put(url: &str) -> Result<Self> {
        Self::new(Method::PUT, url)
    }

    /// Create a DELETE request.
    pub fn delete(url: &str) -> Result<Self> {
        Self::new(Method::DELETE, url)
    }

    /// Attach an already serialized JSON body.
    pub fn with_json_body(mut self, body: impl Into<Bytes>) -> Self {
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.body = Some(body.into());
        self
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Get the body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Get the body bytes; empty when the request has no body.
    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }

    pub(crate) fn into_parts(self) -> (Method, Url, HeaderMap, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_body() {
        let request = EsRequest::delete("http://localhost:9200/articles").unwrap();
        assert_eq!(request.method(), &Method::DELETE);
        assert_eq!(request.url().path(), "/articles");
        assert!(request.body().is_none());
        assert!(request.body_bytes().is_empty());
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = EsRequest::post("http://localhost:9200/articles/post/1")
            .unwrap()
            .with_json_body(br#"{"title":"hi"}"#.to_vec());

        assert_eq!(request.body_bytes(), br#"{"title":"hi"}"#);
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_invalid_url() {
        let err = EsRequest::get("not a url").unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }
}
