//! Request construction for each engine endpoint.
//!
//! Identifiers are substituted into the path verbatim. Callers supply
//! engine-safe names; nothing is URL-escaped here.

use crate::document::DocumentRef;
use crate::error::{EsError, Result};
use esearch_http::{EsRequest, Method};
use serde::Serialize;

/// Method and path of one engine endpoint, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    path: String,
}

impl Endpoint {
    fn new(method: Method, segments: &[&str]) -> Self {
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.push_str(segment);
        }
        Self { method, path }
    }

    /// `POST /{index}/{type}/{id}`
    pub fn put_document(doc: &DocumentRef) -> Self {
        Self::new(Method::POST, &[doc.index.as_str(), doc.doc_type.as_str(), doc.id.as_str()])
    }

    /// `POST /{index}/{type}/{id}/_update`
    pub fn update_document(doc: &DocumentRef) -> Self {
        Self::new(
            Method::POST,
            &[doc.index.as_str(), doc.doc_type.as_str(), doc.id.as_str(), "_update"],
        )
    }

    /// `DELETE /{index}/{type}/{id}`
    pub fn delete_document(doc: &DocumentRef) -> Self {
        Self::new(Method::DELETE, &[doc.index.as_str(), doc.doc_type.as_str(), doc.id.as_str()])
    }

    /// `POST /{index}/{type}/_search`
    pub fn search(index: &str, doc_type: &str) -> Self {
        Self::new(Method::POST, &[index, doc_type, "_search"])
    }

    /// `PUT /{index}`
    pub fn create_index(index: &str) -> Self {
        Self::new(Method::PUT, &[index])
    }

    /// `DELETE /{index}`
    pub fn delete_index(index: &str) -> Self {
        Self::new(Method::DELETE, &[index])
    }

    /// `POST /{index}/_refresh`
    pub fn refresh_index(index: &str) -> Self {
        Self::new(Method::POST, &[index, "_refresh"])
    }

    /// `PUT /{index}/_mapping/{type}`
    pub fn put_mapping(index: &str, doc_type: &str) -> Self {
        Self::new(Method::PUT, &[index, "_mapping", doc_type])
    }

    /// Get the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute URI for the given base.
    pub fn uri(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path)
    }

    /// Build the request, attaching the body if one is given.
    pub fn build(&self, base: &str, body: Option<Vec<u8>>) -> Result<EsRequest> {
        let request = EsRequest::new(self.method.clone(), &self.uri(base))
            .map_err(|e| EsError::Config(e.to_string()))?;
        Ok(match body {
            Some(body) => request.with_json_body(body),
            None => request,
        })
    }
}

/// Serialize a payload to JSON bytes.
pub fn encode_body<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(EsError::Serialization)
}
