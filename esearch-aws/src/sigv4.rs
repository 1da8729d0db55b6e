//! Signature Version 4.

use crate::{AwsCredentials, SigningConfig};
use chrono::{DateTime, Utc};
use esearch_http::{header, EsRequest, HeaderValue, RequestSigner, SignError};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::trace;

type HmacSha256 = Hmac<Sha256>;

/// Signing algorithm name.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

const AMZ_DATE: &str = "x-amz-date";
const AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

/// Everything except the RFC 3986 unreserved characters.
const URI_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Signs requests with AWS Signature Version 4.
#[derive(Debug, Clone)]
pub struct SigV4Signer {
    credentials: AwsCredentials,
    scope: SigningConfig,
}

impl SigV4Signer {
    /// Create a signer for the given credentials and scope.
    pub fn new(credentials: AwsCredentials, scope: SigningConfig) -> Self {
        Self { credentials, scope }
    }

    /// Get the credential scope.
    pub fn scope(&self) -> &SigningConfig {
        &self.scope
    }

    /// Sign the request as of the given instant.
    pub fn sign_at(&self, request: &mut EsRequest, now: DateTime<Utc>) -> Result<(), SignError> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        let host = host_header(request)?;
        let headers = request.headers_mut();
        headers.remove(header::AUTHORIZATION);
        headers.insert(header::HOST, header_value(&host)?);
        headers.insert(AMZ_DATE, header_value(&amz_date)?);
        if let Some(token) = &self.credentials.session_token {
            headers.insert(AMZ_SECURITY_TOKEN, header_value(token)?);
        }

        let (canonical_request, signed_headers) = canonical_request(request)?;
        trace!(canonical_request = %canonical_request, "Built canonical request");

        let scope = format!(
            "{}/{}/{}/aws4_request",
            date, self.scope.region, self.scope.service
        );
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signing_key = self.signing_key(&date);
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, self.credentials.access_key_id, scope, signed_headers, signature
        );
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, header_value(&authorization)?);

        Ok(())
    }

    /// Derive the day's signing key from the secret.
    fn signing_key(&self, date: &str) -> Vec<u8> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key);
        let k_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
        let k_region = hmac_sha256(&k_date, self.scope.region.as_bytes());
        let k_service = hmac_sha256(&k_region, self.scope.service.as_bytes());
        hmac_sha256(&k_service, b"aws4_request")
    }
}

impl RequestSigner for SigV4Signer {
    fn sign(&self, request: &mut EsRequest) -> Result<(), SignError> {
        self.sign_at(request, Utc::now())
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take any size key");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn header_value(value: &str) -> Result<HeaderValue, SignError> {
    HeaderValue::from_str(value).map_err(|e| SignError::InvalidHeader(e.to_string()))
}

/// `host[:port]`, with the port only when it is not the scheme default.
fn host_header(request: &EsRequest) -> Result<String, SignError> {
    let url = request.url();
    let host = url.host_str().ok_or(SignError::MissingHost)?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, URI_ENCODE).to_string()
}

/// Build the canonical request and the signed header list.
pub(crate) fn canonical_request(request: &EsRequest) -> Result<(String, String), SignError> {
    let path = request.url().path();
    let canonical_uri = if path.is_empty() {
        "/".to_string()
    } else {
        path.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
    };

    let mut query: Vec<(String, String)> = request
        .url()
        .query_pairs()
        .map(|(k, v)| (uri_encode(&k), uri_encode(&v)))
        .collect();
    query.sort();
    let canonical_query = query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in request.headers() {
        if *name == header::AUTHORIZATION {
            continue;
        }
        let value = value
            .to_str()
            .map_err(|e| SignError::InvalidHeader(format!("{}: {}", name, e)))?;
        headers
            .entry(name.as_str().to_ascii_lowercase())
            .or_default()
            .push(value.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    let canonical_headers: String = headers
        .iter()
        .map(|(name, values)| format!("{}:{}\n", name, values.join(",")))
        .collect();
    let signed_headers = headers.keys().cloned().collect::<Vec<_>>().join(";");

    let payload_hash = hex::encode(Sha256::digest(request.body_bytes()));

    let canonical = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method().as_str(),
        canonical_uri,
        canonical_query,
        canonical_headers,
        signed_headers,
        payload_hash
    );

    Ok((canonical, signed_headers))
}
