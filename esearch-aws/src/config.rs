//! Credentials and signing scope.

use serde::{Deserialize, Serialize};

/// Service name used in the credential scope for search domains.
pub const ES_SERVICE: &str = "es";

/// Region used when none is configured and the host does not name one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// An access key pair with an optional session token.
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsCredentials {
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    #[serde(default)]
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Create credentials from a key pair.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Attach a session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Both the key ID and the secret are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Region and service that make up the credential scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// AWS region.
    pub region: String,
    /// AWS service name.
    pub service: String,
}

impl SigningConfig {
    /// Create a scope for the search service in the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            service: ES_SERVICE.to_string(),
        }
    }

    /// Override the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Resolve the scope for an endpoint.
    ///
    /// An explicit region wins, then a region named by an AWS host, then
    /// [`DEFAULT_REGION`].
    pub fn resolve(region: Option<&str>, host: &str) -> Self {
        let region = region
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .or_else(|| region_from_host(host))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        Self::new(region)
    }

}

/// Extract the region from a host such as `search-logs-x1.eu-west-1.es.amazonaws.com`.
pub fn region_from_host(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').collect();
    match labels.as_slice() {
        [.., region, "es", "amazonaws", "com"] if labels.len() >= 5 => Some(region.to_string()),
        _ => None,
    }
}
