//! Client configuration.

use esearch_http::DEFAULT_REQUEST_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL used by [`EsConfig::from_env`] when `ESEARCH_URL` is unset.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Search engine client configuration.
///
/// A client takes ownership of its configuration and never changes it.
#[derive(Clone, Serialize, Deserialize)]
pub struct EsConfig {
    /// Engine base URL, e.g. `http://localhost:9200`.
    pub url: String,
    /// AWS access key ID used for request signing.
    #[serde(default)]
    pub aws_access_key_id: Option<String>,
    /// AWS secret access key used for request signing. Never serialized.
    #[serde(default, skip_serializing)]
    pub aws_secret_access_key: Option<String>,
    /// AWS session token for temporary credentials. Never serialized.
    #[serde(default, skip_serializing)]
    pub aws_session_token: Option<String>,
    /// AWS region. Derived from the endpoint host when absent.
    #[serde(default)]
    pub aws_region: Option<String>,
    /// Request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: Duration,
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

impl EsConfig {
    /// Create a new configuration for the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            aws_region: None,
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// Reads `ESEARCH_URL`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
    /// `AWS_SESSION_TOKEN` and `AWS_REGION` (falling back to
    /// `AWS_DEFAULT_REGION`).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source. Empty values count
    /// as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let mut config = Self::new(var("ESEARCH_URL").unwrap_or_else(|| DEFAULT_URL.to_string()));
        config.aws_access_key_id = var("AWS_ACCESS_KEY_ID");
        config.aws_secret_access_key = var("AWS_SECRET_ACCESS_KEY");
        config.aws_session_token = var("AWS_SESSION_TOKEN");
        config.aws_region = var("AWS_REGION").or_else(|| var("AWS_DEFAULT_REGION"));
        config
    }

    /// Set the AWS key pair used for signing.
    pub fn with_aws_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.aws_access_key_id = Some(access_key_id.into());
        self.aws_secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set the AWS session token.
    pub fn with_aws_session_token(mut self, token: impl Into<String>) -> Self {
        self.aws_session_token = Some(token.into());
        self
    }

    /// Set the AWS region.
    pub fn with_aws_region(mut self, region: impl Into<String>) -> Self {
        self.aws_region = Some(region.into());
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Signing is enabled iff both the key ID and the secret are non-empty.
    pub fn signing_enabled(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.aws_access_key_id) && present(&self.aws_secret_access_key)
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl std::fmt::Debug for EsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsConfig")
            .field("url", &self.url)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("signing_enabled", &self.signing_enabled())
            .field("aws_region", &self.aws_region)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
