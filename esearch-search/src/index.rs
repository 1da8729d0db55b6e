//! Index management.

use crate::{
    client::ClientInner,
    endpoint::{encode_body, Endpoint},
    error::{EsError, Result},
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Index manager for creating, refreshing and deleting indices.
#[derive(Clone)]
pub struct IndexManager {
    inner: Arc<ClientInner>,
}

impl IndexManager {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create an index with default settings.
    pub async fn create(&self, name: &str) -> Result<()> {
        require_index(name)?;
        info!(index = name, "Creating index");

        self.inner
            .execute(&Endpoint::create_index(name), None)
            .await?;
        Ok(())
    }

    /// Create an index with explicit settings.
    pub async fn create_with(&self, name: &str, settings: &IndexSettings) -> Result<()> {
        require_index(name)?;
        info!(index = name, "Creating index");

        let body = encode_body(&settings.to_json())?;
        self.inner
            .execute(&Endpoint::create_index(name), Some(body))
            .await?;
        Ok(())
    }

    /// Delete an index.
    ///
    /// Deleting an index that does not exist fails with the engine's
    /// not-found status, every time.
    pub async fn delete(&self, name: &str) -> Result<()> {
        require_index(name)?;
        info!(index = name, "Deleting index");

        self.inner
            .execute(&Endpoint::delete_index(name), None)
            .await?;
        Ok(())
    }

    /// Refresh an index. The response body is logged but not decoded.
    pub async fn refresh(&self, name: &str) -> Result<()> {
        require_index(name)?;

        let response = self
            .inner
            .execute(&Endpoint::refresh_index(name), None)
            .await?;
        debug!(index = name, body = %response.text(), "Refreshed index");
        Ok(())
    }

    /// Put a mapping for a type.
    pub async fn put_mapping<T: Serialize + ?Sized>(
        &self,
        name: &str,
        doc_type: &str,
        mapping: &T,
    ) -> Result<()> {
        if name.is_empty() || doc_type.is_empty() {
            return Err(EsError::InvalidInput(format!(
                "index: {:?} type: {:?}",
                name, doc_type
            )));
        }
        let body = encode_body(mapping)?;

        debug!(index = name, doc_type, "Updating mapping");
        self.inner
            .execute(&Endpoint::put_mapping(name, doc_type), Some(body))
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for IndexManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexManager").finish_non_exhaustive()
    }
}

fn require_index(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EsError::InvalidInput("index: \"\"".to_string()));
    }
    Ok(())
}

/// Settings used when creating an index.
#[derive(Debug, Clone, Default)]
pub struct IndexSettings {
    /// Number of shards.
    pub number_of_shards: Option<u32>,
    /// Number of replicas.
    pub number_of_replicas: Option<u32>,
    /// Refresh interval, e.g. `"1s"` or `"-1"`.
    pub refresh_interval: Option<String>,
    /// Type mappings, keyed by type name.
    pub mappings: Option<Value>,
}

impl IndexSettings {
    /// Create empty index settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of shards.
    pub fn shards(mut self, shards: u32) -> Self {
        self.number_of_shards = Some(shards);
        self
    }

    /// Set number of replicas.
    pub fn replicas(mut self, replicas: u32) -> Self {
        self.number_of_replicas = Some(replicas);
        self
    }

    /// Set refresh interval.
    pub fn refresh_interval(mut self, interval: impl Into<String>) -> Self {
        self.refresh_interval = Some(interval.into());
        self
    }

    /// Set mappings.
    pub fn mappings(mut self, mappings: Value) -> Self {
        self.mappings = Some(mappings);
        self
    }

    fn to_json(&self) -> Value {
        let mut body = serde_json::Map::new();
        let mut settings = serde_json::Map::new();

        if let Some(shards) = self.number_of_shards {
            settings.insert("number_of_shards".to_string(), json!(shards));
        }
        if let Some(replicas) = self.number_of_replicas {
            settings.insert("number_of_replicas".to_string(), json!(replicas));
        }
        if let Some(interval) = &self.refresh_interval {
            settings.insert("refresh_interval".to_string(), json!(interval));
        }

        if !settings.is_empty() {
            body.insert("settings".to_string(), Value::Object(settings));
        }
        if let Some(mappings) = &self.mappings {
            body.insert("mappings".to_string(), mappings.clone());
        }

        Value::Object(body)
    }
}
