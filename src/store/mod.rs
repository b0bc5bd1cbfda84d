//! Document store collaborators.
//!
//! Persistence is split into two narrow capabilities: [`DocumentStore`]
//! inserts a document and returns the store-generated identifier, and
//! [`ConnectivityProbe`] reports whether the backend is reachable. Handlers
//! only see the trait objects, so both seams can be exercised with fakes.

pub mod couch;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::StoreConfig;

/// Opaque persistence capability: insert one document, get back its
/// identifier. The identifier format is the backend's business.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(
        &self,
        collection: &str,
        document: Value,
    ) -> Result<String, StoreError>;
}

/// Connectivity introspection used by the diagnostics endpoint.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn status(&self) -> StoreStatus;
}

/// Snapshot of the store backend's reachability.
///
/// Probing never errors; degradation shows up as flags plus a description.
#[derive(Debug, Clone, Default)]
pub struct StoreStatus {
    /// A backend is configured at all
    pub available: bool,
    /// The backend answered a connectivity check
    pub connected: bool,
    /// Collection names reported by the backend
    pub collections: Vec<String>,
    /// Description of the failure when degraded
    pub detail: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store is not configured")]
    NotConfigured,

    #[error("document store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("document store rejected the write: {0}")]
    Rejected(String),
}

/// The unconfigured state: every insert fails and the probe reports the
/// backend as unavailable. Lets the API run while the frontend is developed
/// without a store attached.
pub struct NullStore;

#[async_trait]
impl DocumentStore for NullStore {
    async fn create_document(
        &self,
        _collection: &str,
        _document: Value,
    ) -> Result<String, StoreError> {
        Err(StoreError::NotConfigured)
    }
}

#[async_trait]
impl ConnectivityProbe for NullStore {
    async fn status(&self) -> StoreStatus {
        StoreStatus {
            available: false,
            connected: false,
            collections: Vec::new(),
            detail: Some("document store is not configured".to_string()),
        }
    }
}

/// Select and construct the store backend from configuration.
///
/// No URL selects [`NullStore`], a `memory://` URL selects the in-memory
/// store, anything else is treated as a CouchDB-compatible HTTP endpoint.
pub fn build(
    config: &StoreConfig,
) -> Result<(Arc<dyn DocumentStore>, Arc<dyn ConnectivityProbe>), StoreError> {
    match config.url.as_deref() {
        None => {
            let store = Arc::new(NullStore);
            Ok((store.clone(), store))
        }
        Some(url) if url.starts_with("memory://") => {
            let store = Arc::new(memory::MemoryStore::new());
            Ok((store.clone(), store))
        }
        Some(url) => {
            let store = Arc::new(couch::CouchStore::new(
                url,
                config.database_name(),
                config.timeout_seconds,
            )?);
            Ok((store.clone(), store))
        }
    }
}
