//! In-memory document store.
//!
//! Backs local development (store URL `memory://`) and the test suites: a
//! plain map of collection name to documents, with UUID v4 identifiers
//! stamped on each stored document as `_id`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{ConnectivityProbe, DocumentStore, StoreError, StoreStatus};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .expect("memory store lock poisoned")
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Snapshot of a collection's documents.
    pub fn documents(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .expect("memory store lock poisoned")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        mut document: Value,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        if let Some(object) = document.as_object_mut() {
            object.insert("_id".to_string(), Value::String(id.clone()));
        }
        self.collections
            .lock()
            .expect("memory store lock poisoned")
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }
}

#[async_trait]
impl ConnectivityProbe for MemoryStore {
    async fn status(&self) -> StoreStatus {
        let mut collections: Vec<String> = {
            let guard = self
                .collections
                .lock()
                .expect("memory store lock poisoned");
            guard.keys().cloned().collect()
        };
        collections.sort();

        StoreStatus {
            available: true,
            connected: true,
            collections,
            detail: None,
        }
    }
}
