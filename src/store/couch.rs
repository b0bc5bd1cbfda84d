//! CouchDB-compatible HTTP document store client.
//!
//! Logical collections are mapped to namespaced databases named
//! `{database}/{collection}` (path-encoded), so one store server can host
//! several deployments side by side. Writes are single-document inserts with
//! no retry; failures surface directly to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::{ConnectivityProbe, DocumentStore, StoreError, StoreStatus};

pub struct CouchStore {
    client: reqwest::Client,
    base_url: String,
    database: String,
}

/// Reply to a document insert (`{"ok": true, "id": ..., "rev": ...}`).
#[derive(Debug, Deserialize)]
struct SaveReply {
    id: String,
}

impl CouchStore {
    pub fn new(
        base_url: &str,
        database: String,
        timeout_seconds: u64,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            database,
        })
    }

    /// URL of the database backing a logical collection.
    fn collection_url(&self, collection: &str) -> String {
        let name = format!("{}/{}", self.database, collection);
        format!("{}/{}", self.base_url, urlencoding::encode(&name))
    }

    /// Create the backing database if it does not exist yet.
    ///
    /// The server answers 201 on creation and 412 when it already exists.
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.collection_url(collection))
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::PRECONDITION_FAILED => Ok(()),
            status => Err(StoreError::Rejected(format!(
                "creating collection {collection} returned {status}"
            ))),
        }
    }

    /// Collections under this store's namespace.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> = self
            .client
            .get(format!("{}/_all_dbs", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let prefix = format!("{}/", self.database);
        Ok(names
            .into_iter()
            .filter_map(|name| name.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }
}

#[async_trait]
impl DocumentStore for CouchStore {
    async fn create_document(
        &self,
        collection: &str,
        document: Value,
    ) -> Result<String, StoreError> {
        self.ensure_collection(collection).await?;

        let response = self
            .client
            .post(self.collection_url(collection))
            .json(&document)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(format!("{status}: {body}")));
        }

        let reply: SaveReply = response.json().await?;
        Ok(reply.id)
    }
}

#[async_trait]
impl ConnectivityProbe for CouchStore {
    async fn status(&self) -> StoreStatus {
        let up = self
            .client
            .get(format!("{}/_up", self.base_url))
            .send()
            .await;

        match up {
            Ok(response) if response.status().is_success() => {
                // Reachable; a failing listing is reported but keeps the
                // connected flag, matching what the check actually proved.
                match self.list_collections().await {
                    Ok(collections) => StoreStatus {
                        available: true,
                        connected: true,
                        collections,
                        detail: None,
                    },
                    Err(error) => StoreStatus {
                        available: true,
                        connected: true,
                        collections: Vec::new(),
                        detail: Some(error.to_string()),
                    },
                }
            }
            Ok(response) => StoreStatus {
                available: true,
                connected: false,
                collections: Vec::new(),
                detail: Some(format!(
                    "connectivity check returned {}",
                    response.status()
                )),
            },
            Err(error) => StoreStatus {
                available: true,
                connected: false,
                collections: Vec::new(),
                detail: Some(error.to_string()),
            },
        }
    }
}
