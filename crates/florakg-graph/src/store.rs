//! Graph-backed record store.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use florakg_core::error::{FloraError, FloraResult};
use florakg_core::plant::{Plant, RelationshipKind};
use florakg_core::store::{RecordStore, StoreBackend};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::client::{GraphClient, GraphConfig};
use crate::queries::plants;

/// [`RecordStore`] over a Neo4j database.
///
/// Every driver failure becomes [`FloraError::StoreUnavailable`]; a plant
/// that is simply absent is `Ok(None)`. After [`RecordStore::close`] every
/// call is `StoreUnavailable` as well. Clones share one connection pool.
#[derive(Clone)]
pub struct GraphStore {
    client: Arc<RwLock<Option<GraphClient>>>,
}

impl GraphStore {
    /// Connect and verify the database answers queries.
    pub async fn connect(config: &GraphConfig) -> FloraResult<Self> {
        let client = GraphClient::connect(config)
            .await
            .map_err(unavailable)?;
        info!(uri = %config.uri, database = %config.database, "Connected to Neo4j");
        Ok(Self {
            client: Arc::new(RwLock::new(Some(client))),
        })
    }

    /// The underlying client, unless the store was closed.
    pub async fn client(&self) -> FloraResult<GraphClient> {
        self.client
            .read()
            .await
            .clone()
            .ok_or_else(|| FloraError::unavailable("Neo4j connection is closed"))
    }
}

/// Convert an infrastructure error into the store-unavailable outcome.
fn unavailable(e: anyhow::Error) -> FloraError {
    warn!(error = %format!("{:#}", e), "Neo4j request failed");
    FloraError::unavailable(format!("{:#}", e))
}

#[async_trait]
impl RecordStore for GraphStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Graph
    }

    async fn list_entity_names(&self) -> FloraResult<Vec<String>> {
        let client = self.client().await?;
        plants::list_names(&client)
            .await
            .context("Failed to list plants")
            .map_err(unavailable)
    }

    async fn fetch_entity(&self, name: &str) -> FloraResult<Option<Plant>> {
        let client = self.client().await?;
        plants::get_plant(&client, name)
            .await
            .with_context(|| format!("Failed to fetch plant '{}'", name))
            .map_err(unavailable)
    }

    async fn fetch_relationship(&self, name: &str, kind: RelationshipKind) -> FloraResult<Vec<String>> {
        let client = self.client().await?;
        plants::get_relationship(&client, name, kind)
            .await
            .with_context(|| format!("Failed to fetch {} of '{}'", kind.as_str(), name))
            .map_err(unavailable)
    }

    async fn plants_related_to(&self, kind: RelationshipKind, needle: &str) -> FloraResult<Vec<String>> {
        if needle.trim().is_empty() {
            return Err(FloraError::invalid_input("relationship filter must not be empty"));
        }
        let client = self.client().await?;
        plants::plants_related_to(&client, kind, needle)
            .await
            .with_context(|| format!("Failed to find plants by {}", kind.as_str()))
            .map_err(unavailable)
    }

    /// Drop this store's handle on the pool. Connections close once no
    /// query still holds a clone of the client.
    async fn close(&self) {
        if let Some(client) = self.client.write().await.take() {
            info!(uri = %client.uri(), "Released Neo4j connection pool");
        }
    }
}
