//! Neo4j connection client.

use std::time::Duration;

use anyhow::{Context, Result};
use florakg_core::config::StoreConfig;
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub connect_timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for GraphConfig {
    fn from(store: &StoreConfig) -> Self {
        Self {
            uri: store.uri.clone(),
            user: store.user.clone(),
            password: store.password.clone(),
            database: store.database.clone(),
            connect_timeout: Duration::from_secs(store.connect_timeout_secs.max(1)),
        }
    }
}

/// Client for Neo4j knowledge graph operations.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    uri: String,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs builds its pool lazily, so a `RETURN 1` ping forces the bolt
    /// handshake. The whole sequence is bounded by `connect_timeout`.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(8)
            .fetch_size(200)
            .build()
            .context("Failed to build Neo4j config")?;

        let handshake = async {
            let graph = Graph::connect(neo4j_config)
                .await
                .context("Failed to create Neo4j connection pool")?;
            graph
                .run(Query::new("RETURN 1".to_string()))
                .await
                .context("Neo4j is not responding to queries")?;
            Ok::<_, anyhow::Error>(graph)
        };

        let graph = tokio::time::timeout(config.connect_timeout, handshake)
            .await
            .with_context(|| {
                format!(
                    "Timed out after {}s connecting to Neo4j",
                    config.connect_timeout.as_secs()
                )
            })??;

        Ok(Self {
            graph,
            uri: config.uri.clone(),
        })
    }

    /// The bolt URI this client is connected to.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Execute a Cypher query that returns no results.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph.run(query).await.context("Neo4j query execution failed")?;
        Ok(())
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await
            .context("Neo4j query failed")?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.context("Failed to read Neo4j result row")? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> Result<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row.get(field)
                .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", field, e))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Get plant and relationship counts for status display.
    pub async fn get_counts(&self) -> Result<GraphCounts> {
        let plant_query = Query::new("MATCH (p:Plant) RETURN count(p) as count".to_string());
        let rel_query = Query::new("MATCH (:Plant)-[r]->() RETURN count(r) as count".to_string());

        let plant_count: i64 = self.query_scalar(plant_query, "count").await?
            .unwrap_or(0);
        let rel_count: i64 = self.query_scalar(rel_query, "count").await?
            .unwrap_or(0);

        Ok(GraphCounts {
            plants: plant_count as usize,
            relationships: rel_count as usize,
        })
    }
}

/// Plant and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub plants: usize,
    pub relationships: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_store_settings() {
        let store = StoreConfig {
            uri: "neo4j+s://abc.databases.neo4j.io".to_string(),
            database: "60369e3e".to_string(),
            connect_timeout_secs: 0,
            ..StoreConfig::default()
        };
        let config = GraphConfig::from(&store);
        assert_eq!(config.uri, "neo4j+s://abc.databases.neo4j.io");
        assert_eq!(config.database, "60369e3e");
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
    }
}
