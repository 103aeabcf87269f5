//! Record store abstraction.
//!
//! Every backend (Neo4j graph, spreadsheet table, built-in fixture) exposes the
//! same capability set so the QA pipeline never branches on where data lives.
//! Connectivity failures surface as [`FloraError::StoreUnavailable`]; missing
//! data is `Ok(None)` or an empty collection.

pub mod fixture;
pub mod table;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FloraResult;
use crate::plant::{Plant, RelationshipKind};

pub use table::TableStore;

/// Which backend variant serves the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Graph,
    Table,
    Fixture,
}

impl StoreBackend {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "graph" | "neo4j" => Some(Self::Graph),
            "table" | "csv" | "spreadsheet" => Some(Self::Table),
            "fixture" | "demo" | "offline" => Some(Self::Fixture),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Table => "table",
            Self::Fixture => "fixture",
        }
    }
}

/// Read-only access to plant records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The backend variant behind this store.
    fn backend(&self) -> StoreBackend;

    /// All canonical plant names, sorted by name.
    async fn list_entity_names(&self) -> FloraResult<Vec<String>>;

    /// The full record for a plant, or `None` if it is not loaded.
    async fn fetch_entity(&self, name: &str) -> FloraResult<Option<Plant>>;

    /// One relationship set of a plant. Unknown plants and plants without
    /// that relationship both yield an empty set.
    async fn fetch_relationship(&self, name: &str, kind: RelationshipKind) -> FloraResult<Vec<String>>;

    /// Names of plants whose relationship of `kind` (or the matching scalar
    /// attribute) contains `needle`.
    async fn plants_related_to(&self, kind: RelationshipKind, needle: &str) -> FloraResult<Vec<String>>;

    /// Release the underlying connection.
    async fn close(&self) {}
}
