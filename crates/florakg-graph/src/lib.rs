//! # Florakg Graph
//!
//! Neo4j knowledge graph integration for florakg.
//!
//! Provides the graph-backed record store, schema constraints, and the
//! spreadsheet import into the graph.

pub mod client;
pub mod import;
pub mod queries;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use import::{ImportResult, import_plants};
pub use store::GraphStore;
