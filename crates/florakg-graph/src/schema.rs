//! Neo4j schema initialization (constraints and indexes).

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher statements for schema initialization.
const SCHEMA_STATEMENTS: &[&str] = &[
    // Uniqueness constraints
    "CREATE CONSTRAINT plant_name IF NOT EXISTS FOR (p:Plant) REQUIRE p.name IS UNIQUE",
    "CREATE CONSTRAINT symbol_meaning IF NOT EXISTS FOR (s:Symbol) REQUIRE s.meaning IS UNIQUE",
    "CREATE CONSTRAINT medicinal_effect IF NOT EXISTS FOR (m:Medicinal) REQUIRE m.effect IS UNIQUE",
    "CREATE CONSTRAINT literature_name IF NOT EXISTS FOR (l:Literature) REQUIRE l.name IS UNIQUE",
    "CREATE CONSTRAINT festival_name IF NOT EXISTS FOR (f:Festival) REQUIRE f.name IS UNIQUE",
];

/// Initialize Neo4j schema with constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> Result<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
