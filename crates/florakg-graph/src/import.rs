//! Spreadsheet to Neo4j import.
//!
//! Writes each plant as a (:Plant) node plus one node per relationship value,
//! using MERGE so re-running an import is idempotent.

use anyhow::{Context, Result};
use florakg_core::plant::{Plant, RelationshipKind};
use neo4rs::Query;
use tracing::{debug, info};

use crate::GraphClient;
use crate::queries::plants::shape;

/// Result of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub plants: usize,
    pub relationships: usize,
    pub removed: usize,
}

/// Import plants into Neo4j. With `replace`, existing plant data is removed first.
pub async fn import_plants(client: &GraphClient, plants: &[Plant], replace: bool) -> Result<ImportResult> {
    info!(count = plants.len(), replace, "Starting plant import");
    let mut result = ImportResult::default();

    if replace {
        let query = Query::new(
            "MATCH (n)
             WHERE n:Plant OR n:Symbol OR n:Medicinal OR n:Literature OR n:Festival
             DETACH DELETE n
             RETURN count(*) as count"
                .to_string(),
        );
        let removed: i64 = client.query_scalar(query, "count").await
            .context("Failed to clear existing plant data")?
            .unwrap_or(0);
        result.removed = removed as usize;
        info!(removed = result.removed, "Cleared existing plant data");
    }

    for plant in plants {
        upsert_plant(client, plant).await
            .with_context(|| format!("Failed to import plant '{}'", plant.name))?;
        result.plants += 1;

        for kind in RelationshipKind::ALL {
            for value in plant.relationship(kind) {
                link_value(client, &plant.name, kind, value).await
                    .with_context(|| format!("Failed to link {} '{}' to '{}'", kind.as_str(), value, plant.name))?;
                result.relationships += 1;
            }
        }
        debug!(name = %plant.name, "Imported plant");
    }

    info!(
        plants = result.plants,
        relationships = result.relationships,
        "Plant import complete"
    );
    Ok(result)
}

/// Create/update the Plant node.
async fn upsert_plant(client: &GraphClient, plant: &Plant) -> Result<()> {
    let query = Query::new(
        "MERGE (p:Plant {name: $name})
         SET p.latin_name = $latin_name,
             p.family = $family,
             p.genus = $genus,
             p.distribution = $distribution,
             p.folk_use = $folk_use,
             p.ecological_meaning = $ecological_meaning,
             p.cultural_symbol = $cultural_symbol,
             p.medicinal_value = $medicinal_value,
             p.literature_source = $literature_source,
             p.festival = $festival"
            .to_string(),
    )
    .param("name", plant.name.as_str())
    .param("latin_name", plant.latin_name.as_deref().unwrap_or(""))
    .param("family", plant.family.as_deref().unwrap_or(""))
    .param("genus", plant.genus.as_deref().unwrap_or(""))
    .param("distribution", plant.distribution.as_deref().unwrap_or(""))
    .param("folk_use", plant.folk_use.as_deref().unwrap_or(""))
    .param("ecological_meaning", plant.ecological_meaning.as_deref().unwrap_or(""))
    .param("cultural_symbol", plant.cultural_symbol.as_deref().unwrap_or(""))
    .param("medicinal_value", plant.medicinal_value.as_deref().unwrap_or(""))
    .param("literature_source", plant.literature_source.as_deref().unwrap_or(""))
    .param("festival", plant.festival.as_deref().unwrap_or(""));

    client.execute(query).await
}

/// MERGE the value node and the relationship to it.
async fn link_value(client: &GraphClient, name: &str, kind: RelationshipKind, value: &str) -> Result<()> {
    let s = shape(kind);
    let query = Query::new(format!(
        "MATCH (p:Plant {{name: $name}})
         MERGE (n:{label} {{{prop}: $value}})
         MERGE (p)-[:{rel}]->(n)",
        label = s.label,
        prop = s.property,
        rel = s.rel_type,
    ))
    .param("name", name)
    .param("value", value);

    client.execute(query).await
}
