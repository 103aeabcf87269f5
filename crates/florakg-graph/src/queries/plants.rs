//! Plant lookups.
//!
//! Every query is parameterised by plant name. Relationship kinds map to a
//! fixed (relationship type, node label, value property, plant attribute)
//! tuple, so labels are never built from user input.

use anyhow::Result;
use florakg_core::plant::{Plant, RelationshipKind};
use neo4rs::{Query, Row};

use crate::GraphClient;

/// Graph shape of one relationship kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipShape {
    pub rel_type: &'static str,
    pub label: &'static str,
    pub property: &'static str,
    /// Scalar plant attribute carrying the same information.
    pub attribute: &'static str,
}

/// Graph shape for a relationship kind.
pub fn shape(kind: RelationshipKind) -> RelationshipShape {
    match kind {
        RelationshipKind::Symbol => RelationshipShape {
            rel_type: "HAS_SYMBOL",
            label: "Symbol",
            property: "meaning",
            attribute: "cultural_symbol",
        },
        RelationshipKind::Medicinal => RelationshipShape {
            rel_type: "HAS_MEDICINAL",
            label: "Medicinal",
            property: "effect",
            attribute: "medicinal_value",
        },
        RelationshipKind::Literature => RelationshipShape {
            rel_type: "RECORDED_IN",
            label: "Literature",
            property: "name",
            attribute: "literature_source",
        },
        RelationshipKind::Festival => RelationshipShape {
            rel_type: "RELATED_TO_FESTIVAL",
            label: "Festival",
            property: "name",
            attribute: "festival",
        },
    }
}

/// All plant names, sorted.
pub async fn list_names(client: &GraphClient) -> Result<Vec<String>> {
    let query = Query::new("MATCH (p:Plant) RETURN p.name as name ORDER BY p.name".to_string());
    let rows = client.query(query).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| text(&row, "name"))
        .collect())
}

/// One plant with every relationship set.
pub async fn get_plant(client: &GraphClient, name: &str) -> Result<Option<Plant>> {
    let query = Query::new(
        "MATCH (p:Plant {name: $name})
         OPTIONAL MATCH (p)-[:HAS_SYMBOL]->(s:Symbol)
         OPTIONAL MATCH (p)-[:HAS_MEDICINAL]->(m:Medicinal)
         OPTIONAL MATCH (p)-[:RECORDED_IN]->(l:Literature)
         OPTIONAL MATCH (p)-[:RELATED_TO_FESTIVAL]->(f:Festival)
         RETURN p.name as name,
                p.latin_name as latin_name,
                p.family as family,
                p.genus as genus,
                p.distribution as distribution,
                p.folk_use as folk_use,
                p.ecological_meaning as ecological_meaning,
                p.cultural_symbol as cultural_symbol,
                p.medicinal_value as medicinal_value,
                p.literature_source as literature_source,
                p.festival as festival,
                collect(DISTINCT s.meaning) as symbols,
                collect(DISTINCT m.effect) as medicinal_effects,
                collect(DISTINCT l.name) as literature,
                collect(DISTINCT f.name) as festivals"
            .to_string(),
    )
    .param("name", name);

    let rows = client.query(query).await?;
    Ok(rows.into_iter().next().and_then(|row| plant_from_row(&row)))
}

/// One relationship set of a plant; empty when absent.
pub async fn get_relationship(client: &GraphClient, name: &str, kind: RelationshipKind) -> Result<Vec<String>> {
    let s = shape(kind);
    let query = Query::new(format!(
        "MATCH (p:Plant {{name: $name}})-[:{}]->(n:{})
         RETURN collect(DISTINCT n.{}) as values",
        s.rel_type, s.label, s.property
    ))
    .param("name", name);

    let rows = client.query(query).await?;
    Ok(rows
        .into_iter()
        .next()
        .map(|row| list(&row, "values"))
        .unwrap_or_default())
}

/// Names of plants whose relationship (or matching attribute) contains `needle`.
pub async fn plants_related_to(client: &GraphClient, kind: RelationshipKind, needle: &str) -> Result<Vec<String>> {
    let s = shape(kind);
    let query = Query::new(format!(
        "MATCH (p:Plant)
         OPTIONAL MATCH (p)-[:{rel}]->(n:{label})
         WITH p, collect(n.{prop}) as values
         WHERE any(v IN values WHERE v CONTAINS $needle)
            OR coalesce(p.{attr}, '') CONTAINS $needle
         RETURN p.name as name
         ORDER BY name",
        rel = s.rel_type,
        label = s.label,
        prop = s.property,
        attr = s.attribute,
    ))
    .param("needle", needle);

    let rows = client.query(query).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| text(&row, "name"))
        .collect())
}

fn plant_from_row(row: &Row) -> Option<Plant> {
    let name = text(row, "name")?;
    let mut plant = Plant {
        name,
        latin_name: text(row, "latin_name"),
        family: text(row, "family"),
        genus: text(row, "genus"),
        distribution: text(row, "distribution"),
        folk_use: text(row, "folk_use"),
        ecological_meaning: text(row, "ecological_meaning"),
        cultural_symbol: text(row, "cultural_symbol"),
        medicinal_value: text(row, "medicinal_value"),
        literature_source: text(row, "literature_source"),
        festival: text(row, "festival"),
        ..Plant::default()
    };
    plant.set_relationship(RelationshipKind::Symbol, list(row, "symbols"));
    plant.set_relationship(RelationshipKind::Medicinal, list(row, "medicinal_effects"));
    plant.set_relationship(RelationshipKind::Literature, list(row, "literature"));
    plant.set_relationship(RelationshipKind::Festival, list(row, "festivals"));
    Some(plant)
}

/// A non-empty string column; nulls and blanks are `None`.
fn text(row: &Row, field: &str) -> Option<String> {
    row.get::<String>(field)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn list(row: &Row, field: &str) -> Vec<String> {
    row.get::<Vec<String>>(field).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_distinct_shape() {
        let shapes: Vec<_> = RelationshipKind::ALL.iter().map(|k| shape(*k)).collect();
        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i + 1..] {
                assert_ne!(a.rel_type, b.rel_type);
                assert_ne!(a.label, b.label);
            }
        }
        assert_eq!(shape(RelationshipKind::Festival).rel_type, "RELATED_TO_FESTIVAL");
    }
}
