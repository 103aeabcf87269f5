//! In-memory store backed by a spreadsheet export or a fixed record set.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::{RecordStore, StoreBackend};
use crate::error::{FloraError, FloraResult};
use crate::plant::{Plant, RelationshipKind};

/// Separators accepted inside multi-valued spreadsheet cells.
const LIST_SEPARATORS: &[char] = &['、', ';', '；', ',', '，', '|'];

/// One spreadsheet row. Column names follow the graph property names.
#[derive(Debug, Deserialize)]
struct PlantRow {
    name: String,
    latin_name: Option<String>,
    family: Option<String>,
    genus: Option<String>,
    distribution: Option<String>,
    folk_use: Option<String>,
    ecological_meaning: Option<String>,
    cultural_symbol: Option<String>,
    medicinal_value: Option<String>,
    literature_source: Option<String>,
    festival: Option<String>,
    #[serde(default)]
    symbols: Option<String>,
    #[serde(default)]
    medicinal_effects: Option<String>,
    #[serde(default)]
    literature: Option<String>,
    #[serde(default)]
    festivals: Option<String>,
}

impl PlantRow {
    fn into_plant(self) -> Plant {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let mut plant = Plant {
            name: self.name.trim().to_string(),
            latin_name: clean(self.latin_name),
            family: clean(self.family),
            genus: clean(self.genus),
            distribution: clean(self.distribution),
            folk_use: clean(self.folk_use),
            ecological_meaning: clean(self.ecological_meaning),
            cultural_symbol: clean(self.cultural_symbol),
            medicinal_value: clean(self.medicinal_value),
            literature_source: clean(self.literature_source),
            festival: clean(self.festival),
            ..Plant::default()
        };
        plant.set_relationship(RelationshipKind::Symbol, split_list(self.symbols.as_deref()));
        plant.set_relationship(RelationshipKind::Medicinal, split_list(self.medicinal_effects.as_deref()));
        plant.set_relationship(RelationshipKind::Literature, split_list(self.literature.as_deref()));
        plant.set_relationship(RelationshipKind::Festival, split_list(self.festivals.as_deref()));
        plant
    }
}

fn split_list(cell: Option<&str>) -> Vec<&str> {
    cell.map(|c| c.split(LIST_SEPARATORS).collect())
        .unwrap_or_default()
}

/// Plant records held in memory, sorted by name.
#[derive(Debug, Clone)]
pub struct TableStore {
    backend: StoreBackend,
    plants: Vec<Plant>,
    index: HashMap<String, usize>,
}

impl TableStore {
    /// Build a store from records. Later duplicates of a name are dropped.
    pub fn from_plants(backend: StoreBackend, plants: impl IntoIterator<Item = Plant>) -> Self {
        let mut unique: Vec<Plant> = Vec::new();
        for plant in plants {
            if plant.name.trim().is_empty() {
                continue;
            }
            if unique.iter().any(|p| p.name == plant.name) {
                debug!(name = %plant.name, "Skipping duplicate plant record");
                continue;
            }
            unique.push(plant);
        }
        unique.sort_by(|a, b| a.name.cmp(&b.name));

        let index = unique
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        Self {
            backend,
            plants: unique,
            index,
        }
    }

    /// Load a CSV export of the plant spreadsheet.
    pub fn from_csv(path: &Path) -> FloraResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let mut plants = Vec::new();
        for row in reader.deserialize::<PlantRow>() {
            plants.push(row?.into_plant());
        }

        info!(path = %path.display(), count = plants.len(), "Loaded plant table");
        Ok(Self::from_plants(StoreBackend::Table, plants))
    }

    /// Read every record of a CSV export without building a store.
    pub fn read_csv(path: &Path) -> FloraResult<Vec<Plant>> {
        Ok(Self::from_csv(path)?.plants)
    }

    /// The loaded records.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    fn get(&self, name: &str) -> Option<&Plant> {
        self.index.get(name).map(|&i| &self.plants[i])
    }
}

#[async_trait]
impl RecordStore for TableStore {
    fn backend(&self) -> StoreBackend {
        self.backend
    }

    async fn list_entity_names(&self) -> FloraResult<Vec<String>> {
        Ok(self.plants.iter().map(|p| p.name.clone()).collect())
    }

    async fn fetch_entity(&self, name: &str) -> FloraResult<Option<Plant>> {
        Ok(self.get(name).cloned())
    }

    async fn fetch_relationship(&self, name: &str, kind: RelationshipKind) -> FloraResult<Vec<String>> {
        Ok(self
            .get(name)
            .map(|p| p.relationship(kind).to_vec())
            .unwrap_or_default())
    }

    async fn plants_related_to(&self, kind: RelationshipKind, needle: &str) -> FloraResult<Vec<String>> {
        if needle.trim().is_empty() {
            return Err(FloraError::invalid_input("relationship filter must not be empty"));
        }
        Ok(self
            .plants
            .iter()
            .filter(|p| {
                p.relationship(kind).iter().any(|v| v.contains(needle))
                    || p.relationship_attribute(kind).is_some_and(|v| v.contains(needle))
            })
            .map(|p| p.name.clone())
            .collect())
    }
}
