//! Plant domain models.

use serde::{Deserialize, Serialize};

/// Sentinel the source data uses for "no medicinal record".
pub const NO_MEDICINAL_RECORD: &str = "无药用记载";

/// A plant record in the knowledge base.
///
/// `name` is the canonical key. Relationship sets keep the order the store
/// returned them in and never contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub name: String,
    pub latin_name: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub distribution: Option<String>,
    pub folk_use: Option<String>,
    pub ecological_meaning: Option<String>,
    pub cultural_symbol: Option<String>,
    pub medicinal_value: Option<String>,
    pub literature_source: Option<String>,
    pub festival: Option<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub medicinal_effects: Vec<String>,
    #[serde(default)]
    pub literature: Vec<String>,
    #[serde(default)]
    pub festivals: Vec<String>,
}

impl Plant {
    /// Create a plant with only its canonical name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The recorded relationship set of the given kind.
    pub fn relationship(&self, kind: RelationshipKind) -> &[String] {
        match kind {
            RelationshipKind::Symbol => &self.symbols,
            RelationshipKind::Medicinal => &self.medicinal_effects,
            RelationshipKind::Literature => &self.literature,
            RelationshipKind::Festival => &self.festivals,
        }
    }

    /// The scalar attribute that stands in for a relationship when the set is empty.
    pub fn relationship_attribute(&self, kind: RelationshipKind) -> Option<&str> {
        let value = match kind {
            RelationshipKind::Symbol => self.cultural_symbol.as_deref(),
            RelationshipKind::Medicinal => self
                .medicinal_value
                .as_deref()
                .filter(|v| v.trim() != NO_MEDICINAL_RECORD),
            RelationshipKind::Literature => self.literature_source.as_deref(),
            RelationshipKind::Festival => self.festival.as_deref(),
        };
        non_blank(value)
    }

    /// Relationship values, falling back to the scalar attribute when the set is empty.
    pub fn relationship_values(&self, kind: RelationshipKind) -> Vec<String> {
        let set = self.relationship(kind);
        if !set.is_empty() {
            return set.to_vec();
        }
        self.relationship_attribute(kind)
            .map(|v| vec![v.to_string()])
            .unwrap_or_default()
    }

    /// Set a relationship, dropping blanks and duplicates.
    pub fn set_relationship<I, S>(&mut self, kind: RelationshipKind, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let deduped = dedup_values(values);
        match kind {
            RelationshipKind::Symbol => self.symbols = deduped,
            RelationshipKind::Medicinal => self.medicinal_effects = deduped,
            RelationshipKind::Literature => self.literature = deduped,
            RelationshipKind::Festival => self.festivals = deduped,
        }
    }
}

/// Named relationship collections attached to a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Symbol,
    Medicinal,
    Literature,
    Festival,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 4] = [
        Self::Symbol,
        Self::Medicinal,
        Self::Literature,
        Self::Festival,
    ];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Medicinal => "medicinal",
            Self::Literature => "literature",
            Self::Festival => "festival",
        }
    }
}

/// Full plant view for detail endpoints.
///
/// Missing scalar attributes are replaced by fixed placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDetail {
    pub name: String,
    pub latin: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub distribution: String,
    pub folk_use: String,
    pub ecological: String,
    pub cultural_symbol: String,
    pub symbols: Vec<String>,
    pub medicinal: Vec<String>,
    pub literature: Vec<String>,
    pub festivals: Vec<String>,
}

impl From<Plant> for PlantDetail {
    fn from(plant: Plant) -> Self {
        fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| placeholder.to_string())
        }

        Self {
            name: plant.name,
            latin: plant.latin_name,
            family: plant.family,
            genus: plant.genus,
            distribution: or_placeholder(plant.distribution, "暂无分布信息"),
            folk_use: or_placeholder(plant.folk_use, "暂无民俗用途"),
            ecological: or_placeholder(plant.ecological_meaning, "暂无生态意义"),
            cultural_symbol: or_placeholder(plant.cultural_symbol, "暂无文化象征"),
            symbols: plant.symbols,
            medicinal: plant.medicinal_effects,
            literature: plant.literature,
            festivals: plant.festivals,
        }
    }
}

/// Trim a value and treat blank strings as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trim, drop blanks and keep the first occurrence of each value.
pub fn dedup_values<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value: String = value.into();
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
