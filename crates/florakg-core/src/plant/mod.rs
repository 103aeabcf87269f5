//! Plant records and the built-in alias table.

pub mod model;

use std::collections::BTreeMap;

pub use model::{Plant, PlantDetail, RelationshipKind};

/// Colloquial surface forms mapped to canonical plant names.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("菊花", "菊"),
    ("梅花", "梅"),
    ("兰花", "兰"),
    ("竹子", "竹"),
    ("荷花", "荷"),
    ("莲花", "荷"),
    ("桂花", "桂"),
    ("牡丹花", "牡丹"),
    ("杜鹃花", "杜鹃"),
    ("水仙花", "水仙"),
    ("艾草", "艾"),
    ("菖蒲叶", "菖蒲"),
    ("松树", "松"),
    ("柏树", "柏"),
    ("柳树", "柳"),
    ("桑树", "桑"),
    ("茶树", "茶"),
    ("桃树", "桃"),
    ("银杏树", "银杏"),
    ("梧桐树", "梧桐"),
];

/// The built-in alias table.
pub fn default_aliases() -> BTreeMap<String, String> {
    DEFAULT_ALIASES
        .iter()
        .map(|(alias, name)| (alias.to_string(), name.to_string()))
        .collect()
}
