//! Built-in demonstration dataset.
//!
//! Served when the configured backend is `fixture`, so offline mode is an
//! explicit choice instead of a side effect of a failed connection.

use super::{StoreBackend, TableStore};
use crate::plant::{Plant, RelationshipKind};

struct FixtureRow {
    name: &'static str,
    latin_name: &'static str,
    family: &'static str,
    genus: &'static str,
    distribution: &'static str,
    folk_use: &'static str,
    cultural_symbol: &'static str,
    symbols: &'static [&'static str],
    medicinal: &'static [&'static str],
    literature: &'static [&'static str],
    festivals: &'static [&'static str],
}

const FIXTURE: &[FixtureRow] = &[
    FixtureRow {
        name: "梅",
        latin_name: "Prunus mume",
        family: "蔷薇科",
        genus: "李属",
        distribution: "长江流域",
        folk_use: "春节插梅迎新",
        cultural_symbol: "高洁、坚韧",
        symbols: &["高洁", "坚韧"],
        medicinal: &["生津止渴"],
        literature: &["诗经"],
        festivals: &["春节"],
    },
    FixtureRow {
        name: "兰",
        latin_name: "Cymbidium ssp.",
        family: "兰科",
        genus: "兰属",
        distribution: "湖北山地林下",
        folk_use: "佩兰以祛秽",
        cultural_symbol: "君子、高雅",
        symbols: &["君子", "高雅"],
        medicinal: &[],
        literature: &["楚辞"],
        festivals: &[],
    },
    FixtureRow {
        name: "艾",
        latin_name: "Artemisia argyi",
        family: "菊科",
        genus: "蒿属",
        distribution: "全国广布，蕲春尤盛",
        folk_use: "端午悬艾驱邪",
        cultural_symbol: "驱邪避疫",
        symbols: &["驱邪"],
        medicinal: &["温经止血", "散寒止痛"],
        literature: &["诗经"],
        festivals: &["端午节"],
    },
    FixtureRow {
        name: "菖蒲",
        latin_name: "Acorus calamus",
        family: "菖蒲科",
        genus: "菖蒲属",
        distribution: "湖北水边湿地",
        folk_use: "端午插蒲",
        cultural_symbol: "辟邪",
        symbols: &["辟邪"],
        medicinal: &["开窍化痰"],
        literature: &[],
        festivals: &["端午节"],
    },
    FixtureRow {
        name: "菊",
        latin_name: "Chrysanthemum morifolium",
        family: "菊科",
        genus: "菊属",
        distribution: "全国栽培",
        folk_use: "重阳赏菊饮菊花酒",
        cultural_symbol: "隐逸、长寿",
        symbols: &["隐逸", "长寿"],
        medicinal: &["清热明目"],
        literature: &["楚辞"],
        festivals: &["重阳节"],
    },
    FixtureRow {
        name: "桂",
        latin_name: "Osmanthus fragrans",
        family: "木犀科",
        genus: "木犀属",
        distribution: "长江以南广泛栽培",
        folk_use: "中秋赏桂酿桂花酒",
        cultural_symbol: "吉祥、团圆",
        symbols: &["吉祥"],
        medicinal: &[],
        literature: &["楚辞"],
        festivals: &["中秋节"],
    },
];

fn to_plant(row: &FixtureRow) -> Plant {
    let mut plant = Plant {
        name: row.name.to_string(),
        latin_name: Some(row.latin_name.to_string()),
        family: Some(row.family.to_string()),
        genus: Some(row.genus.to_string()),
        distribution: Some(row.distribution.to_string()),
        folk_use: Some(row.folk_use.to_string()),
        cultural_symbol: Some(row.cultural_symbol.to_string()),
        ..Plant::default()
    };
    plant.set_relationship(RelationshipKind::Symbol, row.symbols.iter().copied());
    plant.set_relationship(RelationshipKind::Medicinal, row.medicinal.iter().copied());
    plant.set_relationship(RelationshipKind::Literature, row.literature.iter().copied());
    plant.set_relationship(RelationshipKind::Festival, row.festivals.iter().copied());
    plant
}

/// The demonstration records.
pub fn fixture_plants() -> Vec<Plant> {
    FIXTURE.iter().map(to_plant).collect()
}

/// A store serving the demonstration records.
pub fn fixture_store() -> TableStore {
    TableStore::from_plants(StoreBackend::Fixture, fixture_plants())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;

    #[tokio::test]
    async fn test_fixture_store() {
        let store = fixture_store();
        assert_eq!(store.backend(), StoreBackend::Fixture);

        let names = store.list_entity_names().await.unwrap();
        assert_eq!(names.len(), FIXTURE.len());

        let duanwu = store
            .plants_related_to(RelationshipKind::Festival, "端午")
            .await
            .unwrap();
        assert!(duanwu.contains(&"艾".to_string()));
        assert!(duanwu.contains(&"菖蒲".to_string()));
    }
}
