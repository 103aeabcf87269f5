//! Questions about the collection rather than one plant.

use crate::plant::RelationshipKind;

/// Largest number of names listed for a literature question.
pub const LITERATURE_LIMIT: usize = 10;

/// A collection-level question recognised by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery {
    /// List every loaded plant.
    AllPlants,
    /// Plants related to one festival.
    Festival {
        needle: &'static str,
        heading: &'static str,
    },
    /// Plants recorded in the classical anthologies.
    Literature { needles: &'static [&'static str] },
}

const ALL_PLANTS_KEYWORDS: &[&str] = &["所有植物", "有哪些植物", "植物列表"];

const FESTIVALS: &[(&str, &str)] = &[
    ("端午", "🎋 端午节相关植物"),
    ("春节", "🧧 春节相关植物"),
    ("重阳", "🏔️ 重阳节相关植物"),
    ("中秋", "🌕 中秋节相关植物"),
    ("清明", "🌧️ 清明节相关植物"),
];

const ANTHOLOGIES: &[&str] = &["楚辞", "诗经"];

impl CatalogQuery {
    /// Recognise a collection question; checked in the order listed above.
    pub fn detect(question: &str) -> Option<Self> {
        if ALL_PLANTS_KEYWORDS.iter().any(|k| question.contains(k)) {
            return Some(Self::AllPlants);
        }
        if let Some(&(needle, heading)) = FESTIVALS.iter().find(|(n, _)| question.contains(n)) {
            return Some(Self::Festival { needle, heading });
        }
        if ANTHOLOGIES.iter().any(|a| question.contains(a)) {
            return Some(Self::Literature { needles: ANTHOLOGIES });
        }
        None
    }

    /// The relationship the query filters on, if any.
    pub fn relationship(&self) -> Option<RelationshipKind> {
        match self {
            Self::AllPlants => None,
            Self::Festival { .. } => Some(RelationshipKind::Festival),
            Self::Literature { .. } => Some(RelationshipKind::Literature),
        }
    }
}

/// Render the answer for a collection question. `None` when there is nothing to list.
pub fn render(query: &CatalogQuery, names: &[String], delimiter: &str) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    let text = match query {
        CatalogQuery::AllPlants => format!(
            "📚 知识库中共有 {} 种植物：\n{}",
            names.len(),
            names.join(delimiter)
        ),
        CatalogQuery::Festival { heading, .. } => format!("{}：{}", heading, names.join(delimiter)),
        CatalogQuery::Literature { .. } => {
            let shown = &names[..names.len().min(LITERATURE_LIMIT)];
            let more = if names.len() > LITERATURE_LIMIT { "……" } else { "" };
            format!("📜 《楚辞》《诗经》中记载的植物：{}{}", shown.join(delimiter), more)
        }
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect() {
        assert_eq!(CatalogQuery::detect("知识库里有哪些植物？"), Some(CatalogQuery::AllPlants));
        assert!(matches!(
            CatalogQuery::detect("端午节和什么植物有关？"),
            Some(CatalogQuery::Festival { needle: "端午", .. })
        ));
        assert!(matches!(
            CatalogQuery::detect("诗经里写了哪些草木"),
            Some(CatalogQuery::Literature { .. })
        ));
        assert_eq!(CatalogQuery::detect("今天天气如何"), None);
    }

    #[test]
    fn test_render() {
        let q = CatalogQuery::detect("重阳节相关").unwrap();
        assert_eq!(
            render(&q, &names(&["菊", "茱萸"]), "、").unwrap(),
            "🏔️ 重阳节相关植物：菊、茱萸"
        );
        assert_eq!(render(&q, &[], "、"), None);
    }

    #[test]
    fn test_literature_is_capped() {
        let many: Vec<String> = (0..12).map(|i| format!("草{}", i)).collect();
        let q = CatalogQuery::Literature { needles: ANTHOLOGIES };
        let text = render(&q, &many, "、").unwrap();
        assert!(text.contains("草9"));
        assert!(!text.contains("草10"));
        assert!(text.ends_with("……"));
    }
}
