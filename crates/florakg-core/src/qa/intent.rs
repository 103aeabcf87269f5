//! Keyword-based question intent classification.

use serde::{Deserialize, Serialize};

use crate::plant::RelationshipKind;

/// What a question asks about a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Symbolism,
    Medicinal,
    Distribution,
    FolkUse,
    Festival,
    Literature,
    Taxonomy,
    Basic,
}

/// Keyword sets in priority order; the first set with a hit decides.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Symbolism, &["象征", "寓意", "代表", "含义", "文化", "symbol", "meaning"]),
    (Intent::Medicinal, &["药用", "功效", "药效", "治疗", "治病", "medicinal", "medicine"]),
    (Intent::Distribution, &["分布", "哪里", "在哪", "产地", "生长", "where", "distribution"]),
    (Intent::FolkUse, &["民俗", "用途", "使用", "怎么用", "folk", "custom"]),
    (Intent::Festival, &["节日", "端午", "春节", "重阳", "中秋", "清明", "festival"]),
    (Intent::Literature, &["文献", "记载", "诗经", "楚辞", "诗词", "literature", "poem"]),
    (Intent::Taxonomy, &["科", "属", "分类", "family", "genus", "taxonomy"]),
];

impl Intent {
    /// Classify a question. Total: anything unmatched is `Basic`.
    pub fn classify(question: &str) -> Self {
        let q = question.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| q.contains(w)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Basic)
    }

    /// The relationship set this intent reads, if any.
    pub fn relationship(&self) -> Option<RelationshipKind> {
        match self {
            Self::Symbolism => Some(RelationshipKind::Symbol),
            Self::Medicinal => Some(RelationshipKind::Medicinal),
            Self::Festival => Some(RelationshipKind::Festival),
            Self::Literature => Some(RelationshipKind::Literature),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symbolism => "symbolism",
            Self::Medicinal => "medicinal",
            Self::Distribution => "distribution",
            Self::FolkUse => "folk_use",
            Self::Festival => "festival",
            Self::Literature => "literature",
            Self::Taxonomy => "taxonomy",
            Self::Basic => "basic",
        }
    }

    /// Human label used in answers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Symbolism => "文化象征",
            Self::Medicinal => "药用价值",
            Self::Distribution => "分布区域",
            Self::FolkUse => "民俗用途",
            Self::Festival => "相关节日",
            Self::Literature => "文献记载",
            Self::Taxonomy => "科属信息",
            Self::Basic => "基本信息",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category() {
        assert_eq!(Intent::classify("梅花的文化象征？"), Intent::Symbolism);
        assert_eq!(Intent::classify("菊的药用价值是什么？"), Intent::Medicinal);
        assert_eq!(Intent::classify("梅分布在哪里？"), Intent::Distribution);
        assert_eq!(Intent::classify("艾有什么民俗用途？"), Intent::FolkUse);
        assert_eq!(Intent::classify("端午节挂什么？"), Intent::Festival);
        assert_eq!(Intent::classify("兰在楚辞里出现过吗"), Intent::Literature);
        assert_eq!(Intent::classify("桂属于哪一科"), Intent::Taxonomy);
        assert_eq!(Intent::classify("介绍一下兰"), Intent::Basic);
    }

    #[test]
    fn test_priority_order() {
        // Medicinal and symbolism keywords together: symbolism is listed first.
        assert_eq!(Intent::classify("艾的药用功效和象征意义"), Intent::Symbolism);
        // Festival and literature together: festival first.
        assert_eq!(Intent::classify("诗经里的端午植物"), Intent::Festival);
    }

    #[test]
    fn test_total_and_deterministic() {
        for q in ["", "   ", "？？？", "random text", "Symbol OF plum"] {
            let first = Intent::classify(q);
            assert_eq!(Intent::classify(q), first);
        }
        assert_eq!(Intent::classify(""), Intent::Basic);
        assert_eq!(Intent::classify("Symbol OF plum"), Intent::Symbolism);
    }
}
