//! Entity resolution: free text to a canonical plant name.
//!
//! Strategies run in a fixed order and the first hit wins:
//! 1. canonical name contained in the question,
//! 2. alias contained in the question,
//! 3. dictionary segmentation, each token looked up case-insensitively
//!    among names, then alias keys.
//!
//! Within a strategy, longer surface forms are tried first so that
//! "牡丹花" is never shadowed by a shorter entry; equal lengths keep the
//! store's name order (aliases: key order).

use std::collections::{BTreeMap, HashMap, HashSet};

use jieba_rs::Jieba;
use tracing::{debug, warn};

/// Festival words kept whole by the segmenter.
const EXTRA_WORDS: &[&str] = &["端午节", "春节", "重阳节", "中秋节", "清明节"];

/// Outcome of resolving a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The question refers to this loaded plant.
    Found(String),
    /// An alias matched but its target is not loaded.
    AliasUnresolvable { alias: String, target: String },
    NotFound,
}

/// Read-only snapshot of known names and aliases, with a segmenter primed
/// with both.
pub struct EntityResolver {
    names: Vec<String>,
    known: HashSet<String>,
    by_match_order: Vec<String>,
    /// Lowercased name to canonical name; the first name in store order wins.
    folded: HashMap<String, String>,
    /// Lowercased alias key to its index in `aliases`.
    folded_aliases: HashMap<String, usize>,
    aliases: Vec<(String, String)>,
    segmenter: Jieba,
}

impl EntityResolver {
    /// Build from the store's name list and an alias table.
    pub fn new(names: Vec<String>, aliases: &BTreeMap<String, String>) -> Self {
        let mut by_match_order: Vec<String> = names
            .iter()
            .filter(|n| !n.trim().is_empty())
            .cloned()
            .collect();
        by_match_order.sort_by_key(|n| std::cmp::Reverse(n.chars().count()));

        let known = names.iter().cloned().collect();

        let mut folded = HashMap::new();
        for name in &names {
            folded.entry(name.to_lowercase()).or_insert_with(|| name.clone());
        }

        let mut alias_order: Vec<(String, String)> = aliases
            .iter()
            .filter(|(alias, _)| !alias.trim().is_empty())
            .map(|(alias, target)| (alias.clone(), target.clone()))
            .collect();
        alias_order.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.chars().count()));

        let mut folded_aliases = HashMap::new();
        for (i, (alias, _)) in alias_order.iter().enumerate() {
            folded_aliases.entry(alias.to_lowercase()).or_insert(i);
        }

        let mut segmenter = Jieba::new();
        for word in names.iter().chain(aliases.keys()) {
            segmenter.add_word(word, None, None);
        }
        for word in EXTRA_WORDS {
            segmenter.add_word(word, None, None);
        }

        let resolver = Self {
            names,
            known,
            by_match_order,
            folded,
            folded_aliases,
            aliases: alias_order,
            segmenter,
        };
        for (alias, target) in resolver.unresolvable_aliases() {
            warn!(alias, target, "Alias points to a plant that is not loaded");
        }
        resolver
    }

    /// Canonical names in store order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `name` is a loaded canonical name.
    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Aliases whose target is not loaded.
    pub fn unresolvable_aliases(&self) -> Vec<(&str, &str)> {
        self.aliases
            .iter()
            .filter(|(_, target)| !self.is_known(target))
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
            .collect()
    }

    /// Resolve the plant a question refers to.
    pub fn resolve(&self, question: &str) -> Resolution {
        if let Some(name) = self.by_match_order.iter().find(|n| question.contains(n.as_str())) {
            debug!(name = %name, "Resolved by direct match");
            return Resolution::Found(name.clone());
        }

        if let Some((alias, target)) = self.aliases.iter().find(|(a, _)| question.contains(a.as_str())) {
            return self.through_alias(alias, target);
        }

        for token in self.segmenter.cut(question, false) {
            let token = token.trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            if let Some(name) = self.folded.get(&token) {
                debug!(token = %token, name = %name, "Resolved by segmentation");
                return Resolution::Found(name.clone());
            }
            if let Some(&i) = self.folded_aliases.get(&token) {
                let (alias, target) = &self.aliases[i];
                return self.through_alias(alias, target);
            }
        }

        Resolution::NotFound
    }

    fn through_alias(&self, alias: &str, target: &str) -> Resolution {
        if self.is_known(target) {
            debug!(alias, name = target, "Resolved by alias");
            return Resolution::Found(target.to_string());
        }
        debug!(alias, target, "Alias target not loaded");
        Resolution::AliasUnresolvable {
            alias: alias.to_string(),
            target: target.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(names: &[&str], aliases: &[(&str, &str)]) -> EntityResolver {
        let aliases = aliases
            .iter()
            .map(|(a, t)| (a.to_string(), t.to_string()))
            .collect();
        EntityResolver::new(names.iter().map(|n| n.to_string()).collect(), &aliases)
    }

    #[test]
    fn test_direct_match() {
        let r = resolver(&["兰", "梅", "菊"], &[]);
        assert_eq!(r.resolve("兰有什么文化象征？"), Resolution::Found("兰".to_string()));
    }

    #[test]
    fn test_alias_match() {
        let r = resolver(&["梅"], &[("梅花", "梅")]);
        assert_eq!(r.resolve("梅花的文化象征？"), Resolution::Found("梅".to_string()));
    }

    #[test]
    fn test_alias_to_unloaded_plant() {
        let r = resolver(&["梅"], &[("水仙花", "水仙")]);
        assert_eq!(
            r.resolve("水仙花开在什么时候？"),
            Resolution::AliasUnresolvable {
                alias: "水仙花".to_string(),
                target: "水仙".to_string(),
            }
        );
        assert_eq!(r.unresolvable_aliases(), vec![("水仙花", "水仙")]);
    }

    #[test]
    fn test_not_found() {
        let r = resolver(&["梅"], &[("梅花", "梅")]);
        assert_eq!(r.resolve("水仙的文化象征？"), Resolution::NotFound);
        assert_eq!(r.resolve(""), Resolution::NotFound);
    }

    #[test]
    fn test_canonical_name_beats_alias() {
        // The alias would be unresolvable, but the loaded name is matched first.
        let r = resolver(&["兰"], &[("菊花", "菊")]);
        assert_eq!(r.resolve("菊花和兰哪个更香"), Resolution::Found("兰".to_string()));
    }

    #[test]
    fn test_longer_name_wins() {
        let r = resolver(&["丹", "牡丹"], &[]);
        assert_eq!(r.resolve("牡丹的寓意"), Resolution::Found("牡丹".to_string()));
    }

    #[test]
    fn test_equal_length_keeps_store_order() {
        let r = resolver(&["梅", "兰"], &[]);
        assert_eq!(r.resolve("兰与梅"), Resolution::Found("梅".to_string()));
    }

    #[test]
    fn test_segmentation_is_case_insensitive() {
        let r = resolver(&["Ginkgo"], &[]);
        assert_eq!(r.resolve("what does ginkgo symbolize"), Resolution::Found("Ginkgo".to_string()));
    }

    #[test]
    fn test_alias_target_differing_only_in_case() {
        let r = resolver(&["Lan", "lan"], &[("orchid", "Lan")]);
        assert!(r.is_known("Lan"));
        assert!(r.is_known("lan"));
        assert!(!r.is_known("LAN"));
        assert!(r.unresolvable_aliases().is_empty());
        assert_eq!(r.resolve("orchid symbol"), Resolution::Found("Lan".to_string()));
    }

    #[test]
    fn test_segmentation_prefers_first_name_in_store_order() {
        let r = resolver(&["Lan", "lan"], &[]);
        assert_eq!(r.resolve("what is LAN"), Resolution::Found("Lan".to_string()));
    }

    #[test]
    fn test_segmentation_checks_alias_keys() {
        let r = resolver(&["梅"], &[("Plum", "梅"), ("Narcissus", "水仙")]);
        assert_eq!(r.resolve("the PLUM blossom"), Resolution::Found("梅".to_string()));
        assert_eq!(
            r.resolve("NARCISSUS season"),
            Resolution::AliasUnresolvable {
                alias: "Narcissus".to_string(),
                target: "水仙".to_string(),
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let r = resolver(&["梅", "兰", "竹", "菊"], &[("梅花", "梅"), ("兰花", "兰")]);
        let q = "兰花与梅花";
        let first = r.resolve(q);
        for _ in 0..10 {
            assert_eq!(r.resolve(q), first);
        }
    }
}
