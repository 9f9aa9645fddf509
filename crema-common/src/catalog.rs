//! Varietal specimen catalog
//!
//! The fixed, ordered set of collectible coffee cultivars. A user's
//! unlocked set is always drawn from these ids.

use crate::models::User;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One collectible varietal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietalInfo {
    pub id: String,
    /// Display name shown in the unlock notification
    pub name: String,
    /// Scientific or registry name
    pub latin_name: String,
    pub description: String,
    pub icon: String,
}

/// Built-in catalog, in display order
pub static VARIETALS: Lazy<VarietalCatalog> = Lazy::new(|| {
    VarietalCatalog::new(vec![
        varietal(
            "geisha",
            "Geisha",
            "Coffea Arabica Geisha",
            "Elegant florals, bergamot and bright citrus acidity. Born in Ethiopia, made famous in Panama.",
            "🌸",
        ),
        varietal(
            "bourbon",
            "Bourbon",
            "Coffea Arabica Bourbon",
            "A natural mutation of Typica, prized for balance, chocolate sweetness and nutty aromatics.",
            "🌰",
        ),
        varietal(
            "typica",
            "Typica",
            "Coffea Arabica Typica",
            "One of the oldest Arabica lines. Clean, sweet cup with a herbal edge.",
            "🍃",
        ),
        varietal(
            "sl28",
            "SL28",
            "Scott Labs 28",
            "Kenya's signature cultivar. Intense blackcurrant acidity, sometimes a savory tomato note.",
            "🫐",
        ),
        varietal(
            "pacamara",
            "Pacamara",
            "Pacamara",
            "A Pacas and Maragogipe cross. Very large beans and a complex, high-tension cup.",
            "🐘",
        ),
        varietal(
            "caturra",
            "Caturra",
            "Caturra",
            "Single-gene mutation of Bourbon. Crisp acidity, moderate sweetness, widely grown in the Americas.",
            "🍒",
        ),
        varietal(
            "catuai",
            "Catuai",
            "Catuai",
            "Caturra crossed with Mundo Novo. Productive and hardy, with nutty, caramel balance.",
            "🥜",
        ),
    ])
});

fn varietal(id: &str, name: &str, latin_name: &str, description: &str, icon: &str) -> VarietalInfo {
    VarietalInfo {
        id: id.to_string(),
        name: name.to_string(),
        latin_name: latin_name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

/// Read-only, ordered varietal catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarietalCatalog {
    entries: Vec<VarietalInfo>,
}

impl VarietalCatalog {
    /// Build a catalog; later duplicates of an id are dropped
    pub fn new(entries: Vec<VarietalInfo>) -> Self {
        let mut unique: Vec<VarietalInfo> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !unique.iter().any(|v| v.id == entry.id) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    pub fn find(&self, id: &str) -> Option<&VarietalInfo> {
        self.entries.iter().find(|v| v.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|v| v.id.as_str())
    }

    pub fn entries(&self) -> &[VarietalInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(unlocked, total)` for a user's specimen collection
    pub fn progress(&self, user: &User) -> (usize, usize) {
        let unlocked = self
            .entries
            .iter()
            .filter(|v| user.has_unlocked(&v.id))
            .count();
        (unlocked, self.entries.len())
    }

    /// Most recently unlocked varietal, shown on the profile teaser
    pub fn latest_unlocked(&self, user: &User) -> Option<&VarietalInfo> {
        user.unlocked_varietals
            .iter()
            .rev()
            .find_map(|id| self.find(id))
    }
}

impl Default for VarietalCatalog {
    fn default() -> Self {
        VARIETALS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStats;

    fn user_with(unlocked: &[&str]) -> User {
        User {
            id: "u1".into(),
            name: "Ai".into(),
            avatar: String::new(),
            bio: String::new(),
            stats: UserStats::default(),
            palate_score: 0,
            badges: vec![],
            unlocked_varietals: unlocked.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_catalog_order() {
        let ids: Vec<&str> = VARIETALS.ids().collect();
        assert_eq!(
            ids,
            vec!["geisha", "bourbon", "typica", "sl28", "pacamara", "caturra", "catuai"]
        );
    }

    #[test]
    fn test_find_and_contains() {
        assert_eq!(VARIETALS.find("sl28").map(|v| v.name.as_str()), Some("SL28"));
        assert!(VARIETALS.contains("bourbon"));
        assert!(!VARIETALS.contains("robusta"));
    }

    #[test]
    fn test_duplicates_dropped() {
        let catalog = VarietalCatalog::new(vec![
            varietal("a", "A", "", "", ""),
            varietal("a", "A2", "", "", ""),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("a").map(|v| v.name.as_str()), Some("A"));
    }

    #[test]
    fn test_progress_and_latest() {
        let user = user_with(&["sl28", "caturra"]);
        assert_eq!(VARIETALS.progress(&user), (2, 7));
        assert_eq!(
            VARIETALS.latest_unlocked(&user).map(|v| v.id.as_str()),
            Some("caturra")
        );
        assert!(VARIETALS.latest_unlocked(&user_with(&[])).is_none());
    }
}
