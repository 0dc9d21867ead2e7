//! Specialism catalog entries.
//!
//! A specialism group is keyed `profession#specialism` and lists named item
//! categories. Categories are disjoint in intent only; nothing here relies
//! on it.

use serde::{Deserialize, Serialize};

/// A named category of recipes inside a specialism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialismCategory {
    /// Category name.
    pub category: String,
    /// Recipe display names belonging to the category.
    #[serde(default)]
    pub items: Vec<String>,
}

impl SpecialismCategory {
    /// Whether `recipe_name` is listed in this category (case-sensitive).
    pub fn contains(&self, recipe_name: &str) -> bool {
        self.items.iter().any(|item| item == recipe_name)
    }
}

/// A specialism sub-track and the categories it rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialismGroup {
    /// Group key, `profession#specialism`.
    pub id: String,
    /// Categories of the group, in catalog order.
    #[serde(default)]
    pub crafted_items: Vec<SpecialismCategory>,
    /// Maximum achievable points in the specialism.
    #[serde(default)]
    pub max_points: u32,
}

impl SpecialismGroup {
    /// Build the group key from a profession and specialism name.
    pub fn key(profession: &str, specialism: &str) -> String {
        format!("{profession}#{specialism}")
    }

    /// Whether any category of this group lists `recipe_name`.
    pub fn lists(&self, recipe_name: &str) -> bool {
        self.crafted_items.iter().any(|c| c.contains(recipe_name))
    }
}
