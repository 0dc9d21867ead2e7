//! Result shapes produced by the lookups.
//!
//! [`RankedResult`] serializes identically for every transport:
//!
//! ```text
//! { name, category, mediaUrl, reagents: { reagents, optionalReagents },
//!   crafters: [{ character_name, realm, level, profession: { name, final_score } }] }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::recipe::RecipeReagents;

/// The profession a crafter was ranked by, with its final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProfessionScore {
    /// Profession display name.
    pub name: String,
    /// Composite ranking value.
    pub final_score: u32,
}

/// One ranked crafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CrafterSummary {
    /// Character name.
    pub character_name: String,
    /// Realm slug.
    pub realm: String,
    /// Character level.
    pub level: u32,
    /// Profession that knows the recipe, and the score.
    pub profession: ProfessionScore,
}

/// Crafters of a recipe, best first, with the recipe's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Recipe display name.
    pub name: String,
    /// Recipe category, when known.
    pub category: Option<String>,
    /// Icon URL of the crafted item.
    pub media_url: Option<String>,
    /// Reagent lists, capped for display.
    pub reagents: RecipeReagents,
    /// Ranked crafters, top crafter first.
    pub crafters: Vec<CrafterSummary>,
}

impl RankedResult {
    /// The highest-ranked crafter, if anyone knows the recipe.
    pub fn top_crafter(&self) -> Option<&CrafterSummary> {
        self.crafters.first()
    }

    /// Every crafter after the top one.
    pub fn other_crafters(&self) -> &[CrafterSummary] {
        self.crafters.get(1..).unwrap_or_default()
    }
}

/// Disambiguation entry when a name exists on several realms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CharacterMatch {
    /// Character name.
    pub name: String,
    /// Realm slug.
    pub realm: String,
    /// Character level.
    pub level: u32,
}

/// One page of a character's recipes in a single profession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RecipePage {
    /// Character name.
    pub character_name: String,
    /// Realm slug.
    pub realm: String,
    /// Profession the recipes belong to.
    pub profession: String,
    /// 1-based page number actually served.
    pub page: u32,
    /// Total number of pages (at least 1).
    pub total_pages: u32,
    /// Recipes on this page.
    pub recipes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crafter(name: &str, score: u32) -> CrafterSummary {
        CrafterSummary {
            character_name: name.to_owned(),
            realm: "quelthalas".to_owned(),
            level: 80,
            profession: ProfessionScore {
                name: "Blacksmithing".to_owned(),
                final_score: score,
            },
        }
    }

    #[test]
    fn serializes_transport_shape() {
        let result = RankedResult {
            name: "Frostforged Sabatons".to_owned(),
            category: Some("Plate Boots".to_owned()),
            media_url: None,
            reagents: RecipeReagents::default(),
            crafters: vec![crafter("chara", 130)],
        };

        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["name"], "Frostforged Sabatons");
        assert!(json.get("mediaUrl").is_some());
        assert!(json["reagents"]["optionalReagents"].is_array());
        assert_eq!(json["crafters"][0]["character_name"], "chara");
        assert_eq!(json["crafters"][0]["profession"]["final_score"], 130);
    }

    #[test]
    fn top_and_others_split() {
        let mut result = RankedResult {
            name: "x".to_owned(),
            category: None,
            media_url: None,
            reagents: RecipeReagents::default(),
            crafters: Vec::new(),
        };
        assert!(result.top_crafter().is_none());
        assert!(result.other_crafters().is_empty());

        result.crafters = vec![crafter("a", 3), crafter("b", 2), crafter("c", 1)];
        assert_eq!(result.top_crafter().map(|c| c.character_name.as_str()), Some("a"));
        assert_eq!(result.other_crafters().len(), 2);
    }
}
