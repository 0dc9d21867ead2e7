//! Recipe catalog entries.
//!
//! A [`RecipeDefinition`] is immutable reference data keyed by its display
//! name. Field names on the wire follow the recipe fixture produced by the
//! catalog scraper (`craftedItemId`, `optionalReagents`, ...).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single reagent line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Reagent {
    /// Reagent display name.
    pub name: String,
    /// Units consumed per craft.
    pub quantity: u32,
    /// Game item identifier, when the source listed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

/// Required and optional reagents of a recipe, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct RecipeReagents {
    /// Reagents that must be supplied.
    #[serde(default)]
    pub reagents: Vec<Reagent>,
    /// Reagents that may be supplied to improve the result.
    #[serde(default)]
    pub optional_reagents: Vec<Reagent>,
}

impl RecipeReagents {
    /// Copy of these lists truncated to at most `max_required` required and
    /// `max_optional` optional entries. Truncation keeps catalog order.
    pub fn truncated(&self, max_required: usize, max_optional: usize) -> Self {
        Self {
            reagents: self.reagents.iter().take(max_required).cloned().collect(),
            optional_reagents: self
                .optional_reagents
                .iter()
                .take(max_optional)
                .cloned()
                .collect(),
        }
    }
}

/// A craftable item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Stable recipe identifier from the game data API.
    pub recipe_id: u64,
    /// Display name; the unique lookup key of the catalog.
    pub name: String,
    /// Catalog category, when known.
    #[serde(default)]
    pub category: Option<String>,
    /// Identifier of the item the recipe produces.
    #[serde(default)]
    pub crafted_item_id: Option<String>,
    /// Identifier of the crafting spell.
    #[serde(default)]
    pub spell_id: Option<u64>,
    /// Icon URL of the crafted item.
    #[serde(default)]
    pub media_url: Option<String>,
    /// Reagent lists.
    #[serde(default)]
    pub reagents: RecipeReagents,
}
