//! Profession extraction from a Blizzard professions payload.
//!
//! Keeps crafting professions only, reads the tracked expansion tier of
//! each and drops utility "recipes" that every crafter of a profession
//! knows and nobody asks for.

use std::collections::BTreeSet;

use crafty_types::{ProfessionRecord, SkillPoints};

use crate::blizzard::{CharacterProfessions, ProfessionEntry};

/// Herbalism, Mining, Skinning, Fishing and Archaeology.
pub const GATHERING_PROFESSION_IDS: [u32; 5] = [182, 186, 393, 356, 794];

/// Known "recipes" that are profession utilities, not craftable items.
pub const UTILITY_RECIPES: [&str; 14] = [
    "Recraft Equipment",
    "Unraveling",
    "Prospecting",
    "Milling",
    "Disenchanting",
    "Smelting",
    "Skinning",
    "Alchemy Transmute",
    "Alchemy Cauldrons",
    "Alchemy Oils",
    "Enchanting Illusions",
    "Enchanting Wands",
    "Engineering Explosives",
    "Lockpicking",
];

/// Name stored for a known recipe the API sent without a name.
pub const UNKNOWN_RECIPE: &str = "Unknown Recipe";

/// Whether a profession id is a gathering profession.
pub fn is_gathering(profession_id: u32) -> bool {
    GATHERING_PROFESSION_IDS.contains(&profession_id)
}

/// Whether a recipe name is a profession utility.
pub fn is_utility_recipe(name: &str) -> bool {
    UTILITY_RECIPES.contains(&name)
}

/// Crafting professions with their tracked-tier progress.
///
/// Known recipes are de-duplicated, keeping first-seen order. Professions without a tier whose name starts with `tier_prefix`
/// (ignoring case) are left out. Order follows the payload.
pub fn extract_crafting_professions(
    payload: &CharacterProfessions,
    tier_prefix: &str,
) -> Vec<ProfessionRecord> {
    payload
        .primaries
        .iter()
        .filter(|entry| !is_gathering(entry.profession.id))
        .filter_map(|entry| tracked_tier(entry, tier_prefix))
        .collect()
}

fn tracked_tier(entry: &ProfessionEntry, tier_prefix: &str) -> Option<ProfessionRecord> {
    let prefix = tier_prefix.to_lowercase();
    let tier = entry
        .tiers
        .iter()
        .find(|t| t.tier.name.to_lowercase().starts_with(&prefix))?;

    let mut seen = BTreeSet::new();
    let recipes = tier
        .known_recipes
        .iter()
        .map(|r| r.name.as_deref().unwrap_or(UNKNOWN_RECIPE))
        .filter(|name| !is_utility_recipe(name))
        .filter(|name| seen.insert(*name))
        .map(ToOwned::to_owned)
        .collect();

    Some(ProfessionRecord {
        name: entry.profession.name.clone(),
        skill_points: SkillPoints::new(tier.skill_points, tier.max_skill_points),
        recipes,
    })
}
