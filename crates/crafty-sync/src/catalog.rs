//! Recipe and specialism catalog seeding from the static JSON fixtures.
//!
//! The recipe fixture is a JSON array of
//! `{ id, name, craftedItemId, spellId, mediaUrl?, category?, reagents }`
//! entries. The specialism fixture nests groups by profession then
//! specialism: `{ profession: { specialism: { crafted_items, max_points } } }`.

use std::collections::BTreeMap;
use std::path::Path;

use crafty_core::config::CatalogConfig;
use crafty_types::{RecipeDefinition, RecipeReagents, SpecialismCategory, SpecialismGroup};
use futures::stream::{self, StreamExt};
use serde::Deserialize;

use crate::blizzard::BlizzardClient;
use crate::error::SyncError;
use crate::sink::IngestSink;

/// Game ids appear both as strings and as numbers in the fixtures.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(u64),
}

impl IdRepr {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeFixture {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    crafted_item_id: Option<IdRepr>,
    #[serde(default)]
    spell_id: Option<u64>,
    #[serde(default)]
    media_url: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    reagents: RecipeReagents,
}

#[derive(Debug, Clone, Deserialize)]
struct SpecialismFixture {
    #[serde(default)]
    crafted_items: Vec<SpecialismCategory>,
    #[serde(default)]
    max_points: u32,
}

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Recipes upserted.
    pub recipes: usize,
    /// Recipe entries skipped for having no name.
    pub skipped_recipes: usize,
    /// Specialism groups upserted.
    pub specialism_groups: usize,
}

/// Parse the recipe fixture. Entries without a name are skipped.
///
/// Returns the recipes and the number of skipped entries.
///
/// # Errors
///
/// Returns [`SyncError::Serde`] if the document is not a recipe array.
pub fn parse_recipes(json: &str) -> Result<(Vec<RecipeDefinition>, usize), SyncError> {
    let fixtures: Vec<RecipeFixture> = serde_json::from_str(json)?;
    let total = fixtures.len();

    let recipes: Vec<RecipeDefinition> = fixtures
        .into_iter()
        .filter_map(|fixture| {
            let Some(name) = fixture.name.filter(|n| !n.trim().is_empty()) else {
                tracing::warn!(recipe_id = fixture.id, "Skipping recipe with missing name");
                return None;
            };
            Some(RecipeDefinition {
                recipe_id: fixture.id,
                name,
                category: fixture.category,
                crafted_item_id: fixture.crafted_item_id.map(IdRepr::into_string),
                spell_id: fixture.spell_id,
                media_url: fixture.media_url.filter(|url| !url.is_empty()),
                reagents: fixture.reagents,
            })
        })
        .collect();

    let skipped = total.saturating_sub(recipes.len());
    Ok((recipes, skipped))
}

/// Parse the specialism fixture into groups keyed `profession#specialism`,
/// ordered by key.
///
/// # Errors
///
/// Returns [`SyncError::Serde`] if the document has the wrong shape.
pub fn parse_specialisms(json: &str) -> Result<Vec<SpecialismGroup>, SyncError> {
    let fixture: BTreeMap<String, BTreeMap<String, SpecialismFixture>> =
        serde_json::from_str(json)?;

    Ok(fixture
        .into_iter()
        .flat_map(|(profession, specialisms)| {
            specialisms.into_iter().map(move |(specialism, entry)| SpecialismGroup {
                id: SpecialismGroup::key(&profession, &specialism),
                crafted_items: entry.crafted_items,
                max_points: entry.max_points,
            })
        })
        .collect())
}

/// Load both fixtures from disk.
///
/// # Errors
///
/// Returns [`SyncError::Io`] if a file cannot be read, or
/// [`SyncError::Serde`] if one cannot be parsed.
pub async fn load_catalog(
    config: &CatalogConfig,
) -> Result<(Vec<RecipeDefinition>, usize, Vec<SpecialismGroup>), SyncError> {
    let recipes_json = tokio::fs::read_to_string(Path::new(&config.recipes_path)).await?;
    let specialism_json = tokio::fs::read_to_string(Path::new(&config.specialism_path)).await?;
    let (recipes, skipped) = parse_recipes(&recipes_json)?;
    let groups = parse_specialisms(&specialism_json)?;
    Ok((recipes, skipped, groups))
}

/// Fill in missing icon URLs from the Blizzard media endpoint.
///
/// Lookups that fail are logged and leave the recipe without an icon.
pub async fn fill_missing_media(
    client: &BlizzardClient,
    recipes: &mut [RecipeDefinition],
    max_concurrent: usize,
) -> usize {
    let wanted: Vec<(usize, String)> = recipes
        .iter()
        .enumerate()
        .filter(|(_, r)| r.media_url.is_none())
        .filter_map(|(i, r)| r.crafted_item_id.clone().map(|id| (i, id)))
        .collect();

    let found: Vec<(usize, Option<String>)> = stream::iter(wanted)
        .map(|(i, item_id)| async move {
            match client.item_media_url(&item_id).await {
                Ok(url) => (i, url),
                Err(e) => {
                    tracing::warn!(item_id, error = %e, "Failed to fetch item media");
                    (i, None)
                }
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut filled = 0_usize;
    for (i, url) in found {
        if let (Some(url), Some(recipe)) = (url, recipes.get_mut(i)) {
            recipe.media_url = Some(url);
            filled = filled.saturating_add(1);
        }
    }
    tracing::info!(filled, "Filled missing recipe media");
    filled
}

/// Upsert parsed catalogs into `sink`.
///
/// # Errors
///
/// Returns [`SyncError::Store`] if a write fails.
pub async fn seed_catalog<K: IngestSink>(
    sink: &K,
    recipes: &[RecipeDefinition],
    groups: &[SpecialismGroup],
) -> Result<SeedReport, SyncError> {
    let mut report = SeedReport::default();

    for recipe in recipes {
        sink.upsert_recipe(recipe).await?;
        report.recipes = report.recipes.saturating_add(1);
    }
    tracing::info!(recipes = report.recipes, "Recipe catalog seeded");

    for group in groups {
        sink.upsert_specialism_group(group).await?;
        report.specialism_groups = report.specialism_groups.saturating_add(1);
    }
    tracing::info!(
        specialism_groups = report.specialism_groups,
        "Specialism catalog seeded"
    );

    Ok(report)
}
