//! Crafter ranking for a recipe.
//!
//! [`rank_crafters`] runs the whole lookup against a [`CraftingStore`]:
//!
//! 1. Recipe existence check (exact, case-sensitive name)
//! 2. Specialism resolution (first listing group, absence tolerated)
//! 3. Candidate query (case-insensitive exact recipe match)
//! 4. Per-candidate scoring ([`crate::scoring`])
//! 5. Ranking, capped to the configured number of crafters
//! 6. Reagent lists capped for display
//!
//! The lookup holds no state and never writes.

use crafty_types::RankedResult;
use tracing::{debug, info};

use crate::config::ScoringConfig;
use crate::error::LookupError;
use crate::scoring::{self, ScoredCrafter};
use crate::store::CraftingStore;

/// Rank the guild's crafters of `recipe_name`.
///
/// A known recipe nobody can craft yields `crafters: []`, not an error.
///
/// # Errors
///
/// Returns [`LookupError::RecipeNotFound`] if the catalog has no recipe
/// with this exact name, or [`LookupError::DataSourceUnavailable`] if the
/// store fails.
pub async fn rank_crafters<S>(
    store: &S,
    recipe_name: &str,
    weights: &ScoringConfig,
) -> Result<RankedResult, LookupError>
where
    S: CraftingStore + ?Sized,
{
    let ranked = score_crafters(store, recipe_name, weights).await?;
    Ok(ranked.result)
}

/// A ranked result together with the score breakdowns behind it.
#[derive(Debug, Clone)]
pub struct RankedCrafters {
    /// The serializable result.
    pub result: RankedResult,
    /// Breakdown per ranked crafter, in result order.
    pub scored: Vec<ScoredCrafter>,
    /// Id of the matched specialism group, if any.
    pub specialism: Option<String>,
}

/// Like [`rank_crafters`], but keeps the score breakdowns and matched
/// specialism for callers that explain the ranking.
///
/// # Errors
///
/// See [`rank_crafters`].
pub async fn score_crafters<S>(
    store: &S,
    recipe_name: &str,
    weights: &ScoringConfig,
) -> Result<RankedCrafters, LookupError>
where
    S: CraftingStore + ?Sized,
{
    let Some(recipe) = store.find_recipe_by_name(recipe_name).await? else {
        info!(recipe = recipe_name, "recipe not in catalog");
        return Err(LookupError::RecipeNotFound(recipe_name.to_owned()));
    };

    let groups = store.find_specialism_groups().await?;
    let specialism = scoring::match_specialism(&groups, recipe_name);
    match specialism {
        Some(group) => debug!(recipe = recipe_name, specialism = group.id, "specialism matched"),
        None => debug!(recipe = recipe_name, "no specialism, scoring without it"),
    }

    let candidates = store.find_characters_knowing_recipe(recipe_name).await?;
    let scored: Vec<ScoredCrafter> = candidates
        .iter()
        .filter_map(|c| scoring::score_candidate(c, recipe_name, specialism, weights))
        .collect();
    let scored_count = scored.len();
    let ranked = scoring::rank(scored, weights.max_crafters);

    info!(
        recipe = recipe_name,
        candidates = candidates.len(),
        scored = scored_count,
        returned = ranked.len(),
        "ranked crafters"
    );

    let result = RankedResult {
        name: recipe.name,
        category: recipe.category,
        media_url: recipe.media_url,
        reagents: recipe
            .reagents
            .truncated(weights.max_reagents, weights.max_optional_reagents),
        crafters: ranked.iter().map(|s| s.summary.clone()).collect(),
    };

    Ok(RankedCrafters {
        result,
        scored: ranked,
        specialism: specialism.map(|g| g.id.clone()),
    })
}
