//! REST endpoint handlers for the lookup API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/who/{recipe}` | Ranked crafters of a recipe |
//! | `GET` | `/professions/{name}` | Character professions, or the realms to pick from |
//! | `GET` | `/professions/{name}/{realm}` | Character professions on one realm |
//! | `GET` | `/professions/{name}/{realm}/recipes` | One page of known recipes |
//! | `GET` | `/health` | Store reachability |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use crafty_core::{
    CharacterLookup, CraftingStore, DEFAULT_RECIPES_PER_PAGE, lookup_character, rank_crafters,
    recipe_page,
};
use crafty_types::{CharacterMatch, CharacterRecord, RankedResult, RecipePage};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Largest page size a caller may ask for.
pub const MAX_RECIPES_PER_PAGE: u32 = 50;

// ---------------------------------------------------------------------------
// Query and response shapes
// ---------------------------------------------------------------------------

/// Query parameters for `GET /professions/{name}/{realm}/recipes`.
#[derive(Debug, Default, serde::Deserialize)]
pub struct RecipesQuery {
    /// Profession to list, ignoring case. Defaults to the first one.
    pub profession: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Recipes per page.
    pub per_page: Option<String>,
}

/// Body returned when a name exists on several realms.
#[derive(Debug, Serialize)]
pub struct MultipleMatches {
    /// Always `Multiple matches found`.
    pub message: &'static str,
    /// One entry per realm.
    pub characters: Vec<CharacterMatch>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct Health {
    /// `ok` when the store answered.
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// GET /who/{recipe}
// ---------------------------------------------------------------------------

/// Rank the guild's crafters of a recipe.
///
/// # Errors
///
/// 404 for an unknown recipe, 503 when the store is down.
pub async fn who<S: CraftingStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(recipe): Path<String>,
) -> Result<Json<RankedResult>, ApiError> {
    let recipe = recipe.trim();
    let result = rank_crafters(state.store.as_ref(), recipe, &state.scoring).await?;
    tracing::info!(
        recipe,
        crafters = result.crafters.len(),
        "Served crafter lookup"
    );
    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// GET /professions/...
// ---------------------------------------------------------------------------

/// Professions of a character by name, on any realm.
///
/// # Errors
///
/// 404 when nobody has this name, 503 when the store is down.
pub async fn professions_by_name<S: CraftingStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    match lookup_character(state.store.as_ref(), &name, None).await? {
        CharacterLookup::NotFound => Err(character_not_found(&name, None)),
        CharacterLookup::Found(character) => Ok(Json(*character).into_response()),
        CharacterLookup::Ambiguous(characters) => Ok(Json(MultipleMatches {
            message: "Multiple matches found",
            characters,
        })
        .into_response()),
    }
}

/// Professions of a character on one realm.
///
/// # Errors
///
/// 404 when there is no such character, 503 when the store is down.
pub async fn professions_by_realm<S: CraftingStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((name, realm)): Path<(String, String)>,
) -> Result<Json<CharacterRecord>, ApiError> {
    let character = find_on_realm(state.store.as_ref(), &name, &realm).await?;
    Ok(Json(character))
}

/// One page of a character's known recipes in a profession.
///
/// # Errors
///
/// 400 for a malformed page number, 404 when the character or the
/// profession is unknown, 503 when the store is down.
pub async fn recipes<S: CraftingStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((name, realm)): Path<(String, String)>,
    Query(query): Query<RecipesQuery>,
) -> Result<Json<RecipePage>, ApiError> {
    let page = parse_positive(query.page.as_deref(), "page")?.unwrap_or(1);
    let per_page = parse_positive(query.per_page.as_deref(), "per_page")?
        .unwrap_or(DEFAULT_RECIPES_PER_PAGE)
        .min(MAX_RECIPES_PER_PAGE);

    let character = find_on_realm(state.store.as_ref(), &name, &realm).await?;
    recipe_page(&character, query.profession.as_deref(), page, per_page)
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "{} has no profession {}",
                character.character_name,
                query.profession.as_deref().unwrap_or("at all")
            ))
        })
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report whether the store answers.
///
/// # Errors
///
/// 503 when the store ping fails.
pub async fn health<S: CraftingStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Health>, ApiError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;
    Ok(Json(Health { status: "ok" }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_on_realm<S: CraftingStore>(
    store: &S,
    name: &str,
    realm: &str,
) -> Result<CharacterRecord, ApiError> {
    match lookup_character(store, name, Some(realm)).await? {
        CharacterLookup::Found(character) => Ok(*character),
        CharacterLookup::NotFound | CharacterLookup::Ambiguous(_) => {
            Err(character_not_found(name, Some(realm)))
        }
    }
}

fn character_not_found(name: &str, realm: Option<&str>) -> ApiError {
    match realm {
        Some(realm) => ApiError::NotFound(format!("No character {name} found on {realm}.")),
        None => ApiError::NotFound(format!("No character {name} found.")),
    }
}

fn parse_positive(raw: Option<&str>, field: &str) -> Result<Option<u32>, ApiError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|e| ApiError::InvalidQuery(format!("{field} must be a positive number: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_positive_accepts_missing_and_numbers() {
        assert!(matches!(parse_positive(None, "page"), Ok(None)));
        assert!(matches!(parse_positive(Some(""), "page"), Ok(None)));
        assert!(matches!(parse_positive(Some("3"), "page"), Ok(Some(3))));
        assert!(matches!(
            parse_positive(Some("-1"), "page"),
            Err(ApiError::InvalidQuery(_))
        ));
    }
}
