//! Character lookup and recipe paging.
//!
//! Separate from scoring: resolves a character by name (optionally
//! realm-qualified) for a direct profession listing.

use crafty_types::{CharacterMatch, CharacterRecord, RecipePage};

use crate::error::LookupError;
use crate::names::{normalize_character_name, normalize_realm};
use crate::store::CraftingStore;

/// Recipes per page when the caller does not choose.
pub const DEFAULT_RECIPES_PER_PAGE: u32 = 10;

/// Outcome of a character lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterLookup {
    /// No character with this name (on this realm).
    NotFound,
    /// Exactly one character.
    Found(Box<CharacterRecord>),
    /// The name exists on several realms; pick one to see professions.
    Ambiguous(Vec<CharacterMatch>),
}

/// Resolve a character by name, and realm when given.
///
/// Both inputs are normalized the way the roster keys were built. With a
/// realm the `name#realm` key is matched exactly; without one every realm
/// is searched.
///
/// # Errors
///
/// Returns [`LookupError::DataSourceUnavailable`] if the store fails.
pub async fn lookup_character<S>(
    store: &S,
    name: &str,
    realm: Option<&str>,
) -> Result<CharacterLookup, LookupError>
where
    S: CraftingStore + ?Sized,
{
    let name = normalize_character_name(name);
    let realm = realm.map(normalize_realm).filter(|r| !r.is_empty());
    if name.is_empty() {
        return Ok(CharacterLookup::NotFound);
    }

    let mut found = store.find_character_by_key(&name, realm.as_deref()).await?;
    tracing::debug!(
        character = name,
        realm = realm.as_deref().unwrap_or("*"),
        matches = found.len(),
        "character lookup"
    );

    let lookup = match found.len() {
        0 => CharacterLookup::NotFound,
        1 => found
            .pop()
            .map_or(CharacterLookup::NotFound, |c| CharacterLookup::Found(Box::new(c))),
        _ => {
            found.sort_by(|a, b| a.realm.cmp(&b.realm));
            CharacterLookup::Ambiguous(
                found
                    .into_iter()
                    .map(|c| CharacterMatch {
                        name: c.character_name,
                        realm: c.realm,
                        level: c.level,
                    })
                    .collect(),
            )
        }
    };
    Ok(lookup)
}

/// One page of a character's recipes in a profession.
///
/// `profession` is matched ignoring case; `None` selects the first listed
/// profession. `page` is 1-based and clamped into range, and a character
/// with no recipes still has one (empty) page. Returns `None` when the
/// character has no such profession.
pub fn recipe_page(
    character: &CharacterRecord,
    profession: Option<&str>,
    page: u32,
    per_page: u32,
) -> Option<RecipePage> {
    let selected = match profession {
        Some(wanted) => character
            .professions
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted)),
        None => character.professions.first(),
    }?;

    let per_page = usize::try_from(per_page.max(1)).unwrap_or(usize::MAX);
    let total = selected.recipes.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = usize::try_from(page)
        .unwrap_or(usize::MAX)
        .clamp(1, total_pages);
    let skip = page.saturating_sub(1).saturating_mul(per_page);

    Some(RecipePage {
        character_name: character.character_name.clone(),
        realm: character.realm.clone(),
        profession: selected.name.clone(),
        page: u32::try_from(page).unwrap_or(u32::MAX),
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        recipes: selected
            .recipes
            .iter()
            .skip(skip)
            .take(per_page)
            .cloned()
            .collect(),
    })
}
