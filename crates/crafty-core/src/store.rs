//! The store contract the lookups read from, and an in-memory store.
//!
//! [`CraftingStore`] is the boundary between the scoring engine and
//! whatever holds the catalogs and the roster. Every method returns a
//! `Send` future so lookups can run inside Axum handlers and spawned
//! tasks.
//!
//! [`MemoryStore`] keeps everything in ordered maps. It backs the tests and
//! fixture-only deployments, and receives writes from the ingestion jobs
//! the same way the database store does.

use std::collections::BTreeMap;
use std::future::Future;

use crafty_types::{CharacterKey, CharacterRecord, RecipeDefinition, SpecialismGroup};
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Read access to the recipe catalog, specialism catalog and roster.
///
/// Implementations must return specialism groups ordered by id so that
/// "first matching group" is deterministic.
pub trait CraftingStore: Send + Sync {
    /// Fetch a recipe by its exact display name.
    fn find_recipe_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<RecipeDefinition>, StoreError>> + Send;

    /// Fetch every specialism group, ordered by id.
    fn find_specialism_groups(
        &self,
    ) -> impl Future<Output = Result<Vec<SpecialismGroup>, StoreError>> + Send;

    /// Fetch every character with a profession listing `name`, compared
    /// case-insensitively but otherwise exactly.
    fn find_characters_knowing_recipe(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<CharacterRecord>, StoreError>> + Send;

    /// Fetch characters by normalized name, narrowed to one realm when
    /// `realm` is given.
    fn find_character_by_key(
        &self,
        name: &str,
        realm: Option<&str>,
    ) -> impl Future<Output = Result<Vec<CharacterRecord>, StoreError>> + Send;

    /// Check that the store is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryData {
    recipes: BTreeMap<String, RecipeDefinition>,
    specialisms: BTreeMap<String, SpecialismGroup>,
    characters: BTreeMap<CharacterKey, CharacterRecord>,
}

/// In-memory [`CraftingStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with catalogs and roster.
    pub fn with_data(
        recipes: impl IntoIterator<Item = RecipeDefinition>,
        specialisms: impl IntoIterator<Item = SpecialismGroup>,
        characters: impl IntoIterator<Item = CharacterRecord>,
    ) -> Self {
        let data = MemoryData {
            recipes: recipes.into_iter().map(|r| (r.name.clone(), r)).collect(),
            specialisms: specialisms.into_iter().map(|g| (g.id.clone(), g)).collect(),
            characters: characters.into_iter().map(|c| (c.key(), c)).collect(),
        };
        Self {
            data: RwLock::new(data),
        }
    }

    /// Insert or replace a recipe, keyed by name.
    pub async fn upsert_recipe(&self, recipe: RecipeDefinition) {
        let mut data = self.data.write().await;
        // Recipes are identified by id; a rename replaces the old entry.
        data.recipes.retain(|_, r| r.recipe_id != recipe.recipe_id);
        data.recipes.insert(recipe.name.clone(), recipe);
    }

    /// Insert or replace a specialism group, keyed by id.
    pub async fn upsert_specialism_group(&self, group: SpecialismGroup) {
        self.data
            .write()
            .await
            .specialisms
            .insert(group.id.clone(), group);
    }

    /// Insert or replace a character, keyed by `name#realm`.
    pub async fn upsert_character(&self, character: CharacterRecord) {
        self.data
            .write()
            .await
            .characters
            .insert(character.key(), character);
    }

    /// Keys of every stored character.
    pub async fn character_keys(&self) -> Vec<CharacterKey> {
        self.data.read().await.characters.keys().cloned().collect()
    }

    /// Remove the given characters. Returns how many were removed.
    pub async fn remove_characters(&self, keys: &[CharacterKey]) -> usize {
        let mut data = self.data.write().await;
        keys.iter()
            .filter(|key| data.characters.remove(*key).is_some())
            .count()
    }

    /// Number of recipes in the catalog.
    pub async fn recipe_count(&self) -> usize {
        self.data.read().await.recipes.len()
    }
}

impl CraftingStore for MemoryStore {
    async fn find_recipe_by_name(&self, name: &str) -> Result<Option<RecipeDefinition>, StoreError> {
        Ok(self.data.read().await.recipes.get(name).cloned())
    }

    async fn find_specialism_groups(&self) -> Result<Vec<SpecialismGroup>, StoreError> {
        Ok(self.data.read().await.specialisms.values().cloned().collect())
    }

    async fn find_characters_knowing_recipe(
        &self,
        name: &str,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        Ok(self
            .data
            .read()
            .await
            .characters
            .values()
            .filter(|c| c.knows_ignoring_case(name))
            .cloned()
            .collect())
    }

    async fn find_character_by_key(
        &self,
        name: &str,
        realm: Option<&str>,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        let data = self.data.read().await;
        let found = match realm {
            Some(realm) => data
                .characters
                .get(&CharacterKey::new(name, realm))
                .cloned()
                .into_iter()
                .collect(),
            None => data
                .characters
                .values()
                .filter(|c| c.character_name == name)
                .cloned()
                .collect(),
        };
        Ok(found)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crafty_types::{ProfessionRecord, RecipeReagents, SkillPoints, SpecialismCategory};

    use super::*;

    fn character(name: &str, realm: &str, recipes: &[&str]) -> CharacterRecord {
        CharacterRecord {
            character_name: name.to_owned(),
            realm: realm.to_owned(),
            level: 80,
            professions: vec![ProfessionRecord {
                name: "Tailoring".to_owned(),
                skill_points: SkillPoints::new(50, 100),
                recipes: recipes.iter().map(|r| (*r).to_owned()).collect(),
            }],
        }
    }

    fn recipe(id: u64, name: &str) -> RecipeDefinition {
        RecipeDefinition {
            recipe_id: id,
            name: name.to_owned(),
            category: None,
            crafted_item_id: None,
            spell_id: None,
            media_url: None,
            reagents: RecipeReagents::default(),
        }
    }

    #[tokio::test]
    async fn recipe_lookup_is_case_sensitive() {
        let store = MemoryStore::with_data([recipe(1, "Weavercloth Bolt")], [], []);
        let exact = store.find_recipe_by_name("Weavercloth Bolt").await;
        let lower = store.find_recipe_by_name("weavercloth bolt").await;
        assert!(matches!(exact, Ok(Some(_))));
        assert!(matches!(lower, Ok(None)));
    }

    #[tokio::test]
    async fn characters_knowing_recipe_ignore_case() {
        let store = MemoryStore::with_data(
            [],
            [],
            [
                character("anna", "quelthalas", &["Weavercloth Bolt"]),
                character("bob", "quelthalas", &["Dawnweave Bolt"]),
            ],
        );
        let found = store
            .find_characters_knowing_recipe("WEAVERCLOTH BOLT")
            .await
            .unwrap_or_default();
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|c| c.character_name.as_str()), Some("anna"));

        let partial = store
            .find_characters_knowing_recipe("Weavercloth")
            .await
            .unwrap_or_default();
        assert!(partial.is_empty());
    }

    #[tokio::test]
    async fn character_by_key_with_and_without_realm() {
        let store = MemoryStore::with_data(
            [],
            [],
            [
                character("anna", "quelthalas", &[]),
                character("anna", "draenor", &[]),
            ],
        );

        let all = store.find_character_by_key("anna", None).await.unwrap_or_default();
        assert_eq!(all.len(), 2);

        let one = store
            .find_character_by_key("anna", Some("draenor"))
            .await
            .unwrap_or_default();
        assert_eq!(one.len(), 1);
        assert_eq!(one.first().map(|c| c.realm.as_str()), Some("draenor"));
    }

    #[tokio::test]
    async fn specialism_groups_ordered_by_id() {
        let group = |id: &str| SpecialismGroup {
            id: id.to_owned(),
            crafted_items: vec![SpecialismCategory {
                category: "c".to_owned(),
                items: Vec::new(),
            }],
            max_points: 0,
        };
        let store = MemoryStore::with_data(
            [],
            [group("Tailoring#Threads"), group("Alchemy#Potions")],
            [],
        );
        let ids: Vec<String> = store
            .find_specialism_groups()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["Alchemy#Potions", "Tailoring#Threads"]);
    }

    #[tokio::test]
    async fn upsert_recipe_replaces_renamed_entry() {
        let store = MemoryStore::new();
        store.upsert_recipe(recipe(7, "Old Name")).await;
        store.upsert_recipe(recipe(7, "New Name")).await;
        assert_eq!(store.recipe_count().await, 1);
        assert!(matches!(store.find_recipe_by_name("Old Name").await, Ok(None)));
    }

    #[tokio::test]
    async fn remove_characters_counts_removed() {
        let store = MemoryStore::with_data([], [], [character("anna", "quelthalas", &[])]);
        let removed = store
            .remove_characters(&[
                CharacterKey::new("anna", "quelthalas"),
                CharacterKey::new("ghost", "quelthalas"),
            ])
            .await;
        assert_eq!(removed, 1);
        assert!(store.character_keys().await.is_empty());
    }
}
