//! Write side of the stores, as used by the ingestion jobs.

use std::future::Future;

use crafty_core::{MemoryStore, StoreError};
use crafty_db::PostgresCraftingStore;
use crafty_types::{CharacterKey, CharacterRecord, RecipeDefinition, SpecialismGroup};

use crate::error::SyncError;

/// A store the catalog seeding and guild sync can write to.
pub trait IngestSink: Send + Sync {
    /// Insert or replace a recipe by id.
    fn upsert_recipe(
        &self,
        recipe: &RecipeDefinition,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Insert or replace a specialism group by key.
    fn upsert_specialism_group(
        &self,
        group: &SpecialismGroup,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Insert or replace a character by key.
    fn upsert_character(
        &self,
        character: &CharacterRecord,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Keys of every stored character.
    fn character_keys(&self) -> impl Future<Output = Result<Vec<CharacterKey>, SyncError>> + Send;

    /// Remove characters. Returns how many were removed.
    fn remove_characters(
        &self,
        keys: &[CharacterKey],
    ) -> impl Future<Output = Result<u64, SyncError>> + Send;
}

impl IngestSink for MemoryStore {
    async fn upsert_recipe(&self, recipe: &RecipeDefinition) -> Result<(), SyncError> {
        Self::upsert_recipe(self, recipe.clone()).await;
        Ok(())
    }

    async fn upsert_specialism_group(&self, group: &SpecialismGroup) -> Result<(), SyncError> {
        Self::upsert_specialism_group(self, group.clone()).await;
        Ok(())
    }

    async fn upsert_character(&self, character: &CharacterRecord) -> Result<(), SyncError> {
        Self::upsert_character(self, character.clone()).await;
        Ok(())
    }

    async fn character_keys(&self) -> Result<Vec<CharacterKey>, SyncError> {
        Ok(Self::character_keys(self).await)
    }

    async fn remove_characters(&self, keys: &[CharacterKey]) -> Result<u64, SyncError> {
        let removed = Self::remove_characters(self, keys).await;
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

impl IngestSink for PostgresCraftingStore {
    async fn upsert_recipe(&self, recipe: &RecipeDefinition) -> Result<(), SyncError> {
        Self::upsert_recipe(self, recipe)
            .await
            .map_err(|e| SyncError::Store(StoreError::from(e)))
    }

    async fn upsert_specialism_group(&self, group: &SpecialismGroup) -> Result<(), SyncError> {
        Self::upsert_specialism_group(self, group)
            .await
            .map_err(|e| SyncError::Store(StoreError::from(e)))
    }

    async fn upsert_character(&self, character: &CharacterRecord) -> Result<(), SyncError> {
        Self::upsert_character(self, character)
            .await
            .map_err(|e| SyncError::Store(StoreError::from(e)))
    }

    async fn character_keys(&self) -> Result<Vec<CharacterKey>, SyncError> {
        let keys = Self::character_keys(self)
            .await
            .map_err(|e| SyncError::Store(StoreError::from(e)))?;
        Ok(keys.iter().filter_map(|k| parse_key(k)).collect())
    }

    async fn remove_characters(&self, keys: &[CharacterKey]) -> Result<u64, SyncError> {
        Self::remove_characters(self, keys)
            .await
            .map_err(|e| SyncError::Store(StoreError::from(e)))
    }
}

/// Rebuild a key from its stored `name#realm` form.
fn parse_key(stored: &str) -> Option<CharacterKey> {
    let (name, realm) = stored.rsplit_once('#')?;
    Some(CharacterKey::new(name, realm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_keys_parse_back() {
        assert_eq!(
            parse_key("anna#quelthalas"),
            Some(CharacterKey::new("anna", "quelthalas"))
        );
        assert_eq!(parse_key("no-separator"), None);
    }
}
