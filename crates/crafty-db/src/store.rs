//! [`CraftingStore`] backed by `PostgreSQL`.
//!
//! Each call acquires a pool from the shared [`ConnectionManager`], so a
//! database restart is survived without restarting the process.

use std::sync::Arc;

use crafty_core::{CraftingStore, StoreError};
use crafty_types::{CharacterKey, CharacterRecord, RecipeDefinition, SpecialismGroup};

use crate::error::DbError;
use crate::postgres::{ConnectionManager, PostgresConfig, PostgresPool};
use crate::recipe_store::RecipeStore;
use crate::roster_store::RosterStore;
use crate::specialism_store::SpecialismStore;

/// The catalogs and roster in `PostgreSQL`.
#[derive(Clone)]
pub struct PostgresCraftingStore {
    connections: Arc<ConnectionManager>,
}

impl PostgresCraftingStore {
    /// Create a store that connects lazily with `config`.
    pub fn new(config: PostgresConfig) -> Self {
        Self::with_manager(Arc::new(ConnectionManager::new(config)))
    }

    /// Create a store sharing an existing connection manager.
    pub const fn with_manager(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    async fn pool(&self) -> Result<PostgresPool, DbError> {
        self.connections.acquire().await
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if connecting or migrating fails.
    pub async fn migrate(&self) -> Result<(), DbError> {
        self.pool().await?.run_migrations().await
    }

    /// Insert or replace a recipe by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    pub async fn upsert_recipe(&self, recipe: &RecipeDefinition) -> Result<(), DbError> {
        let pool = self.pool().await?;
        RecipeStore::new(pool.pool()).upsert(recipe).await
    }

    /// Insert or replace a specialism group by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    pub async fn upsert_specialism_group(&self, group: &SpecialismGroup) -> Result<(), DbError> {
        let pool = self.pool().await?;
        SpecialismStore::new(pool.pool()).upsert(group).await
    }

    /// Insert or replace a character by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    pub async fn upsert_character(&self, character: &CharacterRecord) -> Result<(), DbError> {
        let pool = self.pool().await?;
        RosterStore::new(pool.pool()).upsert(character).await
    }

    /// Keys of every stored character.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    pub async fn character_keys(&self) -> Result<Vec<String>, DbError> {
        let pool = self.pool().await?;
        RosterStore::new(pool.pool()).list_keys().await
    }

    /// Delete the given characters. Returns how many rows were removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the delete fails.
    pub async fn remove_characters(&self, keys: &[CharacterKey]) -> Result<u64, DbError> {
        let keys: Vec<String> = keys.iter().map(|k| k.as_str().to_owned()).collect();
        let pool = self.pool().await?;
        RosterStore::new(pool.pool()).delete_keys(&keys).await
    }

    /// Close the held pool, if any.
    pub async fn close(&self) {
        self.connections.close().await;
    }
}

impl CraftingStore for PostgresCraftingStore {
    async fn find_recipe_by_name(&self, name: &str) -> Result<Option<RecipeDefinition>, StoreError> {
        let pool = self.pool().await?;
        Ok(RecipeStore::new(pool.pool()).find_by_name(name).await?)
    }

    async fn find_specialism_groups(&self) -> Result<Vec<SpecialismGroup>, StoreError> {
        let pool = self.pool().await?;
        Ok(SpecialismStore::new(pool.pool()).list().await?)
    }

    async fn find_characters_knowing_recipe(
        &self,
        name: &str,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        let pool = self.pool().await?;
        Ok(RosterStore::new(pool.pool()).find_knowing_recipe(name).await?)
    }

    async fn find_character_by_key(
        &self,
        name: &str,
        realm: Option<&str>,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        let pool = self.pool().await?;
        Ok(RosterStore::new(pool.pool()).find_by_name(name, realm).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        Ok(pool.ping().await?)
    }
}
