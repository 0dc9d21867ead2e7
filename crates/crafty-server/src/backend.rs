//! Store selection for the binary.
//!
//! The API is generic over [`CraftingStore`]; [`Backend`] picks the
//! concrete store at startup and dispatches to it.

use crafty_core::{CraftingStore, MemoryStore, StoreError};
use crafty_db::PostgresCraftingStore;
use crafty_types::{CharacterRecord, RecipeDefinition, SpecialismGroup};

/// The store the server runs against.
pub enum Backend {
    /// Fixture-backed in-process store.
    Memory(MemoryStore),
    /// `PostgreSQL` document tables.
    Postgres(PostgresCraftingStore),
}

impl Backend {
    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Release pooled connections, if any.
    pub async fn close(&self) {
        if let Self::Postgres(store) = self {
            store.close().await;
        }
    }
}

impl CraftingStore for Backend {
    async fn find_recipe_by_name(&self, name: &str) -> Result<Option<RecipeDefinition>, StoreError> {
        match self {
            Self::Memory(store) => store.find_recipe_by_name(name).await,
            Self::Postgres(store) => store.find_recipe_by_name(name).await,
        }
    }

    async fn find_specialism_groups(&self) -> Result<Vec<SpecialismGroup>, StoreError> {
        match self {
            Self::Memory(store) => store.find_specialism_groups().await,
            Self::Postgres(store) => store.find_specialism_groups().await,
        }
    }

    async fn find_characters_knowing_recipe(
        &self,
        name: &str,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        match self {
            Self::Memory(store) => store.find_characters_knowing_recipe(name).await,
            Self::Postgres(store) => store.find_characters_knowing_recipe(name).await,
        }
    }

    async fn find_character_by_key(
        &self,
        name: &str,
        realm: Option<&str>,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        match self {
            Self::Memory(store) => store.find_character_by_key(name, realm).await,
            Self::Postgres(store) => store.find_character_by_key(name, realm).await,
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.ping().await,
            Self::Postgres(store) => store.ping().await,
        }
    }
}
