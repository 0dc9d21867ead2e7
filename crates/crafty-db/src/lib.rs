//! `PostgreSQL` data layer for Crafty.
//!
//! Holds the recipe catalog, the specialism catalog and the guild roster,
//! and implements [`CraftingStore`] over them.
//!
//! ```text
//! seed-catalog / sync-guild
//!     |
//!     +-- writes ------> PostgresCraftingStore
//!                             |-- RecipeStore      (recipes)
//!                             |-- SpecialismStore  (specialism_groups)
//!                             +-- RosterStore      (characters)
//!     lookups <-- reads ------+
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration and the lazily
//!   connected, health-checked [`ConnectionManager`]
//! - [`recipe_store`] -- Recipe upserts and lookup by name
//! - [`specialism_store`] -- Specialism group upserts and listing
//! - [`roster_store`] -- Character upserts, recipe and name lookups, stale
//!   member removal
//! - [`store`] -- [`PostgresCraftingStore`]
//! - [`error`] -- Shared error types
//!
//! [`CraftingStore`]: crafty_core::CraftingStore

pub mod error;
pub mod postgres;
pub mod recipe_store;
pub mod roster_store;
pub mod specialism_store;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use postgres::{ConnectionManager, PostgresConfig, PostgresPool};
pub use recipe_store::{RecipeRow, RecipeStore};
pub use roster_store::{CharacterRow, RosterStore};
pub use specialism_store::{SpecialismRow, SpecialismStore};
pub use store::PostgresCraftingStore;
