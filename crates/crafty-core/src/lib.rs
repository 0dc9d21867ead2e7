//! Crafter scoring, character lookup and the store contract for Crafty.
//!
//! This crate answers the two read-side questions of the guild crafting
//! lookup: "who should craft this recipe" and "what does this character
//! know". Everything here is read-only against a [`CraftingStore`].
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `crafty-config.yaml` into
//!   strongly-typed structs, with environment overrides.
//! - [`engine`] -- [`rank_crafters`], the recipe to ranked crafters lookup.
//! - [`error`] -- [`LookupError`] and [`StoreError`].
//! - [`lookup`] -- Character lookup and recipe paging.
//! - [`names`] -- Character name and realm normalization.
//! - [`scoring`] -- Pure per-candidate scoring and ranking order.
//! - [`store`] -- [`CraftingStore`] trait and [`MemoryStore`].
//!
//! [`CraftingStore`]: store::CraftingStore
//! [`MemoryStore`]: store::MemoryStore
//! [`rank_crafters`]: engine::rank_crafters
//! [`LookupError`]: error::LookupError
//! [`StoreError`]: error::StoreError

pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod names;
pub mod scoring;
pub mod store;

pub use engine::{RankedCrafters, rank_crafters, score_crafters};
pub use error::{LookupError, StoreError};
pub use lookup::{CharacterLookup, DEFAULT_RECIPES_PER_PAGE, lookup_character, recipe_page};
pub use store::{CraftingStore, MemoryStore};
