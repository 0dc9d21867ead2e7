//! Shared type definitions for the Crafty guild crafting lookup.
//!
//! This crate is the single source of truth for the records the scoring
//! engine reads and the result shapes it produces. Result types flow
//! downstream to `TypeScript` via `ts-rs` for the web client.
//!
//! # Modules
//!
//! - [`recipe`] -- Recipe catalog entries and reagent lists
//! - [`specialism`] -- Specialism groups and their item categories
//! - [`roster`] -- Character records, professions, skill points
//! - [`ranking`] -- Ranked crafter results and character lookup views

pub mod ranking;
pub mod recipe;
pub mod roster;
pub mod specialism;

// Re-export all public types at crate root for convenience.
pub use ranking::{CharacterMatch, CrafterSummary, ProfessionScore, RankedResult, RecipePage};
pub use recipe::{Reagent, RecipeDefinition, RecipeReagents};
pub use roster::{CharacterKey, CharacterRecord, ProfessionRecord, SkillPoints};
pub use specialism::{SpecialismCategory, SpecialismGroup};
