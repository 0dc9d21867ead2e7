//! HTTP lookup API for Crafty.
//!
//! This crate provides an Axum HTTP server that exposes the two read-side
//! lookups over JSON:
//!
//! - **Crafter ranking** (`/who/{recipe}`): who in the guild should craft
//!   a recipe, best first
//! - **Character lookup** (`/professions/...`): what a character knows,
//!   with realm disambiguation and recipe paging
//!
//! Handlers are generic over the [`CraftingStore`] so the same router runs
//! against `PostgreSQL` or the in-memory store.
//!
//! [`CraftingStore`]: crafty_core::CraftingStore

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
