//! Ingestion jobs for Crafty: guild roster sync and catalog seeding.
//!
//! Nothing here is on the lookup path. The jobs write the three stores the
//! lookups read, through [`IngestSink`].
//!
//! # Modules
//!
//! - [`blizzard`] -- OAuth, roster, professions and item media calls, and
//!   the [`GuildSource`] contract
//! - [`professions`] -- Crafting profession extraction and filtering
//! - [`guild_sync`] -- Full roster sync with stale member removal
//! - [`catalog`] -- Recipe and specialism fixture parsing and seeding
//! - [`sink`] -- [`IngestSink`] for the in-memory and `PostgreSQL` stores
//! - [`error`] -- [`SyncError`]
//!
//! [`GuildSource`]: blizzard::GuildSource
//! [`IngestSink`]: sink::IngestSink
//! [`SyncError`]: error::SyncError

pub mod blizzard;
pub mod catalog;
pub mod error;
pub mod guild_sync;
pub mod professions;
pub mod sink;

pub use blizzard::{BlizzardClient, GuildSource};
pub use catalog::{SeedReport, load_catalog, seed_catalog};
pub use error::SyncError;
pub use guild_sync::{SyncReport, sync_guild};
pub use sink::IngestSink;
