//! Crafty binary.
//!
//! Wires configuration, logging and the stores to the four jobs the
//! project runs:
//!
//! | Command | Job |
//! |---------|-----|
//! | `serve` | Lookup API over `PostgreSQL`, or over the fixtures with `--memory` |
//! | `sync-guild` | Pull the guild roster and professions from the Blizzard API |
//! | `seed-catalog` | Load the recipe and specialism fixtures into `PostgreSQL` |
//! | `migrate` | Create the tables and lookup indexes |
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `crafty-config.yaml` plus environment overrides
//! 2. Initialize structured logging (tracing)
//! 3. Build the store and run the command

mod backend;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crafty_api::{AppState, ServerConfig};
use crafty_core::MemoryStore;
use crafty_core::config::{CraftyConfig, LogFormat, LoggingConfig};
use crafty_db::{PostgresConfig, PostgresCraftingStore};
use crafty_sync::catalog::fill_missing_media;
use crafty_sync::{BlizzardClient, IngestSink, load_catalog, seed_catalog, sync_guild};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::backend::Backend;

/// Guild crafter lookup service.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Configuration file. Missing files fall back to defaults.
    #[arg(long, default_value = "crafty-config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the lookup API.
    Serve {
        /// Serve from the fixtures in memory instead of `PostgreSQL`.
        #[arg(long)]
        memory: bool,
    },
    /// Sync the guild roster into `PostgreSQL`.
    SyncGuild,
    /// Seed the recipe and specialism catalogs into `PostgreSQL`.
    SeedCatalog,
    /// Apply database migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CraftyConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_logging(&config.logging);

    info!(
        command = ?cli.command,
        config = %cli.config.display(),
        "crafty-server starting"
    );

    match cli.command {
        Command::Serve { memory } => serve(&config, memory).await,
        Command::SyncGuild => {
            let store = postgres_store(&config);
            let result = run_sync(&config, &store).await;
            store.close().await;
            result
        }
        Command::SeedCatalog => {
            let store = postgres_store(&config);
            let result = run_seed(&config, &store).await;
            store.close().await;
            result
        }
        Command::Migrate => {
            let store = postgres_store(&config);
            let result = store.migrate().await.context("applying migrations");
            store.close().await;
            result?;
            info!("Migrations applied");
            Ok(())
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

fn postgres_store(config: &CraftyConfig) -> PostgresCraftingStore {
    PostgresCraftingStore::new(PostgresConfig::from(&config.database))
}

fn has_credentials(config: &CraftyConfig) -> bool {
    !config.blizzard.client_id.is_empty() && !config.blizzard.client_secret.is_empty()
}

async fn serve(config: &CraftyConfig, memory: bool) -> anyhow::Result<()> {
    let backend = if memory {
        Backend::Memory(memory_store(config).await?)
    } else {
        Backend::Postgres(postgres_store(config))
    };
    info!(backend = backend.name(), "Store selected");

    let state = Arc::new(AppState::new(Arc::new(backend), config.scoring));
    let result = crafty_api::start_server(&ServerConfig::from(&config.server), Arc::clone(&state))
        .await
        .context("running the lookup API");

    state.store.close().await;
    result
}

/// Fixture-backed store: the catalogs always, the guild roster too when
/// Blizzard credentials are configured.
async fn memory_store(config: &CraftyConfig) -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::new();
    run_seed(config, &store).await?;

    if has_credentials(config) {
        run_sync(config, &store).await?;
    } else {
        tracing::warn!("No Blizzard credentials configured, serving an empty roster");
    }
    Ok(store)
}

async fn run_seed<K: IngestSink>(config: &CraftyConfig, sink: &K) -> anyhow::Result<()> {
    let (mut recipes, skipped, groups) = load_catalog(&config.catalog)
        .await
        .with_context(|| fixture_paths(config))?;

    if has_credentials(config) {
        let client = BlizzardClient::new(&config.blizzard)?;
        fill_missing_media(&client, &mut recipes, config.sync.max_concurrent_requests).await;
    }

    let mut report = seed_catalog(sink, &recipes, &groups).await?;
    report.skipped_recipes = skipped;
    info!(
        recipes = report.recipes,
        skipped_recipes = report.skipped_recipes,
        specialism_groups = report.specialism_groups,
        "Catalog seeded"
    );
    Ok(())
}

async fn run_sync<K: IngestSink>(config: &CraftyConfig, sink: &K) -> anyhow::Result<()> {
    let client = BlizzardClient::new(&config.blizzard)?;
    let report = sync_guild(&client, sink, &config.sync)
        .await
        .with_context(|| format!("syncing guild {}", config.sync.guild_name))?;
    info!(
        roster_members = report.roster_members,
        upserted = report.upserted,
        profession_failures = report.profession_failures,
        removed = report.removed,
        "Guild synced"
    );
    Ok(())
}

fn fixture_paths(config: &CraftyConfig) -> String {
    format!(
        "loading catalog fixtures {} and {}",
        Path::new(&config.catalog.recipes_path).display(),
        Path::new(&config.catalog.specialism_path).display()
    )
}
