//! Shared application state for the lookup API.

use std::sync::Arc;

use crafty_core::config::ScoringConfig;

/// State shared by every handler: the store and the scoring weights.
///
/// Generic over the store so the same router serves `PostgreSQL` in
/// production and the in-memory store in tests and fixture deployments.
#[derive(Debug)]
pub struct AppState<S> {
    /// The catalogs and roster.
    pub store: Arc<S>,
    /// Scoring weights and output caps.
    pub scoring: ScoringConfig,
}

impl<S> AppState<S> {
    /// Create state over `store` with the given weights.
    pub const fn new(store: Arc<S>, scoring: ScoringConfig) -> Self {
        Self { store, scoring }
    }
}
