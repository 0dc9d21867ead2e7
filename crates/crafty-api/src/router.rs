//! Axum router construction for the lookup API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for the web client and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use crafty_core::CraftingStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /who/{recipe}` -- ranked crafters of a recipe
/// - `GET /professions/{name}` -- character professions by name
/// - `GET /professions/{name}/{realm}` -- character professions on a realm
/// - `GET /professions/{name}/{realm}/recipes` -- paged known recipes
/// - `GET /health` -- store reachability
///
/// CORS allows any origin; the API is read-only.
pub fn build_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: CraftingStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/who/{recipe}", get(handlers::who::<S>))
        .route("/professions/{name}", get(handlers::professions_by_name::<S>))
        .route(
            "/professions/{name}/{realm}",
            get(handlers::professions_by_realm::<S>),
        )
        .route(
            "/professions/{name}/{realm}/recipes",
            get(handlers::recipes::<S>),
        )
        .route("/health", get(handlers::health::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
