//! Lookup API server lifecycle.
//!
//! [`start_server`] binds the configured address and serves the router
//! until `Ctrl-C`, letting in-flight lookups finish.

use std::net::SocketAddr;
use std::sync::Arc;

use crafty_core::CraftingStore;
use crafty_core::config::ServerSection;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Where the API listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address, e.g. `0.0.0.0`.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl From<&ServerSection> for ServerConfig {
    fn from(section: &ServerSection) -> Self {
        Self {
            host: section.host.clone(),
            port: section.port,
        }
    }
}

impl ServerConfig {
    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Address`] when host and port do not form one.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e| ServerError::Address(format!("{raw}: {e}")))
    }
}

/// Serve the lookup API over `state` until shutdown.
///
/// # Errors
///
/// Returns [`ServerError`] if the address is invalid, the port cannot be
/// bound, or serving fails.
pub async fn start_server<S>(config: &ServerConfig, state: Arc<AppState<S>>) -> Result<(), ServerError>
where
    S: CraftingStore + 'static,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, "Crafty API listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Crafty API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining lookups");
}

/// Failures starting or running the API server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Host and port do not form a socket address.
    #[error("invalid listen address {0}")]
    Address(String),

    /// The port could not be bound.
    #[error("cannot bind {addr}: {source}")]
    Bind {
        /// Address that was tried.
        addr: SocketAddr,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_from_section() {
        let config = ServerConfig::from(&ServerSection::default());
        assert_eq!(config.port, 8080);
        assert!(config.socket_addr().is_ok());
    }

    #[test]
    fn hostnames_are_rejected() {
        let config = ServerConfig {
            host: "crafty.local".to_owned(),
            port: 8080,
        };
        assert!(matches!(config.socket_addr(), Err(ServerError::Address(_))));
    }
}
