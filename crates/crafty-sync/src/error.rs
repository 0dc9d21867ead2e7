//! Error types for guild sync and catalog seeding.
//!
//! Uses `thiserror` for typed errors that surface through the whole
//! ingestion pipeline: OAuth, Blizzard API calls, fixture parsing, and
//! writes to the store.

use crafty_core::StoreError;

/// Errors that can occur while syncing the roster or seeding catalogs.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The HTTP request could not be sent or its body not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Blizzard API answered with a non-success status.
    #[error("Blizzard API returned {status} for {url}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Requested URL, without query string.
        url: String,
    },

    /// Writing to or reading from the store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A fixture file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixture or API payload could not be decoded.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),
}
