//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] and [`serde_json`] errors. At the [`CraftingStore`] boundary
//! they collapse into a [`StoreError`].
//!
//! [`CraftingStore`]: crafty_core::CraftingStore

use crafty_core::StoreError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A JSONB document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value does not fit the record type.
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Serialization(_) | DbError::InvalidRow(_) => Self::Corrupt(err.to_string()),
            DbError::Postgres(_) | DbError::Migration(_) | DbError::Config(_) => {
                Self::Unavailable(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_corrupt() {
        let bad = serde_json::from_str::<u32>("\"x\"").map_err(DbError::from);
        let store: Option<StoreError> = bad.err().map(StoreError::from);
        assert!(matches!(store, Some(StoreError::Corrupt(_))));
    }

    #[test]
    fn connection_failures_are_unavailable() {
        let store = StoreError::from(DbError::Postgres(sqlx::Error::PoolTimedOut));
        assert!(matches!(store, StoreError::Unavailable(_)));
    }
}
