//! Error types for the lookups and the store contract.
//!
//! The lookups surface exactly two kinds of failure through
//! [`LookupError`]. "Nothing found" (no crafters, no specialism, unknown
//! character) is a successful empty result, never an error.

/// Failures reported by a [`CraftingStore`](crate::store::CraftingStore)
/// implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or the query failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Errors returned by the crafter ranking and character lookups.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// No recipe with this exact name exists in the catalog.
    #[error("Item \"{0}\" not found in the database.")]
    RecipeNotFound(String),

    /// The roster or catalog store failed. Callers decide whether to retry.
    #[error("data source unavailable: {source}")]
    DataSourceUnavailable {
        /// The underlying store failure.
        #[from]
        source: StoreError,
    },
}
