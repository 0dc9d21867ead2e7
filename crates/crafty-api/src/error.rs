//! Error types for the lookup API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body is `{ "error": ..., "status": ... }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crafty_core::LookupError;

/// Message returned when the store cannot be reached.
pub const UNAVAILABLE_MESSAGE: &str = "The crafting database is unavailable, please try again later.";

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested recipe or character was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store failed. The detail is logged, not returned.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// An invalid query parameter was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::RecipeNotFound(_) => Self::NotFound(err.to_string()),
            LookupError::DataSourceUnavailable { source } => Self::Unavailable(source.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Unavailable(detail) => {
                tracing::error!(error = %detail, "Store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE.to_owned())
            }
            Self::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use crafty_core::StoreError;

    use super::*;

    #[test]
    fn lookup_errors_map_to_statuses() {
        let missing = ApiError::from(LookupError::RecipeNotFound("Widget".to_owned()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let down = ApiError::from(LookupError::from(StoreError::Unavailable(
            "connection refused".to_owned(),
        )));
        assert!(matches!(down, ApiError::Unavailable(ref d) if d.contains("connection refused")));
        assert_eq!(down.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn not_found_keeps_the_lookup_message() {
        let err = ApiError::from(LookupError::RecipeNotFound("Widget".to_owned()));
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Item \"Widget\" not found in the database."));
    }
}
