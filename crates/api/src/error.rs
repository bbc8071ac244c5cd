//! Error boundary for the API.
//!
//! Handlers return `Result<T, AppError>`; the single `IntoResponse` impl
//! maps errors to status codes and a `{"detail": ...}` JSON body. Server
//! errors are captured to Sentry before responding.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// Application-level error type for the webshop API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Store(StoreError::NotConfigured | StoreError::Query(_)) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Store(StoreError::NotConfigured | StoreError::Query(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Store(StoreError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Raw error text as detail: this is a demo backend with no secrets
        // in store errors, and the frontend displays the text verbatim.
        let body = Json(json!({ "detail": self.to_string() }));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
