//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::storage::StorageError;

/// JSON error envelope returned for every failed request
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Stable, human-readable error message
    error: String,
}

/// Application error type rendered as a JSON error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    body: ErrorBody,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
            },
        }
    }

    /// Create a 400 Bad Request error
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {}", self.body.error),
            500..=599 => tracing::error!("Server error: {}", self.body.error),
            _ => {}
        }

        (self.status, Json(self.body)).into_response()
    }
}

/// Convert storage errors to application errors
///
/// The underlying failure is logged server-side; callers only ever see the
/// generic message.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Error generating signed URL: {err}");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate upload URL",
        )
    }
}
