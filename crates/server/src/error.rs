//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("store error: {0}")]
    Store(#[from] imprint_store::StoreError),

    #[error("queue error: {0}")]
    Queue(#[from] imprint_queue::QueueError),

    #[error("core error: {0}")]
    Core(#[from] imprint_core::Error),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
            Self::Store(_) => "store_error",
            Self::Queue(e) => match e {
                imprint_queue::QueueError::NotFound(_) => "not_found",
                imprint_queue::QueueError::InvalidTransition { .. } => "invalid_transition",
                imprint_queue::QueueError::AlreadyExists(_) => "internal_error",
            },
            Self::Core(_) => "bad_request",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                imprint_store::StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                imprint_store::StoreError::InvalidName(_) => StatusCode::BAD_REQUEST,
                imprint_store::StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Queue(e) => match e {
                imprint_queue::QueueError::NotFound(_) => StatusCode::NOT_FOUND,
                imprint_queue::QueueError::InvalidTransition { .. } => StatusCode::CONFLICT,
                // Identifiers are system-generated; a collision is our bug.
                imprint_queue::QueueError::AlreadyExists(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Core(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal faults are logged with full detail and surfaced
        // generically; nothing internal reaches the caller.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            code: self.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
