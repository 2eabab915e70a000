//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use rendition::RenditionError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Request raced with a change that made its result stale.
    Conflict(String),
    /// Internal server error.
    Internal(String),
    /// Error from the rendition library.
    Rendition(RenditionError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Rendition(e) => {
                let (status, error) = match &e {
                    RenditionError::ItemNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                    RenditionError::NotEditing { .. } => (StatusCode::CONFLICT, "not_editing"),
                    RenditionError::Generation(_) => (StatusCode::BAD_GATEWAY, "generation_error"),
                    RenditionError::Persistence(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
                    }
                    _ => (StatusCode::BAD_REQUEST, "rendition_error"),
                };
                (status, error, e.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<RenditionError> for ApiError {
    fn from(err: RenditionError) -> Self {
        ApiError::Rendition(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Background task failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Rendition(e) => write!(f, "Rendition error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
