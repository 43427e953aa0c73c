//! HTTP error mapping for the notes resource.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::BoardError;

/// Failures a handler can return. Converted into a response by `IntoResponse`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("Note not found: {id}")]
    NotFound { id: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::Validation { .. } => StatusCode::BAD_REQUEST,
            HttpError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // 404s carry no body.
            HttpError::NotFound { .. } => status.into_response(),
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}

impl From<BoardError> for HttpError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::NotFound(id) => HttpError::NotFound { id },
            BoardError::Validation(message) => HttpError::Validation { message },
            other => HttpError::Internal {
                message: other.to_string(),
            },
        }
    }
}
