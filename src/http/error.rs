//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// API error response body.
///
/// The wire format uses `msg` for the human-readable message; `error`
/// carries the underlying failure detail on 500 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Missing/invalid credentials or a failed admin check
    Unauthorized(String),
    /// Resource not found
    NotFound(String),
    /// Uniqueness conflict (duplicate program type name)
    Conflict(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error with optional failure detail
    Internal {
        message: String,
        detail: Option<String>,
    },
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
            detail: None,
        }
    }

    pub fn internal_with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiError::new(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::new(msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::Internal { message, detail } => {
                let mut body = ApiError::new(message);
                body.error = detail;
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            AppError::Repository(e) => {
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, ApiError::new(e.to_string()))
                } else if e.is_conflict() {
                    (StatusCode::CONFLICT, ApiError::new(e.to_string()))
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("Internal server error").with_error(e.to_string()),
                    )
                }
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}
