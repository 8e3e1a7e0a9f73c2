use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::domain::error::DomainError;

use super::dto::MessageResponse;

/// REST-level failure: a status code plus the standard failure
/// envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn invalid_id() -> Self {
        Self::bad_request("Invalid user ID format")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = MessageResponse {
            success: false,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::EmailTaken { .. } => StatusCode::CONFLICT,
            DomainError::Validation { .. }
            | DomainError::DisallowedFields { .. }
            | DomainError::EmptyUpdate => StatusCode::BAD_REQUEST,
            DomainError::Database { .. } => {
                // Detail stays server-side; the caller gets a generic message.
                error!(error = ?err, "persistence failure");
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Server error".to_string(),
                };
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}
