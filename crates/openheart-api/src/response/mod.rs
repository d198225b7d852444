//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting. The
//! OpenHeart protocol's distinctive mapping lives here: a rejected reaction
//! answers 418 with the human-readable reason.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use openheart_service::ServiceError;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::Invalid(_)) => StatusCode::IM_A_TEAPOT,
            Self::Service(ServiceError::Disabled { .. }) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(ServiceError::Invalid(_)) => "INVALID_REACTION",
            Self::Service(ServiceError::Disabled { .. }) => "NOT_FOUND",
            Self::Service(ServiceError::Store(_)) => "STORAGE_UNAVAILABLE",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        // Store faults carry driver details; log them but keep the body
        // generic so internals never reach the client.
        let message = if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
            "storage unavailable".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
