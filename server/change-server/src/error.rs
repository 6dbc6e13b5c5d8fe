use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::validation::ChangeRejection;

/// Error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Rejected(#[from] ChangeRejection),

    /// Request body could not be read (too large, aborted upload)
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Body { status, .. } => *status,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Rejected(rejection) => rejection.code(),
            ApiError::Body { .. } => "invalid_request",
            ApiError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // Rejections are already recorded by the decision log
        match &self {
            ApiError::Rejected(_) => {}
            ApiError::Body { message, .. } => {
                warn!(
                    error_code = self.error_code(),
                    status_code = status_code.as_u16(),
                    error = %message,
                    "Failed to read request body"
                );
            }
            ApiError::Internal { message } => {
                error!(
                    error_code = self.error_code(),
                    status_code = status_code.as_u16(),
                    error = %message,
                    "API error occurred"
                );
            }
        }

        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
