//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;
use crate::sql::SqlError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rendering, binding, or execution error
    #[error(transparent)]
    Sql(#[from] SqlError),

    /// Backend call failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

fn sql_error_status(e: &SqlError) -> (StatusCode, &'static str) {
    match e {
        SqlError::InvalidColumn(_) => (StatusCode::BAD_REQUEST, "COLUMN_NOT_ALLOWED"),
        SqlError::MissingParameter(_) => (StatusCode::BAD_REQUEST, "MISSING_PARAMETER"),
        SqlError::InvalidDateHint(_) | SqlError::InvalidTimeHint(_) | SqlError::InvalidLimit(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        }
        SqlError::Execution(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXECUTION_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Sql(e) => sql_error_status(e),
            ApiError::Backend(BackendError::Sql(e)) => sql_error_status(e),
            ApiError::Backend(_) => (StatusCode::BAD_GATEWAY, "TRANSPORT_FAILURE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
