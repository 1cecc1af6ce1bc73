//! API error types
//!
//! The engine never errors - unknown ids degrade to `None`/empty - so the
//! failures that surface over HTTP are bad request parameters, feeds named
//! by an id that does not exist, and server-side faults. Responses follow
//! the emoncms convention of a `success: false` body, extended with a
//! stable machine-readable code and a request id for log correlation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request parameters failed validation
    #[error("{0}")]
    Validation(String),

    /// A feed id that is not registered
    #[error("Feed {0} not found")]
    UnknownFeed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error (socket bind, shutdown)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownFeed(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::UnknownFeed(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Io(_) => "IO_ERROR",
        }
    }
}

/// Error response body, emoncms-style
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %self.code(),
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            success: false,
            code: self.code().to_string(),
            message: self.to_string(),
            request_id,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
