//! Error types for jan-proxy
//!
//! Only client-side problems are HTTP errors. Upstream failures are absorbed
//! by the lookup service and never surface here.

use crate::services::JanCodeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jan_common::api::{ClientErrorResponse, MethodNotAllowedResponse};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// `jan_code` absent or empty (400)
    #[error("jan_code query parameter is required")]
    MissingJanCode,

    /// `jan_code` not 8 or 13 digits after stripping non-digits (400)
    #[error("Malformed jan_code: {0}")]
    InvalidJanCode(String),

    /// Anything but GET/OPTIONS on the lookup route (405)
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl From<JanCodeError> for ApiError {
    fn from(err: JanCodeError) -> Self {
        match err {
            JanCodeError::Missing => ApiError::MissingJanCode,
            JanCodeError::InvalidLength { raw, .. } => ApiError::InvalidJanCode(raw),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingJanCode => (
                StatusCode::BAD_REQUEST,
                Json(ClientErrorResponse::missing_code()),
            )
                .into_response(),
            ApiError::InvalidJanCode(raw) => (
                StatusCode::BAD_REQUEST,
                Json(ClientErrorResponse::malformed_code(raw)),
            )
                .into_response(),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(MethodNotAllowedResponse::default()),
            )
                .into_response(),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
