//! Shared API error-body types
//!
//! Client errors never trigger fallback synthesis; they are returned to the
//! caller as-is with one of the bodies below.

use serde::{Deserialize, Serialize};

/// Usage hint shown when `jan_code` is missing
pub const USAGE_HINT: &str = "?jan_code=4901234567890";

// ========================================
// Error Response Types
// ========================================

/// 400 response body for a missing or malformed lookup code
///
/// Exactly one of `usage` / `received` is present:
/// - `usage` when the parameter was absent
/// - `received` (raw value echoed back) when it was malformed
///
/// # Examples
///
/// ```
/// use jan_common::api::types::ClientErrorResponse;
///
/// let body = ClientErrorResponse::missing_code();
/// assert!(!body.success);
/// assert_eq!(body.usage.as_deref(), Some("?jan_code=4901234567890"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientErrorResponse {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

impl ClientErrorResponse {
    /// Body for a request without `jan_code`
    pub fn missing_code() -> Self {
        Self {
            success: false,
            error: "JANコードが必要です".to_string(),
            usage: Some(USAGE_HINT.to_string()),
            received: None,
        }
    }

    /// Body for a `jan_code` that is not 8 or 13 digits after normalization
    pub fn malformed_code(raw: impl Into<String>) -> Self {
        Self {
            success: false,
            error: "JANコードは8桁または13桁の数字である必要があります".to_string(),
            usage: None,
            received: Some(raw.into()),
        }
    }
}

/// 405 response body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNotAllowedResponse {
    pub error: String,
    pub allowed_methods: Vec<String>,
}

impl Default for MethodNotAllowedResponse {
    fn default() -> Self {
        Self {
            error: "Method not allowed".to_string(),
            allowed_methods: vec!["GET".to_string()],
        }
    }
}
