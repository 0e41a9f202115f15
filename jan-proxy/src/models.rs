//! Response models for the lookup endpoint

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized product record returned to callers
///
/// All fields are independently optional. Absent fields serialize as `null`
/// so the shape is stable for clients.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CanonicalProduct {
    pub name: Option<String>,
    pub manufacturer_name: Option<String>,
    pub model_name: Option<String>,
    pub specs: Option<Map<String, Value>>,
}

impl CanonicalProduct {
    /// True when none of the four fields is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.manufacturer_name.is_none()
            && self.model_name.is_none()
            && self.specs.is_none()
    }
}

/// Where the returned product data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Real upstream data
    Api,
    /// Upstream answered but had nothing usable
    Mock,
    /// Upstream call failed (timeout, HTTP error, bad JSON)
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Api => "api",
            DataSource::Mock => "mock",
            DataSource::Fallback => "fallback",
        }
    }

    /// Caller-facing explanation, `None` for real data
    pub fn message(&self) -> Option<&'static str> {
        match self {
            DataSource::Api => None,
            DataSource::Mock => {
                Some("APIに製品データが見つからなかったため、JANコードから生成したモックデータを返します")
            }
            DataSource::Fallback => {
                Some("API呼び出しに失敗したため、JANコードから生成したフォールバックデータを返します")
            }
        }
    }
}

/// Diagnostic block attached to every lookup response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub normalized_code: String,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_error: Option<String>,
}

/// GET /api/bihinkanri-proxy success body
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub success: bool,
    /// Raw `jan_code` as received
    pub jan_code: String,
    pub data: CanonicalProduct,
    pub data_source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// ISO-8601 UTC, millisecond precision
    pub timestamp: String,
    pub debug: DebugInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_product() {
        assert!(CanonicalProduct::default().is_empty());

        let product = CanonicalProduct {
            model_name: Some("X-1".to_string()),
            ..Default::default()
        };
        assert!(!product.is_empty());
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let value = serde_json::to_value(CanonicalProduct::default()).unwrap();
        assert_eq!(
            value,
            json!({"name": null, "manufacturer_name": null, "model_name": null, "specs": null})
        );
    }

    #[test]
    fn test_data_source_tags() {
        assert_eq!(serde_json::to_value(DataSource::Fallback).unwrap(), json!("fallback"));
        assert_eq!(DataSource::Mock.as_str(), "mock");
        assert!(DataSource::Api.message().is_none());
        assert!(DataSource::Fallback.message().is_some());
    }
}
