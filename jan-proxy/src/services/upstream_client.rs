//! Spec-forms API client
//!
//! One GET per lookup, bounded by the configured timeout, no retries.
//! Authentication is header based: `Authorization` carries the API key and
//! `X-Account-ID` the account identifier.

use super::jan_code::LookupCode;
use async_trait::async_trait;
use jan_common::config::UpstreamConfig;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("jan-proxy/", env!("CARGO_PKG_VERSION"));

/// Account identifier header
pub const ACCOUNT_ID_HEADER: &str = "X-Account-ID";

/// Upstream failures. All of them resolve to fallback data.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API Error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid JSON from upstream: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Source of raw product payloads
///
/// Implemented by [`SpecFormsClient`]; tests substitute canned payloads.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the raw upstream payload for a validated code
    async fn fetch(&self, code: &LookupCode) -> Result<Value, UpstreamError>;
}

/// HTTP client for the spec-forms endpoint
pub struct SpecFormsClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl SpecFormsClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = header::HeaderMap::new();

        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|e| UpstreamError::InvalidConfig(format!("API key: {}", e)))?;
        api_key.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, api_key);

        headers.insert(
            ACCOUNT_ID_HEADER,
            header::HeaderValue::from_str(&config.account_id)
                .map_err(|e| UpstreamError::InvalidConfig(format!("account ID: {}", e)))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| UpstreamError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl ProductSource for SpecFormsClient {
    async fn fetch(&self, code: &LookupCode) -> Result<Value, UpstreamError> {
        info!(jan_code = %code, "Calling spec-forms API");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("jan_code", code.as_str())])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(jan_code = %code, status = status.as_u16(), "Spec-forms API returned error status");
            return Err(status_error(status));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        let payload: Value =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        debug!(jan_code = %code, bytes = body.len(), "Spec-forms API response decoded");
        Ok(payload)
    }
}

fn status_error(status: StatusCode) -> UpstreamError {
    UpstreamError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}
