//! Shared test helpers
//!
//! - `FakeSource`: canned `ProductSource` for router tests
//! - `spawn_stub_upstream`: local axum server standing in for the spec-forms API

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use jan_proxy::services::{LookupCode, ProductSource, UpstreamError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Fake product source
// =============================================================================

/// What the fake upstream answers
#[derive(Debug, Clone)]
pub enum FakeResult {
    Payload(Value),
    Timeout,
    Status(u16),
    Decode,
}

/// Canned `ProductSource` that records every code it was asked for
pub struct FakeSource {
    result: FakeResult,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(result: FakeResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductSource for FakeSource {
    async fn fetch(&self, code: &LookupCode) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(code.to_string());
        match &self.result {
            FakeResult::Payload(v) => Ok(v.clone()),
            FakeResult::Timeout => Err(UpstreamError::Timeout(Duration::from_secs(10))),
            FakeResult::Status(status) => Err(UpstreamError::Status {
                status: *status,
                reason: "Test".to_string(),
            }),
            FakeResult::Decode => Err(UpstreamError::Decode("expected value at line 1".to_string())),
        }
    }
}

// =============================================================================
// Stub upstream HTTP server
// =============================================================================

/// How the stub spec-forms endpoint responds
#[derive(Debug, Clone)]
pub enum StubBehavior {
    Json(Value),
    Status(u16),
    RawBody(&'static str),
    Delay(Duration),
}

/// One request as seen by the stub
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub jan_code: Option<String>,
    pub authorization: Option<String>,
    pub account_id: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
struct StubState {
    behavior: StubBehavior,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Running stub server
pub struct StubUpstream {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubUpstream {
    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn spec_forms(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.captured.lock().unwrap().push(CapturedRequest {
        jan_code: query.get("jan_code").cloned(),
        authorization: header_string(&headers, "authorization"),
        account_id: header_string(&headers, "x-account-id"),
        user_agent: header_string(&headers, "user-agent"),
    });

    match state.behavior {
        StubBehavior::Json(body) => Json(body).into_response(),
        StubBehavior::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        StubBehavior::RawBody(body) => {
            ([(axum::http::header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        StubBehavior::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({"name": "too late"})).into_response()
        }
    }
}

/// Start a stub spec-forms server on an ephemeral local port
pub async fn spawn_stub_upstream(behavior: StubBehavior) -> StubUpstream {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behavior,
        captured: captured.clone(),
    };

    let app = Router::new()
        .route("/public-prod/spec-forms", get(spec_forms))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind stub upstream");
    let addr = listener.local_addr().expect("Should have local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub upstream crashed");
    });

    StubUpstream {
        base_url: format!("http://{}/public-prod/spec-forms", addr),
        captured,
    }
}
