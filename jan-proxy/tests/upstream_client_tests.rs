//! Spec-forms client tests against a local stub upstream
//!
//! Tests cover:
//! - Credential headers and normalized code are forwarded
//! - Non-success status → UpstreamError::Status
//! - Invalid JSON body → UpstreamError::Decode
//! - Slow upstream → UpstreamError::Timeout
//! - Unreachable upstream → UpstreamError::Network
//! - Full router path: stub failure still yields 200 with fallback data

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpers::{spawn_stub_upstream, StubBehavior};
use http_body_util::BodyExt;
use jan_common::config::UpstreamConfig;
use jan_proxy::services::{LookupCode, ProductSource, SpecFormsClient, UpstreamError};
use jan_proxy::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn client_for(base_url: &str, timeout: Duration) -> SpecFormsClient {
    let config = UpstreamConfig {
        base_url: base_url.to_string(),
        api_key: "ApiKey_test-0000".to_string(),
        account_id: "3541".to_string(),
        timeout,
    };
    SpecFormsClient::new(&config).expect("Should build client")
}

fn code() -> LookupCode {
    LookupCode::parse("4901234567890").unwrap()
}

#[tokio::test]
async fn test_forwards_credentials_and_code() {
    let stub = spawn_stub_upstream(StubBehavior::Json(json!({"name": "Hub"}))).await;
    let client = client_for(&stub.base_url, Duration::from_secs(5));

    let payload = client.fetch(&code()).await.unwrap();
    assert_eq!(payload, json!({"name": "Hub"}));

    let captured = stub.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].jan_code.as_deref(), Some("4901234567890"));
    assert_eq!(captured[0].authorization.as_deref(), Some("ApiKey_test-0000"));
    assert_eq!(captured[0].account_id.as_deref(), Some("3541"));
    assert!(captured[0]
        .user_agent
        .as_deref()
        .unwrap_or_default()
        .starts_with("jan-proxy/"));
}

#[tokio::test]
async fn test_array_payload_passed_through() {
    let body = json!([{"productName": "Mouse", "keys": ["DPI: 1600"]}]);
    let stub = spawn_stub_upstream(StubBehavior::Json(body.clone())).await;
    let client = client_for(&stub.base_url, Duration::from_secs(5));

    assert_eq!(client.fetch(&code()).await.unwrap(), body);
}

#[tokio::test]
async fn test_error_status_reported() {
    let stub = spawn_stub_upstream(StubBehavior::Status(503)).await;
    let client = client_for(&stub.base_url, Duration::from_secs(5));

    match client.fetch(&code()).await {
        Err(UpstreamError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_reported() {
    let stub = spawn_stub_upstream(StubBehavior::RawBody("<html>oops</html>")).await;
    let client = client_for(&stub.base_url, Duration::from_secs(5));

    assert!(matches!(
        client.fetch(&code()).await,
        Err(UpstreamError::Decode(_))
    ));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let stub = spawn_stub_upstream(StubBehavior::Delay(Duration::from_secs(3))).await;
    let client = client_for(&stub.base_url, Duration::from_millis(200));

    match client.fetch(&code()).await {
        Err(UpstreamError::Timeout(limit)) => assert_eq!(limit, Duration::from_millis(200)),
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/spec-forms", addr), Duration::from_secs(2));
    assert!(matches!(
        client.fetch(&code()).await,
        Err(UpstreamError::Network(_))
    ));
}

#[tokio::test]
async fn test_router_falls_back_when_upstream_times_out() {
    let stub = spawn_stub_upstream(StubBehavior::Delay(Duration::from_secs(3))).await;
    let client = client_for(&stub.base_url, Duration::from_millis(200));
    let app = build_router(AppState::new(Arc::new(client)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bihinkanri-proxy?jan_code=4901234567890")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["dataSource"], json!("fallback"));
    assert_eq!(body["data"]["specs"]["画面サイズ"], json!("20インチ"));
    assert!(body["debug"]["upstreamError"]
        .as_str()
        .unwrap()
        .contains("timed out"));
}

#[tokio::test]
async fn test_router_uses_real_upstream_data() {
    let stub = spawn_stub_upstream(StubBehavior::Json(json!([{
        "product_name": "USBハブ",
        "manufacturer_name": "ACME",
        "model": "HUB-4",
        "keys": ["ポート数: 4"]
    }])))
    .await;
    let client = client_for(&stub.base_url, Duration::from_secs(5));
    let app = build_router(AppState::new(Arc::new(client)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bihinkanri-proxy?jan_code=4901234567890")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["dataSource"], json!("api"));
    assert_eq!(
        body["data"],
        json!({
            "name": "USBハブ",
            "manufacturer_name": "ACME",
            "model_name": "HUB-4",
            "specs": {"項目1": "ポート数: 4"}
        })
    );
}
