//! jan-proxy library - JAN product lookup proxy
//!
//! Proxies the spec-forms product API, normalizes its loosely-typed payloads
//! into a canonical product record, and synthesizes deterministic placeholder
//! data when the API has nothing usable or fails.

use axum::http::{header, HeaderName, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use services::{ProductLookupService, ProductSource};

/// Application state shared across HTTP handlers
///
/// Immutable after startup; no per-request state is kept.
#[derive(Clone)]
pub struct AppState {
    pub lookup: ProductLookupService,
}

impl AppState {
    /// Create new application state around a product source
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            lookup: ProductLookupService::new(source),
        }
    }
}

/// CORS policy: any origin, GET/POST/OPTIONS, and the upstream credential headers
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-account-id"),
        ])
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::lookup_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
