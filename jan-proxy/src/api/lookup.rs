//! Product lookup endpoint
//!
//! GET /api/bihinkanri-proxy?jan_code=4901234567890
//!
//! Always answers 200 for a well-formed code: real upstream data when
//! available, otherwise synthesized data tagged `mock` or `fallback`.

use axum::{
    extract::{rejection::QueryRejection, Query, RawQuery, State},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::models::{DebugInfo, LookupResponse};
use crate::services::LookupCode;
use crate::AppState;

/// Route path, kept compatible with existing front-end callers
pub const LOOKUP_PATH: &str = "/api/bihinkanri-proxy";

/// Query parameters for the lookup endpoint
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// Raw JAN code; non-digits are stripped before validation
    pub jan_code: Option<String>,
}

/// GET /api/bihinkanri-proxy
pub async fn lookup_product(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> ApiResult<Json<LookupResponse>> {
    // Undecodable query strings (e.g. a repeated jan_code) are malformed
    // codes; the raw query is echoed back as received.
    let Query(query) = query.map_err(|rejection| {
        debug!(error = %rejection, "Rejected lookup query string");
        ApiError::InvalidJanCode(raw_query.unwrap_or_default())
    })?;
    let raw = query.jan_code.unwrap_or_default();
    let code = LookupCode::parse(&raw).map_err(ApiError::from)?;

    info!(jan_code = %raw, normalized = %code, "Product lookup requested");

    let outcome = state.lookup.lookup(&code).await;

    Ok(Json(LookupResponse {
        success: true,
        jan_code: raw,
        data: outcome.product,
        data_source: outcome.source,
        message: outcome.source.message().map(str::to_string),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        debug: DebugInfo {
            normalized_code: code.to_string(),
            elapsed_ms: outcome.elapsed_ms,
            upstream_error: outcome.upstream_error,
        },
    }))
}

/// Any method other than GET on the lookup route
///
/// OPTIONS never reaches the router: the CORS layer in `build_router`
/// answers every OPTIONS request with 200 and an empty body.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Build lookup routes
pub fn lookup_routes() -> Router<AppState> {
    Router::new().route(
        LOOKUP_PATH,
        // Explicit HEAD handler, otherwise `get` also answers HEAD
        get(lookup_product)
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}
