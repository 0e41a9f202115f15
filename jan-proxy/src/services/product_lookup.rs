//! Lookup orchestration
//!
//! fetch → classify → transform, or synthesize when the payload is unusable
//! or the fetch failed. Transport failures never reach the caller.

use super::jan_code::LookupCode;
use super::normalizer::{has_usable_data, transform_api_data, unwrap_target};
use super::synthesizer::synthesize;
use super::upstream_client::ProductSource;
use crate::models::{CanonicalProduct, DataSource};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Result of one lookup
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    pub product: CanonicalProduct,
    pub source: DataSource,
    /// Upstream failure description, set only for [`DataSource::Fallback`]
    pub upstream_error: Option<String>,
    pub elapsed_ms: u64,
}

/// Stateless lookup service shared by all requests
#[derive(Clone)]
pub struct ProductLookupService {
    source: Arc<dyn ProductSource>,
}

impl ProductLookupService {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self { source }
    }

    pub async fn lookup(&self, code: &LookupCode) -> LookupOutcome {
        let started = Instant::now();

        let (product, source, upstream_error) = match self.source.fetch(code).await {
            Ok(raw) => {
                // A payload can pass the permissive check yet map to nothing
                // (e.g. only numeric fields); that still counts as no data.
                let product = if has_usable_data(&raw) {
                    Some(transform_api_data(unwrap_target(&raw)))
                } else {
                    None
                };

                match product {
                    Some(product) if !product.is_empty() => (product, DataSource::Api, None),
                    _ => {
                        info!(jan_code = %code, "Upstream returned no usable product data, synthesizing");
                        (synthesize(code), DataSource::Mock, None)
                    }
                }
            }
            Err(e) => {
                warn!(jan_code = %code, error = %e, "Upstream lookup failed, using fallback data");
                (synthesize(code), DataSource::Fallback, Some(e.to_string()))
            }
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            jan_code = %code,
            data_source = source.as_str(),
            elapsed_ms,
            "Lookup complete"
        );

        LookupOutcome {
            product,
            source,
            upstream_error,
            elapsed_ms,
        }
    }
}
