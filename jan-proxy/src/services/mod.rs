//! Lookup services
//!
//! - [`jan_code`]: input validation
//! - [`upstream_client`]: spec-forms API access
//! - [`normalizer`]: payload classification and field mapping
//! - [`synthesizer`]: deterministic placeholder data
//! - [`product_lookup`]: orchestration of the above

pub mod jan_code;
pub mod normalizer;
pub mod product_lookup;
pub mod synthesizer;
pub mod upstream_client;

pub use jan_code::{JanCodeError, LookupCode};
pub use product_lookup::{LookupOutcome, ProductLookupService};
pub use upstream_client::{ProductSource, SpecFormsClient, UpstreamError};
