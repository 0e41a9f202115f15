//! HTTP API handlers for jan-proxy

pub mod buildinfo;
pub mod health;
pub mod lookup;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use lookup::{lookup_product, lookup_routes, LookupQuery};
