//! Shared HTTP API types
//!
//! Contains ONLY plain serde types with no HTTP framework dependencies.
//! The proxy wraps these in framework-specific responses (Axum).

pub mod types;

pub use types::{ClientErrorResponse, MethodNotAllowedResponse};
