//! # JAN Proxy Common Library
//!
//! Shared code for the JAN product lookup proxy:
//! - Error types
//! - Configuration loading (CLI/ENV overrides, TOML file, compiled defaults)
//! - API error-body types

pub mod api;
pub mod config;
pub mod error;

pub use error::{Error, Result};
