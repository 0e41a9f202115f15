//! Configuration loading and resolution
//!
//! Resolution priority for every setting:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! CLI and ENV are both surfaced by clap in the binary and arrive here as
//! [`ConfigOverrides`]; this module merges them with the TOML file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5780";

/// Default upstream spec-forms endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.bihinkanri.cloud/public-prod/spec-forms";

/// Default upstream timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// TOML file schema
// ============================================================================

/// On-disk configuration file
///
/// Every field is optional; missing sections fall back to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub upstream: UpstreamSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServerSection {
    pub bind_addr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub account_id: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// CLI / environment overrides (already merged by clap)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub account_id: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// Fully resolved proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

/// Upstream lookup API settings
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub account_id: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    /// Upstream settings with the default endpoint and timeout
    pub fn new(api_key: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            api_key: api_key.into(),
            account_id: account_id.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// API key must never reach the logs
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProxyConfig {
    /// Merge overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: &ConfigOverrides, file: &TomlConfig) -> Result<Self> {
        let bind_raw = pick(&overrides.bind_addr, &file.server.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind_raw, e)))?;

        let base_url = pick(&overrides.base_url, &file.upstream.base_url)
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(file.upstream.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "Upstream timeout must be at least 1 second".to_string(),
            ));
        }

        let api_key = pick(&overrides.api_key, &file.upstream.api_key);
        let account_id = pick(&overrides.account_id, &file.upstream.account_id);

        let (api_key, account_id) = match (api_key, account_id) {
            (Some(key), Some(account)) => (key, account),
            (key, account) => {
                let mut missing = Vec::new();
                if key.is_none() {
                    missing.push("API key");
                }
                if account.is_none() {
                    missing.push("account ID");
                }
                return Err(Error::Config(format!(
                    "Upstream {} not configured. Please configure using one of:\n\
                     1. Command line: --api-key <KEY> --account-id <ID>\n\
                     2. Environment: JAN_PROXY_API_KEY / JAN_PROXY_ACCOUNT_ID\n\
                     3. TOML config: [upstream] api_key = \"...\", account_id = \"...\"",
                    missing.join(" and ")
                )));
            }
        };

        let level = pick(&overrides.log_level, &Some(file.logging.level.clone()))
            .unwrap_or_else(default_log_level);

        Ok(Self {
            server: ServerConfig { bind_addr },
            upstream: UpstreamConfig {
                base_url,
                api_key,
                account_id,
                timeout: Duration::from_secs(timeout_secs),
            },
            logging: LoggingConfig { level },
        })
    }
}

/// First non-blank value, override before file
fn pick(primary: &Option<String>, secondary: &Option<String>) -> Option<String> {
    [primary, secondary]
        .into_iter()
        .flatten()
        .map(|v| v.trim())
        .find(|v| is_present(v))
        .map(str::to_string)
}

/// Non-empty, non-whitespace
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

// ============================================================================
// File loading
// ============================================================================

/// Platform config file location: `<config_dir>/jan-proxy/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jan-proxy").join("config.toml"))
}

/// TOML config plus the file it came from (`None` when defaults were used)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedToml {
    pub config: TomlConfig,
    pub path: Option<PathBuf>,
}

/// Load the TOML config file
///
/// An explicitly requested file must exist. The platform default file is
/// optional: when missing, defaults are returned with `path: None` so the
/// caller can warn once logging is up.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<LoadedToml> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(LoadedToml::default()),
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))?;

    Ok(LoadedToml {
        config,
        path: Some(path),
    })
}
