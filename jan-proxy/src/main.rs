//! jan-proxy - JAN product lookup proxy
//!
//! Serves GET /api/bihinkanri-proxy?jan_code=... in front of the spec-forms
//! API, returning normalized product data or deterministic placeholder data.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use jan_common::config::{load_toml_config, ConfigOverrides, ProxyConfig};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jan_proxy::services::SpecFormsClient;
use jan_proxy::{build_router, AppState};

/// Command-line arguments for jan-proxy
#[derive(Parser, Debug)]
#[command(name = "jan-proxy")]
#[command(about = "JAN code product lookup proxy with deterministic fallback data")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config_dir>/jan-proxy/config.toml)
    #[arg(short, long, env = "JAN_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "JAN_PROXY_BIND")]
    bind: Option<String>,

    /// Spec-forms API endpoint
    #[arg(long, env = "JAN_PROXY_UPSTREAM_URL")]
    upstream_url: Option<String>,

    /// Spec-forms API key (sent as Authorization)
    #[arg(long, env = "JAN_PROXY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Spec-forms account ID (sent as X-Account-ID)
    #[arg(long, env = "JAN_PROXY_ACCOUNT_ID")]
    account_id: Option<String>,

    /// Upstream timeout in seconds
    #[arg(long, env = "JAN_PROXY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "JAN_PROXY_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_addr: self.bind.clone(),
            base_url: self.upstream_url.clone(),
            api_key: self.api_key.clone(),
            account_id: self.account_id.clone(),
            timeout_secs: self.timeout_secs,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so the file's log level applies
    let loaded = load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let config = ProxyConfig::resolve(&args.overrides(), &loaded.config)
        .context("Failed to resolve configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("jan_proxy={0},jan_common={0},tower_http={0}", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before anything can stall
    info!(
        "Starting jan-proxy v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &loaded.path {
        Some(path) => info!("Config file: {}", path.display()),
        None => warn!("No config file found, using command line, environment, and defaults"),
    }
    info!(
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout.as_secs(),
        "Upstream configured"
    );

    let client = SpecFormsClient::new(&config.upstream)
        .context("Failed to create spec-forms client")?;
    let state = AppState::new(Arc::new(client));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind_addr))?;
    info!("jan-proxy listening on http://{}", config.server.bind_addr);
    info!("Health check: http://{}/health", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM so in-flight lookups can drain
///
/// A signal source that cannot be installed is logged and ignored; the other
/// one still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    info!(signal = received, "Shutting down, draining in-flight requests");
}
