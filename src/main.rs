//! Gemini Gateway - Main entry point
//!
//! This binary loads configuration, initializes logging and metrics, and
//! serves the gateway routes.

use anyhow::Result;
use chrono::Local;
use gemini_gateway::{
    core::{init_metrics, AppConfig, EnvSecrets, SecretSource},
    router, AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Custom time formatter that uses local timezone (respects TZ environment variable)
struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S"))
    }
}

fn init_tracing() {
    let no_color = std::env::var("NO_COLOR").is_ok();
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Noise-suppression filters are always appended so a bare RUST_LOG=trace
    // does not let hyper/reqwest internals through.
    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,gemini_gateway=debug".to_string());
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},hyper=warn,hyper::proto=warn,h2=warn,reqwest=warn",
        base_filter
    ));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_timer(LocalTime))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_timer(LocalTime)
                    .with_ansi(!no_color),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    init_tracing();
    init_metrics();

    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            AppConfig::load(&path)?
        }
        Err(_) => AppConfig::from_env(),
    };

    if EnvSecrets.secret(&config.upstream.api_key_var).is_none() {
        tracing::warn!(
            "Secret {} is not set; gateway requests will be rejected",
            config.upstream.api_key_var
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let upstream_url = config.generate_content_url();

    let state = Arc::new(AppState::from_config(&config, Arc::new(EnvSecrets))?);
    let app = router(state);

    tracing::info!("Starting Gemini Gateway on {}", addr);
    tracing::info!("Upstream endpoint: {}", upstream_url);
    tracing::info!("Generic gateway: /api/gemini");
    tracing::info!("Analysis gateway: /api/analyze");
    tracing::info!("Metrics endpoint: /metrics");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
