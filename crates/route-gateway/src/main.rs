//! Route Gateway - Main entry point
//!
//! This is the HTTP front door that:
//! - Serves the static map UI
//! - Relays `/route` requests to a local sidecar or a remote function
//! - Relays the computed path back to the caller

mod api;
mod config;
mod error;
mod router;
mod upstream;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::upstream::Backend;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first: the debug flag decides the default log filter
    let config = AppConfig::from_env();

    let default_filter = if config.debug {
        "info,route_gateway=debug,route_gateway_sdk=debug,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.debug {
        tracing::info!("Debug logging enabled");
    } else {
        tracing::info!("Info logging enabled");
    }
    tracing::info!("Configuration loaded: {:?}", config);

    let backend = Backend::from_config(&config)?;
    tracing::info!(mode = ?backend.mode(), "Route backend ready");

    let app = router::create_gateway_router(&config, backend);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Running server at: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
