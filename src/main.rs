use anyhow::Context;
use retell_outbound::config::Config;
use retell_outbound::infrastructure::retell::RetellClient;
use retell_outbound::interface::api::{build_router, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Retell outbound call server");

    // Load configuration; missing Retell credentials stop us here
    let config = Config::load().context("invalid configuration")?;
    info!("Configuration loaded: {:?}", config);

    if config.auth.api_key.is_none() {
        warn!("API_KEY is not set: every protected route will answer 401");
    }

    let retell = RetellClient::new(&config.retell)?;
    info!("Retell client ready for {}", retell.base_url());

    let state = AppState::from_config(&config, Arc::new(retell));
    let app = build_router(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("Server running on port {}", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
    }
}
