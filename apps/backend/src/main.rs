//! eth-whatif gateway — API server and browser UI.
//!
//! Responsibilities:
//! - Proxy Alchemy and CoinGecko (keeps API keys server-side)
//! - Month-back balance, ETH price and top-coin endpoints
//! - Full analysis endpoint and the single-page UI

mod clients;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use state::{apply_env_overrides, AppState, ProviderKeys};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; keys may come from the real environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    whatif_core::init_workspace()?;
    let mut config = whatif_core::workspace::load_config()?;
    apply_env_overrides(&mut config, |k| std::env::var(k).ok());

    tracing::info!("eth-whatif gateway starting...");

    let state = Arc::new(AppState::from_config(&config, &ProviderKeys::from_env())?);
    let app = routes::app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!("Invalid listen address {}:{}", config.server.host, config.server.port)
        })?;
    tracing::info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
