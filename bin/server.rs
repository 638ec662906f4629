// Card Registry - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use card_registry::api::{router, AppState};
use card_registry::config::ServerConfig;
use card_registry::{logging, CardRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    logging::init(&config.log_filter);

    let addr = config.bind_addr()?;

    // One registry for the whole process, shared through the router state
    let state = AppState::new(Arc::new(CardRegistry::new()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🚀 Server running on http://{}", addr);
    tracing::info!("   API: http://{}/api/cards", addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
