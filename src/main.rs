//! Carrier Vetting Proxy
//!
//! Accepts carrier lookups by MC, DOT or phone number, forwards them to
//! the vetting provider and answers with a PASS/FAIL verdict computed from
//! a configurable condition table.

use std::sync::Arc;

use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod domain;
mod engine;
mod error;
mod logging;
mod upstream;

use crate::api::build_router;
use crate::auth::ApiKeyValidator;
use crate::config::Config;
use crate::domain::ConditionTable;
use crate::engine::{CheckDispatcher, ConditionAssessor};
use crate::upstream::HighwayClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Runs lookups and assessments.
    pub dispatcher: Arc<CheckDispatcher>,
    /// Vetting provider environment, reported by the health probe.
    pub upstream_environment: &'static str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is expected in production
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init();

    tracing::info!("Starting carrier vetting proxy v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        upstream = %config.upstream.environment(),
        conditions = %config.conditions.path.display(),
        "Configuration loaded"
    );

    // The condition table is read once and never reloaded.
    let conditions = ConditionTable::load(&config.conditions.path).map_err(|e| {
        tracing::error!(error = %e, "Failed to load condition table");
        anyhow::anyhow!("Condition table error: {}", e)
    })?;

    let client = HighwayClient::new(&config.upstream).map_err(|e| {
        tracing::error!(error = %e, "Failed to build vetting provider client");
        anyhow::anyhow!("Upstream client error: {}", e)
    })?;

    tracing::info!(api_root = %client.api_root(), "Vetting provider client ready");

    let dispatcher = CheckDispatcher::new(
        Arc::new(client),
        ConditionAssessor::new(Arc::new(conditions)),
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        upstream_environment: config.upstream.environment(),
    };

    let api_key_validator = ApiKeyValidator::new(&config.auth.api_key);
    let app = build_router(state, api_key_validator);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
