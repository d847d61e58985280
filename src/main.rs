// =============================================================================
// Meridian Direction Scanner — Main Entry Point
// =============================================================================
//
// A webhook receiver for indicator alerts. Each inbound update produces a
// composite score, a direction/strength classification, and a short-window
// score velocity, kept in memory per symbol and served over HTTP.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod config;
mod scoring;
mod store;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::ScannerConfig;

/// Config file path, relative to the working directory.
const CONFIG_PATH: &str = "scanner_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║      Meridian Direction Scanner — Starting Up            ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = ScannerConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        let defaults = ScannerConfig::default();
        // Persist the defaults so operators have a file to edit.
        if let Err(e) = defaults.save(CONFIG_PATH) {
            warn!(error = %e, "Failed to write default config");
        }
        defaults
    });

    // Override from env if available.
    if let Ok(addr) = std::env::var("MERIDIAN_BIND_ADDR") {
        if !addr.trim().is_empty() {
            config.bind_addr = addr.trim().to_string();
        }
    }
    if let Ok(token) = std::env::var("MERIDIAN_WEBHOOK_TOKEN") {
        if !token.trim().is_empty() {
            config.webhook_token = Some(token);
        }
    }

    info!(
        bind_addr = %config.bind_addr,
        webhook_guard = config.webhook_token.is_some(),
        hot_velocity_min = config.hot_velocity_min,
        "Scanner configured"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    // ── 3. Start the API server ──────────────────────────────────────────
    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {}", state.config.bind_addr))?;

    info!(addr = %state.config.bind_addr, "API server listening");

    // ── 4. Serve until shutdown ──────────────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("Meridian Direction Scanner shut down complete.");
    Ok(())
}

/// Resolve when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
