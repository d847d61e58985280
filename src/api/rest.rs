// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// The ingest endpoint (`POST /tv-webhook`) is guarded by the optional
// webhook token; all read endpoints are public.
//
// CORS is configured permissively so browser dashboards can read the
// scanner from any origin; tighten `allow_origin` in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::auth::authorize_webhook;
use crate::app_state::AppState;
use crate::types::IndicatorPayload;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ── Ingest ──────────────────────────────────────────────────
        .route("/tv-webhook", post(receive_webhook))
        // ── Reads ───────────────────────────────────────────────────
        .route("/", get(root))
        .route("/health", get(health))
        .route("/snapshot", get(snapshot))
        .route("/hot", get(hot_movers))
        .route("/scalp-setups", get(scalp_setups))
        // ── Middleware & State ──────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Ingest
// =============================================================================

#[derive(Serialize)]
struct WebhookAck {
    status: &'static str,
    symbol: String,
    score: f64,
}

async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<IndicatorPayload>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    authorize_webhook(&headers, state.config.webhook_token.as_deref()).map_err(|status| {
        (
            status,
            Json(serde_json::json!({ "error": "invalid or missing webhook token" })),
        )
    })?;

    let stored = state.store.apply(&payload);
    state.increment_version();

    info!(
        symbol = %stored.symbol,
        score = stored.score,
        tag = %stored.tag,
        strength = %stored.strength,
        velocity = stored.velocity,
        "update ingested"
    );

    Ok(Json(WebhookAck {
        status: "ok",
        symbol: stored.symbol,
        score: stored.score,
    }))
}

// =============================================================================
// Banner
// =============================================================================

async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Meridian Direction Scanner API",
        "symbols": state.store.len(),
    }))
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    symbols: usize,
    uptime_s: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        symbols: state.store.len(),
        uptime_s: state.start_time.elapsed().as_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Snapshot & filtered reads
// =============================================================================

async fn snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.snapshot())
}

async fn hot_movers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.hot_movers(state.config.hot_velocity_min))
}

async fn scalp_setups(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.scalp_setups(
        state.config.scalp_score_min,
        state.config.scalp_velocity_min,
        state.config.scalp_flow_min,
    ))
}
