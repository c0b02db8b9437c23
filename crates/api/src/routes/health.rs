use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of open styling sessions.
    pub sessions: usize,
    /// Number of items in the loaded catalog.
    pub catalog_items: usize,
}

/// GET /health -- returns service status and basic counters.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog_items = state.engine.catalog().len();
    let status = if catalog_items > 0 { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.sessions.count().await,
        catalog_items,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
