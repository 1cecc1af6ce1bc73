//! Health Routes
//!
//! Health check endpoints for monitoring and probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (state lock is reachable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the simulator state can be read. The engine is pure
/// in-memory state, so reachable means ready.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    let _sim = state.sim.read().await;
    StatusCode::OK
}

/// GET /health
///
/// Full health status with feed count and uptime.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let feeds = state.sim.read().await.engine.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        feeds,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
