//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::config::BackendMode;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the service is ready to accept traffic. A configured
/// but unreachable database makes the service not ready; no database at
/// all is a supported mode and stays ready.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match database_status(&state) {
        "error" => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = database_status(&state);

    let status = if database == "error" {
        "degraded"
    } else {
        "healthy"
    };

    let backend_mode = match state.config.backend.mode {
        BackendMode::Local => "local",
        BackendMode::Http => "http",
    };

    Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        backend_mode: backend_mode.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Check database connectivity with a trivial statement
fn database_status(state: &AppState) -> &'static str {
    let conn_str = &state.config.database.connection_string;
    if conn_str.is_empty() {
        return "disabled";
    }

    let ok = rusqlite::Connection::open(conn_str)
        .and_then(|conn| conn.prepare("SELECT 1").map(|_| ()))
        .is_ok();
    if ok {
        "ok"
    } else {
        "error"
    }
}
