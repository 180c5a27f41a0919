//! Liveness and readiness handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Cheap liveness probe; does not touch the database.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
///
/// Readiness probe: pings the database and reports `degraded` when it
/// cannot be reached.
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let db_ok = state.db.health_check().await.unwrap_or(false);

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: if db_ok { "ok" } else { "degraded" }.to_string(),
        database: if db_ok { "connected" } else { "unavailable" }.to_string(),
        worker_enabled: state.config.worker.enabled,
    }))
}
