//! Health check handlers.

use axum::{http::StatusCode, Json};

use telemetry::health;

use crate::response::HealthResponse;

/// GET /health - full component health summary.
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    let registry = health();
    let report = registry.report();

    let status = if report.status.is_serving() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: format!("{:?}", report.status).to_lowercase(),
        store_connected: registry.store.is_healthy(),
        geoip_connected: registry.geoip.is_healthy(),
    };

    (status, Json(body))
}

/// GET /health/ready - readiness probe. Store must be reachable; geo
/// enrichment is best-effort and never gates readiness.
pub async fn ready_handler() -> StatusCode {
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - liveness probe.
pub async fn live_handler() -> StatusCode {
    if health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
