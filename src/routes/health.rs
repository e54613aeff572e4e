use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub rate_store: String,
}

/// Health check endpoint - public
///
/// The pricing engine has no external dependency, so a dead rate store only
/// degrades the service (fallback tables keep quoting working).
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let rates_result = state.rates.health_check().await;

    let rates_status = if rates_result.is_ok() { "ok" } else { "error" };
    let status = if rates_result.is_ok() {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                rate_store: rates_status.to_string(),
            },
        }),
    )
}
