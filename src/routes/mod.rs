pub mod health;
pub mod quotes;
pub mod rates;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Rate tables as currently resolved (remote or fallback)
        .route("/rates/:service", get(rates::get_service_rates))
        // Quoting
        .route("/quotes/price", post(quotes::price_quote))
        .route("/quotes/load", post(quotes::load_document))
        .route("/quotes/refresh-pricing", post(quotes::refresh_pricing))
}
