use anyhow::Result;

use saniquote_backend::services::RatesClient;
use saniquote_backend::{app, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting SaniQuote backend"
    );

    // Create rate store client
    let rates = RatesClient::new(
        &settings.rates_store_url,
        settings.rates_store_timeout_seconds,
        settings.rates_cache_ttl_seconds,
    )?;

    // Optionally warm the rate cache (non-blocking; pricing works off
    // fallback tables until the store answers)
    tokio::spawn({
        let rates = rates.clone();
        async move {
            match rates.health_check().await {
                Ok(()) => {
                    rates.refresh().await;
                    tracing::info!("Rate store is healthy, cache warmed");
                }
                Err(e) => tracing::warn!(error = %e, "Rate store health check failed - pricing will use fallback tables"),
            }
        }
    });

    // Create application state
    let state = app::AppState::new(settings.clone(), rates);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
