use anyhow::Result;

use givi_eta::services::{PredictionClient, PredictionOrchestrator};
use givi_eta::{app, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        prediction_service = %settings.prediction_service_url,
        "Starting delivery estimate service"
    );

    let client = PredictionClient::new(
        &settings.prediction_service_url,
        settings.prediction_service_timeout_seconds,
        settings.health_check_timeout_seconds,
    )?;

    // Connectivity probe for the logs only; estimates never wait on it
    tokio::spawn({
        let client = client.clone();
        async move {
            match client.health_check().await {
                Ok(()) => tracing::info!("Prediction service is healthy"),
                Err(e) => tracing::warn!(
                    error = %e,
                    "Prediction service health check failed - estimates will fall back to offline mode"
                ),
            }
        }
    });

    let orchestrator = PredictionOrchestrator::with_seed(client, settings.prediction_rng_seed);
    if settings.prediction_rng_seed.is_some() {
        tracing::warn!("PREDICTION_RNG_SEED is set - sampled payload fields are reproducible");
    }

    let state = app::AppState::new(settings.clone(), orchestrator);
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
