use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub prediction_service: String,
}

/// Health check endpoint - public
///
/// The prediction service is optional, so its failure only degrades the
/// reported status; estimates keep working offline.
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let remote = state.orchestrator.client().health_check().await;

    let (status, prediction_service) = match &remote {
        Ok(()) => ("healthy", "ok"),
        Err(e) => {
            tracing::info!(error = %e, "Prediction service not reachable, estimates will be offline");
            ("degraded", "error")
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                prediction_service: prediction_service.to_string(),
            },
        }),
    )
}
