pub mod estimate;
pub mod health;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/estimate", post(estimate::create_estimate))
        .route("/estimate/latest", get(estimate::latest_estimate))
}
