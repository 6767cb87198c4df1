//! Estimate endpoints consumed by the web UI.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::response::DataResponse;
use crate::app::AppState;
use crate::domain::{MapPlacement, PredictionRequest};
use crate::error::{ApiError, ApiResult};
use crate::middleware::extract_request_id;
use crate::services::EstimateView;

/// Estimate a delivery and publish it to the display.
///
/// POST /estimate
pub async fn create_estimate(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictionRequest>,
) -> ApiResult<impl IntoResponse> {
    let request_id = extract_request_id(&headers);
    let sequence = state.sink.begin();

    let prediction = state
        .orchestrator
        .predict(&req)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(request_id.clone()))?;

    let view = EstimateView::new(
        sequence,
        request_id,
        prediction,
        MapPlacement::for_order(&req.city, req.distance_km),
    );
    if !state.sink.publish(view.clone()) {
        tracing::debug!(sequence, "Newer estimate already displayed");
    }

    Ok(DataResponse::new(view))
}

/// Most recently displayed estimate.
///
/// GET /estimate/latest
pub async fn latest_estimate(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let view = state.sink.latest().ok_or_else(|| {
        ApiError::NotFound("No estimate yet".to_string())
            .with_request_id(extract_request_id(&headers))
    })?;

    Ok(DataResponse::new(view))
}
