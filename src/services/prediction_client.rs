//! Client for the model-serving prediction service.
//!
//! The service is optional: every failure is reported as a [`RemoteError`]
//! and the orchestrator decides what to do with it. There is no retry.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{Factors, RemotePayload};

/// Reasons the remote path can be unavailable. All of them lead to the
/// offline estimate.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("prediction service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("prediction service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid prediction service response: {0}")]
    Decode(String),

    #[error("prediction service declined the request: {0}")]
    Declined(String),
}

/// A successful, fully-populated model estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePrediction {
    pub estimated_time: i64,
    pub confidence: i64,
    pub factors: Factors,
    pub gbr_prediction: Option<f64>,
    pub lstm_prediction: Option<f64>,
}

/// Raw `/predict` response body. Every field is optional so a partial body
/// is reported as such instead of a generic parse failure.
///
/// Numbers arrive as JSON numbers of either kind (`41` or `41.0`) and are
/// rounded to whole minutes and percent.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    success: bool,
    #[serde(default)]
    estimated_time: Option<f64>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    factors: Option<Factors>,
    #[serde(default)]
    gbr_prediction: Option<f64>,
    #[serde(default)]
    lstm_prediction: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

// `as` saturates, so out-of-range values reach the clamp at assembly.
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

/// Error body returned alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl PredictResponse {
    fn into_prediction(self) -> Result<RemotePrediction, RemoteError> {
        if !self.success {
            return Err(RemoteError::Declined(
                self.error.unwrap_or_else(|| "no reason given".to_string()),
            ));
        }

        let missing = |field: &str| RemoteError::Decode(format!("missing field `{field}`"));

        Ok(RemotePrediction {
            estimated_time: self
                .estimated_time
                .map(round_whole)
                .ok_or_else(|| missing("estimated_time"))?,
            confidence: self
                .confidence
                .map(round_whole)
                .ok_or_else(|| missing("confidence"))?,
            factors: self.factors.ok_or_else(|| missing("factors"))?,
            gbr_prediction: self.gbr_prediction,
            lstm_prediction: self.lstm_prediction,
        })
    }
}

#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl PredictionClient {
    /// Create a new prediction service client.
    ///
    /// `timeout_seconds` bounds every `/predict` call so the offline path
    /// is always reached eventually.
    pub fn new(base_url: &str, timeout_seconds: u64, health_timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = base_url, timeout_seconds, "Prediction client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            health_timeout: Duration::from_secs(health_timeout_seconds),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue exactly one `POST /predict`.
    #[instrument(skip(self, payload), fields(restaurant = payload.restaurant))]
    pub async fn predict(&self, payload: &RemotePayload<'_>) -> Result<RemotePrediction, RemoteError> {
        let url = format!("{}/predict", self.base_url);

        debug!(url = %url, "Prediction service request");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());

            debug!(status = %status, message = %message, "Prediction service error");
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<PredictResponse>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        body.into_prediction()
    }

    /// Check prediction service health. Used for logging only.
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);

        self.client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
            .context("Prediction service health check failed")?
            .error_for_status()
            .context("Prediction service unhealthy")?;

        Ok(())
    }
}
