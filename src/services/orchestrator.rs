//! Prediction orchestration: remote estimate with offline fallback.
//!
//! Each call moves through `Idle -> AwaitingRemote -> RemoteResult |
//! FallbackResult -> Idle` exactly once. The remote service is called at most
//! once per submission and any failure there is recovered locally; only
//! invalid input surfaces as an error.

use chrono::Timelike;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{CanonicalResult, Prediction, PredictionMode, PredictionRequest, RemotePayload};
use crate::error::PredictError;
use crate::services::heuristic;
use crate::services::prediction_client::{PredictionClient, RemoteError, RemotePrediction};

/// Confidence points removed when the estimate comes from the offline path.
pub const OFFLINE_CONFIDENCE_PENALTY: i64 = 10;

/// Source of the hour of day used for peak detection on the offline path.
pub trait Clock: Send + Sync {
    fn current_hour(&self) -> u32;
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Always reports the same hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn current_hour(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingRemote,
    RemoteResult,
    FallbackResult,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingRemote => "awaiting_remote",
            Self::RemoteResult => "remote_result",
            Self::FallbackResult => "fallback_result",
        };
        f.write_str(name)
    }
}

pub struct PredictionOrchestrator {
    client: PredictionClient,
    // Only held while building a payload, never across the remote call.
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
}

impl PredictionOrchestrator {
    pub fn new(client: PredictionClient, rng: StdRng, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            rng: Mutex::new(rng),
            clock,
        }
    }

    /// Orchestrator on the system clock, seeded for reproducible payloads
    /// when `seed` is set.
    pub fn with_seed(client: PredictionClient, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(client, rng, Arc::new(SystemClock))
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }

    /// Build the outbound payload, sampling the per-request fields.
    pub fn build_payload<'a>(&self, request: &'a PredictionRequest) -> RemotePayload<'a> {
        let mut rng = self.rng.lock();
        RemotePayload::build(request, &mut *rng)
    }

    /// Estimate a delivery.
    ///
    /// Returns `Err` only for invalid input, before any network activity.
    /// Every other outcome is a fully-populated [`Prediction`].
    pub async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, PredictError> {
        request.validate()?;

        let payload = self.build_payload(request);
        debug!(
            phase = %Phase::AwaitingRemote,
            cuisine = payload.cuisine,
            prep_time = payload.prep_time,
            restaurant_rating = payload.restaurant_rating,
            partner_experience = payload.partner_experience,
            "Requesting remote estimate"
        );

        let prediction = match self.client.predict(&payload).await {
            Ok(remote) => {
                debug!(phase = %Phase::RemoteResult, "Remote estimate received");
                Self::from_remote(remote)
            }
            Err(err) => {
                warn!(error = %err, "Prediction service unavailable, using offline estimate");
                let prediction = self.fallback(request, &err);
                debug!(phase = %Phase::FallbackResult, "Offline estimate computed");
                prediction
            }
        };

        info!(
            estimated_time = prediction.result.estimated_time_minutes,
            confidence = prediction.result.confidence_percent,
            offline = prediction.is_offline(),
            "Estimate ready"
        );
        debug!(phase = %Phase::Idle, "Prediction complete");

        Ok(prediction)
    }

    fn from_remote(remote: RemotePrediction) -> Prediction {
        Prediction {
            result: CanonicalResult::assemble(remote.estimated_time, remote.confidence, remote.factors),
            mode: PredictionMode::Remote {
                gbr_prediction: remote.gbr_prediction,
                lstm_prediction: remote.lstm_prediction,
            },
        }
    }

    /// Offline estimate from the original request fields and the current hour.
    fn fallback(&self, request: &PredictionRequest, reason: &RemoteError) -> Prediction {
        let hour = self.clock.current_hour();
        let estimate = heuristic::estimate(
            request.distance_km,
            request.weather,
            request.traffic,
            hour,
            request.num_items,
        );

        let confidence = (estimate.confidence - OFFLINE_CONFIDENCE_PENALTY).max(0);

        Prediction {
            result: CanonicalResult::assemble(estimate.total_minutes, confidence, estimate.factors),
            mode: PredictionMode::Offline {
                reason: reason.to_string(),
            },
        }
    }
}
