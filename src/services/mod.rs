//! Prediction services: remote client, offline heuristic, orchestration and
//! the presentation sink.

pub mod heuristic;
pub mod orchestrator;
pub mod prediction_client;
pub mod sink;

pub use orchestrator::{Clock, FixedClock, PredictionOrchestrator, SystemClock};
pub use prediction_client::{PredictionClient, RemoteError};
pub use sink::{EstimateView, LatestEstimate};
