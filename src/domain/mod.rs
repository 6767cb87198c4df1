//! Domain types for delivery estimates.

pub mod map;
pub mod order;
pub mod prediction;

pub use map::{Coordinates, MapPlacement};
pub use order::{PredictionRequest, RemotePayload, Traffic, Weather};
pub use prediction::{CanonicalResult, DistanceFactor, Factors, Impact, Prediction, PredictionMode};
