//! The canonical estimate shape shared by the remote and offline paths.

use serde::{Deserialize, Serialize};

/// Peak-hour label when the surcharge was applied.
pub const PEAK_HOUR_LABEL: &str = "Yes (+15%)";

/// Peak-hour label outside the lunch and dinner peaks.
pub const OFF_PEAK_LABEL: &str = "No";

/// Qualitative impact of a condition on the delivery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    Minimal,
    Low,
    Moderate,
    Significant,
    High,
    #[serde(rename = "Very High", alias = "VeryHigh")]
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceFactor {
    Low,
    Medium,
    High,
}

/// Explanatory factors shown next to the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factors {
    pub weather_impact: Impact,
    pub traffic_impact: Impact,
    pub distance_factor: DistanceFactor,
    pub peak_hour: String,
}

/// The only shape handed to the presentation layer.
///
/// Both fields are bounded on construction: the estimate is never negative
/// and the confidence always lies in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalResult {
    pub estimated_time_minutes: u32,
    pub confidence_percent: u8,
    pub factors: Factors,
}

impl CanonicalResult {
    /// Final assembly. Clamping happens here and nowhere else.
    pub fn assemble(estimated_time_minutes: i64, confidence_percent: i64, factors: Factors) -> Self {
        Self {
            estimated_time_minutes: estimated_time_minutes.clamp(0, i64::from(u32::MAX)) as u32,
            confidence_percent: confidence_percent.clamp(0, 100) as u8,
            factors,
        }
    }
}

/// Which path produced a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionMode {
    /// Model-backed estimate. The per-model predictions are diagnostic only.
    Remote {
        #[serde(skip_serializing_if = "Option::is_none")]
        gbr_prediction: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        lstm_prediction: Option<f64>,
    },
    /// Local heuristic estimate after the remote service failed.
    Offline { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub result: CanonicalResult,
    pub mode: PredictionMode,
}

impl Prediction {
    pub fn is_offline(&self) -> bool {
        matches!(self.mode, PredictionMode::Offline { .. })
    }
}
