//! Presentation sink: holds the estimate currently shown to the user.
//!
//! Submissions are numbered when they start. A result is only published if
//! no newer submission has published first, so a slow remote response can't
//! overwrite a fresher estimate.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{CanonicalResult, MapPlacement, Prediction, PredictionMode};

/// Shown once when an estimate comes from the offline path.
pub const OFFLINE_NOTICE: &str =
    "Prediction service is unreachable. Showing an offline estimate with reduced confidence.";

/// Everything the UI needs to render one estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateView {
    pub sequence: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub result: CanonicalResult,
    pub mode: PredictionMode,
    pub offline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub map: MapPlacement,
}

impl EstimateView {
    pub fn new(
        sequence: u64,
        request_id: Option<String>,
        prediction: Prediction,
        map: MapPlacement,
    ) -> Self {
        let offline = prediction.is_offline();
        Self {
            sequence,
            request_id,
            result: prediction.result,
            mode: prediction.mode,
            offline,
            notice: offline.then_some(OFFLINE_NOTICE),
            map,
        }
    }
}

#[derive(Debug, Default)]
pub struct LatestEstimate {
    next_sequence: AtomicU64,
    latest: RwLock<Option<EstimateView>>,
}

impl LatestEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number a new submission. Sequences start at 1.
    pub fn begin(&self) -> u64 {
        self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Show `view` unless a newer submission is already displayed.
    /// Returns whether the view was accepted.
    pub fn publish(&self, view: EstimateView) -> bool {
        let mut latest = self.latest.write();
        match latest.as_ref() {
            Some(current) if current.sequence > view.sequence => {
                tracing::debug!(
                    stale = view.sequence,
                    current = current.sequence,
                    "Discarding stale estimate"
                );
                false
            }
            _ => {
                *latest = Some(view);
                true
            }
        }
    }

    pub fn latest(&self) -> Option<EstimateView> {
        self.latest.read().clone()
    }
}
