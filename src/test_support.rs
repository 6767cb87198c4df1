//! Shared helpers for tests that talk to a stub prediction service.

use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::io;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::{PredictionRequest, Traffic, Weather};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A well-formed `/predict` success body.
pub fn success_body() -> Value {
    json!({
        "success": true,
        "estimated_time": 41,
        "confidence": 77,
        "gbr_prediction": 40,
        "lstm_prediction": 43,
        "factors": {
            "weather_impact": "Moderate",
            "traffic_impact": "Very High",
            "distance_factor": "Medium",
            "peak_hour": "No"
        }
    })
}

pub fn payload_request() -> PredictionRequest {
    PredictionRequest {
        restaurant: "Oven Story Pizza".to_string(),
        city: "Pune".to_string(),
        distance_km: 6.0,
        num_items: 2,
        order_value: 540,
        weather: Weather::Rain,
        traffic: Traffic::VeryHigh,
    }
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a plain-text subscriber at `level` for the current thread.
    pub fn install(&self, level: tracing::Level) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(level)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines_at(&self, level: &str) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
