//! Remote and offline paths must converge on the same result shape.

use std::sync::Arc;

use axum::{http::StatusCode, routing::post, Json, Router};
use givi_eta::domain::{CanonicalResult, PredictionMode, PredictionRequest, Traffic, Weather};
use givi_eta::services::heuristic;
use givi_eta::services::orchestrator::OFFLINE_CONFIDENCE_PENALTY;
use givi_eta::services::{FixedClock, PredictionClient, PredictionOrchestrator};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn orchestrator(base_url: &str, hour: u32) -> PredictionOrchestrator {
    let client = PredictionClient::new(base_url, 2, 1).unwrap();
    PredictionOrchestrator::new(client, StdRng::seed_from_u64(99), Arc::new(FixedClock(hour)))
}

fn order(distance_km: f64, weather: Weather, traffic: Traffic, num_items: u32) -> PredictionRequest {
    PredictionRequest {
        restaurant: "EatFit".to_string(),
        city: "Kolkata".to_string(),
        distance_km,
        num_items,
        order_value: 380,
        weather,
        traffic,
    }
}

fn field_names(result: &CanonicalResult) -> Vec<String> {
    let value = serde_json::to_value(result).unwrap();
    let mut names: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    names.extend(value["factors"].as_object().unwrap().keys().cloned());
    names.sort();
    names
}

#[tokio::test]
async fn remote_and_offline_results_share_one_shape() {
    let remote_body: Value = json!({
        "success": true,
        "estimated_time": 29,
        "confidence": 88,
        "factors": {
            "weather_impact": "Low",
            "traffic_impact": "Moderate",
            "distance_factor": "Low",
            "peak_hour": "Yes (+15%)"
        },
        "gbr_prediction": 28.4,
        "lstm_prediction": 30.1
    });
    let up = serve(Router::new().route(
        "/predict",
        post(move || {
            let body = remote_body.clone();
            async move { Json(body) }
        }),
    ))
    .await;
    let down = serve(Router::new().route(
        "/predict",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    ))
    .await;

    let req = order(3.2, Weather::Cloudy, Traffic::Medium, 2);
    let remote = orchestrator(&up, 13).predict(&req).await.unwrap();
    let offline = orchestrator(&down, 13).predict(&req).await.unwrap();

    assert!(matches!(remote.mode, PredictionMode::Remote { .. }));
    assert!(matches!(offline.mode, PredictionMode::Offline { .. }));
    assert_eq!(field_names(&remote.result), field_names(&offline.result));

    assert_eq!(remote.result.estimated_time_minutes, 29);
    assert_eq!(remote.result.confidence_percent, 88);
    assert_eq!(remote.result.factors.peak_hour, "Yes (+15%)");
}

#[tokio::test]
async fn every_condition_yields_a_bounded_offline_result() {
    let down = serve(Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"success": false, "error": "oops"}))) }),
    ))
    .await;

    for hour in [0, 12, 19, 23] {
        let orch = orchestrator(&down, hour);
        for weather in Weather::ALL {
            for traffic in Traffic::ALL {
                for distance in [0.0, 4.5, 15.0] {
                    let prediction = orch.predict(&order(distance, weather, traffic, 1)).await.unwrap();
                    assert!(prediction.is_offline());
                    assert!(prediction.result.confidence_percent <= 100);

                    let expected = heuristic::estimate(distance, weather, traffic, hour, 1);
                    assert_eq!(
                        i64::from(prediction.result.confidence_percent),
                        (expected.confidence - OFFLINE_CONFIDENCE_PENALTY).max(0)
                    );
                    assert_eq!(i64::from(prediction.result.estimated_time_minutes), expected.total_minutes);
                    assert_eq!(prediction.result.factors, expected.factors);
                }
            }
        }
    }
}

#[tokio::test]
async fn out_of_range_remote_values_are_bounded_at_assembly() {
    let up = serve(Router::new().route(
        "/predict",
        post(|| async {
            Json(json!({
                "success": true,
                "estimated_time": -4,
                "confidence": 130,
                "factors": {
                    "weather_impact": "Minimal",
                    "traffic_impact": "Minimal",
                    "distance_factor": "Low",
                    "peak_hour": "No"
                }
            }))
        }),
    ))
    .await;

    let prediction = orchestrator(&up, 10)
        .predict(&order(1.0, Weather::Clear, Traffic::Low, 1))
        .await
        .unwrap();

    assert!(!prediction.is_offline());
    assert_eq!(prediction.result.estimated_time_minutes, 0);
    assert_eq!(prediction.result.confidence_percent, 100);
}
