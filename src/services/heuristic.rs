//! Offline delivery-time heuristic.
//!
//! Used only when the prediction service cannot produce an estimate. Pure
//! and deterministic: the caller supplies the hour of day, so identical
//! inputs always give identical output.

use crate::domain::order::prep_time_minutes;
use crate::domain::prediction::{OFF_PEAK_LABEL, PEAK_HOUR_LABEL};
use crate::domain::{DistanceFactor, Factors, Impact, Traffic, Weather};

/// Minutes per kilometre at a nominal 15 km/h.
pub const MINUTES_PER_KM: f64 = 4.0;

/// Lunch and dinner peaks.
pub const PEAK_HOURS: [u32; 6] = [12, 13, 14, 19, 20, 21];

pub const PEAK_SURCHARGE: f64 = 1.15;

pub const BASE_CONFIDENCE: i64 = 85;

/// Output of [`estimate`]. Confidence is left uncapped.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicEstimate {
    pub prep_time_minutes: u32,
    pub travel_time_minutes: f64,
    pub total_minutes: i64,
    pub confidence: i64,
    pub peak_hour: bool,
    pub factors: Factors,
}

pub fn weather_multiplier(weather: Weather) -> f64 {
    match weather {
        Weather::Clear => 1.0,
        Weather::Cloudy => 1.05,
        Weather::Hot => 1.1,
        Weather::Rain => 1.3,
        Weather::HeavyRain => 1.6,
    }
}

pub fn traffic_multiplier(traffic: Traffic) -> f64 {
    match traffic {
        Traffic::Low => 1.0,
        Traffic::Medium => 1.2,
        Traffic::High => 1.5,
        Traffic::VeryHigh => 1.8,
    }
}

pub fn weather_impact(weather: Weather) -> Impact {
    match weather {
        Weather::Clear => Impact::Minimal,
        Weather::Cloudy | Weather::Hot => Impact::Low,
        Weather::Rain => Impact::Moderate,
        Weather::HeavyRain => Impact::High,
    }
}

pub fn traffic_impact(traffic: Traffic) -> Impact {
    match traffic {
        Traffic::Low => Impact::Minimal,
        Traffic::Medium => Impact::Moderate,
        Traffic::High => Impact::Significant,
        Traffic::VeryHigh => Impact::VeryHigh,
    }
}

pub fn distance_factor(distance_km: f64) -> DistanceFactor {
    if distance_km > 7.0 {
        DistanceFactor::High
    } else if distance_km > 4.0 {
        DistanceFactor::Medium
    } else {
        DistanceFactor::Low
    }
}

pub fn is_peak_hour(hour_of_day: u32) -> bool {
    PEAK_HOURS.contains(&hour_of_day)
}

fn confidence(distance_km: f64, weather: Weather, traffic: Traffic) -> i64 {
    let mut confidence = BASE_CONFIDENCE;
    if weather == Weather::HeavyRain {
        confidence -= 10;
    }
    if traffic == Traffic::VeryHigh {
        confidence -= 8;
    }
    if distance_km > 10.0 {
        confidence -= 5;
    }
    confidence
}

/// Estimate a delivery from distance, conditions, hour of day and item count.
pub fn estimate(
    distance_km: f64,
    weather: Weather,
    traffic: Traffic,
    hour_of_day: u32,
    num_items: u32,
) -> HeuristicEstimate {
    let prep_time = prep_time_minutes(num_items);
    let peak_hour = is_peak_hour(hour_of_day);

    let mut travel = distance_km * MINUTES_PER_KM;
    travel *= weather_multiplier(weather);
    travel *= traffic_multiplier(traffic);
    if peak_hour {
        travel *= PEAK_SURCHARGE;
    }

    let total = (f64::from(prep_time) + travel).round() as i64;

    HeuristicEstimate {
        prep_time_minutes: prep_time,
        travel_time_minutes: travel,
        total_minutes: total,
        confidence: confidence(distance_km, weather, traffic),
        peak_hour,
        factors: Factors {
            weather_impact: weather_impact(weather),
            traffic_impact: traffic_impact(traffic),
            distance_factor: distance_factor(distance_km),
            peak_hour: if peak_hour { PEAK_HOUR_LABEL } else { OFF_PEAK_LABEL }.to_string(),
        },
    }
}
