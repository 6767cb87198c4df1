//! Order form types and the payload sent to the prediction service.
//!
//! The wire strings for weather and traffic match the labels the model was
//! trained on ("Heavy Rain", "Very High"), so the enums rename on serialize
//! and accept both spellings on deserialize.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PredictError;

/// Cuisine sent when the restaurant is not in the catalogue.
pub const DEFAULT_CUISINE: &str = "North Indian";

/// Base kitchen preparation time before per-item work.
pub const BASE_PREP_MINUTES: u32 = 12;

/// Extra preparation time per ordered item.
pub const PREP_MINUTES_PER_ITEM: u32 = 2;

/// Longest delivery distance the form accepts.
pub const MAX_DISTANCE_KM: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Cloudy,
    Hot,
    Rain,
    #[serde(rename = "Heavy Rain", alias = "HeavyRain")]
    HeavyRain,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Cloudy,
        Weather::Hot,
        Weather::Rain,
        Weather::HeavyRain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Hot => "Hot",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
        }
    }
}

/// Traffic levels, declared in increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Traffic {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High", alias = "VeryHigh")]
    VeryHigh,
}

impl Traffic {
    pub const ALL: [Traffic; 4] = [
        Traffic::Low,
        Traffic::Medium,
        Traffic::High,
        Traffic::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

/// A single order submission as entered in the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub restaurant: String,
    pub city: String,
    /// Delivery distance in kilometres.
    #[serde(rename = "distance")]
    pub distance_km: f64,
    pub num_items: u32,
    /// Order value in whole currency units.
    pub order_value: u32,
    pub weather: Weather,
    pub traffic: Traffic,
}

impl PredictionRequest {
    /// Reject malformed submissions before any network activity.
    ///
    /// A zero distance is accepted (the estimate degrades to preparation
    /// time only); negative, non-finite or over-range distances are not.
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.restaurant.trim().is_empty() {
            return Err(PredictError::invalid("restaurant", "must not be empty"));
        }
        if self.city.trim().is_empty() {
            return Err(PredictError::invalid("city", "must not be empty"));
        }
        if !self.distance_km.is_finite() {
            return Err(PredictError::invalid("distance", "must be a finite number"));
        }
        if self.distance_km < 0.0 {
            return Err(PredictError::invalid("distance", "must not be negative"));
        }
        if self.distance_km > MAX_DISTANCE_KM {
            return Err(PredictError::invalid("distance", "must not exceed 100 km"));
        }
        if self.num_items == 0 {
            return Err(PredictError::invalid("num_items", "must be at least 1"));
        }
        Ok(())
    }
}

/// Preparation time in minutes for an order of `num_items` items.
pub fn prep_time_minutes(num_items: u32) -> u32 {
    BASE_PREP_MINUTES.saturating_add(num_items.saturating_mul(PREP_MINUTES_PER_ITEM))
}

/// Cuisine served by a catalogued cloud kitchen.
pub fn cuisine_for(restaurant: &str) -> &'static str {
    match restaurant.trim() {
        "Biryani Blues" | "Behrouz Biryani" => "Biryani",
        "Oven Story Pizza" | "Firangi Bake" | "WarmOven" => "Italian",
        "Mandarin Oak" => "Chinese",
        "Faasos" | "Slay Coffee" => "Fast Food",
        "EatFit" | "Freshmenu" => "Healthy",
        "The Bowl Company" | "Lunch Box" | "Box8" => "North Indian",
        _ => DEFAULT_CUISINE,
    }
}

/// Body of `POST /predict` on the prediction service.
///
/// Built fresh for each submission: the rating and partner experience are
/// sampled once here and never reused for another request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemotePayload<'a> {
    pub restaurant: &'a str,
    pub city: &'a str,
    pub distance: f64,
    pub num_items: u32,
    pub weather: Weather,
    pub traffic: Traffic,
    pub order_value: u32,
    pub cuisine: &'static str,
    pub prep_time: u32,
    pub restaurant_rating: f64,
    pub partner_experience: u32,
}

impl<'a> RemotePayload<'a> {
    pub fn build<R: Rng>(request: &'a PredictionRequest, rng: &mut R) -> Self {
        Self {
            restaurant: &request.restaurant,
            city: &request.city,
            distance: request.distance_km,
            num_items: request.num_items,
            weather: request.weather,
            traffic: request.traffic,
            order_value: request.order_value,
            cuisine: cuisine_for(&request.restaurant),
            prep_time: prep_time_minutes(request.num_items),
            restaurant_rating: rng.gen_range(4.2..4.7),
            partner_experience: rng.gen_range(6..=42),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(restaurant: &str) -> PredictionRequest {
        PredictionRequest {
            restaurant: restaurant.to_string(),
            city: "Bangalore".to_string(),
            distance_km: 5.0,
            num_items: 2,
            order_value: 450,
            weather: Weather::Clear,
            traffic: Traffic::Low,
        }
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(
            serde_json::to_string(&Weather::HeavyRain).unwrap(),
            "\"Heavy Rain\""
        );
        assert_eq!(
            serde_json::to_string(&Traffic::VeryHigh).unwrap(),
            "\"Very High\""
        );
        let w: Weather = serde_json::from_str("\"HeavyRain\"").unwrap();
        assert_eq!(w, Weather::HeavyRain);
        for weather in Weather::ALL {
            let json = serde_json::to_string(&weather).unwrap();
            assert_eq!(json, format!("\"{}\"", weather.as_str()));
        }
    }

    #[test]
    fn test_unmapped_restaurant_defaults_cuisine() {
        assert_eq!(cuisine_for("Some New Place"), "North Indian");
        assert_eq!(cuisine_for("Behrouz Biryani"), "Biryani");
        assert_eq!(cuisine_for("Mandarin Oak"), "Chinese");
    }

    #[test]
    fn test_prep_time() {
        assert_eq!(prep_time_minutes(0), 12);
        assert_eq!(prep_time_minutes(2), 16);
        assert_eq!(prep_time_minutes(3), 18);
    }

    #[test]
    fn test_payload_sampled_fields_in_range() {
        let req = request("Faasos");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let payload = RemotePayload::build(&req, &mut rng);
            assert!((4.2..4.7).contains(&payload.restaurant_rating));
            assert!((6..=42).contains(&payload.partner_experience));
        }
    }

    #[test]
    fn test_payload_reproducible_with_seed() {
        let req = request("Unknown Kitchen");
        let a = RemotePayload::build(&req, &mut StdRng::seed_from_u64(42));
        let b = RemotePayload::build(&req, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.cuisine, DEFAULT_CUISINE);
        assert_eq!(a.prep_time, 16);
    }

    #[test]
    fn test_payload_wire_shape() {
        let req = request("Box8");
        let payload = RemotePayload::build(&req, &mut StdRng::seed_from_u64(1));
        let json = serde_json::to_value(&payload).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "restaurant",
            "city",
            "distance",
            "num_items",
            "weather",
            "traffic",
            "order_value",
            "cuisine",
            "prep_time",
            "restaurant_rating",
            "partner_experience",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 11);
    }

    #[test]
    fn test_validate() {
        assert!(request("Faasos").validate().is_ok());

        let mut zero = request("Faasos");
        zero.distance_km = 0.0;
        assert!(zero.validate().is_ok());

        let mut negative = request("Faasos");
        negative.distance_km = -1.0;
        assert!(negative.validate().is_err());

        let mut nan = request("Faasos");
        nan.distance_km = f64::NAN;
        assert!(nan.validate().is_err());

        let mut no_items = request("Faasos");
        no_items.num_items = 0;
        assert!(no_items.validate().is_err());

        let mut blank = request("  ");
        blank.city = "Pune".to_string();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_validate_distance_upper_bound() {
        let mut edge = request("Faasos");
        edge.distance_km = MAX_DISTANCE_KM;
        assert!(edge.validate().is_ok());

        for distance in [100.5, 1e9, f64::MAX] {
            let mut far = request("Faasos");
            far.distance_km = distance;
            assert_eq!(
                far.validate(),
                Err(PredictError::invalid("distance", "must not exceed 100 km"))
            );
        }
    }

    #[test]
    fn test_request_from_form_json() {
        let req: PredictionRequest = serde_json::from_str(
            r#"{"restaurant":"Faasos","city":"Delhi","distance":3.5,"num_items":2,
                "order_value":300,"weather":"Heavy Rain","traffic":"Very High"}"#,
        )
        .unwrap();
        assert_eq!(req.weather, Weather::HeavyRain);
        assert_eq!(req.traffic, Traffic::VeryHigh);
        assert_eq!(req.distance_km, 3.5);
    }
}
