//! Map placement for the presentation layer.
//!
//! Restaurants are pinned to their city centre and the delivery point is
//! offset by the order distance along a fixed bearing. This only positions
//! markers; it is not geocoding or routing.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Bearing of the delivery marker relative to the restaurant, in degrees.
const DELIVERY_BEARING_DEG: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }

    /// Point `distance_km` away along `bearing_deg`.
    pub fn offset(&self, distance_km: f64, bearing_deg: f64) -> Coordinates {
        let delta = distance_km / EARTH_RADIUS_KM;
        let bearing = bearing_deg.to_radians();
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        Coordinates::new(lat2.to_degrees(), lon2.to_degrees())
    }
}

/// Centre of a supported city; unknown cities fall back to Mumbai.
pub fn city_centre(city: &str) -> Coordinates {
    match city.trim().to_lowercase().as_str() {
        "delhi" | "new delhi" => Coordinates::new(28.6139, 77.2090),
        "bangalore" | "bengaluru" => Coordinates::new(12.9716, 77.5946),
        "hyderabad" => Coordinates::new(17.3850, 78.4867),
        "pune" => Coordinates::new(18.5204, 73.8567),
        "chennai" => Coordinates::new(13.0827, 80.2707),
        "kolkata" => Coordinates::new(22.5726, 88.3639),
        _ => Coordinates::new(19.0760, 72.8777),
    }
}

/// Marker positions for one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPlacement {
    pub restaurant: Coordinates,
    pub delivery: Coordinates,
}

impl MapPlacement {
    pub fn for_order(city: &str, distance_km: f64) -> Self {
        let restaurant = city_centre(city);
        Self {
            restaurant,
            delivery: restaurant.offset(distance_km, DELIVERY_BEARING_DEG),
        }
    }
}
