//! Great-circle distance between geographic coordinates.

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn to_point(self) -> Point<f64> {
        // geo points are (x, y) = (longitude, latitude)
        Point::new(self.longitude, self.latitude)
    }
}

/// Haversine distance in kilometers, rounded to two decimals.
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let meters = from.to_point().haversine_distance(&to.to_point());
    round_km(meters / 1000.0)
}

/// Rounds a kilometer value to two decimals.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point_is_zero() {
        let obelisco = Coordinates::new(-34.6037, -58.3816);
        assert_eq!(distance_km(obelisco, obelisco), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates::new(-34.6037, -58.3816);
        let b = Coordinates::new(-34.5875, -58.4200);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn test_distance_known_value() {
        // Buenos Aires to Montevideo is roughly 200 km
        let buenos_aires = Coordinates::new(-34.6037, -58.3816);
        let montevideo = Coordinates::new(-34.9011, -56.1645);
        let km = distance_km(buenos_aires, montevideo);
        assert!((200.0..210.0).contains(&km), "got {km}");
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        let km = distance_km(a, b);
        assert!((km - 111.19).abs() < 0.05, "got {km}");
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(1.23456), 1.23);
        assert_eq!(round_km(1.235001), 1.24);
        assert_eq!(round_km(0.0), 0.0);
    }
}
