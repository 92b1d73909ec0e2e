//! Geographic helpers for sizing the map viewport around a batch of observations.

use crate::types::observation::Observation;
use serde::Serialize;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use hyperlocal_weather::LatLon;
///
/// let nyc = LatLon(40.7128, -74.0060);
/// assert_eq!(nyc.0, 40.7128); // Latitude
/// assert_eq!(nyc.1, -74.0060); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);

/// Axis-aligned latitude/longitude rectangle, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The smallest box containing every observation, or `None` for an empty batch.
    pub fn from_observations(observations: &[Observation]) -> Option<Self> {
        let first = observations.first()?;
        let seed = BoundingBox {
            min_lat: first.latitude,
            min_lon: first.longitude,
            max_lat: first.latitude,
            max_lon: first.longitude,
        };
        Some(observations.iter().skip(1).fold(seed, |bounds, obs| BoundingBox {
            min_lat: bounds.min_lat.min(obs.latitude),
            min_lon: bounds.min_lon.min(obs.longitude),
            max_lat: bounds.max_lat.max(obs.latitude),
            max_lon: bounds.max_lon.max(obs.longitude),
        }))
    }

    pub fn center(&self) -> LatLon {
        LatLon(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}
