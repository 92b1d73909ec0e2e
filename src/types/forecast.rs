use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One forecast period for the requested location.
///
/// Periods are reported for the query point rather than a station, so every period of a
/// forecast shares the same coordinates. Units follow the Xweather imperial fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPeriod {
    pub latitude: f64,
    pub longitude: f64,
    pub datetime: Option<DateTime<FixedOffset>>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<String>,
    /// Trimmed, lower-cased weather description.
    pub weather: Option<String>,
    pub precipitation: Option<f64>,
    pub snow: Option<f64>,
}
