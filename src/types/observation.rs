//! Defines the observation records that flow through the aggregation pipeline.
//!
//! Feeds deliver loosely-typed rows ([`RawObservation`]); they are resolved once, at
//! ingestion, into validated [`Observation`]s whose measurements are explicit `Option`s.

use crate::spatial::error::AggregationError;
use crate::types::temperature_category::TemperatureCategory;
use crate::types::weather_condition::WeatherCondition;
use bon::bon;
use chrono::{DateTime, FixedOffset};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A station reading as delivered by an upstream source, before validation.
///
/// Every field may be absent. Coordinates are required to become an [`Observation`];
/// everything else stays optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub station_id: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<String>,
    pub weather: Option<String>,
    /// ISO-8601 timestamp text, parsed during validation.
    pub timestamp: Option<String>,
}

/// A validated station reading with a usable location.
///
/// Latitude is guaranteed to lie in `-90..=90` and longitude in `-180..=180`.
/// Measurements that were not reported are `None`, never zero. Temperatures are in degrees
/// Fahrenheit, pressure in inches of mercury and wind speed in miles per hour, matching the
/// Xweather imperial fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub station_id: Option<String>,
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<String>,
    /// Trimmed, lower-cased weather description.
    pub weather: Option<String>,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

#[bon]
impl Observation {
    /// Creates a validated observation.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidInput`] if either coordinate is non-finite or out
    /// of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hyperlocal_weather::Observation;
    ///
    /// let obs = Observation::builder()
    ///     .station_id("KNYC")
    ///     .latitude(40.7789)
    ///     .longitude(-73.9692)
    ///     .temperature(58.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(obs.humidity, None);
    /// ```
    #[builder]
    pub fn new(
        latitude: f64,
        longitude: f64,
        #[builder(into)] station_id: Option<String>,
        #[builder(into)] name: Option<String>,
        temperature: Option<f64>,
        humidity: Option<f64>,
        pressure: Option<f64>,
        wind_speed: Option<f64>,
        #[builder(into)] wind_direction: Option<String>,
        #[builder(into)] weather: Option<String>,
        timestamp: Option<DateTime<FixedOffset>>,
    ) -> Result<Self, AggregationError> {
        validate_coordinate(station_id.as_deref(), "latitude", latitude, 90.0)?;
        validate_coordinate(station_id.as_deref(), "longitude", longitude, 180.0)?;

        Ok(Self {
            station_id,
            name,
            latitude,
            longitude,
            temperature: finite(temperature),
            humidity: finite(humidity),
            pressure: finite(pressure),
            wind_speed: finite(wind_speed),
            wind_direction,
            weather: weather.as_deref().and_then(WeatherCondition::normalize),
            timestamp,
        })
    }

    /// `[latitude, longitude]`, the point used for spatial indexing.
    pub fn position(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }

    pub fn condition(&self) -> Option<WeatherCondition> {
        self.weather.as_deref().and_then(WeatherCondition::from_text)
    }

    pub fn icon(&self) -> &'static str {
        WeatherCondition::icon_for(self.weather.as_deref())
    }

    pub fn temperature_category(&self) -> Option<TemperatureCategory> {
        self.temperature.map(TemperatureCategory::from_fahrenheit)
    }
}

impl TryFrom<RawObservation> for Observation {
    type Error = AggregationError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        let station = raw.station_id.as_deref();
        let latitude = raw
            .latitude
            .ok_or_else(|| AggregationError::invalid_input(station, "missing latitude"))?;
        let longitude = raw
            .longitude
            .ok_or_else(|| AggregationError::invalid_input(station, "missing longitude"))?;

        let timestamp = raw.timestamp.as_deref().and_then(|text| {
            DateTime::parse_from_rfc3339(text)
                .map_err(|e| debug!("Ignoring unparseable timestamp '{}': {}", text, e))
                .ok()
        });

        Observation::builder()
            .latitude(latitude)
            .longitude(longitude)
            .maybe_station_id(raw.station_id)
            .maybe_name(raw.name)
            .maybe_temperature(raw.temperature)
            .maybe_humidity(raw.humidity)
            .maybe_pressure(raw.pressure)
            .maybe_wind_speed(raw.wind_speed)
            .maybe_wind_direction(raw.wind_direction)
            .maybe_weather(raw.weather)
            .maybe_timestamp(timestamp)
            .build()
    }
}

/// The numeric fields of an [`Observation`] that can be aggregated or mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Measurement {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
}

impl Measurement {
    pub fn of(&self, observation: &Observation) -> Option<f64> {
        match self {
            Measurement::Temperature => observation.temperature,
            Measurement::Humidity => observation.humidity,
            Measurement::Pressure => observation.pressure,
            Measurement::WindSpeed => observation.wind_speed,
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            Measurement::Temperature => "temperature",
            Measurement::Humidity => "humidity",
            Measurement::Pressure => "pressure",
            Measurement::WindSpeed => "wind_speed",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

fn validate_coordinate(
    station: Option<&str>,
    axis: &str,
    value: f64,
    limit: f64,
) -> Result<(), AggregationError> {
    if !value.is_finite() || value.abs() > limit {
        return Err(AggregationError::invalid_input(
            station,
            format!("{axis} {value} outside [-{limit}, {limit}]"),
        ));
    }
    Ok(())
}

// NaN readings are treated as "no reading".
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
