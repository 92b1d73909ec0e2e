//! Wire types for the Xweather JSON responses and their conversion into crate records.

use crate::types::forecast::ForecastPeriod;
use crate::types::observation::RawObservation;
use crate::xweather::error::XweatherError;
use chrono::{DateTime, FixedOffset};
use log::{debug, warn};
use serde::Deserialize;

/// The `{success, error, response}` envelope every endpoint returns.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub success: bool,
    pub error: Option<ApiErrorBody>,
    pub response: Option<OneOrMany<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// Single-location queries answer with an object, radius queries with an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> ApiResponse<T> {
    /// Unwraps the envelope. A successful response carrying an `error` (such as
    /// `warn_no_data`) is logged and yields whatever records are present.
    pub fn into_result(self) -> Result<Vec<T>, XweatherError> {
        if !self.success {
            let (code, description) = match self.error {
                Some(error) => (error.code, error.description),
                None => ("unknown".to_string(), "Unknown error".to_string()),
            };
            return Err(XweatherError::Api { code, description });
        }
        if let Some(error) = &self.error {
            warn!("Xweather warning ({}): {}", error.code, error.description);
        }
        Ok(self.response.map(OneOrMany::into_vec).unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObservationRecord {
    pub id: Option<String>,
    pub loc: Option<Location>,
    pub place: Option<Place>,
    pub ob: Option<ObservationBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Location {
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Place {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ObservationBody {
    #[serde(rename = "tempF")]
    pub temp_f: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "pressureIN")]
    pub pressure_in: Option<f64>,
    #[serde(rename = "windSpeedMPH")]
    pub wind_speed_mph: Option<f64>,
    #[serde(rename = "windDir")]
    pub wind_dir: Option<String>,
    pub weather: Option<String>,
    #[serde(rename = "dateTimeISO")]
    pub date_time_iso: Option<String>,
}

impl From<ObservationRecord> for RawObservation {
    fn from(record: ObservationRecord) -> Self {
        let ob = record.ob.unwrap_or_default();
        RawObservation {
            station_id: record.id,
            name: record.place.and_then(|place| place.name),
            latitude: record.loc.as_ref().and_then(|loc| loc.lat),
            longitude: record.loc.as_ref().and_then(|loc| loc.long),
            temperature: ob.temp_f,
            humidity: ob.humidity,
            pressure: ob.pressure_in,
            wind_speed: ob.wind_speed_mph,
            wind_direction: ob.wind_dir,
            weather: ob.weather,
            timestamp: ob.date_time_iso,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastRecord {
    #[serde(default)]
    pub periods: Vec<PeriodRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PeriodRecord {
    #[serde(rename = "dateTimeISO")]
    pub date_time_iso: Option<String>,
    #[serde(rename = "maxTempF")]
    pub max_temp_f: Option<f64>,
    #[serde(rename = "minTempF")]
    pub min_temp_f: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "pressureIN")]
    pub pressure_in: Option<f64>,
    #[serde(rename = "windSpeedMPH")]
    pub wind_speed_mph: Option<f64>,
    #[serde(rename = "windDir")]
    pub wind_dir: Option<String>,
    pub weather: Option<String>,
    #[serde(rename = "precipIN")]
    pub precip_in: Option<f64>,
    #[serde(rename = "snowIN")]
    pub snow_in: Option<f64>,
}

impl PeriodRecord {
    /// Periods carry no location of their own; they belong to the queried point.
    pub fn into_period(self, latitude: f64, longitude: f64) -> ForecastPeriod {
        ForecastPeriod {
            latitude,
            longitude,
            datetime: self.date_time_iso.as_deref().and_then(parse_timestamp),
            temperature_max: self.max_temp_f,
            temperature_min: self.min_temp_f,
            humidity: self.humidity,
            pressure: self.pressure_in,
            wind_speed: self.wind_speed_mph,
            wind_direction: self.wind_dir,
            weather: self.weather,
            precipitation: self.precip_in,
            snow: self.snow_in,
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .map_err(|e| debug!("Ignoring unparseable forecast time '{}': {}", text, e))
        .ok()
}
