//! Prepares everything a map renderer needs from one batch of observations.

use crate::processing::clean::clean_observations;
use crate::processing::clustering::{cluster_markers, Marker, DEFAULT_CLUSTER_THRESHOLD};
use crate::processing::heatmap::{heatmap_points, HeatPoint};
use crate::processing::sampling::sample_evenly;
use crate::spatial::error::AggregationError;
use crate::spatial::gradient::GradientObservation;
use crate::spatial::grid::GridCell;
use crate::spatial::zones::Zone;
use crate::spatial::SpatialAggregator;
use crate::types::forecast::ForecastPeriod;
use crate::types::geo::BoundingBox;
use crate::types::observation::{Measurement, Observation, RawObservation};
use crate::types::weather_condition::WeatherCondition;
use bon::Builder;
use log::{info, warn};
use serde::Serialize;

/// Tuning for [`prepare_for_mapping`].
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct MappingOptions {
    #[builder(default)]
    pub aggregator: SpatialAggregator,
    /// Most individual markers drawn before dense cells are clustered.
    #[builder(default = DEFAULT_CLUSTER_THRESHOLD)]
    pub cluster_threshold: usize,
    /// Measurement used to weight the heatmap layer.
    #[builder(default = Measurement::Temperature)]
    pub heatmap_measurement: Measurement,
}

impl Default for MappingOptions {
    fn default() -> Self {
        MappingOptions::builder().build()
    }
}

/// Layers derived from one batch, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingData {
    pub observations: Vec<Observation>,
    pub grid: Vec<GridCell>,
    /// Empty when the batch has too few temperatures to form zones.
    pub zones: Vec<Zone>,
    /// Computed over at most `aggregator.max_points` evenly sampled observations.
    pub gradients: Vec<GradientObservation>,
    pub heatmap: Vec<HeatPoint>,
    pub markers: Vec<Marker>,
    pub forecast: Vec<ForecastPeriod>,
    pub bounds: Option<BoundingBox>,
}

/// Cleans a raw batch and derives every map layer from it.
///
/// Forecast periods are passed through with their weather text normalised. Zone
/// classification failing for lack of temperatures is logged and leaves `zones` empty; it
/// does not fail the batch.
///
/// # Errors
///
/// * [`AggregationError::NoValidObservations`] if raw rows were received but none had a
///   valid location.
/// * [`AggregationError::InvalidGridSize`] or [`AggregationError::InvalidThreshold`] for
///   bad options.
pub fn prepare_for_mapping(
    raw_observations: Vec<RawObservation>,
    forecast: Option<Vec<ForecastPeriod>>,
    options: &MappingOptions,
) -> Result<MappingData, AggregationError> {
    let received = raw_observations.len();
    let observations = clean_observations(raw_observations);
    if observations.is_empty() && received > 0 {
        return Err(AggregationError::NoValidObservations { received });
    }

    let aggregator = &options.aggregator;
    let grid = aggregator.aggregate(&observations)?;

    let zones = if observations.is_empty() {
        Vec::new()
    } else {
        match aggregator.classify_zones(&observations) {
            Ok(zones) => zones,
            Err(e @ AggregationError::InsufficientData { .. }) => {
                warn!("Skipping weather zones: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        }
    };

    let sampled = sample_evenly(&observations, aggregator.max_points);
    if sampled.len() < observations.len() {
        info!(
            "Sampled {} of {} observations for gradient estimation",
            sampled.len(),
            observations.len()
        );
    }
    let gradients = aggregator.estimate_gradients(&sampled)?;

    let heatmap = heatmap_points(&observations, options.heatmap_measurement);
    let markers = cluster_markers(
        &observations,
        options.cluster_threshold,
        aggregator.grid_size,
    )?;

    let forecast = forecast
        .unwrap_or_default()
        .into_iter()
        .map(|period| ForecastPeriod {
            weather: period.weather.as_deref().and_then(WeatherCondition::normalize),
            ..period
        })
        .collect();

    Ok(MappingData {
        bounds: BoundingBox::from_observations(&observations),
        observations,
        grid,
        zones,
        gradients,
        heatmap,
        markers,
        forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, lat: f64, lon: f64, temp: Option<f64>) -> RawObservation {
        RawObservation {
            station_id: Some(id.to_string()),
            latitude: Some(lat),
            longitude: Some(lon),
            temperature: temp,
            humidity: Some(65.0),
            weather: Some("Cloudy".to_string()),
            ..Default::default()
        }
    }

    fn city_batch() -> Vec<RawObservation> {
        vec![
            raw("A", 40.7128, -74.0060, Some(48.0)),
            raw("B", 40.7306, -73.9352, Some(52.0)),
            raw("C", 40.6782, -73.9442, Some(55.0)),
            raw("D", 40.7831, -73.9712, Some(61.0)),
            raw("E", 40.8448, -73.8648, Some(66.0)),
            RawObservation {
                station_id: Some("broken".to_string()),
                latitude: None,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_full_pipeline() {
        let data = prepare_for_mapping(city_batch(), None, &MappingOptions::default()).unwrap();

        assert_eq!(data.observations.len(), 5);
        assert_eq!(data.grid.iter().map(|c| c.count).sum::<usize>(), 5);
        assert_eq!(data.zones.iter().map(|z| z.station_count).sum::<usize>(), 5);
        assert_eq!(data.gradients.len(), 5);
        assert!(data.gradients.iter().all(|g| g.temperature_gradient.is_some()));
        assert_eq!(data.heatmap.len(), 5);
        assert_eq!(data.markers.len(), 5);
        assert!(data.forecast.is_empty());

        let bounds = data.bounds.unwrap();
        assert_eq!(bounds.min_lat, 40.6782);
        assert_eq!(bounds.max_lon, -73.8648);
        assert_eq!(data.observations[0].weather.as_deref(), Some("cloudy"));
    }

    #[test]
    fn test_zones_skipped_when_insufficient() {
        let batch = vec![raw("A", 1.0, 1.0, Some(10.0)), raw("B", 1.5, 1.5, None)];
        let data = prepare_for_mapping(batch, None, &MappingOptions::default()).unwrap();
        assert!(data.zones.is_empty());
        assert_eq!(data.grid.len(), 2);
    }

    #[test]
    fn test_no_valid_rows_is_an_error() {
        let batch = vec![RawObservation::default(), RawObservation::default()];
        assert_eq!(
            prepare_for_mapping(batch, None, &MappingOptions::default()).unwrap_err(),
            AggregationError::NoValidObservations { received: 2 }
        );
    }

    #[test]
    fn test_empty_batch_gives_empty_layers() {
        let data = prepare_for_mapping(Vec::new(), None, &MappingOptions::default()).unwrap();
        assert!(data.observations.is_empty());
        assert!(data.grid.is_empty());
        assert!(data.zones.is_empty());
        assert!(data.gradients.is_empty());
        assert_eq!(data.bounds, None);
    }

    #[test]
    fn test_gradients_are_sampled_to_the_ceiling() {
        let batch: Vec<RawObservation> = (0..30)
            .map(|i| raw(&format!("S{i}"), 10.0 + i as f64 * 0.01, 20.0, Some(i as f64)))
            .collect();
        let options = MappingOptions::builder()
            .aggregator(SpatialAggregator::builder().max_points(10).build())
            .cluster_threshold(5)
            .build();

        let data = prepare_for_mapping(batch, None, &options).unwrap();
        assert_eq!(data.observations.len(), 30);
        assert_eq!(data.gradients.len(), 10);
        assert!(data.markers.len() <= 30);
        assert_eq!(data.markers.iter().map(Marker::count).sum::<usize>(), 30);
    }

    #[test]
    fn test_forecast_weather_is_normalized() {
        let period = ForecastPeriod {
            latitude: 40.7,
            longitude: -74.0,
            datetime: None,
            temperature_max: Some(70.0),
            temperature_min: Some(55.0),
            humidity: None,
            pressure: None,
            wind_speed: None,
            wind_direction: None,
            weather: Some("  Showers ".to_string()),
            precipitation: Some(0.2),
            snow: None,
        };
        let data = prepare_for_mapping(
            city_batch(),
            Some(vec![period]),
            &MappingOptions::default(),
        )
        .unwrap();
        assert_eq!(data.forecast[0].weather.as_deref(), Some("showers"));
    }
}
