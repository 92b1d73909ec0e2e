//! Temperature zones: Cold, Moderate and Warm partitions of a single batch.

use crate::spatial::error::AggregationError;
use crate::spatial::stats::{mean_and_population_std, Summary};
use crate::types::observation::Observation;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Default zone half-width, in standard deviations.
pub const DEFAULT_ZONE_THRESHOLD: f64 = 1.0;

/// Minimum number of temperature-bearing observations for a meaningful spread.
const MIN_ZONE_OBSERVATIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ZoneLabel {
    Cold,
    Moderate,
    Warm,
}

impl ZoneLabel {
    pub fn name(&self) -> &'static str {
        match self {
            ZoneLabel::Cold => "Cold Zone",
            ZoneLabel::Moderate => "Moderate Zone",
            ZoneLabel::Warm => "Warm Zone",
        }
    }
}

impl fmt::Display for ZoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Band edges computed from one batch's temperature distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneThresholds {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ZoneThresholds {
    /// Both edges belong to the Moderate band.
    pub fn classify(&self, temperature: f64) -> ZoneLabel {
        if temperature < self.lower {
            ZoneLabel::Cold
        } else if temperature > self.upper {
            ZoneLabel::Warm
        } else {
            ZoneLabel::Moderate
        }
    }
}

/// One representative point per zone: the centroid of the observations assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    pub label: ZoneLabel,
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub station_count: usize,
    pub temp_mean: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_mean: Option<f64>,
    pub pressure_mean: Option<f64>,
}

#[derive(Default)]
struct ZoneAccumulator {
    latitude: Summary,
    longitude: Summary,
    temperature: Summary,
    humidity: Summary,
    pressure: Summary,
}

impl ZoneAccumulator {
    fn push(&mut self, obs: &Observation) {
        self.latitude.push(Some(obs.latitude));
        self.longitude.push(Some(obs.longitude));
        self.temperature.push(obs.temperature);
        self.humidity.push(obs.humidity);
        self.pressure.push(obs.pressure);
    }

    // Only called for zones with at least one member, each of which has a temperature.
    fn finish(self, label: ZoneLabel) -> Option<Zone> {
        Some(Zone {
            label,
            centroid_lat: self.latitude.mean()?,
            centroid_lon: self.longitude.mean()?,
            station_count: self.latitude.count(),
            temp_mean: self.temperature.mean()?,
            temp_min: self.temperature.min()?,
            temp_max: self.temperature.max()?,
            humidity_mean: self.humidity.mean(),
            pressure_mean: self.pressure.mean(),
        })
    }
}

/// Computes `mean ± threshold * std` over the batch's reported temperatures.
///
/// # Errors
///
/// * [`AggregationError::InvalidThreshold`] if `threshold` is negative or not finite.
/// * [`AggregationError::InsufficientData`] if fewer than two observations carry a
///   temperature.
pub fn zone_thresholds(
    observations: &[Observation],
    threshold: f64,
) -> Result<ZoneThresholds, AggregationError> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(AggregationError::InvalidThreshold(threshold));
    }

    let temperatures: Vec<f64> = observations.iter().filter_map(|o| o.temperature).collect();
    if temperatures.len() < MIN_ZONE_OBSERVATIONS {
        return Err(AggregationError::InsufficientData {
            required: MIN_ZONE_OBSERVATIONS,
            found: temperatures.len(),
        });
    }

    let (mean, std_dev) = mean_and_population_std(&temperatures).ok_or(
        AggregationError::InsufficientData {
            required: MIN_ZONE_OBSERVATIONS,
            found: 0,
        },
    )?;

    Ok(ZoneThresholds {
        mean,
        std_dev,
        lower: mean - threshold * std_dev,
        upper: mean + threshold * std_dev,
    })
}

/// Partitions observations into Cold, Moderate and Warm zones and summarises each one.
///
/// An observation is Cold when its temperature is below `mean - threshold * std`, Warm when
/// above `mean + threshold * std`, and Moderate otherwise (edges included). Observations
/// without a temperature are left out of every zone. Zones with no members are omitted;
/// the rest are returned in Cold, Moderate, Warm order.
///
/// # Errors
///
/// See [`zone_thresholds`].
pub fn classify_zones(
    observations: &[Observation],
    threshold: f64,
) -> Result<Vec<Zone>, AggregationError> {
    let thresholds = zone_thresholds(observations, threshold)?;
    debug!(
        "Zone bands: cold < {:.2} <= moderate <= {:.2} < warm (mean {:.2}, std {:.2})",
        thresholds.lower, thresholds.upper, thresholds.mean, thresholds.std_dev
    );

    let mut zones: BTreeMap<ZoneLabel, ZoneAccumulator> = BTreeMap::new();
    for obs in observations {
        if let Some(temperature) = obs.temperature {
            zones
                .entry(thresholds.classify(temperature))
                .or_default()
                .push(obs);
        }
    }

    Ok(zones
        .into_iter()
        .filter_map(|(label, acc)| acc.finish(label))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(lat: f64, lon: f64, temp: Option<f64>) -> Observation {
        Observation::builder()
            .latitude(lat)
            .longitude(lon)
            .maybe_temperature(temp)
            .build()
            .unwrap()
    }

    fn batch(temps: &[f64]) -> Vec<Observation> {
        temps
            .iter()
            .enumerate()
            .map(|(i, t)| obs(40.0 + i as f64 * 0.01, -74.0, Some(*t)))
            .collect()
    }

    #[test]
    fn test_five_point_reference_batch() {
        let zones = classify_zones(&batch(&[10.0, 20.0, 30.0, 40.0, 50.0]), 1.0).unwrap();
        assert_eq!(zones.len(), 3);

        let cold = &zones[0];
        assert_eq!(cold.label, ZoneLabel::Cold);
        assert_eq!(cold.station_count, 1);
        assert_eq!(cold.temp_mean, 10.0);

        let moderate = &zones[1];
        assert_eq!(moderate.label, ZoneLabel::Moderate);
        assert_eq!(moderate.station_count, 3);
        assert_eq!(moderate.temp_min, 20.0);
        assert_eq!(moderate.temp_max, 40.0);
        assert_eq!(moderate.temp_mean, 30.0);
        assert!((moderate.centroid_lat - 40.02).abs() < 1e-9);
        assert_eq!(moderate.centroid_lon, -74.0);

        let warm = &zones[2];
        assert_eq!(warm.label, ZoneLabel::Warm);
        assert_eq!(warm.station_count, 1);
        assert_eq!(warm.temp_max, 50.0);
    }

    #[test]
    fn test_thresholds_use_population_std() {
        let t = zone_thresholds(&batch(&[10.0, 20.0, 30.0, 40.0, 50.0]), 1.0).unwrap();
        assert_eq!(t.mean, 30.0);
        assert!((t.lower - 15.857_864).abs() < 1e-5);
        assert!((t.upper - 44.142_135).abs() < 1e-5);
    }

    #[test]
    fn test_edges_are_moderate() {
        let t = ZoneThresholds {
            mean: 30.0,
            std_dev: 10.0,
            lower: 20.0,
            upper: 40.0,
        };
        assert_eq!(t.classify(20.0), ZoneLabel::Moderate);
        assert_eq!(t.classify(40.0), ZoneLabel::Moderate);
        assert_eq!(t.classify(19.999), ZoneLabel::Cold);
        assert_eq!(t.classify(40.001), ZoneLabel::Warm);
    }

    #[test]
    fn test_empty_zones_are_omitted() {
        // Identical temperatures: zero spread, everything is Moderate.
        let zones = classify_zones(&batch(&[55.0, 55.0, 55.0]), 1.0).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].label, ZoneLabel::Moderate);
        assert_eq!(zones[0].station_count, 3);
    }

    #[test]
    fn test_missing_temperatures_are_not_zoned() {
        let mut observations = batch(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        observations.push(obs(41.0, -73.0, None));
        let zones = classify_zones(&observations, 1.0).unwrap();
        assert_eq!(zones.iter().map(|z| z.station_count).sum::<usize>(), 5);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            classify_zones(&[], 1.0).unwrap_err(),
            AggregationError::InsufficientData {
                required: 2,
                found: 0
            }
        );
        let one_reading = vec![obs(1.0, 1.0, Some(12.0)), obs(1.0, 1.1, None)];
        assert_eq!(
            classify_zones(&one_reading, 1.0).unwrap_err(),
            AggregationError::InsufficientData {
                required: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let observations = batch(&[1.0, 2.0]);
        assert!(matches!(
            classify_zones(&observations, -1.0),
            Err(AggregationError::InvalidThreshold(_))
        ));
        assert!(matches!(
            classify_zones(&observations, f64::NAN),
            Err(AggregationError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_classify_zones_is_idempotent() {
        let mut observations = batch(&[12.0, 48.0, 31.0, 29.5, 55.0, 8.0]);
        observations.push(obs(40.2, -73.9, None));

        let first = classify_zones(&observations, 1.0).unwrap();
        let second = classify_zones(&observations, 1.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.iter().map(|z| z.station_count).sum::<usize>(), 6);
    }

    #[test]
    fn test_wider_threshold_collapses_into_moderate() {
        let zones = classify_zones(&batch(&[10.0, 20.0, 30.0, 40.0, 50.0]), 2.0).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].station_count, 5);
    }
}
