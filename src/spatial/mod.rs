//! The spatial aggregation core: grid binning, temperature zones and gradient estimation.
//!
//! Every operation is a pure function of its input batch. [`SpatialAggregator`] bundles the
//! tunable parameters so callers can configure them once and reuse them across batches
//! (including from several threads).

pub mod error;
pub mod gradient;
pub mod grid;
pub(crate) mod point;
pub(crate) mod stats;
pub mod zones;

use crate::spatial::error::AggregationError;
use crate::spatial::gradient::{
    estimate_gradients_with, GradientObservation, DEFAULT_MAX_POINTS, DEFAULT_NEIGHBORS,
};
use crate::spatial::grid::{aggregate, GridCell, DEFAULT_GRID_SIZE};
use crate::spatial::zones::{classify_zones, Zone, DEFAULT_ZONE_THRESHOLD};
use crate::types::observation::Observation;
use bon::Builder;

/// Configured entry point to the aggregation operations.
///
/// # Examples
///
/// ```rust
/// use hyperlocal_weather::{Observation, SpatialAggregator};
///
/// let aggregator = SpatialAggregator::builder().grid_size(0.05).build();
/// let batch = vec![
///     Observation::builder().latitude(40.71).longitude(-73.98).temperature(58.0).build()?,
///     Observation::builder().latitude(40.73).longitude(-73.96).temperature(61.0).build()?,
/// ];
///
/// let cells = aggregator.aggregate(&batch)?;
/// assert_eq!(cells.len(), 1);
/// assert_eq!(cells[0].count, 2);
/// # Ok::<(), hyperlocal_weather::AggregationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct SpatialAggregator {
    /// Grid cell edge length in degrees.
    #[builder(default = DEFAULT_GRID_SIZE)]
    pub grid_size: f64,
    /// Zone half-width in standard deviations.
    #[builder(default = DEFAULT_ZONE_THRESHOLD)]
    pub zone_threshold: f64,
    /// Neighbours per gradient estimate.
    #[builder(default = DEFAULT_NEIGHBORS)]
    pub neighbors: usize,
    /// Largest batch accepted by [`SpatialAggregator::estimate_gradients`].
    #[builder(default = DEFAULT_MAX_POINTS)]
    pub max_points: usize,
}

impl Default for SpatialAggregator {
    fn default() -> Self {
        SpatialAggregator::builder().build()
    }
}

impl SpatialAggregator {
    /// See [`grid::aggregate`].
    pub fn aggregate(&self, observations: &[Observation]) -> Result<Vec<GridCell>, AggregationError> {
        aggregate(observations, self.grid_size)
    }

    /// See [`zones::classify_zones`].
    pub fn classify_zones(&self, observations: &[Observation]) -> Result<Vec<Zone>, AggregationError> {
        classify_zones(observations, self.zone_threshold)
    }

    /// See [`gradient::estimate_gradients_with`].
    pub fn estimate_gradients(
        &self,
        observations: &[Observation],
    ) -> Result<Vec<GradientObservation>, AggregationError> {
        estimate_gradients_with(observations, self.neighbors, self.max_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let aggregator = SpatialAggregator::default();
        assert_eq!(aggregator.grid_size, 0.01);
        assert_eq!(aggregator.zone_threshold, 1.0);
        assert_eq!(aggregator.neighbors, 3);
        assert_eq!(aggregator.max_points, 1000);
    }

    #[test]
    fn test_empty_batch_behaviour() {
        let aggregator = SpatialAggregator::default();
        assert!(aggregator.aggregate(&[]).unwrap().is_empty());
        assert!(matches!(
            aggregator.classify_zones(&[]),
            Err(AggregationError::InsufficientData { .. })
        ));
        assert!(aggregator.estimate_gradients(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_aggregator_is_shareable_across_threads() {
        let aggregator = SpatialAggregator::builder().grid_size(0.1).build();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                std::thread::spawn(move || {
                    let batch: Vec<Observation> = (0..10)
                        .map(|i| {
                            Observation::builder()
                                .latitude(t as f64 + i as f64 * 0.01)
                                .longitude(0.0)
                                .temperature(i as f64)
                                .build()
                                .unwrap()
                        })
                        .collect();
                    aggregator.aggregate(&batch).unwrap().len()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap() >= 1);
        }
    }
}
