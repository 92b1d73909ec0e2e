//! Grid-based marker clustering for dense station networks.

use crate::spatial::error::AggregationError;
use crate::spatial::grid::group_by_cell;
use crate::spatial::stats::Summary;
use crate::types::observation::Observation;
use log::debug;
use serde::Serialize;

/// Default largest number of individual markers shown before clustering kicks in.
pub const DEFAULT_CLUSTER_THRESHOLD: usize = 50;

/// A single collapsed marker standing in for every observation in one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMarker {
    /// South-west corner of the cell.
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
    pub mean_temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    Single(Observation),
    Cluster(ClusterMarker),
}

impl Marker {
    pub fn position(&self) -> (f64, f64) {
        match self {
            Marker::Single(obs) => (obs.latitude, obs.longitude),
            Marker::Cluster(cluster) => (cluster.latitude, cluster.longitude),
        }
    }

    /// Number of observations the marker represents.
    pub fn count(&self) -> usize {
        match self {
            Marker::Single(_) => 1,
            Marker::Cluster(cluster) => cluster.count,
        }
    }
}

/// Reduces a batch to map markers.
///
/// Batches of at most `threshold` observations become one marker each. Larger batches are
/// binned into `grid_size` cells; a cell holding more than `threshold` observations
/// collapses into a single [`ClusterMarker`], every other cell keeps its individual
/// markers.
///
/// # Errors
///
/// Returns [`AggregationError::InvalidGridSize`] for a non-positive or non-finite
/// `grid_size`.
pub fn cluster_markers(
    observations: &[Observation],
    threshold: usize,
    grid_size: f64,
) -> Result<Vec<Marker>, AggregationError> {
    if observations.len() <= threshold {
        return Ok(observations.iter().cloned().map(Marker::Single).collect());
    }

    let mut markers = Vec::new();
    for (cell, members) in group_by_cell(observations, grid_size)? {
        if members.len() > threshold {
            let (latitude, longitude) = cell.key(grid_size);
            markers.push(Marker::Cluster(ClusterMarker {
                latitude,
                longitude,
                count: members.len(),
                mean_temperature: members
                    .iter()
                    .map(|&i| observations[i].temperature)
                    .collect::<Summary>()
                    .mean(),
            }));
        } else {
            markers.extend(
                members
                    .iter()
                    .map(|&i| Marker::Single(observations[i].clone())),
            );
        }
    }

    debug!(
        "Reduced {} observations to {} markers",
        observations.len(),
        markers.len()
    );
    Ok(markers)
}
