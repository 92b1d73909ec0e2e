//! Local temperature gradients estimated from each observation's nearest neighbours.

use crate::spatial::error::AggregationError;
use crate::spatial::point::build_index;
use crate::spatial::stats::Summary;
use crate::types::observation::Observation;
use log::warn;
use serde::Serialize;

/// Neighbours compared against each observation.
pub const DEFAULT_NEIGHBORS: usize = 3;

/// Largest batch accepted by gradient estimation. Bigger batches should be sampled first
/// (see [`crate::sample_evenly`]).
pub const DEFAULT_MAX_POINTS: usize = 1000;

/// An observation annotated with its temperature gradient, in degrees Fahrenheit per degree
/// of (lat, lon) distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientObservation {
    #[serde(flatten)]
    pub observation: Observation,
    /// `None` when the observation or all of its neighbours lack a temperature.
    pub temperature_gradient: Option<f64>,
}

/// Estimates a temperature gradient for every observation using the default neighbour count
/// and point ceiling.
///
/// See [`estimate_gradients_with`].
pub fn estimate_gradients(
    observations: &[Observation],
) -> Result<Vec<GradientObservation>, AggregationError> {
    estimate_gradients_with(observations, DEFAULT_NEIGHBORS, DEFAULT_MAX_POINTS)
}

/// Estimates a temperature gradient for every observation.
///
/// For observation `i`, the `neighbors` nearest other observations are selected by Euclidean
/// distance in raw degree space (all others if fewer exist). The gradient is
///
/// ```text
/// (temp[i] - mean(temp[neighbours])) / mean(distance to neighbours)
/// ```
///
/// where the temperature mean skips neighbours without a reading and the distance mean
/// covers every selected neighbour. Special cases, in order:
///
/// * no neighbours at all (a batch of one) gives `Some(0.0)`;
/// * a missing temperature at `i` gives `None`;
/// * a mean distance of zero (coincident points) gives `Some(0.0)` and logs a warning;
/// * no neighbour with a temperature gives `None`.
///
/// Results are returned in input order.
///
/// # Errors
///
/// Returns [`AggregationError::TooManyObservations`] if the batch exceeds `max_points`.
pub fn estimate_gradients_with(
    observations: &[Observation],
    neighbors: usize,
    max_points: usize,
) -> Result<Vec<GradientObservation>, AggregationError> {
    if observations.len() > max_points {
        return Err(AggregationError::TooManyObservations {
            max: max_points,
            found: observations.len(),
        });
    }

    let index = build_index(observations);
    let mut degenerate = 0usize;

    let annotated = observations
        .iter()
        .enumerate()
        .map(|(i, obs)| {
            let position = obs.position();
            let nearest: Vec<(f64, Option<f64>)> = index
                .nearest_neighbor_iter(&position)
                .filter(|point| point.index != i)
                .take(neighbors)
                .map(|point| {
                    (
                        point.distance_to(&position),
                        observations[point.index].temperature,
                    )
                })
                .collect();

            let estimate = Estimate::from_neighbours(obs.temperature, &nearest);
            if estimate == Estimate::Coincident {
                degenerate += 1;
            }

            GradientObservation {
                observation: obs.clone(),
                temperature_gradient: estimate.gradient(),
            }
        })
        .collect();

    if degenerate > 0 {
        warn!(
            "{} of {} observations had only coincident neighbours; their gradient was set to 0",
            degenerate,
            observations.len()
        );
    }

    Ok(annotated)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Estimate {
    Value(f64),
    NoNeighbours,
    Coincident,
    Missing,
}

impl Estimate {
    fn from_neighbours(temperature: Option<f64>, nearest: &[(f64, Option<f64>)]) -> Self {
        if nearest.is_empty() {
            return Estimate::NoNeighbours;
        }
        let Some(own) = temperature else {
            return Estimate::Missing;
        };
        let distance = nearest.iter().map(|(d, _)| d).sum::<f64>() / nearest.len() as f64;
        if distance == 0.0 {
            return Estimate::Coincident;
        }
        match nearest.iter().map(|(_, t)| *t).collect::<Summary>().mean() {
            Some(neighbour_mean) => Estimate::Value((own - neighbour_mean) / distance),
            None => Estimate::Missing,
        }
    }

    fn gradient(&self) -> Option<f64> {
        match self {
            Estimate::Value(gradient) => Some(*gradient),
            Estimate::NoNeighbours | Estimate::Coincident => Some(0.0),
            Estimate::Missing => None,
        }
    }
}
