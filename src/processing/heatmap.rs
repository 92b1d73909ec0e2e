use crate::types::observation::{Measurement, Observation};
use serde::Serialize;

/// One weighted point of a heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
}

/// Heatmap points for `measurement`, skipping observations that did not report it.
pub fn heatmap_points(observations: &[Observation], measurement: Measurement) -> Vec<HeatPoint> {
    observations
        .iter()
        .filter_map(|obs| {
            measurement.of(obs).map(|value| HeatPoint {
                latitude: obs.latitude,
                longitude: obs.longitude,
                value,
            })
        })
        .collect()
}
