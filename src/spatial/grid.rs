//! Regular-grid binning of observations with per-cell statistics.

use crate::spatial::error::AggregationError;
use crate::spatial::stats::Summary;
use crate::types::observation::Observation;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default cell edge length in degrees (roughly 1.1 km of latitude).
pub const DEFAULT_GRID_SIZE: f64 = 0.01;

/// Integer row/column of a grid cell: `floor(lat / size)`, `floor(lon / size)`.
///
/// Keying on the floored integers instead of the multiplied-back floats keeps grouping
/// exact regardless of floating-point rounding in the final key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    pub row: i64,
    pub col: i64,
}

impl CellIndex {
    /// Uses true floor division, so `-74.005` with a `0.01` grid lands in row `-7401`.
    pub fn of(latitude: f64, longitude: f64, grid_size: f64) -> Self {
        CellIndex {
            row: (latitude / grid_size).floor() as i64,
            col: (longitude / grid_size).floor() as i64,
        }
    }

    /// The cell's south-west corner in degrees.
    pub fn key(&self, grid_size: f64) -> (f64, f64) {
        (self.row as f64 * grid_size, self.col as f64 * grid_size)
    }
}

/// Aggregated statistics for every observation that falls into one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub grid_lat: f64,
    pub grid_lon: f64,
    /// Number of observations in the cell, with or without readings.
    pub count: usize,
    pub temp_mean: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity_mean: Option<f64>,
    pub pressure_mean: Option<f64>,
    pub wind_speed_mean: Option<f64>,
}

#[derive(Default)]
struct CellAccumulator {
    count: usize,
    temperature: Summary,
    humidity: Summary,
    pressure: Summary,
    wind_speed: Summary,
}

impl CellAccumulator {
    fn push(&mut self, obs: &Observation) {
        self.count += 1;
        self.temperature.push(obs.temperature);
        self.humidity.push(obs.humidity);
        self.pressure.push(obs.pressure);
        self.wind_speed.push(obs.wind_speed);
    }

    fn finish(self, index: CellIndex, grid_size: f64) -> GridCell {
        let (grid_lat, grid_lon) = index.key(grid_size);
        GridCell {
            grid_lat,
            grid_lon,
            count: self.count,
            temp_mean: self.temperature.mean(),
            temp_min: self.temperature.min(),
            temp_max: self.temperature.max(),
            humidity_mean: self.humidity.mean(),
            pressure_mean: self.pressure.mean(),
            wind_speed_mean: self.wind_speed.mean(),
        }
    }
}

/// Largest `|coordinate| / grid_size` a valid grid may produce. Above it the `i64` cell
/// indices would saturate and distinct rows or columns would share a key.
const MAX_CELL_INDEX: f64 = i64::MAX as f64;

pub(crate) fn validate_grid_size(grid_size: f64) -> Result<(), AggregationError> {
    if grid_size.is_finite() && grid_size > 0.0 && 180.0 / grid_size < MAX_CELL_INDEX {
        Ok(())
    } else {
        Err(AggregationError::InvalidGridSize(grid_size))
    }
}

/// Groups observations by grid cell and returns one `CellIndex` per occupied cell along with
/// the batch indices of its members.
pub(crate) fn group_by_cell(
    observations: &[Observation],
    grid_size: f64,
) -> Result<BTreeMap<CellIndex, Vec<usize>>, AggregationError> {
    validate_grid_size(grid_size)?;
    let mut groups: BTreeMap<CellIndex, Vec<usize>> = BTreeMap::new();
    for (i, obs) in observations.iter().enumerate() {
        groups
            .entry(CellIndex::of(obs.latitude, obs.longitude, grid_size))
            .or_default()
            .push(i);
    }
    Ok(groups)
}

/// Bins observations into a `grid_size`-degree grid and summarises each occupied cell.
///
/// Only cells with at least one observation are returned. Each statistic is computed over
/// the observations that reported that measurement; a cell where none did reports `None`.
/// The output is ordered by cell row then column, but callers should not rely on it.
///
/// # Errors
///
/// Returns [`AggregationError::InvalidGridSize`] if `grid_size` is not a positive, finite
/// number, or is so small that a longitude of 180° would overflow the integer cell index.
/// An empty batch is not an error and yields no cells.
pub fn aggregate(
    observations: &[Observation],
    grid_size: f64,
) -> Result<Vec<GridCell>, AggregationError> {
    validate_grid_size(grid_size)?;

    let mut cells: BTreeMap<CellIndex, CellAccumulator> = BTreeMap::new();
    for obs in observations {
        cells
            .entry(CellIndex::of(obs.latitude, obs.longitude, grid_size))
            .or_default()
            .push(obs);
    }

    debug!(
        "Aggregated {} observations into {} cells of {}°",
        observations.len(),
        cells.len(),
        grid_size
    );

    Ok(cells
        .into_iter()
        .map(|(index, acc)| acc.finish(index, grid_size))
        .collect())
}
