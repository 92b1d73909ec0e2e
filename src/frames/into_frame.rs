//! Conversions from aggregation outputs to Polars `DataFrame`s for tabular consumers.
//!
//! Column names follow the map renderer's expectations: observations keep their field
//! names, grid cells use `grid_lat`/`grid_lon`, zones use `zone` and `centroid_*`.
//! Missing measurements become nulls.

use crate::frames::error::FrameError;
use crate::processing::heatmap::HeatPoint;
use crate::spatial::gradient::GradientObservation;
use crate::spatial::grid::GridCell;
use crate::spatial::zones::Zone;
use crate::types::observation::Observation;
use polars::prelude::{Column, DataFrame};

pub trait IntoDataFrame {
    /// Builds an owned `DataFrame` with one row per element.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Build`] if Polars rejects the assembled columns.
    fn to_data_frame(&self) -> Result<DataFrame, FrameError>;
}

fn build(frame: &'static str, columns: Vec<Column>) -> Result<DataFrame, FrameError> {
    DataFrame::new(columns).map_err(|source| FrameError::Build { frame, source })
}

fn observation_columns<'a>(rows: impl Iterator<Item = &'a Observation> + Clone) -> Vec<Column> {
    let f64_column = |name: &str, get: fn(&Observation) -> f64| {
        Column::new(name.into(), rows.clone().map(get).collect::<Vec<f64>>())
    };
    let opt_f64_column = |name: &str, get: fn(&Observation) -> Option<f64>| {
        Column::new(name.into(), rows.clone().map(get).collect::<Vec<Option<f64>>>())
    };
    let text_column = |name: &str, get: fn(&Observation) -> Option<&str>| {
        Column::new(name.into(), rows.clone().map(get).collect::<Vec<Option<&str>>>())
    };

    vec![
        text_column("station_id", |o| o.station_id.as_deref()),
        text_column("name", |o| o.name.as_deref()),
        f64_column("latitude", |o| o.latitude),
        f64_column("longitude", |o| o.longitude),
        opt_f64_column("temperature", |o| o.temperature),
        opt_f64_column("humidity", |o| o.humidity),
        opt_f64_column("pressure", |o| o.pressure),
        opt_f64_column("wind_speed", |o| o.wind_speed),
        text_column("wind_direction", |o| o.wind_direction.as_deref()),
        text_column("weather", |o| o.weather.as_deref()),
        text_column("weather_icon", |o| Some(o.icon())),
        text_column("temp_category", |o| o.temperature_category().map(|c| c.name())),
        Column::new(
            "timestamp".into(),
            rows.clone()
                .map(|o| o.timestamp.map(|t| t.to_rfc3339()))
                .collect::<Vec<Option<String>>>(),
        ),
    ]
}

impl IntoDataFrame for [Observation] {
    fn to_data_frame(&self) -> Result<DataFrame, FrameError> {
        build("observations", observation_columns(self.iter()))
    }
}

impl IntoDataFrame for [GradientObservation] {
    fn to_data_frame(&self) -> Result<DataFrame, FrameError> {
        let mut columns = observation_columns(self.iter().map(|g| &g.observation));
        columns.push(Column::new(
            "temperature_gradient".into(),
            self.iter()
                .map(|g| g.temperature_gradient)
                .collect::<Vec<Option<f64>>>(),
        ));
        build("gradients", columns)
    }
}

impl IntoDataFrame for [GridCell] {
    fn to_data_frame(&self) -> Result<DataFrame, FrameError> {
        let f64_column = |name: &str, get: fn(&GridCell) -> f64| {
            Column::new(name.into(), self.iter().map(get).collect::<Vec<f64>>())
        };
        let opt_f64_column = |name: &str, get: fn(&GridCell) -> Option<f64>| {
            Column::new(name.into(), self.iter().map(get).collect::<Vec<Option<f64>>>())
        };

        build(
            "grid",
            vec![
                f64_column("grid_lat", |c| c.grid_lat),
                f64_column("grid_lon", |c| c.grid_lon),
                Column::new(
                    "count".into(),
                    self.iter().map(|c| c.count as u64).collect::<Vec<u64>>(),
                ),
                opt_f64_column("temp_mean", |c| c.temp_mean),
                opt_f64_column("temp_min", |c| c.temp_min),
                opt_f64_column("temp_max", |c| c.temp_max),
                opt_f64_column("humidity_mean", |c| c.humidity_mean),
                opt_f64_column("pressure_mean", |c| c.pressure_mean),
                opt_f64_column("wind_speed_mean", |c| c.wind_speed_mean),
            ],
        )
    }
}

impl IntoDataFrame for [Zone] {
    fn to_data_frame(&self) -> Result<DataFrame, FrameError> {
        let f64_column = |name: &str, get: fn(&Zone) -> f64| {
            Column::new(name.into(), self.iter().map(get).collect::<Vec<f64>>())
        };
        let opt_f64_column = |name: &str, get: fn(&Zone) -> Option<f64>| {
            Column::new(name.into(), self.iter().map(get).collect::<Vec<Option<f64>>>())
        };

        build(
            "zones",
            vec![
                Column::new(
                    "zone".into(),
                    self.iter().map(|z| z.label.name()).collect::<Vec<&str>>(),
                ),
                f64_column("centroid_lat", |z| z.centroid_lat),
                f64_column("centroid_lon", |z| z.centroid_lon),
                Column::new(
                    "station_count".into(),
                    self.iter()
                        .map(|z| z.station_count as u64)
                        .collect::<Vec<u64>>(),
                ),
                f64_column("temp_mean", |z| z.temp_mean),
                f64_column("temp_min", |z| z.temp_min),
                f64_column("temp_max", |z| z.temp_max),
                opt_f64_column("humidity_mean", |z| z.humidity_mean),
                opt_f64_column("pressure_mean", |z| z.pressure_mean),
            ],
        )
    }
}

impl IntoDataFrame for [HeatPoint] {
    fn to_data_frame(&self) -> Result<DataFrame, FrameError> {
        build(
            "heatmap",
            vec![
                Column::new(
                    "latitude".into(),
                    self.iter().map(|p| p.latitude).collect::<Vec<f64>>(),
                ),
                Column::new(
                    "longitude".into(),
                    self.iter().map(|p| p.longitude).collect::<Vec<f64>>(),
                ),
                Column::new(
                    "value".into(),
                    self.iter().map(|p| p.value).collect::<Vec<f64>>(),
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::gradient::estimate_gradients;
    use crate::spatial::grid::aggregate;
    use crate::spatial::zones::classify_zones;
    use polars::prelude::DataType;

    fn batch() -> Vec<Observation> {
        [(40.701, -74.011, Some(30.0)), (40.702, -74.012, None), (40.755, -73.985, Some(75.0)), (40.79, -73.95, Some(52.0))]
            .into_iter()
            .map(|(lat, lon, temp)| {
                Observation::builder()
                    .station_id(format!("S{lat}"))
                    .latitude(lat)
                    .longitude(lon)
                    .maybe_temperature(temp)
                    .weather("Fog")
                    .build()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_observation_frame() -> Result<(), Box<dyn std::error::Error>> {
        let df = batch().to_data_frame()?;
        assert_eq!(df.height(), 4);
        assert_eq!(df.column("latitude")?.dtype(), &DataType::Float64);

        let temps = df.column("temperature")?.f64()?;
        assert_eq!(temps.get(0), Some(30.0));
        assert_eq!(temps.get(1), None);
        assert_eq!(temps.null_count(), 1);

        let categories = df.column("temp_category")?.str()?;
        assert_eq!(categories.get(0), Some("Freezing"));
        assert_eq!(categories.get(2), Some("Warm"));
        assert_eq!(df.column("weather_icon")?.str()?.get(0), Some("🌫️"));
        Ok(())
    }

    #[test]
    fn test_grid_frame() -> Result<(), Box<dyn std::error::Error>> {
        let cells = aggregate(&batch(), 0.01)?;
        let df = cells.to_data_frame()?;
        assert_eq!(df.height(), cells.len());

        let counts = df.column("count")?.u64()?;
        assert_eq!(counts.into_iter().flatten().sum::<u64>(), 4);
        assert_eq!(df.column("temp_mean")?.f64()?.get(0), cells[0].temp_mean);
        Ok(())
    }

    #[test]
    fn test_zone_frame() -> Result<(), Box<dyn std::error::Error>> {
        let zones = classify_zones(&batch(), 1.0)?;
        let df = zones.to_data_frame()?;
        assert_eq!(df.height(), zones.len());
        assert_eq!(df.column("zone")?.str()?.get(0), Some(zones[0].label.name()));
        Ok(())
    }

    #[test]
    fn test_gradient_frame_adds_gradient_column() -> Result<(), Box<dyn std::error::Error>> {
        let gradients = estimate_gradients(&batch())?;
        let df = gradients.to_data_frame()?;
        assert_eq!(df.width(), batch().to_data_frame()?.width() + 1);
        assert_eq!(df.column("temperature_gradient")?.f64()?.get(1), None);
        Ok(())
    }

    #[test]
    fn test_empty_frames_have_schema() -> Result<(), Box<dyn std::error::Error>> {
        let df = Vec::<GridCell>::new().to_data_frame()?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 9);
        Ok(())
    }
}
