use crate::spatial::zones::ZoneLabel;
use crate::types::geo::BoundingBox;
use polars::prelude::{col, lit, LazyFrame};

pub trait MapFrameFilterExt {
    /// Keeps rows whose coordinates fall inside `bounds` (inclusive on every edge).
    ///
    /// # Arguments
    /// * `bounds`: The viewport to keep.
    /// * `lat_column`: Name of the latitude column, e.g. `"latitude"` or `"grid_lat"`.
    /// * `lon_column`: Name of the longitude column.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Missing columns surface as errors on
    /// `collect`.
    fn filter_within(self, bounds: &BoundingBox, lat_column: &str, lon_column: &str) -> LazyFrame;

    /// Keeps rows whose `count_column` is at least `min_count`.
    /// Useful on grid frames (`"count"`) and zone frames (`"station_count"`).
    fn filter_min_count(self, count_column: &str, min_count: u64) -> LazyFrame;

    /// Keeps rows of a zone frame with the given label.
    fn filter_zone(self, label: ZoneLabel) -> LazyFrame;
}

impl MapFrameFilterExt for LazyFrame {
    fn filter_within(self, bounds: &BoundingBox, lat_column: &str, lon_column: &str) -> LazyFrame {
        self.filter(
            col(lat_column)
                .gt_eq(lit(bounds.min_lat))
                .and(col(lat_column).lt_eq(lit(bounds.max_lat)))
                .and(col(lon_column).gt_eq(lit(bounds.min_lon)))
                .and(col(lon_column).lt_eq(lit(bounds.max_lon))),
        )
    }

    fn filter_min_count(self, count_column: &str, min_count: u64) -> LazyFrame {
        self.filter(col(count_column).gt_eq(lit(min_count)))
    }

    fn filter_zone(self, label: ZoneLabel) -> LazyFrame {
        self.filter(col("zone").eq(lit(label.name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::into_frame::IntoDataFrame;
    use crate::spatial::grid::aggregate;
    use crate::spatial::zones::classify_zones;
    use crate::types::observation::Observation;
    use polars::prelude::IntoLazy;

    fn obs(lat: f64, lon: f64, temp: f64) -> Observation {
        Observation::builder()
            .latitude(lat)
            .longitude(lon)
            .temperature(temp)
            .build()
            .unwrap()
    }

    fn batch() -> Vec<Observation> {
        vec![
            obs(40.7111, -73.9911, 10.0),
            obs(40.7122, -73.9922, 20.0),
            obs(40.7133, -73.9933, 30.0),
            obs(40.8555, -73.7555, 40.0),
            obs(41.5000, -72.5000, 50.0),
        ]
    }

    #[test]
    fn test_filter_within_observations() -> Result<(), Box<dyn std::error::Error>> {
        let bounds = BoundingBox {
            min_lat: 40.7,
            min_lon: -74.0,
            max_lat: 40.9,
            max_lon: -73.7,
        };
        let df = batch()
            .to_data_frame()?
            .lazy()
            .filter_within(&bounds, "latitude", "longitude")
            .collect()?;
        assert_eq!(df.height(), 4);

        let lats = df.column("latitude")?.f64()?;
        assert!(lats.into_iter().flatten().all(|lat| bounds.contains(lat, -73.8)));
        Ok(())
    }

    #[test]
    fn test_filter_within_is_inclusive() -> Result<(), Box<dyn std::error::Error>> {
        let bounds = BoundingBox {
            min_lat: 41.5,
            min_lon: -72.5,
            max_lat: 41.5,
            max_lon: -72.5,
        };
        let df = batch()
            .to_data_frame()?
            .lazy()
            .filter_within(&bounds, "latitude", "longitude")
            .collect()?;
        assert_eq!(df.height(), 1);
        Ok(())
    }

    #[test]
    fn test_filter_min_count_on_grid() -> Result<(), Box<dyn std::error::Error>> {
        let cells = aggregate(&batch(), 0.01)?;
        let df = cells
            .to_data_frame()?
            .lazy()
            .filter_min_count("count", 2)
            .collect()?;
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("count")?.u64()?.get(0), Some(3));
        Ok(())
    }

    #[test]
    fn test_filter_zone() -> Result<(), Box<dyn std::error::Error>> {
        // Mean 30, population std-dev ~14.14: 10 is Cold, 50 is Warm, the rest Moderate.
        let zones = classify_zones(&batch(), 1.0)?;
        let df = zones
            .to_data_frame()?
            .lazy()
            .filter_zone(ZoneLabel::Moderate)
            .collect()?;
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("station_count")?.u64()?.get(0), Some(3));
        Ok(())
    }

    #[test]
    fn test_missing_column_errors_on_collect() -> Result<(), Box<dyn std::error::Error>> {
        let result = batch()
            .to_data_frame()?
            .lazy()
            .filter_min_count("count", 1)
            .collect();
        assert!(result.is_err());
        Ok(())
    }
}
