mod error;
mod frames;
mod processing;
mod spatial;
mod types;
mod xweather;

pub use error::HyperlocalError;

pub use types::forecast::ForecastPeriod;
pub use types::geo::{BoundingBox, LatLon};
pub use types::observation::{Measurement, Observation, RawObservation};
pub use types::temperature_category::TemperatureCategory;
pub use types::weather_condition::{WeatherCondition, DEFAULT_WEATHER_ICON};

pub use spatial::error::AggregationError;
pub use spatial::gradient::{
    estimate_gradients, estimate_gradients_with, GradientObservation, DEFAULT_MAX_POINTS,
    DEFAULT_NEIGHBORS,
};
pub use spatial::grid::{aggregate, CellIndex, GridCell, DEFAULT_GRID_SIZE};
pub use spatial::zones::{
    classify_zones, zone_thresholds, Zone, ZoneLabel, ZoneThresholds, DEFAULT_ZONE_THRESHOLD,
};
pub use spatial::SpatialAggregator;

pub use processing::clean::clean_observations;
pub use processing::clustering::{cluster_markers, ClusterMarker, Marker, DEFAULT_CLUSTER_THRESHOLD};
pub use processing::heatmap::{heatmap_points, HeatPoint};
pub use processing::pipeline::{prepare_for_mapping, MappingData, MappingOptions};
pub use processing::sampling::sample_evenly;

pub use frames::error::FrameError;
pub use frames::filtering::MapFrameFilterExt;
pub use frames::into_frame::IntoDataFrame;

pub use xweather::client::{XweatherClient, OBSERVATION_LIMIT};
pub use xweather::config::XweatherConfig;
pub use xweather::error::XweatherError;
