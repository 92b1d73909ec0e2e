use hyperlocal_weather::{
    prepare_for_mapping, ForecastPeriod, HyperlocalError, IntoDataFrame, LatLon,
    MapFrameFilterExt, MappingOptions, RawObservation, SpatialAggregator, XweatherClient,
    XweatherConfig, ZoneLabel,
};
use log::{info, warn};
use polars::prelude::IntoLazy;
use std::env;

const CENTER: LatLon = LatLon(40.7128, -74.0060);
const RADIUS_KM: u32 = 30;
const FORECAST_DAYS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), HyperlocalError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    configure_polars_display();

    let (raw, forecast) = match XweatherConfig::from_env() {
        Ok(config) => {
            let client = XweatherClient::new(config)?;
            client
                .hyperlocal(CENTER.0, CENTER.1, RADIUS_KM, Some(FORECAST_DAYS))
                .await?
        }
        Err(e) => {
            warn!("{}; using a synthetic batch instead", e);
            (synthetic_batch(), None::<Vec<ForecastPeriod>>)
        }
    };

    let options = MappingOptions::builder()
        .aggregator(SpatialAggregator::builder().grid_size(0.02).build())
        .build();
    let data = prepare_for_mapping(raw, forecast, &options)?;
    info!(
        "{} observations, {} grid cells, {} zones, {} markers, {} forecast periods",
        data.observations.len(),
        data.grid.len(),
        data.zones.len(),
        data.markers.len(),
        data.forecast.len()
    );
    if let Some(bounds) = data.bounds {
        let center = bounds.center();
        println!("Map center: {:.4}, {:.4}", center.0, center.1);
    }

    println!("{}", data.grid.to_data_frame()?);
    println!("{}", data.zones.to_data_frame()?);

    let warm = data
        .zones
        .to_data_frame()?
        .lazy()
        .filter_zone(ZoneLabel::Warm)
        .collect()
        .map_err(|source| hyperlocal_weather::FrameError::Build {
            frame: "warm zones",
            source,
        })?;
    println!("{}", warm);
    println!("{}", data.gradients.to_data_frame()?);

    Ok(())
}

/// A spread of stations around lower Manhattan with a warm core to the east.
fn synthetic_batch() -> Vec<RawObservation> {
    (0..60)
        .map(|i| {
            let row = (i / 10) as f64;
            let col = (i % 10) as f64;
            RawObservation {
                station_id: Some(format!("SYN{i:03}")),
                latitude: Some(CENTER.0 - 0.1 + row * 0.035),
                longitude: Some(CENTER.1 - 0.15 + col * 0.03),
                temperature: (i % 13 != 0).then_some(50.0 + col * 1.5 + row * 0.5),
                humidity: Some(55.0 + row * 3.0),
                pressure: Some(30.02 - col * 0.01),
                wind_speed: Some(4.0 + (i % 5) as f64),
                weather: Some(if col > 6.0 { "Sunny" } else { "Partly Cloudy" }.to_string()),
                ..Default::default()
            }
        })
        .collect()
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
