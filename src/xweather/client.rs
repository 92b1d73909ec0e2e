use crate::types::forecast::ForecastPeriod;
use crate::types::observation::RawObservation;
use crate::xweather::config::XweatherConfig;
use crate::xweather::error::XweatherError;
use crate::xweather::response::{ApiResponse, ForecastRecord, ObservationRecord};
use log::{debug, info, warn};
use reqwest::{Client, Request, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Largest number of stations requested per observations query.
pub const OBSERVATION_LIMIT: usize = 100;

/// Async client for the Xweather observations and forecasts endpoints.
///
/// Every call is a single request: nothing is retried or cached.
///
/// # Examples
///
/// ```no_run
/// use hyperlocal_weather::{XweatherClient, XweatherConfig};
///
/// # async fn run() -> Result<(), hyperlocal_weather::XweatherError> {
/// let client = XweatherClient::new(XweatherConfig::from_env()?)?;
/// let raw = client.observations(40.7128, -74.0060, 30).await?;
/// println!("{} stations reporting", raw.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct XweatherClient {
    http: Client,
    config: XweatherConfig,
}

impl XweatherClient {
    pub fn new(config: XweatherConfig) -> Result<Self, XweatherError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(XweatherError::ClientBuild)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &XweatherConfig {
        &self.config
    }

    /// Fetches current observations from stations within `radius_km` of the point.
    ///
    /// Returns the rows unvalidated; pass them through
    /// [`clean_observations`](crate::clean_observations) or
    /// [`prepare_for_mapping`](crate::prepare_for_mapping).
    pub async fn observations(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
    ) -> Result<Vec<RawObservation>, XweatherError> {
        let request = self.observations_request(latitude, longitude, radius_km)?;
        let records: Vec<ObservationRecord> = self.fetch(request).await?;
        if records.is_empty() {
            warn!("No observations found near {},{}", latitude, longitude);
        }
        Ok(records.into_iter().map(RawObservation::from).collect())
    }

    /// Fetches up to `days` forecast periods for the point.
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Vec<ForecastPeriod>, XweatherError> {
        let request = self.forecast_request(latitude, longitude, days)?;
        let records: Vec<ForecastRecord> = self.fetch(request).await?;
        let periods: Vec<ForecastPeriod> = records
            .into_iter()
            .flat_map(|record| record.periods)
            .map(|period| period.into_period(latitude, longitude))
            .collect();
        if periods.is_empty() {
            warn!("No forecast data found for {},{}", latitude, longitude);
        }
        Ok(periods)
    }

    /// Observations around the point and, when `forecast_days` is set, the point's
    /// forecast. The two requests run concurrently and the first failure is returned.
    pub async fn hyperlocal(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
        forecast_days: Option<u32>,
    ) -> Result<(Vec<RawObservation>, Option<Vec<ForecastPeriod>>), XweatherError> {
        info!("Fetching hyperlocal data for {},{}", latitude, longitude);
        match forecast_days {
            Some(days) => {
                let (observations, forecast) = tokio::try_join!(
                    self.observations(latitude, longitude, radius_km),
                    self.forecast(latitude, longitude, days)
                )?;
                Ok((observations, Some(forecast)))
            }
            None => Ok((
                self.observations(latitude, longitude, radius_km).await?,
                None,
            )),
        }
    }

    fn observations_request(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u32,
    ) -> Result<Request, XweatherError> {
        let url = self.endpoint("observations", latitude, longitude);
        self.http
            .get(&url)
            .query(&self.credentials())
            .query(&[
                ("radius", format!("{radius_km}km")),
                ("limit", OBSERVATION_LIMIT.to_string()),
            ])
            .build()
            .map_err(|e| XweatherError::NetworkRequest(url, e.without_url()))
    }

    fn forecast_request(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Request, XweatherError> {
        let url = self.endpoint("forecasts", latitude, longitude);
        self.http
            .get(&url)
            .query(&self.credentials())
            .query(&[("limit", days.to_string())])
            .build()
            .map_err(|e| XweatherError::NetworkRequest(url, e.without_url()))
    }

    fn endpoint(&self, resource: &str, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/{}/{},{}",
            self.config.base_url, resource, latitude, longitude
        )
    }

    fn credentials(&self) -> [(&'static str, &str); 2] {
        [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ]
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<Vec<T>, XweatherError> {
        // The query string carries the client secret, so errors and logs only show the path.
        let url = without_query(request.url());
        info!("Making request to {}", url);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| XweatherError::NetworkRequest(url.clone(), e.without_url()))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                if let Some(status) = e.status() {
                    return Err(XweatherError::HttpStatus {
                        url,
                        status,
                        source: e.without_url(),
                    });
                } else {
                    return Err(XweatherError::NetworkRequest(url, e.without_url()));
                }
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| XweatherError::NetworkRequest(url.clone(), e.without_url()))?;
        debug!("Received {} bytes from {}", body.len(), url);

        serde_json::from_slice::<ApiResponse<T>>(&body)?.into_result()
    }
}

fn without_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
