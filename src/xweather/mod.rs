//! Thin async source of raw observations and forecasts from the Xweather REST API.

pub mod client;
pub mod config;
pub mod error;
pub(crate) mod response;
