use crate::frames::error::FrameError;
use crate::spatial::error::AggregationError;
use crate::xweather::error::XweatherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HyperlocalError {
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Xweather(#[from] XweatherError),

    #[error(transparent)]
    Frame(#[from] FrameError),
}
