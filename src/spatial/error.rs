use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregationError {
    // Per-row: the row is dropped during ingestion, the batch continues.
    #[error("Invalid observation for station '{station}': {reason}")]
    InvalidInput { station: String, reason: String },

    #[error("Grid size must be a positive, finite number of degrees no smaller than 180 / i64::MAX, got {0}")]
    InvalidGridSize(f64),

    #[error("Zone threshold must be a non-negative, finite number of standard deviations, got {0}")]
    InvalidThreshold(f64),

    #[error("Zone classification needs at least {required} observations with a temperature, found {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("Gradient estimation is capped at {max} observations, got {found}; sample the batch first")]
    TooManyObservations { max: usize, found: usize },

    #[error("None of the {received} received observations had a valid location")]
    NoValidObservations { received: usize },
}

impl AggregationError {
    pub(crate) fn invalid_input(station: Option<&str>, reason: impl Into<String>) -> Self {
        AggregationError::InvalidInput {
            station: station.unwrap_or("<unknown>").to_string(),
            reason: reason.into(),
        }
    }
}
