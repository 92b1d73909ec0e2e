use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Failed to build the {frame} DataFrame")]
    Build {
        frame: &'static str,
        #[source]
        source: PolarsError,
    },
}
