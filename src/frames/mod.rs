//! Tabular views of aggregation results as Polars frames.

pub mod error;
pub mod filtering;
pub mod into_frame;
