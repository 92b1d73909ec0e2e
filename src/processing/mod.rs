pub mod clean;
pub mod clustering;
pub mod heatmap;
pub mod pipeline;
pub mod sampling;
