// src/types/mod.rs

pub mod parameters;
pub mod path_matrix;
pub mod price_series;

// Make the core data objects available directly from `types`.
pub use parameters::{SimulationParameters, SimulationRequest};
pub use path_matrix::PathMatrix;
pub use price_series::PriceSeries;
