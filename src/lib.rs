// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod simulators;
pub mod types;
pub mod volatility;

// === 2. Re-export the public-facing components to create a clean API ===

// --- The two core operations ---
pub use simulators::gbm::{simulate, simulate_parallel};
pub use volatility::estimate_volatility;

// --- From `engine` ---
pub use engine::MonteCarloEngine;

// --- From `types` ---
pub use types::{PathMatrix, PriceSeries, SimulationParameters, SimulationRequest};

// --- From `simulators` ---
pub use simulators::{NormalSource, SeededNormal, ThreadRngNormal};

// --- From `data` ---
pub use data::{FixedRate, MarketDataSource, RiskFreeRateProvider, StaticPrices};

// --- From `error` ---
pub use error::SimulatorError;
