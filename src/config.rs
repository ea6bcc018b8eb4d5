// src/config.rs

//! A centralized place for the simulation's tuning constants.

// --- Annualization ---
// The original model mixed 250 and 252 trading days depending on the call
// site. We pick 252 and use it everywhere, for both the volatility estimator
// and any per-day drift scaling.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

// --- Simulation defaults ---
// One year holding period, i.e. how long you are holding the stock.
pub const DEFAULT_TIME_HORIZON_YEARS: f64 = 1.0;
// Daily steps over that year.
pub const DEFAULT_STEP_COUNT: usize = 252;
// Enough trajectories for the terminal distribution to look smooth.
pub const DEFAULT_TRAJECTORY_COUNT: usize = 1_000;
