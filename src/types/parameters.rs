// src/types/parameters.rs

use crate::config::{DEFAULT_STEP_COUNT, DEFAULT_TIME_HORIZON_YEARS, DEFAULT_TRAJECTORY_COUNT};
use crate::error::SimulatorError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the GBM simulator needs to run: the parameterized process plus
/// the discretization grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Last observed price; row 0 of the output matrix.
    pub starting_price: f64,
    /// Annualized drift of the process. Set to the risk-free rate for a
    /// risk-neutral simulation; may be negative.
    pub annual_drift: f64,
    /// Annualized standard deviation of log returns.
    pub annual_volatility: f64,
    /// Holding period in years. Drift and volatility must be annualized
    /// consistently with this.
    pub time_horizon_years: f64,
    /// How many discrete steps the horizon is split into.
    pub step_count: usize,
    /// How many independent paths to simulate.
    pub trajectory_count: usize,
}

impl SimulationParameters {
    /// Builds parameters with the default 1-year horizon.
    pub fn new(
        starting_price: f64,
        annual_drift: f64,
        annual_volatility: f64,
        step_count: usize,
        trajectory_count: usize,
    ) -> Self {
        Self {
            starting_price,
            annual_drift,
            annual_volatility,
            time_horizon_years: DEFAULT_TIME_HORIZON_YEARS,
            step_count,
            trajectory_count,
        }
    }

    /// The step width in years.
    pub fn delta_t(&self) -> f64 {
        self.time_horizon_years / self.step_count as f64
    }

    /// Checks every invariant the simulator relies on. The simulator calls
    /// this itself, so a caller only needs it for early feedback.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        if !self.starting_price.is_finite() || self.starting_price <= 0.0 {
            return Err(SimulatorError::invalid(format!(
                "starting_price must be positive, got {}",
                self.starting_price
            )));
        }
        if !self.annual_drift.is_finite() {
            return Err(SimulatorError::invalid("annual_drift must be finite"));
        }
        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            return Err(SimulatorError::invalid(format!(
                "annual_volatility must be >= 0, got {}",
                self.annual_volatility
            )));
        }
        if !self.time_horizon_years.is_finite() || self.time_horizon_years <= 0.0 {
            return Err(SimulatorError::invalid(format!(
                "time_horizon_years must be positive, got {}",
                self.time_horizon_years
            )));
        }
        if self.step_count == 0 {
            return Err(SimulatorError::invalid("step_count must be at least 1"));
        }
        if self.trajectory_count == 0 {
            return Err(SimulatorError::invalid(
                "trajectory_count must be at least 1",
            ));
        }
        Ok(())
    }
}

/// The raw inputs a front end collects before a simulation can be
/// parameterized: which symbol, which historical window to estimate from,
/// and how big a simulation to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub step_count: usize,
    pub trajectory_count: usize,
}

impl SimulationRequest {
    /// A request with the default grid (252 daily steps, 1000 trajectories).
    pub fn new(symbol: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start_date,
            end_date,
            step_count: DEFAULT_STEP_COUNT,
            trajectory_count: DEFAULT_TRAJECTORY_COUNT,
        }
    }

    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.symbol.trim().is_empty() {
            return Err(SimulatorError::invalid("symbol must not be empty"));
        }
        if self.end_date <= self.start_date {
            return Err(SimulatorError::invalid(format!(
                "end_date {} must be after start_date {}",
                self.end_date, self.start_date
            )));
        }
        if self.step_count == 0 {
            return Err(SimulatorError::invalid("step_count must be at least 1"));
        }
        if self.trajectory_count == 0 {
            return Err(SimulatorError::invalid(
                "trajectory_count must be at least 1",
            ));
        }
        Ok(())
    }
}
