// src/engine.rs

//! Wires the data collaborators to the estimator and the simulator. This is
//! the whole pipeline a front end needs: hand it a request and a normal
//! source, get back a path matrix to render.

use crate::data::{MarketDataSource, RiskFreeRateProvider};
use crate::error::SimulatorError;
use crate::simulators::gbm;
use crate::simulators::normal_source::NormalSource;
use crate::types::{PathMatrix, SimulationParameters, SimulationRequest};
use crate::volatility::estimate_volatility;
use tracing::{debug, info};

/// The simulation pipeline: fetch history, estimate volatility, read the
/// risk-free rate, simulate.
///
/// Both collaborators are injected, so the engine itself never touches a
/// network and tests run it against fixed in-memory data.
pub struct MonteCarloEngine<M, R> {
    market_data: M,
    rate_provider: R,
}

impl<M: MarketDataSource, R: RiskFreeRateProvider> MonteCarloEngine<M, R> {
    pub fn new(market_data: M, rate_provider: R) -> Self {
        Self {
            market_data,
            rate_provider,
        }
    }

    /// Turns a request into simulation parameters without running anything:
    /// fetches the historical window, takes the last close as the starting
    /// price, estimates volatility, and uses the risk-free rate as drift.
    ///
    /// Upstream failures (`DataUnavailable`) pass through unchanged; a
    /// history too short to estimate from is `InsufficientData`.
    pub fn parameterize(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationParameters, SimulatorError> {
        request.validate()?;

        let prices = self.market_data.fetch_daily_prices(
            &request.symbol,
            request.start_date,
            request.end_date,
        )?;
        debug!(
            symbol = %request.symbol,
            points = prices.len(),
            "fetched historical prices"
        );

        let starting_price = prices
            .last_close()
            .ok_or_else(|| SimulatorError::DataUnavailable {
                context: format!("symbol {}", request.symbol),
            })?;
        let annual_volatility = estimate_volatility(&prices)?;
        let annual_drift = self.rate_provider.current_rate()?;

        info!(
            symbol = %request.symbol,
            starting_price,
            annual_volatility,
            annual_drift,
            "parameterized simulation"
        );
        Ok(SimulationParameters::new(
            starting_price,
            annual_drift,
            annual_volatility,
            request.step_count,
            request.trajectory_count,
        ))
    }

    /// The full pipeline, drawing shocks from the given source.
    pub fn run<S: NormalSource>(
        &self,
        request: &SimulationRequest,
        source: &mut S,
    ) -> Result<PathMatrix, SimulatorError> {
        let params = self.parameterize(request)?;
        gbm::simulate(&params, source)
    }

    /// The full pipeline with trajectories computed in parallel from a
    /// master seed.
    pub fn run_parallel(
        &self,
        request: &SimulationRequest,
        master_seed: u64,
    ) -> Result<PathMatrix, SimulatorError> {
        let params = self.parameterize(request)?;
        gbm::simulate_parallel(&params, master_seed)
    }
}
