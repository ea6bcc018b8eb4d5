// src/data.rs

//! Contracts for the external data collaborators.
//!
//! The engine never fetches anything itself. Whoever hosts it supplies a
//! market-data source and a risk-free-rate source; the crate only ships
//! in-memory implementations so everything stays testable without a network.

use crate::error::SimulatorError;
use crate::types::PriceSeries;
use chrono::NaiveDate;

/// A provider of historical daily closing prices.
pub trait MarketDataSource {
    /// Returns the daily closes for `symbol` over `[start_date, end_date)`,
    /// or `DataUnavailable` if the symbol/date range yields nothing.
    fn fetch_daily_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, SimulatorError>;
}

/// A provider of the current annualized risk-free rate, as a decimal
/// (0.045 means 4.5%). Typically backed by a short recent window of a
/// treasury-yield instrument; how it fetches and caches is its own business.
pub trait RiskFreeRateProvider {
    fn current_rate(&self) -> Result<f64, SimulatorError>;
}

/// A market-data source that serves one fixed series regardless of symbol
/// or range. Handy for tests and offline runs.
pub struct StaticPrices {
    series: PriceSeries,
}

impl StaticPrices {
    pub fn new(series: PriceSeries) -> Self {
        Self { series }
    }
}

impl MarketDataSource for StaticPrices {
    fn fetch_daily_prices(
        &self,
        symbol: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<PriceSeries, SimulatorError> {
        if self.series.is_empty() {
            return Err(SimulatorError::DataUnavailable {
                context: format!("symbol {}", symbol),
            });
        }
        Ok(self.series.clone())
    }
}

/// A rate provider pinned to a constant. Inject this in tests instead of
/// hitting a real yield feed.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate(pub f64);

impl RiskFreeRateProvider for FixedRate {
    fn current_rate(&self) -> Result<f64, SimulatorError> {
        Ok(self.0)
    }
}
