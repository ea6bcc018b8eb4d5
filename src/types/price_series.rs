// src/types/price_series.rs

use crate::error::SimulatorError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ordered sequence of daily closing prices, as produced by a market-data
/// collaborator. Dates are strictly increasing with no duplicates; the
/// constructor enforces that so downstream code never has to re-check it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    observations: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    /// Builds a series from `(date, close)` pairs.
    ///
    /// Rejects out-of-order or duplicate dates with `InvalidParameters`. A
    /// series of fewer than 2 points is still constructible (a provider can
    /// legitimately return one row); it only becomes an error when someone
    /// asks it for returns.
    pub fn new(observations: Vec<(NaiveDate, f64)>) -> Result<Self, SimulatorError> {
        for pair in observations.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(SimulatorError::invalid(format!(
                    "price dates must be strictly increasing, got {} after {}",
                    pair[1].0, pair[0].0
                )));
            }
        }
        Ok(Self { observations })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The closing prices in date order, without the dates.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|(_, close)| *close)
    }

    /// The most recent close. This is what seeds a simulation as the
    /// starting price.
    pub fn last_close(&self) -> Option<f64> {
        self.observations.last().map(|(_, close)| *close)
    }

    /// How many closes a log return can actually be built from: the
    /// strictly positive, finite ones. A zero, negative, or NaN close
    /// cannot enter a log ratio, so it does not count.
    pub fn usable_points(&self) -> usize {
        self.usable_closes().count()
    }

    fn usable_closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations
            .iter()
            .map(|(_, close)| *close)
            .filter(|close| close.is_finite() && *close > 0.0)
    }

    /// Computes the log-return sequence `r_i = ln(p_i / p_{i-1})` over the
    /// usable closes.
    ///
    /// Unusable closes (non-positive or non-finite) are skipped, so the
    /// result has one fewer element than [`usable_points`]. Fewer than 2
    /// usable points cannot produce a return and fail with
    /// `InsufficientData`.
    ///
    /// [`usable_points`]: PriceSeries::usable_points
    pub fn log_returns(&self) -> Result<Vec<f64>, SimulatorError> {
        let usable: Vec<f64> = self.usable_closes().collect();
        if usable.len() < 2 {
            return Err(SimulatorError::InsufficientData {
                points: usable.len(),
                returns: 0,
            });
        }
        let returns = usable
            .windows(2)
            .map(|pair| (pair[1] / pair[0]).ln())
            .collect();
        Ok(returns)
    }
}
