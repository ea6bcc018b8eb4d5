// src/volatility.rs

//! Historical volatility estimation from a daily price series.

use crate::config::TRADING_DAYS_PER_YEAR;
use crate::error::SimulatorError;
use crate::types::PriceSeries;

/// Estimates annualized volatility as the sample standard deviation of the
/// series' log returns, scaled by `sqrt(252)`.
///
/// The input is assumed to be daily closes; the estimator does not check the
/// sampling frequency, only the values. Non-positive or non-finite closes are
/// unusable and do not count toward the minimum. With fewer than 2 log
/// returns the sample standard deviation has zero degrees of freedom, so the
/// call fails with `InsufficientData` instead of producing 0 or NaN.
pub fn estimate_volatility(prices: &PriceSeries) -> Result<f64, SimulatorError> {
    let returns = prices.log_returns()?;
    if returns.len() < 2 {
        return Err(SimulatorError::InsufficientData {
            points: prices.usable_points(),
            returns: returns.len(),
        });
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    // Sample variance, denominator n - 1.
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Ok(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt())
}
