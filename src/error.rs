// src/error.rs

use thiserror::Error;

/// Every way the estimator, the simulator, or a data collaborator can fail.
///
/// The policy is fail-fast: a violated precondition surfaces as one of these
/// variants instead of a NaN or a zero-filled matrix, and nothing in the core
/// retries or silently recovers.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Fewer than 2 usable log returns, so the sample standard deviation has
    /// no degrees of freedom.
    #[error("insufficient price data: {points} point(s) give {returns} log return(s), need at least 2 returns")]
    InsufficientData { points: usize, returns: usize },

    /// A `SimulationParameters` invariant was violated.
    #[error("invalid simulation parameters: {reason}")]
    InvalidParameters { reason: String },

    /// An upstream market-data or rate lookup returned nothing. Propagated
    /// unchanged from the collaborator, never retried here.
    #[error("no data available for {context}")]
    DataUnavailable { context: String },

    /// The injected random source gave out mid-simulation.
    #[error("random source failed after {drawn} of {needed} draws")]
    SimulationFailed { drawn: usize, needed: usize },
}

impl SimulatorError {
    /// Shorthand used by the parameter validator.
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimulatorError::InvalidParameters {
            reason: reason.into(),
        }
    }
}
