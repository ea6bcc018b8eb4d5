// src/simulators/gbm.rs

//! Monte Carlo simulation of geometric Brownian motion price paths.

use super::normal_source::{NormalSource, SeededNormal};
use crate::error::SimulatorError;
use crate::types::{PathMatrix, SimulationParameters};
use rayon::iter::{ParallelBridge, ParallelIterator};
use tracing::debug;

/// Simulates `trajectory_count` independent GBM price paths over
/// `step_count` discrete steps, drawing every shock from `source`.
///
/// Each step advances the price by the exact solution of GBM over one
/// interval:
///
/// ```text
/// S[t] = S[t-1] * exp((mu - 0.5 * sigma^2) * dt + sigma * sqrt(dt) * Z)
/// ```
///
/// which is unbiased regardless of step width, unlike a naive Euler update.
/// `mu` and `sigma` are annualized, so `dt` is measured in years.
///
/// Exactly `step_count * trajectory_count` draws are consumed, one per cell,
/// trajectory by trajectory. Row 0 is the starting price and is assigned,
/// never drawn. A `source` that runs dry aborts the whole run with
/// `SimulationFailed`; there is no resampling. Given a seeded source the
/// output is fully deterministic.
pub fn simulate<S: NormalSource>(
    params: &SimulationParameters,
    source: &mut S,
) -> Result<PathMatrix, SimulatorError> {
    params.validate()?;

    let delta_t = params.delta_t();
    let drift_term = (params.annual_drift - 0.5 * params.annual_volatility.powi(2)) * delta_t;
    let diffusion = params.annual_volatility * delta_t.sqrt();
    let needed = params.step_count * params.trajectory_count;

    let mut matrix = PathMatrix::filled(
        params.starting_price,
        params.step_count,
        params.trajectory_count,
    );

    for (index, column) in matrix.columns_mut().enumerate() {
        advance_column(
            column,
            drift_term,
            diffusion,
            index * params.step_count,
            needed,
            source,
        )?;
    }

    debug!(
        steps = params.step_count,
        trajectories = params.trajectory_count,
        "simulated GBM paths"
    );
    Ok(matrix)
}

/// Like [`simulate`], but computes trajectories in parallel with rayon.
///
/// Each trajectory is advanced end-to-end by one worker using its own
/// seeded normal stream derived from `(master_seed, trajectory index)`, so
/// trajectories stay uncorrelated and the result is identical for a fixed
/// master seed no matter how the columns are scheduled across threads.
pub fn simulate_parallel(
    params: &SimulationParameters,
    master_seed: u64,
) -> Result<PathMatrix, SimulatorError> {
    params.validate()?;

    let delta_t = params.delta_t();
    let drift_term = (params.annual_drift - 0.5 * params.annual_volatility.powi(2)) * delta_t;
    let diffusion = params.annual_volatility * delta_t.sqrt();
    let step_count = params.step_count;
    let needed = params.step_count * params.trajectory_count;

    let mut matrix = PathMatrix::filled(
        params.starting_price,
        params.step_count,
        params.trajectory_count,
    );

    matrix
        .columns_mut()
        .enumerate()
        .par_bridge()
        .try_for_each(|(index, column)| {
            let mut source = SeededNormal::for_trajectory(master_seed, index as u64);
            advance_column(
                column,
                drift_term,
                diffusion,
                index * step_count,
                needed,
                &mut source,
            )
        })?;

    debug!(
        steps = params.step_count,
        trajectories = params.trajectory_count,
        master_seed,
        "simulated GBM paths in parallel"
    );
    Ok(matrix)
}

/// Advances one trajectory column in place, one draw per step.
///
/// `drawn_before` is how many draws the run consumed before this column, so
/// a dead source reports run-wide totals no matter which column (or which
/// worker) it dies in.
fn advance_column<S: NormalSource>(
    column: &mut [f64],
    drift_term: f64,
    diffusion: f64,
    drawn_before: usize,
    needed: usize,
    source: &mut S,
) -> Result<(), SimulatorError> {
    for step in 1..column.len() {
        let shock = source
            .next_standard_normal()
            .ok_or(SimulatorError::SimulationFailed {
                drawn: drawn_before + step - 1,
                needed,
            })?;
        column[step] = column[step - 1] * (drift_term + diffusion * shock).exp();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, Normal as StatNormal};

    fn params(
        starting_price: f64,
        drift: f64,
        volatility: f64,
        steps: usize,
        trajectories: usize,
    ) -> SimulationParameters {
        SimulationParameters::new(starting_price, drift, volatility, steps, trajectories)
    }

    /// A source that produces a fixed number of draws and then dies, to
    /// exercise the fatal-failure path.
    struct ExhaustibleSource {
        inner: SeededNormal,
        remaining: usize,
    }

    impl NormalSource for ExhaustibleSource {
        fn next_standard_normal(&mut self) -> Option<f64> {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            self.inner.next_standard_normal()
        }
    }

    #[test]
    fn test_output_shape_and_seed_row() {
        let mut source = SeededNormal::new(1);
        let matrix = simulate(&params(100.0, 0.05, 0.2, 10, 7), &mut source).unwrap();

        assert_eq!(matrix.row_count(), 11, "10 steps should give 11 rows.");
        assert_eq!(matrix.trajectory_count(), 7);
        for trajectory in 0..7 {
            assert_eq!(
                matrix.price(0, trajectory),
                100.0,
                "Row 0 must be the starting price, undrawn."
            );
        }
    }

    #[test]
    fn test_zero_volatility_is_pure_drift() {
        // With sigma = 0 the exponent collapses to r * dt, so every
        // trajectory is the same deterministic curve S0 * exp(r * t * dt).
        let r = 0.05;
        let steps = 12;
        let mut source = SeededNormal::new(9);
        let matrix = simulate(&params(100.0, r, 0.0, steps, 5), &mut source).unwrap();

        let delta_t = 1.0 / steps as f64;
        for trajectory in 0..5 {
            for step in 0..=steps {
                let expected = 100.0 * (r * step as f64 * delta_t).exp();
                let got = matrix.price(step, trajectory);
                assert!(
                    (got - expected).abs() < 1e-9,
                    "Step {} trajectory {}: expected {}, got {}",
                    step,
                    trajectory,
                    expected,
                    got
                );
            }
        }
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let mut source = SeededNormal::new(1);
        assert!(matches!(
            simulate(&params(100.0, 0.05, 0.2, 0, 10), &mut source),
            Err(SimulatorError::InvalidParameters { .. })
        ));
        assert!(matches!(
            simulate(&params(100.0, 0.05, 0.2, 10, 0), &mut source),
            Err(SimulatorError::InvalidParameters { .. })
        ));
        assert!(matches!(
            simulate(&params(-1.0, 0.05, 0.2, 10, 10), &mut source),
            Err(SimulatorError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_exhausted_source_is_fatal() {
        // 5 steps * 4 trajectories needs 20 draws; grant only 12.
        let mut source = ExhaustibleSource {
            inner: SeededNormal::new(3),
            remaining: 12,
        };
        let err = simulate(&params(100.0, 0.05, 0.2, 5, 4), &mut source).unwrap_err();
        assert!(
            matches!(
                err,
                SimulatorError::SimulationFailed {
                    drawn: 12,
                    needed: 20
                }
            ),
            "Expected SimulationFailed after 12 of 20 draws, got {:?}",
            err
        );
    }

    #[test]
    fn test_draw_counts_are_run_wide_in_any_column() {
        // A source that dies while a later column is being advanced must
        // still report how far the whole run got, not just this column.
        // Column index 3 of a 5-step run starts at draw 15 of 20; a source
        // that dies immediately fails the run at exactly that draw.
        let mut column = [100.0; 6];
        let mut dead = ExhaustibleSource {
            inner: SeededNormal::new(1),
            remaining: 0,
        };
        let err = advance_column(&mut column, 0.0, 0.01, 15, 20, &mut dead).unwrap_err();
        assert!(
            matches!(
                err,
                SimulatorError::SimulationFailed {
                    drawn: 15,
                    needed: 20
                }
            ),
            "Expected run-wide draw totals, got {:?}",
            err
        );
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let p = params(100.0, 0.05, 0.2, 20, 8);
        let a = simulate(&p, &mut SeededNormal::new(77)).unwrap();
        let b = simulate(&p, &mut SeededNormal::new(77)).unwrap();
        for trajectory in 0..8 {
            assert_eq!(a.trajectory(trajectory), b.trajectory(trajectory));
        }
    }

    #[test]
    fn test_parallel_runs_are_reproducible() {
        let p = params(100.0, 0.05, 0.2, 50, 32);
        let a = simulate_parallel(&p, 1234).unwrap();
        let b = simulate_parallel(&p, 1234).unwrap();
        for trajectory in 0..32 {
            assert_eq!(
                a.trajectory(trajectory),
                b.trajectory(trajectory),
                "A fixed master seed must give identical paths regardless of scheduling."
            );
        }
    }

    #[test]
    fn test_log_return_mean_matches_theory() {
        // Law of large numbers: over many trajectories the mean of
        // ln(S_T / S0) converges to (r - sigma^2 / 2) * T.
        let r = 0.05;
        let sigma = 0.2;
        let trajectories = 10_000;
        let p = params(100.0, r, sigma, 10, trajectories);
        let matrix = simulate_parallel(&p, 42).unwrap();

        let mean_log_return = matrix
            .terminal_prices()
            .iter()
            .map(|s| (s / 100.0).ln())
            .sum::<f64>()
            / trajectories as f64;
        let theory = (r - 0.5 * sigma * sigma) * 1.0;

        // Standard error of the mean is sigma / sqrt(n) = 0.002; allow 4x.
        let tolerance = 4.0 * sigma / (trajectories as f64).sqrt();
        assert!(
            (mean_log_return - theory).abs() < tolerance,
            "Mean log return {} should be within {} of {}",
            mean_log_return,
            tolerance,
            theory
        );
    }

    #[test]
    fn test_terminal_log_prices_look_lognormal() {
        // ln(S_T) should be N(ln(S0) + (r - sigma^2/2) T, sigma^2 T).
        // With S0 = 1 the location is just the drift term. Compare the
        // empirical CDF against the theoretical one, Kolmogorov-Smirnov
        // style.
        let r = 0.1;
        let sigma = 0.35;
        let trajectories = 10_000;
        let p = params(1.0, r, sigma, 100, trajectories);
        let matrix = simulate_parallel(&p, 7).unwrap();

        let mut log_terminal: Vec<f64> =
            matrix.terminal_prices().iter().map(|s| s.ln()).collect();
        log_terminal.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mu = (r - 0.5 * sigma * sigma) * 1.0;
        let normal = StatNormal::new(mu, sigma).unwrap();

        let mut d_max: f64 = 0.0;
        for (i, value) in log_terminal.iter().enumerate() {
            let empirical = (i + 1) as f64 / trajectories as f64;
            let theoretical = normal.cdf(*value);
            d_max = d_max.max((empirical - theoretical).abs());
        }
        // KS critical value at alpha = 0.001 is ~1.95 / sqrt(n).
        let critical = 1.95 / (trajectories as f64).sqrt();
        assert!(
            d_max < critical,
            "KS statistic {} exceeds critical value {}",
            d_max,
            critical
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        // The canonical run: S0 = 100, r = 5%, sigma = 20%, 252 daily
        // steps, 1000 trajectories.
        let p = params(100.0, 0.05, 0.2, 252, 1000);
        let matrix = simulate(&p, &mut SeededNormal::new(2024)).unwrap();

        assert_eq!(matrix.row_count(), 253);
        assert_eq!(matrix.trajectory_count(), 1000);
        for trajectory in 0..1000 {
            assert_eq!(matrix.price(0, trajectory), 100.0);
            for &price in matrix.trajectory(trajectory) {
                assert!(
                    price > 0.0,
                    "GBM can never produce a non-positive price from finite draws."
                );
            }
        }
    }
}
