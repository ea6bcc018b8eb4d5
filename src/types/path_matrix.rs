// src/types/path_matrix.rs

use serde::{Deserialize, Serialize};

/// The output of one simulation run: `step_count + 1` rows by
/// `trajectory_count` columns of simulated prices. Row 0 is the starting
/// price in every column; row `t` is the price after `t` discrete steps.
///
/// Storage is column-major, one contiguous slice per trajectory. That keeps a
/// single path cheap to hand to a renderer and lets the parallel simulator
/// give each worker exclusive ownership of its own column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathMatrix {
    values: Vec<f64>,
    step_count: usize,
    trajectory_count: usize,
}

impl PathMatrix {
    /// Allocates a matrix with every cell in every column set to
    /// `starting_price`. The simulator only ever overwrites rows 1.., so
    /// row 0 is correct from the moment of construction.
    pub(crate) fn filled(starting_price: f64, step_count: usize, trajectory_count: usize) -> Self {
        Self {
            values: vec![starting_price; (step_count + 1) * trajectory_count],
            step_count,
            trajectory_count,
        }
    }

    /// Number of rows, i.e. `step_count + 1`.
    pub fn row_count(&self) -> usize {
        self.step_count + 1
    }

    /// Number of columns, i.e. independent trajectories.
    pub fn trajectory_count(&self) -> usize {
        self.trajectory_count
    }

    /// The price of trajectory `trajectory` after `step` steps.
    ///
    /// # Panics
    /// Panics if either index is out of range, like any slice index.
    pub fn price(&self, step: usize, trajectory: usize) -> f64 {
        assert!(step <= self.step_count, "step {} out of range", step);
        assert!(
            trajectory < self.trajectory_count,
            "trajectory {} out of range",
            trajectory
        );
        self.values[trajectory * (self.step_count + 1) + step]
    }

    /// One full trajectory as a contiguous slice, index 0 being the
    /// starting price.
    pub fn trajectory(&self, trajectory: usize) -> &[f64] {
        let rows = self.step_count + 1;
        &self.values[trajectory * rows..(trajectory + 1) * rows]
    }

    /// All trajectories, in column order.
    pub fn trajectories(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.step_count + 1)
    }

    /// Every trajectory's price at a fixed step, gathered into a row.
    pub fn step_row(&self, step: usize) -> Vec<f64> {
        (0..self.trajectory_count)
            .map(|trajectory| self.price(step, trajectory))
            .collect()
    }

    /// The final simulated price of every trajectory.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.step_row(self.step_count)
    }

    /// Mutable column slices, one per trajectory. This is the seam the
    /// simulators write through.
    pub(crate) fn columns_mut(&mut self) -> std::slice::ChunksExactMut<'_, f64> {
        self.values.chunks_exact_mut(self.step_count + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_matrix_shape_and_seed_row() {
        let matrix = PathMatrix::filled(100.0, 5, 3);
        assert_eq!(matrix.row_count(), 6, "5 steps need 6 rows.");
        assert_eq!(matrix.trajectory_count(), 3);
        for trajectory in 0..3 {
            assert_eq!(
                matrix.price(0, trajectory),
                100.0,
                "Row 0 must equal the starting price in every column."
            );
        }
    }

    #[test]
    #[should_panic(expected = "step 6 out of range")]
    fn test_price_panics_on_out_of_range_step() {
        let matrix = PathMatrix::filled(100.0, 5, 3);
        matrix.price(6, 0);
    }

    #[test]
    #[should_panic(expected = "trajectory 3 out of range")]
    fn test_price_panics_on_out_of_range_trajectory() {
        let matrix = PathMatrix::filled(100.0, 5, 3);
        matrix.price(0, 3);
    }

    #[test]
    fn test_trajectory_slice_is_one_column() {
        let mut matrix = PathMatrix::filled(1.0, 2, 2);
        // Write a recognizable pattern through the simulator's seam.
        for (index, column) in matrix.columns_mut().enumerate() {
            column[1] = 10.0 * (index + 1) as f64;
            column[2] = 100.0 * (index + 1) as f64;
        }
        assert_eq!(matrix.trajectory(0), &[1.0, 10.0, 100.0]);
        assert_eq!(matrix.trajectory(1), &[1.0, 20.0, 200.0]);
        assert_eq!(matrix.step_row(1), vec![10.0, 20.0]);
        assert_eq!(matrix.terminal_prices(), vec![100.0, 200.0]);
    }
}
