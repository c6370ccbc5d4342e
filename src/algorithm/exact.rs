//! Exact assignment delegate
//!
//! The engine never solves the matching problem itself. It builds a cost
//! matrix, hands it to an injected [`ExactSolver`] and checks what comes back.

use crate::color::{Color, squared_distance};
use crate::io::error::{ReassignError, Result, SolverCause, solver_failure};
use bitvec::prelude::*;
use ndarray::{Array2, ArrayView1};

/// Square matrix with `cost[i][j] = distance(target[i], source[j])`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    costs: Array2<u32>,
}

impl CostMatrix {
    /// Allocate an all-zero `n` by `n` matrix
    pub fn zeros(n: usize) -> Self {
        Self {
            costs: Array2::zeros((n, n)),
        }
    }

    /// Build the full matrix in one go
    pub fn from_colors(source: &[Color], target: &[Color]) -> Self {
        let mut matrix = Self::zeros(target.len());
        for (row, &wanted) in target.iter().enumerate() {
            matrix.fill_row(row, wanted, source);
        }
        matrix
    }

    /// Fill one row with the distances from a target color to every source color
    pub fn fill_row(&mut self, row: usize, wanted: Color, source: &[Color]) {
        if row >= self.size() {
            return;
        }
        let mut cells = self.costs.row_mut(row);
        for (cell, &candidate) in cells.iter_mut().zip(source) {
            *cell = squared_distance(wanted, candidate);
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.costs.nrows()
    }

    /// Cost of placing source `col` at target `row`
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.costs.get((row, col)).copied()
    }

    /// One target's costs against every source pixel
    pub fn row(&self, row: usize) -> Option<ArrayView1<'_, u32>> {
        (row < self.size()).then(|| self.costs.row(row))
    }

    /// Underlying array
    pub const fn as_array(&self) -> &Array2<u32> {
        &self.costs
    }

    /// Total cost of a permutation, skipping out-of-range entries
    pub fn permutation_cost(&self, permutation: &[usize]) -> u64 {
        permutation
            .iter()
            .enumerate()
            .filter_map(|(row, &col)| self.get(row, col))
            .map(u64::from)
            .sum()
    }
}

/// Capability that computes a minimum-cost perfect matching
///
/// Implementations return a permutation where element `i` is the source index
/// assigned to target `i`. The result must be deterministic for a given
/// matrix.
pub trait ExactSolver: Send + Sync {
    /// Solve the assignment problem for a square cost matrix
    ///
    /// # Errors
    ///
    /// Returns an error if the solver cannot produce a matching
    fn solve(&self, costs: &CostMatrix) -> std::result::Result<Vec<usize>, SolverCause>;

    /// Short name used in log output
    fn name(&self) -> &'static str {
        "exact"
    }
}

/// Run the solver and reject anything that is not a permutation of `0..n`
///
/// # Errors
///
/// Returns `SolverFailure` if the solver raises an error or returns a result
/// of the wrong length, with out-of-range indices, or with duplicates
pub fn solve_checked(solver: &dyn ExactSolver, costs: &CostMatrix) -> Result<Vec<usize>> {
    let permutation = solver
        .solve(costs)
        .map_err(|cause| ReassignError::SolverFailure {
            reason: format!("{} solver raised an error", solver.name()),
            cause: Some(cause),
        })?;
    validate_permutation(&permutation, costs.size())?;
    Ok(permutation)
}

/// Check that `permutation` maps `0..n` one-to-one onto `0..n`
///
/// # Errors
///
/// Returns `SolverFailure` describing the first problem found
pub fn validate_permutation(permutation: &[usize], n: usize) -> Result<()> {
    if permutation.len() != n {
        return Err(solver_failure(&format!(
            "expected {n} assignments, got {}",
            permutation.len()
        )));
    }

    let mut seen = bitvec![0; n];
    for (row, &col) in permutation.iter().enumerate() {
        let free = seen.get(col).is_some_and(|bit| !*bit);
        if col >= n {
            return Err(solver_failure(&format!(
                "target {row} assigned to source {col}, outside 0..{n}"
            )));
        }
        if !free {
            return Err(solver_failure(&format!(
                "source {col} assigned more than once"
            )));
        }
        seen.set(col, true);
    }
    Ok(())
}
