use crate::algorithm::exact::{CostMatrix, ExactSolver};
use crate::io::error::SolverCause;
use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;

/// Exact solver using the `pathfinding` crate's Kuhn-Munkres implementation
///
/// Runs in O(N³) time and holds a second N×N copy of the costs while solving.
#[derive(Clone, Copy, Debug, Default)]
pub struct KuhnMunkresSolver;

impl ExactSolver for KuhnMunkresSolver {
    fn solve(&self, costs: &CostMatrix) -> Result<Vec<usize>, SolverCause> {
        let n = costs.size();
        if n == 0 {
            return Ok(Vec::new());
        }

        let values: Vec<i64> = costs.as_array().iter().map(|&c| i64::from(c)).collect();
        let weights = Matrix::from_vec(n, n, values)?;
        let (_total, assignments) = kuhn_munkres_min(&weights);
        Ok(assignments)
    }

    fn name(&self) -> &'static str {
        "kuhn-munkres"
    }
}
