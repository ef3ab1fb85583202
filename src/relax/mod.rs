//! Relaxation solver seam.
//!
//! The continuous relaxation of a node is solved by an external LP/convex
//! optimizer behind the [`RelaxationSolver`] trait. The engine issues
//! exactly one blocking solve per node and inspects only the returned
//! status, per-variable values, and the scalar objective.

use crate::model::{Constraint, LinExpr};

/// Optimization sense of a relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Maximize the objective (the search always requests this).
    Maximize,

    /// Minimize the objective.
    Minimize,
}

/// A materialized continuous relaxation of one search node.
///
/// This is the integrality-dropped subproblem: the node's accumulated
/// constraints (root constraints first, branching bounds after) together
/// with the objective and sense.
#[derive(Debug, Clone)]
pub struct Relaxation {
    /// Accumulated linear constraints, root constraints first.
    pub constraints: Vec<Constraint>,

    /// Objective expression.
    pub objective: LinExpr,

    /// Optimization sense.
    pub sense: Sense,
}

/// Status of a relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxStatus {
    /// Optimal solution found; all variable values are populated.
    Optimal,

    /// The relaxation has no feasible point.
    Infeasible,

    /// The solver could not produce a result (numerical failure).
    SolverFailure,
}

/// Result from solving a relaxation.
#[derive(Debug, Clone)]
pub struct RelaxResult {
    /// Solve status.
    pub status: RelaxStatus,

    /// Primal solution, one value per variable (empty unless optimal).
    pub x: Vec<f64>,

    /// Achieved objective value (meaningless unless optimal).
    pub obj_val: f64,
}

impl RelaxResult {
    /// Create an optimal result.
    pub fn optimal(x: Vec<f64>, obj_val: f64) -> Self {
        Self {
            status: RelaxStatus::Optimal,
            x,
            obj_val,
        }
    }

    /// Create an infeasible result.
    pub fn infeasible() -> Self {
        Self {
            status: RelaxStatus::Infeasible,
            x: Vec::new(),
            obj_val: f64::NAN,
        }
    }

    /// Create a solver-failure result.
    pub fn failure() -> Self {
        Self {
            status: RelaxStatus::SolverFailure,
            x: Vec::new(),
            obj_val: f64::NAN,
        }
    }

    /// Check if the solve reached optimality.
    pub fn is_optimal(&self) -> bool {
        self.status == RelaxStatus::Optimal
    }
}

/// External continuous-relaxation solver.
///
/// Implementations receive the full constraint set and objective of a node
/// and report either an optimal real-valued assignment or a failure. The
/// call is synchronous and has no timeout; a non-terminating implementation
/// stalls the whole search.
pub trait RelaxationSolver {
    /// Solve one relaxation.
    fn solve(&mut self, relaxation: &Relaxation) -> RelaxResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let opt = RelaxResult::optimal(vec![1.0, 2.0], 3.0);
        assert!(opt.is_optimal());
        assert_eq!(opt.x, vec![1.0, 2.0]);

        let inf = RelaxResult::infeasible();
        assert!(!inf.is_optimal());
        assert!(inf.x.is_empty());

        let fail = RelaxResult::failure();
        assert_eq!(fail.status, RelaxStatus::SolverFailure);
    }
}
