//! Integer program representation.

use crate::error::{BnbError, BnbResult};
use crate::model::linear::{Constraint, LinExpr};

/// A mixed-integer maximization problem.
///
/// Variables are identified by position in an ordered sequence. The final
/// variable is reserved as a continuous objective-helper; integrality
/// checks skip it, all earlier variables are integer-constrained.
#[derive(Debug, Clone)]
pub struct Problem {
    num_vars: usize,
    constraints: Vec<Constraint>,
    objective: LinExpr,
}

impl Problem {
    /// Create a problem from its pieces.
    ///
    /// Validates that at least one variable exists and that every
    /// constraint and objective term references a declared variable.
    pub fn new(
        num_vars: usize,
        constraints: Vec<Constraint>,
        objective: LinExpr,
    ) -> BnbResult<Self> {
        if num_vars == 0 {
            return Err(BnbError::InvalidProblem(
                "problem has no variables".to_string(),
            ));
        }

        for (idx, c) in constraints.iter().enumerate() {
            if let Some(max) = c.expr.max_var_index() {
                if max >= num_vars {
                    return Err(BnbError::InvalidProblem(format!(
                        "constraint {} references variable {} but only {} variables exist",
                        idx, max, num_vars
                    )));
                }
            }
        }

        if let Some(max) = objective.max_var_index() {
            if max >= num_vars {
                return Err(BnbError::InvalidProblem(format!(
                    "objective references variable {} but only {} variables exist",
                    max, num_vars
                )));
            }
        }

        Ok(Self {
            num_vars,
            constraints,
            objective,
        })
    }

    /// Number of variables, including the trailing objective-helper.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of integer-constrained decision variables (the trailing
    /// continuous helper is excluded).
    pub fn num_decision_vars(&self) -> usize {
        self.num_vars - 1
    }

    /// Base constraints of the root problem.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Maximization objective.
    pub fn objective(&self) -> &LinExpr {
        &self.objective
    }
}
