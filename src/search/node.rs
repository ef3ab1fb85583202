//! Search node representation.

use crate::model::{Constraint, ConstraintChain, LinExpr, Problem};
use crate::relax::{Relaxation, Sense};

/// A node in the branch-and-bound search tree.
///
/// A node is one subproblem: the ordered variable sequence, the
/// accumulated constraint chain, and the objective. Children are derived
/// by appending exactly one branching bound to the chain; the persistent
/// chain guarantees a child never mutates its parent's constraint set.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Solve-scoped node identifier (0 for root, assigned in creation
    /// order by the engine).
    pub id: u64,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    num_vars: usize,
    constraints: ConstraintChain,
    objective: LinExpr,
    relaxation: Option<Relaxation>,
    values: Option<Vec<f64>>,
    obj_val: Option<f64>,
}

impl SearchNode {
    /// Create the root node from the original problem.
    pub fn root(problem: &Problem) -> Self {
        Self {
            id: 0,
            depth: 0,
            num_vars: problem.num_vars(),
            constraints: ConstraintChain::from_slice(problem.constraints()),
            objective: problem.objective().clone(),
            relaxation: None,
            values: None,
            obj_val: None,
        }
    }

    /// Number of variables, including the trailing objective-helper.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of accumulated constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Materialize the continuous relaxation of this node.
    ///
    /// Safe to call more than once; the relaxation is built on first call
    /// and reused afterwards.
    pub fn build_relaxation(&mut self) -> &Relaxation {
        if self.relaxation.is_none() {
            self.relaxation = Some(Relaxation {
                constraints: self.constraints.to_vec(),
                objective: self.objective.clone(),
                sense: Sense::Maximize,
            });
        }
        self.relaxation.as_ref().expect("relaxation built above")
    }

    /// The materialized relaxation, if built.
    pub fn relaxation(&self) -> Option<&Relaxation> {
        self.relaxation.as_ref()
    }

    /// Store the result of a successful relaxation solve.
    pub fn store_solution(&mut self, x: Vec<f64>, obj_val: f64) {
        self.values = Some(x);
        self.obj_val = Some(obj_val);
    }

    /// Relaxed variable values, populated after a solve.
    pub fn values(&self) -> Option<&[f64]> {
        self.values.as_deref()
    }

    /// Relaxed objective value, populated after a solve.
    pub fn objective_value(&self) -> Option<f64> {
        self.obj_val
    }

    /// Check if all decision variables hold integer values.
    ///
    /// The trailing objective-helper variable is skipped. An unsolved node
    /// counts as non-integral.
    pub fn is_integral(&self, tol: f64) -> bool {
        let Some(values) = self.values.as_deref() else {
            return false;
        };
        values[..self.num_vars - 1]
            .iter()
            .all(|&v| (v.round() - v).abs() <= tol)
    }

    /// First variable whose value is more than `tol` from an integer.
    ///
    /// Scans the full sequence in order, helper included. Returns None if
    /// every value is within tolerance or the node is unsolved.
    pub fn first_fractional(&self, tol: f64) -> Option<usize> {
        let values = self.values.as_deref()?;
        values.iter().position(|&v| (v - v.round()).abs() > tol)
    }

    /// All stored values rounded to the nearest integer.
    pub fn rounded_values(&self) -> Option<Vec<f64>> {
        self.values
            .as_deref()
            .map(|vs| vs.iter().map(|v| v.round()).collect())
    }

    /// Child with the added bound `x_var <= floor(value)`.
    ///
    /// Precondition: the node has a stored solution (branching only makes
    /// sense on a just-solved node).
    pub fn branch_floor(&self, var: usize, id: u64) -> SearchNode {
        let value = self.branch_value(var);
        self.child_with(Constraint::upper_bound(var, value.floor()), id)
    }

    /// Child with the added bound `x_var >= ceil(value)`.
    ///
    /// Precondition: the node has a stored solution.
    pub fn branch_ceil(&self, var: usize, id: u64) -> SearchNode {
        let value = self.branch_value(var);
        self.child_with(Constraint::lower_bound(var, value.ceil()), id)
    }

    fn branch_value(&self, var: usize) -> f64 {
        self.values
            .as_deref()
            .expect("branching requires a solved node")[var]
    }

    fn child_with(&self, constraint: Constraint, id: u64) -> SearchNode {
        SearchNode {
            id,
            depth: self.depth + 1,
            num_vars: self.num_vars,
            constraints: self.constraints.push(constraint),
            objective: self.objective.clone(),
            relaxation: None,
            values: None,
            obj_val: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Relation;

    fn two_var_problem() -> Problem {
        // max x2 s.t. x0 + 2*x1 <= 4, x2 the objective-helper
        Problem::new(
            3,
            vec![Constraint::le(LinExpr::var(0).with_term(1, 2.0), 4.0)],
            LinExpr::var(2),
        )
        .unwrap()
    }

    #[test]
    fn test_root_node() {
        let root = SearchNode::root(&two_var_problem());
        assert_eq!(root.id, 0);
        assert_eq!(root.depth, 0);
        assert_eq!(root.num_constraints(), 1);
        assert!(root.values().is_none());
        assert!(root.relaxation().is_none());
    }

    #[test]
    fn test_build_relaxation_is_idempotent() {
        let mut root = SearchNode::root(&two_var_problem());

        let n = root.build_relaxation().constraints.len();
        assert_eq!(n, 1);
        assert_eq!(root.build_relaxation().constraints.len(), 1);
        assert_eq!(root.build_relaxation().sense, Sense::Maximize);
    }

    #[test]
    fn test_branch_bounds() {
        let mut root = SearchNode::root(&two_var_problem());
        root.store_solution(vec![2.7, 0.6, 3.3], 3.3);

        // Down branch on x0 = 2.7: x0 <= 2
        let down = root.branch_floor(0, 1);
        let added = down.constraints.to_vec().pop().unwrap();
        assert_eq!(added.as_bound(), Some((0, Relation::Le, 2.0)));
        assert_eq!(down.depth, 1);
        assert_eq!(down.id, 1);

        // Up branch on x0 = 2.7: x0 >= 3
        let up = root.branch_ceil(0, 2);
        let added = up.constraints.to_vec().pop().unwrap();
        assert_eq!(added.as_bound(), Some((0, Relation::Ge, 3.0)));
    }

    #[test]
    fn test_branching_leaves_parent_untouched() {
        let mut root = SearchNode::root(&two_var_problem());
        root.store_solution(vec![2.7, 0.6, 3.3], 3.3);
        root.build_relaxation();

        let down = root.branch_floor(0, 1);
        let up = root.branch_ceil(0, 2);

        // Parent constraint set, solution, and relaxation all unchanged.
        assert_eq!(root.num_constraints(), 1);
        assert_eq!(root.values(), Some(&[2.7, 0.6, 3.3][..]));
        assert_eq!(root.relaxation().unwrap().constraints.len(), 1);

        // Children start unsolved, with independent chains.
        assert_eq!(down.num_constraints(), 2);
        assert_eq!(up.num_constraints(), 2);
        assert!(down.values().is_none());
        assert!(down.relaxation().is_none());
    }

    #[test]
    fn test_branch_partition_excludes_open_unit_interval() {
        let mut root = SearchNode::root(&two_var_problem());
        root.store_solution(vec![2.7, 0.6, 3.3], 3.3);

        let down_bound = root
            .branch_floor(0, 1)
            .constraints
            .to_vec()
            .pop()
            .unwrap();
        let up_bound = root.branch_ceil(0, 2).constraints.to_vec().pop().unwrap();

        // Every integer stays on at least one side; only (2, 3) is cut.
        for k in -5..=5 {
            let point = [k as f64, 0.0, 0.0];
            let in_down = down_bound.satisfied_by(&point, 1e-9);
            let in_up = up_bound.satisfied_by(&point, 1e-9);
            assert!(in_down || in_up, "integer {} excluded by both branches", k);
        }

        // The fractional value itself is excluded by both.
        let frac = [2.7, 0.0, 0.0];
        assert!(!down_bound.satisfied_by(&frac, 1e-9));
        assert!(!up_bound.satisfied_by(&frac, 1e-9));
    }

    #[test]
    fn test_is_integral_skips_helper() {
        let mut node = SearchNode::root(&two_var_problem());

        // Unsolved counts as non-integral.
        assert!(!node.is_integral(1e-4));

        // Fractional helper does not block integrality.
        node.store_solution(vec![2.0, 1.0, 3.3333], 3.3333);
        assert!(node.is_integral(1e-4));

        // Fractional decision variable does.
        node.store_solution(vec![2.0005, 1.0, 3.0], 3.0);
        assert!(!node.is_integral(1e-4));
        assert!(node.is_integral(1e-3));
    }

    #[test]
    fn test_first_fractional_uses_looser_tolerance() {
        let mut node = SearchNode::root(&two_var_problem());
        assert_eq!(node.first_fractional(1e-2), None);

        // 0.005 off an integer: fails is_integral at 1e-4, but is not a
        // branching candidate at 1e-2.
        node.store_solution(vec![2.005, 1.0, 3.0], 3.0);
        assert!(!node.is_integral(1e-4));
        assert_eq!(node.first_fractional(1e-2), None);

        // Scan order is sequence order, helper included last.
        node.store_solution(vec![2.0, 0.5, 3.5], 3.5);
        assert_eq!(node.first_fractional(1e-2), Some(1));

        node.store_solution(vec![2.0, 1.0, 3.5], 3.5);
        assert_eq!(node.first_fractional(1e-2), Some(2));
    }

    #[test]
    fn test_rounded_values() {
        let mut node = SearchNode::root(&two_var_problem());
        assert_eq!(node.rounded_values(), None);

        node.store_solution(vec![2.7, 0.6, 3.3], 3.3);
        assert_eq!(node.rounded_values(), Some(vec![3.0, 1.0, 3.0]));
    }
}
