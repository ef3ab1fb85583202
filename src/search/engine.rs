//! Branch-and-bound search engine.

use std::time::Instant;

use super::{NodeQueue, SearchNode};
use crate::error::BnbResult;
use crate::model::{BnbOutcome, Incumbent, Problem, SearchStatus};
use crate::relax::{RelaxStatus, RelaxationSolver};
use crate::settings::BnbSettings;

/// Statistics from one branch-and-bound solve.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Relaxation solves issued (priming solve included).
    pub relaxations: u64,

    /// Nodes split into floor/ceil children.
    pub nodes_branched: u64,

    /// Nodes whose relaxation bound did not beat the incoming incumbent.
    pub nodes_pruned: u64,

    /// Integral solutions accepted.
    pub integral_found: u64,

    /// Relaxations reported infeasible.
    pub relax_infeasible: u64,

    /// Relaxations that failed numerically (malformed replies included).
    pub relax_failures: u64,

    /// Subtrees abandoned at the depth limit.
    pub depth_truncations: u64,

    /// Total solve time in milliseconds.
    pub elapsed_ms: u64,
}

/// Branch-and-bound engine.
///
/// Drives a depth-first recursive search over nodes obtained by floor/ceil
/// branching, solving each node's continuous relaxation through an external
/// [`RelaxationSolver`]. State is scoped to one `solve` call.
pub struct BranchAndBound {
    settings: BnbSettings,
    queue: NodeQueue,
    next_node_id: u64,
    stats: SearchStats,
    start_time: Option<Instant>,
}

impl BranchAndBound {
    /// Create a new engine.
    pub fn new(settings: BnbSettings) -> Self {
        Self {
            settings,
            queue: NodeQueue::new(),
            next_node_id: 1, // 0 reserved for root
            stats: SearchStats::default(),
            start_time: None,
        }
    }

    /// Statistics of the most recent solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Solve a mixed-integer program.
    ///
    /// Builds the root relaxation, primes the frontier with one up-front
    /// solve, then recurses. Individual relaxation failures are absorbed;
    /// the returned outcome always carries the best-known result.
    pub fn solve<S: RelaxationSolver>(
        &mut self,
        problem: &Problem,
        solver: &mut S,
    ) -> BnbResult<BnbOutcome> {
        self.queue = NodeQueue::new();
        self.next_node_id = 1;
        self.stats = SearchStats::default();
        self.start_time = Some(Instant::now());

        let mut root = SearchNode::root(problem);
        root.build_relaxation();

        // Seed the frontier with the root keyed by its relaxation bound.
        // A failed priming solve is not fatal: the recursion re-solves the
        // root and takes the fallback path itself.
        let primed = solver.solve(root.relaxation().expect("relaxation built above"));
        self.stats.relaxations += 1;
        let root_bound = if primed.is_optimal() {
            primed.obj_val
        } else {
            log::debug!("root relaxation did not solve: {:?}", primed.status);
            f64::NEG_INFINITY
        };
        self.queue.push(root, root_bound);
        let root_bound = self.queue.best_bound();
        let root = self.queue.pop().expect("root was just seeded");

        let best = self.recurse(root, 0, &Incumbent::new(), solver);

        self.stats.elapsed_ms = self.elapsed_ms();
        let status = if self.stats.depth_truncations > 0 {
            SearchStatus::Truncated
        } else {
            SearchStatus::Complete
        };

        if self.settings.verbose {
            log::info!(
                "Search finished: status={:?} obj={:.6e} relaxations={} branched={} time={}ms",
                status,
                best.objective,
                self.stats.relaxations,
                self.stats.nodes_branched,
                self.stats.elapsed_ms,
            );
        }

        Ok(BnbOutcome {
            status,
            objective: best.objective,
            values: best.values,
            root_bound,
            stats: self.stats.clone(),
        })
    }

    /// Recursive exploration of one node.
    ///
    /// Takes the caller's incumbent as the starting bound and returns this
    /// subtree's result: the node's own rounded solution when it is
    /// integral, the merged child results when it branches, the caller's
    /// incumbent when it is pruned, and the zero-objective fallback when
    /// the relaxation fails.
    fn recurse<S: RelaxationSolver>(
        &mut self,
        mut node: SearchNode,
        depth: usize,
        best: &Incumbent,
        solver: &mut S,
    ) -> Incumbent {
        if let Some(limit) = self.settings.max_depth {
            if depth > limit {
                self.stats.depth_truncations += 1;
                log::debug!("node {}: depth limit {} reached, subtree abandoned", node.id, limit);
                return best.clone();
            }
        }

        node.build_relaxation();
        let result = solver.solve(node.relaxation().expect("relaxation built above"));
        self.stats.relaxations += 1;
        self.log_progress();

        match result.status {
            RelaxStatus::Infeasible => {
                self.stats.relax_infeasible += 1;
                return self.abandon(&node, best);
            }
            RelaxStatus::SolverFailure => {
                self.stats.relax_failures += 1;
                return self.abandon(&node, best);
            }
            RelaxStatus::Optimal => {}
        }

        if result.x.len() != node.num_vars() {
            log::warn!(
                "node {}: solver returned {} values for {} variables, treating as failure",
                node.id,
                result.x.len(),
                node.num_vars()
            );
            self.stats.relax_failures += 1;
            return self.abandon(&node, best);
        }

        let obj = result.obj_val;
        node.store_solution(result.x, obj);

        if node.is_integral(self.settings.int_tol) {
            self.stats.integral_found += 1;
            let values = node.rounded_values().expect("solution stored above");
            log::debug!("node {}: integral solution with objective {}", node.id, obj);
            // The caller filters against its own incumbent.
            return Incumbent::accepted(obj.round(), values);
        }

        if obj > best.objective {
            let Some(var) = node.first_fractional(self.settings.branch_tol) else {
                // Every value sits within the branching tolerance of an
                // integer even though one missed the integrality tolerance;
                // no branch can separate them, so accept the rounded point.
                log::warn!(
                    "node {}: no branching candidate below tolerance, accepting rounded solution",
                    node.id
                );
                self.stats.integral_found += 1;
                let values = node.rounded_values().expect("solution stored above");
                return Incumbent::accepted(obj.round(), values);
            };

            let (down, up) = self.branch(&node, var);
            // Both children receive the caller's incumbent as their
            // starting bound, not each other's result.
            let down_result = self.recurse(down, depth + 1, best, solver);
            let up_result = self.recurse(up, depth + 1, best, solver);

            // Ceil-branch result is applied first; on equal objectives it
            // keeps the incumbent against the floor-branch result.
            let mut merged = best.clone();
            merged.consider(up_result);
            merged.consider(down_result);
            return merged;
        }

        self.stats.nodes_pruned += 1;
        best.clone()
    }

    /// Node-local recovery for infeasible or failed relaxations: the
    /// branch contributes a zero objective and the caller's assignment
    /// passes through unchanged. Known limitation: a feasible problem
    /// whose true optimum is negative is mis-ranked by this floor.
    fn abandon(&self, node: &SearchNode, best: &Incumbent) -> Incumbent {
        log::debug!("node {}: relaxation not solved, branch abandoned", node.id);
        Incumbent {
            objective: 0.0,
            values: best.values.clone(),
        }
    }

    /// Create floor/ceil children of a node, assigning creation-ordered ids.
    fn branch(&mut self, parent: &SearchNode, var: usize) -> (SearchNode, SearchNode) {
        let down_id = self.next_node_id;
        let up_id = self.next_node_id + 1;
        self.next_node_id += 2;
        self.stats.nodes_branched += 1;

        (parent.branch_floor(var, down_id), parent.branch_ceil(var, up_id))
    }

    fn elapsed_ms(&self) -> u64 {
        self.start_time
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    fn log_progress(&self) {
        if !self.settings.verbose {
            return;
        }
        if self.stats.relaxations % self.settings.log_freq != 0 {
            return;
        }
        log::info!(
            "Relaxations: {} | Branched: {} | Integral: {} | Failed: {} | Time: {:.1}s",
            self.stats.relaxations,
            self.stats.nodes_branched,
            self.stats.integral_found,
            self.stats.relax_infeasible + self.stats.relax_failures,
            self.elapsed_ms() as f64 / 1000.0,
        );
    }
}

/// Solve a mixed-integer program with a fresh engine.
pub fn solve_bnb<S: RelaxationSolver>(
    problem: &Problem,
    solver: &mut S,
    settings: &BnbSettings,
) -> BnbResult<BnbOutcome> {
    BranchAndBound::new(settings.clone()).solve(problem, solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Constraint, LinExpr, NO_INCUMBENT};
    use crate::relax::{RelaxResult, Relaxation};
    use std::collections::VecDeque;

    /// Oracle replaying canned results in call order.
    struct ReplayOracle {
        replies: VecDeque<RelaxResult>,
        calls: u64,
    }

    impl ReplayOracle {
        fn new(replies: Vec<RelaxResult>) -> Self {
            Self {
                replies: replies.into(),
                calls: 0,
            }
        }
    }

    impl RelaxationSolver for ReplayOracle {
        fn solve(&mut self, _relaxation: &Relaxation) -> RelaxResult {
            self.calls += 1;
            self.replies.pop_front().expect("oracle script exhausted")
        }
    }

    fn helper_problem() -> Problem {
        // max x1 with x0 integer and x1 the continuous helper
        Problem::new(2, vec![Constraint::upper_bound(0, 10.0)], LinExpr::var(1)).unwrap()
    }

    #[test]
    fn test_bound_not_beating_incumbent_is_pruned() {
        let problem = helper_problem();
        let mut engine = BranchAndBound::new(BnbSettings::default());
        let mut oracle = ReplayOracle::new(vec![
            // Fractional node with bound 5: below the incumbent, so no
            // branching solves may follow.
            RelaxResult::optimal(vec![0.5, 5.0], 5.0),
        ]);

        let incumbent = Incumbent::accepted(100.0, vec![1.0, 100.0]);
        let node = SearchNode::root(&problem);
        let result = engine.recurse(node, 0, &incumbent, &mut oracle);

        assert_eq!(result.objective, 100.0);
        assert_eq!(oracle.calls, 1);
        assert_eq!(engine.stats().nodes_pruned, 1);
        assert_eq!(engine.stats().nodes_branched, 0);
    }

    #[test]
    fn test_failed_relaxation_contributes_zero() {
        let problem = helper_problem();
        let mut engine = BranchAndBound::new(BnbSettings::default());
        let mut oracle = ReplayOracle::new(vec![RelaxResult::failure()]);

        let incumbent = Incumbent::accepted(7.0, vec![1.0, 7.0]);
        let node = SearchNode::root(&problem);
        let result = engine.recurse(node, 0, &incumbent, &mut oracle);

        // Zero objective, caller's assignment passed through.
        assert_eq!(result.objective, 0.0);
        assert_eq!(result.values, Some(vec![1.0, 7.0]));
        assert_eq!(engine.stats().relax_failures, 1);
    }

    #[test]
    fn test_integral_node_returned_even_when_worse() {
        let problem = helper_problem();
        let mut engine = BranchAndBound::new(BnbSettings::default());
        let mut oracle = ReplayOracle::new(vec![RelaxResult::optimal(vec![2.0, 2.0], 2.0)]);

        // The node reports its own solution; filtering is the caller's job.
        let incumbent = Incumbent::accepted(50.0, vec![1.0, 50.0]);
        let node = SearchNode::root(&problem);
        let result = engine.recurse(node, 0, &incumbent, &mut oracle);

        assert_eq!(result.objective, 2.0);
        assert_eq!(result.values, Some(vec![2.0, 2.0]));
    }

    #[test]
    fn test_ceil_branch_wins_objective_tie() {
        let problem = helper_problem();
        let mut engine = BranchAndBound::new(BnbSettings::default());
        let mut oracle = ReplayOracle::new(vec![
            // Root: fractional x0, bound above the sentinel.
            RelaxResult::optimal(vec![2.5, 4.5], 4.5),
            // Floor child (solved first): integral, objective 4.
            RelaxResult::optimal(vec![2.0, 4.0], 4.0),
            // Ceil child: integral, same objective, different point.
            RelaxResult::optimal(vec![3.0, 4.0], 4.0),
        ]);

        let node = SearchNode::root(&problem);
        let result = engine.recurse(node, 0, &Incumbent::new(), &mut oracle);

        assert_eq!(result.objective, 4.0);
        // Ceil result is merged first and keeps the tie.
        assert_eq!(result.values, Some(vec![3.0, 4.0]));
        assert_eq!(engine.stats().nodes_branched, 1);
    }

    #[test]
    fn test_malformed_reply_absorbed_as_failure() {
        let problem = helper_problem();
        let mut engine = BranchAndBound::new(BnbSettings::default());
        // Three values for a two-variable problem.
        let mut oracle =
            ReplayOracle::new(vec![RelaxResult::optimal(vec![1.0, 2.0, 3.0], 2.0)]);

        let node = SearchNode::root(&problem);
        let result = engine.recurse(node, 0, &Incumbent::new(), &mut oracle);

        assert_eq!(result.objective, 0.0);
        assert!(result.values.is_none());
        assert_eq!(engine.stats().relax_failures, 1);
    }

    #[test]
    fn test_depth_limit_abandons_subtree() {
        let problem = helper_problem();
        let mut engine = BranchAndBound::new(BnbSettings::default().with_max_depth(0));
        let mut oracle = ReplayOracle::new(vec![
            // Root is fractional; both children sit past the limit and are
            // never solved.
            RelaxResult::optimal(vec![0.5, 10.0], 10.0),
        ]);

        let node = SearchNode::root(&problem);
        let result = engine.recurse(node, 0, &Incumbent::new(), &mut oracle);

        assert_eq!(result.objective, NO_INCUMBENT);
        assert_eq!(oracle.calls, 1);
        assert_eq!(engine.stats().depth_truncations, 2);
    }
}
