//! Search results and incumbent tracking.

/// Initial incumbent objective, beaten by any real feasible objective.
pub const NO_INCUMBENT: f64 = -1e20;

/// How the search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The tree was explored exhaustively.
    Complete,

    /// At least one subtree was abandoned at the depth limit; the result
    /// is the best found within the explored portion.
    Truncated,
}

/// Best known integral solution during the search.
///
/// `values: None` means no integral point has been accepted yet and the
/// assignment is still the root's unsolved variables.
#[derive(Debug, Clone)]
pub struct Incumbent {
    /// Objective of the best accepted integral solution.
    pub objective: f64,

    /// Rounded variable assignment of that solution (None = unsolved).
    pub values: Option<Vec<f64>>,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// Create the initial incumbent: sentinel objective, unsolved values.
    pub fn new() -> Self {
        Self {
            objective: NO_INCUMBENT,
            values: None,
        }
    }

    /// Create an accepted integral solution.
    pub fn accepted(objective: f64, values: Vec<f64>) -> Self {
        Self {
            objective,
            values: Some(values),
        }
    }

    /// Check if an integral solution has been accepted.
    pub fn has_solution(&self) -> bool {
        self.values.is_some()
    }

    /// Replace this incumbent if `other` has a strictly larger objective.
    ///
    /// Returns true if the incumbent changed. On equal objectives the
    /// current holder is kept, so the order in which candidates are
    /// offered decides ties.
    pub fn consider(&mut self, other: Incumbent) -> bool {
        if other.objective > self.objective {
            *self = other;
            true
        } else {
            false
        }
    }
}

/// Final result of a branch-and-bound solve.
#[derive(Debug, Clone)]
pub struct BnbOutcome {
    /// How the search finished.
    pub status: SearchStatus,

    /// Best objective found (`NO_INCUMBENT` or the zero fallback when no
    /// integral solution was accepted).
    pub objective: f64,

    /// Rounded assignment of the best solution (None = root's unsolved
    /// variables).
    pub values: Option<Vec<f64>>,

    /// Relaxation objective of the root node (negative infinity when the
    /// root relaxation did not solve).
    pub root_bound: f64,

    /// Search statistics.
    pub stats: crate::search::SearchStats,
}

impl BnbOutcome {
    /// Check if the search produced an integral assignment.
    pub fn has_solution(&self) -> bool {
        self.values.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_incumbent() {
        let inc = Incumbent::new();
        assert!(!inc.has_solution());
        assert_eq!(inc.objective, NO_INCUMBENT);
    }

    #[test]
    fn test_consider_is_monotone() {
        let mut inc = Incumbent::new();

        assert!(inc.consider(Incumbent::accepted(3.0, vec![1.0, 2.0])));
        assert_eq!(inc.objective, 3.0);

        // A worse candidate never lowers the incumbent.
        assert!(!inc.consider(Incumbent::accepted(1.0, vec![0.0, 1.0])));
        assert_eq!(inc.objective, 3.0);

        assert!(inc.consider(Incumbent::accepted(5.0, vec![2.0, 3.0])));
        assert_eq!(inc.objective, 5.0);
    }

    #[test]
    fn test_consider_keeps_first_on_tie() {
        let mut inc = Incumbent::new();
        inc.consider(Incumbent::accepted(3.0, vec![3.0, 0.0]));

        // Equal objective with a different assignment is rejected.
        assert!(!inc.consider(Incumbent::accepted(3.0, vec![2.0, 1.0])));
        assert_eq!(inc.values, Some(vec![3.0, 0.0]));
    }
}
