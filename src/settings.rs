//! Configuration settings for the branch-and-bound search.

/// Branch-and-bound search settings.
#[derive(Debug, Clone)]
pub struct BnbSettings {
    // === Tolerances ===
    /// Integer feasibility tolerance.
    /// A variable is considered integer if |x - round(x)| <= int_tol.
    pub int_tol: f64,

    /// Branching candidate tolerance.
    /// A variable is a branching candidate if |x - round(x)| > branch_tol.
    ///
    /// This is intentionally looser than `int_tol`. A node can fail the
    /// integrality check while no variable exceeds `branch_tol`; the engine
    /// then accepts the rounded point. Tightening either value changes the
    /// branching-variable choice and convergence behavior.
    pub branch_tol: f64,

    // === Termination ===
    /// Maximum branch depth (None = unlimited).
    ///
    /// Each branch adds one variable bound, so this also caps the
    /// constraint growth per node. When the limit is hit the subtree is
    /// abandoned and the outcome is reported as truncated.
    pub max_depth: Option<usize>,

    // === Output ===
    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N relaxation solves).
    pub log_freq: u64,
}

impl Default for BnbSettings {
    fn default() -> Self {
        Self {
            int_tol: 1e-4,
            branch_tol: 1e-2,
            max_depth: Some(1024),
            verbose: false,
            log_freq: 100,
        }
    }
}

impl BnbSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        let mut s = Self::default();
        s.verbose = true;
        s.log_freq = 1;
        s
    }

    /// Set the maximum branch depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the branch depth limit.
    ///
    /// Unbounded or pathological problems can then recurse indefinitely;
    /// the caller takes responsibility for termination.
    pub fn without_depth_limit(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Set the integer feasibility tolerance.
    pub fn with_int_tol(mut self, tol: f64) -> Self {
        self.int_tol = tol;
        self
    }

    /// Set the branching candidate tolerance.
    pub fn with_branch_tol(mut self, tol: f64) -> Self {
        self.branch_tol = tol;
        self
    }
}
