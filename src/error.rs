//! Error types for the branch-and-bound layer.

use thiserror::Error;

/// Errors that can occur while setting up a search.
///
/// The search itself never fails: infeasible or numerically broken
/// relaxations are absorbed node-locally and the engine keeps returning
/// a best-known result. Only problem construction is fallible.
#[derive(Error, Debug)]
pub enum BnbError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}

/// Result type for branch-and-bound operations.
pub type BnbResult<T> = Result<T, BnbError>;
