//! Problem and solution data model.

mod linear;
mod problem;
mod solution;

pub use linear::{Constraint, ConstraintChain, LinExpr, Relation};
pub use problem::Problem;
pub use solution::{BnbOutcome, Incumbent, SearchStatus, NO_INCUMBENT};
