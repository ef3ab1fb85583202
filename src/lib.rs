//! Branch-and-bound search for mixed-integer programs.
//!
//! This crate implements the search side of mixed-integer optimization:
//! the node representation, floor/ceil branching, depth-first recursive
//! exploration, and best-solution tracking. The continuous relaxations are
//! solved by an external LP/convex optimizer plugged in behind the
//! [`RelaxationSolver`] trait; no relaxation-solving algorithm lives here.
//!
//! Problems are maximization over an ordered variable sequence whose final
//! variable is a continuous objective-helper; every earlier variable is
//! integer-constrained. Failed or infeasible relaxations are absorbed
//! node-locally and the search keeps returning a best-known result.
//!
//! # Example
//!
//! ```ignore
//! use solver_bnb::{solve_bnb, BnbSettings, Constraint, LinExpr, Problem};
//!
//! // max x0 + x1 via helper x2 = x0 + x1
//! // s.t. x0 + 2*x1 <= 4, 4*x0 + 2*x1 <= 12, x0, x1 >= 0 integer
//! let problem = Problem::new(
//!     3,
//!     vec![
//!         Constraint::le(LinExpr::var(0).with_term(1, 2.0), 4.0),
//!         Constraint::le(LinExpr::new().with_term(0, 4.0).with_term(1, 2.0), 12.0),
//!         Constraint::lower_bound(0, 0.0),
//!         Constraint::lower_bound(1, 0.0),
//!         Constraint::eq(LinExpr::var(2).with_term(0, -1.0).with_term(1, -1.0), 0.0),
//!     ],
//!     LinExpr::var(2),
//! )?;
//!
//! let mut lp = MyLpAdapter::new(); // implements RelaxationSolver
//! let outcome = solve_bnb(&problem, &mut lp, &BnbSettings::default())?;
//! println!("objective {} at {:?}", outcome.objective, outcome.values);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod relax;
pub mod search;
pub mod settings;

pub use error::{BnbError, BnbResult};
pub use model::{
    BnbOutcome, Constraint, ConstraintChain, Incumbent, LinExpr, Problem, Relation, SearchStatus,
    NO_INCUMBENT,
};
pub use relax::{RelaxResult, RelaxStatus, Relaxation, RelaxationSolver, Sense};
pub use search::{solve_bnb, BranchAndBound, SearchNode, SearchStats};
pub use settings::BnbSettings;
