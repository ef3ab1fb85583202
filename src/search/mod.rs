//! Branch-and-bound search tree.

mod engine;
mod node;
mod queue;

pub use engine::{solve_bnb, BranchAndBound, SearchStats};
pub use node::SearchNode;
pub use queue::NodeQueue;
