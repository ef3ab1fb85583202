//! Bound-ordered node frontier.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::SearchNode;

/// Entry in the frontier, keyed by relaxation objective and insertion order.
struct QueuedNode {
    node: SearchNode,
    bound: f64,
    seq: u64,
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.bound == other.bound && self.seq == other.seq
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher bound first; equal bounds pop in insertion order.
        self.bound
            .partial_cmp(&other.bound)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority frontier for search nodes, ordered by relaxation objective
/// with a solve-scoped insertion counter breaking ties.
///
/// The engine seeds this with the primed root; the exploration itself is
/// depth-first recursion, so the frontier's main run-time role is carrying
/// the root bound.
pub struct NodeQueue {
    heap: BinaryHeap<QueuedNode>,
    next_seq: u64,
    best_bound: f64,
}

impl Default for NodeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeQueue {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            best_bound: f64::NEG_INFINITY,
        }
    }

    /// Add a node with its relaxation bound.
    pub fn push(&mut self, node: SearchNode, bound: f64) {
        if bound > self.best_bound {
            self.best_bound = bound;
        }
        self.heap.push(QueuedNode {
            node,
            bound,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Remove and return the node with the best bound.
    pub fn pop(&mut self) -> Option<SearchNode> {
        let queued = self.heap.pop()?;
        self.recompute_best_bound();
        Some(queued.node)
    }

    /// Best (highest) bound across queued nodes; negative infinity when
    /// the frontier is empty.
    pub fn best_bound(&self) -> f64 {
        self.best_bound
    }

    /// Check if the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued nodes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    fn recompute_best_bound(&mut self) {
        self.best_bound = self
            .heap
            .iter()
            .map(|q| q.bound)
            .fold(f64::NEG_INFINITY, f64::max);
    }
}
