//! Structural queries over a successor relation.
//!
//! Everything in this module operates on the successor relation alone,
//! through the [`FlowGraph`] capability: breadth-first distances, postorder
//! and reverse postorder, back-edge detection, dominator sets and the two
//! reducibility tests. [`crate::cfg::ControlFlowGraph`] implements
//! [`FlowGraph`], and so does a plain `HashMap<String, Vec<String>>`, which
//! keeps ad-hoc relations and test fixtures cheap to build.
//!
//! Every query takes an explicit entry node and fails with
//! [`crate::Error::UnknownEntryNode`] when that name is not in the graph;
//! nodes unreachable from the entry simply do not appear in any result.

mod loops;
mod traversal;

use std::collections::HashMap;

pub use loops::{back_edges, dominators, is_reducible, is_reducible_by_dominance};
pub use traversal::{path_lengths, postorder, reverse_postorder};

/// A directed graph seen purely through its successor relation.
///
/// Successor lists are ordered; traversal results depend on that order, so
/// implementations must make it deterministic.
pub trait FlowGraph {
    /// Ordered successor names of `node`; empty for unknown names.
    fn successor_names(&self, node: &str) -> &[String];

    /// Whether `node` is a node of this graph.
    fn contains_node(&self, node: &str) -> bool;
}

impl FlowGraph for HashMap<String, Vec<String>> {
    fn successor_names(&self, node: &str) -> &[String] {
        self.get(node).map_or(&[], Vec::as_slice)
    }

    fn contains_node(&self, node: &str) -> bool {
        self.contains_key(node)
    }
}
