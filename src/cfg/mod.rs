//! Basic blocks and the control flow graph built from them.
//!
//! The pipeline is two steps: [`form_blocks`] partitions a function body into
//! [`BasicBlock`]s, and [`ControlFlowGraph`] names the blocks, validates
//! their instruction shapes, and derives the successor/predecessor relation
//! (optionally after terminator normalization). Graph-structural queries over
//! the successor relation live in [`crate::graph`]; the dataflow analyses in
//! [`crate::analysis`] consume the normalized graph.
//!
//! # Architecture
//!
//! ```text
//! Function ──form_blocks──▶ Vec<BasicBlock> ──ControlFlowGraph──▶ named blocks + edges
//! ```

mod block;
mod dot;
mod graph;

pub use block::{form_blocks, BasicBlock};
pub use dot::escape_dot;
pub use graph::ControlFlowGraph;
