//! Data flow analysis framework trait and direction.
//!
//! This module defines the core abstraction for data flow analyses. Any
//! specific analysis (defined variables, liveness, constant propagation,
//! reaching definitions, available expressions) implements the
//! [`DataFlowAnalysis`] trait to work with the solver.

use std::collections::BTreeMap;

use crate::{analysis::lattice::MeetSemiLattice, ir::Instruction};

/// Direction of data flow analysis.
///
/// The direction determines how information propagates through the CFG:
/// which neighbors feed a block's input and which neighbors are re-queued
/// when its result changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Information flows forward, from entry to exit.
    ///
    /// A block's input is the meet of its predecessors' outputs.
    ///
    /// Examples: reaching definitions, available expressions, constant
    /// propagation.
    Forward,

    /// Information flows backward, from exit to entry.
    ///
    /// A block's output is the meet of its successors' inputs.
    ///
    /// Examples: live variables.
    Backward,
}

/// A data flow analysis over basic blocks.
///
/// Implementations provide the lattice, the initial value and the transfer
/// function; the solver handles iteration to a fixpoint.
///
/// # Transfer Functions
///
/// The transfer function describes how flowing through a basic block
/// transforms the abstract state.
///
/// For forward analyses: `out[B] = transfer(B, in[B])`
/// For backward analyses: `in[B] = transfer(B, out[B])`
///
/// # Example
///
/// ```rust,ignore
/// use tacscope::analysis::{DataFlowAnalysis, Direction, VarSet};
///
/// struct WrittenAnywhere;
///
/// impl DataFlowAnalysis for WrittenAnywhere {
///     type Lattice = VarSet;
///     const DIRECTION: Direction = Direction::Forward;
///
///     fn init(&self) -> VarSet {
///         VarSet::new()
///     }
///
///     fn transfer(&self, _block: &str, instrs: &[Instruction], input: &VarSet) -> VarSet {
///         let mut out = input.clone();
///         for instr in instrs {
///             if let Some(dest) = &instr.dest {
///                 out.insert(dest.clone());
///             }
///         }
///         out
///     }
/// }
/// ```
pub trait DataFlowAnalysis {
    /// The lattice type for this analysis.
    ///
    /// This must implement [`MeetSemiLattice`] to support combining values
    /// at control flow merge points.
    type Lattice: MeetSemiLattice;

    /// The direction of this analysis.
    const DIRECTION: Direction;

    /// Returns the initial lattice value.
    ///
    /// Used both for the boundary block's input (the entry for forward
    /// analyses, the exit for backward ones) and to seed every block's
    /// transfer result before iteration begins.
    fn init(&self) -> Self::Lattice;

    /// Computes the transfer function for a basic block.
    ///
    /// # Arguments
    ///
    /// * `block` - The name of the block being processed
    /// * `instrs` - The block's instructions, in program order
    /// * `input` - The state flowing into (forward) or out of (backward) the block
    ///
    /// # Returns
    ///
    /// The abstract state after flowing through the block.
    fn transfer(&self, block: &str, instrs: &[Instruction], input: &Self::Lattice)
        -> Self::Lattice;
}

/// Results of a data flow analysis.
///
/// Holds the fixpoint state at every block boundary, keyed by block name.
/// Regardless of the direction the solver actually ran, `in_states` is the
/// state *before* each block in execution order and `out_states` the state
/// *after* it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResults<L> {
    /// Input state for each block (before the transfer function).
    pub in_states: BTreeMap<String, L>,
    /// Output state for each block (after the transfer function).
    pub out_states: BTreeMap<String, L>,
    /// Number of block evaluations the solver performed.
    pub iterations: usize,
}

impl<L> AnalysisResults<L> {
    /// Creates new analysis results from the given state maps.
    #[must_use]
    pub fn new(
        in_states: BTreeMap<String, L>,
        out_states: BTreeMap<String, L>,
        iterations: usize,
    ) -> Self {
        Self {
            in_states,
            out_states,
            iterations,
        }
    }

    /// Returns the input state for a block, or `None` for an unknown name.
    #[must_use]
    pub fn in_state(&self, block: &str) -> Option<&L> {
        self.in_states.get(block)
    }

    /// Returns the output state for a block, or `None` for an unknown name.
    #[must_use]
    pub fn out_state(&self, block: &str) -> Option<&L> {
        self.out_states.get(block)
    }

    /// Returns the number of blocks covered by the results.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.in_states.len()
    }
}
