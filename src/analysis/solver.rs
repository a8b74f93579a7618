//! Worklist-based data flow solver.
//!
//! This module provides the iterative solver that computes fixpoints for
//! data flow analyses over a [`ControlFlowGraph`].
//!
//! # Algorithm
//!
//! 1. Initialize every block's input and output to the analysis init value
//! 2. Seed the worklist with all block names in program order
//! 3. While the worklist is non-empty:
//!    a. Remove the head block
//!    b. Compute its input as the meet of its in-edge neighbors' outputs
//!       (a block with no in-edge neighbors takes the init value)
//!    c. Apply the transfer function to get the output
//!    d. If the output changed, enqueue every out-edge neighbor
//!
//! For a forward analysis the in-edge neighbors are the predecessors and
//! changes propagate to successors; a backward analysis swaps the roles and
//! the solver swaps the state maps back before returning, so results are
//! always oriented in execution order.
//!
//! # Termination
//!
//! The queue is a plain FIFO without deduplication, so a block can be
//! pending several times at once. Termination rests on the lattice having
//! finite height and the merge and transfer functions being monotone; the
//! solver enforces neither and runs no iteration cap.

use std::collections::{BTreeMap, VecDeque};

use crate::{
    analysis::{
        framework::{AnalysisResults, DataFlowAnalysis, Direction},
        lattice::MeetSemiLattice,
    },
    cfg::ControlFlowGraph,
};

/// Worklist-based data flow solver.
///
/// Computes fixpoints for data flow analyses using an iterative worklist
/// algorithm. Supports both forward and backward analyses.
///
/// # Usage
///
/// ```rust,ignore
/// use tacscope::analysis::{DataFlowSolver, LiveVariables};
///
/// let solver = DataFlowSolver::new(LiveVariables);
/// let results = solver.solve(&cfg);
///
/// let live_at_entry = results.in_state("b0");
/// ```
pub struct DataFlowSolver<A: DataFlowAnalysis> {
    /// The analysis being solved.
    analysis: A,
    /// Input state for each block.
    in_states: BTreeMap<String, A::Lattice>,
    /// Output state for each block.
    out_states: BTreeMap<String, A::Lattice>,
    /// Worklist of blocks to process.
    worklist: VecDeque<String>,
    /// Number of block evaluations performed.
    iterations: usize,
}

impl<A: DataFlowAnalysis> DataFlowSolver<A> {
    /// Creates a new solver for the given analysis.
    #[must_use]
    pub fn new(analysis: A) -> Self {
        Self {
            analysis,
            in_states: BTreeMap::new(),
            out_states: BTreeMap::new(),
            worklist: VecDeque::new(),
            iterations: 0,
        }
    }

    /// Solves the data flow analysis to a fixpoint.
    ///
    /// Returns the analysis results containing input and output states for
    /// each basic block, oriented in execution order regardless of the
    /// analysis direction.
    pub fn solve(mut self, cfg: &ControlFlowGraph) -> AnalysisResults<A::Lattice> {
        if cfg.is_empty() {
            return AnalysisResults::new(BTreeMap::new(), BTreeMap::new(), 0);
        }

        self.initialize(cfg);
        self.iterate(cfg);

        match A::DIRECTION {
            Direction::Forward => {
                AnalysisResults::new(self.in_states, self.out_states, self.iterations)
            }
            Direction::Backward => {
                AnalysisResults::new(self.out_states, self.in_states, self.iterations)
            }
        }
    }

    /// Initializes the state maps and seeds the worklist in program order.
    fn initialize(&mut self, cfg: &ControlFlowGraph) {
        for name in cfg.block_names() {
            self.in_states.insert(name.clone(), self.analysis.init());
            self.out_states.insert(name.clone(), self.analysis.init());
            self.worklist.push_back(name.clone());
        }
    }

    /// Main iteration loop.
    fn iterate(&mut self, cfg: &ControlFlowGraph) {
        while let Some(block) = self.worklist.pop_front() {
            self.iterations += 1;

            if self.process(&block, cfg) {
                self.enqueue_affected(&block, cfg);
            }
        }
    }

    /// Processes one block.
    ///
    /// Recomputes the block's input from its in-edge neighbors, applies the
    /// transfer function and returns `true` if the output changed.
    fn process(&mut self, block: &str, cfg: &ControlFlowGraph) -> bool {
        let in_edges = match A::DIRECTION {
            Direction::Forward => cfg.predecessors(block),
            Direction::Backward => cfg.successors(block),
        };

        // Meet over all in-edge neighbor outputs; init when there are none.
        let mut merged: Option<A::Lattice> = None;
        for neighbor in in_edges {
            if let Some(neighbor_out) = self.out_states.get(neighbor.as_str()) {
                merged = Some(match merged {
                    None => neighbor_out.clone(),
                    Some(acc) => acc.meet(neighbor_out),
                });
            }
        }
        let input = merged.unwrap_or_else(|| self.analysis.init());

        self.in_states.insert(block.to_string(), input.clone());

        let instrs = cfg.block(block).unwrap_or(&[]);
        let output = self.analysis.transfer(block, instrs, &input);

        let changed = self.out_states.get(block) != Some(&output);
        if changed {
            self.out_states.insert(block.to_string(), output);
        }
        changed
    }

    /// Queues every out-edge neighbor of a changed block.
    ///
    /// The queue is not deduplicated; a block may be pending more than once.
    fn enqueue_affected(&mut self, block: &str, cfg: &ControlFlowGraph) {
        let out_edges = match A::DIRECTION {
            Direction::Forward => cfg.successors(block),
            Direction::Backward => cfg.predecessors(block),
        };

        for neighbor in out_edges {
            self.worklist.push_back(neighbor.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::{DefinedVariables, LiveVariables, VarSet},
        ir::{Function, Instruction, Literal},
    };

    fn cfg_of(instrs: Vec<Instruction>) -> ControlFlowGraph {
        let func = Function::new("main", instrs);
        ControlFlowGraph::from_function(&func).unwrap()
    }

    fn vars(names: &[&str]) -> VarSet {
        names.iter().copied().collect()
    }

    #[test]
    fn test_empty_function_yields_empty_results() {
        let cfg = cfg_of(vec![]);
        let results = DataFlowSolver::new(DefinedVariables).solve(&cfg);

        assert_eq!(results.block_count(), 0);
        assert_eq!(results.iterations, 0);
    }

    #[test]
    fn test_straight_line_evaluation_count() {
        // Three fallthrough blocks, each defining one variable. The first
        // evaluation of every block changes its output and requeues its
        // successor, so the chain is evaluated 3 + 2 extra times before the
        // queue drains. Pins the FIFO-without-deduplication behavior.
        let cfg = cfg_of(vec![
            Instruction::label("head"),
            Instruction::constant("x", Literal::Int(1)),
            Instruction::label("mid"),
            Instruction::constant("y", Literal::Int(2)),
            Instruction::label("tail"),
            Instruction::constant("z", Literal::Int(3)),
        ]);
        let results = DataFlowSolver::new(DefinedVariables).solve(&cfg);

        assert_eq!(results.iterations, 5);
        assert_eq!(results.out_state("tail"), Some(&vars(&["x", "y", "z"])));
    }

    #[test]
    fn test_backward_results_oriented_forward() {
        // a defines x, b prints it. Liveness runs backward but the returned
        // maps still read in execution order: x is live out of a and into b.
        let cfg = cfg_of(vec![
            Instruction::label("a"),
            Instruction::constant("x", Literal::Int(1)),
            Instruction::label("b"),
            Instruction::effect("print", &["x"]),
        ]);
        let results = DataFlowSolver::new(LiveVariables).solve(&cfg);

        assert_eq!(results.in_state("a"), Some(&VarSet::new()));
        assert_eq!(results.out_state("a"), Some(&vars(&["x"])));
        assert_eq!(results.in_state("b"), Some(&vars(&["x"])));
        assert_eq!(results.out_state("b"), Some(&VarSet::new()));
    }

    #[test]
    fn test_loop_reaches_fixpoint() {
        // header -> body -> header with an exit via br. Defined variables
        // must stabilize with the loop-carried definitions included.
        let cfg = cfg_of(vec![
            Instruction::label("entry"),
            Instruction::constant("i", Literal::Int(0)),
            Instruction::label("header"),
            Instruction::branch("c", "body", "done"),
            Instruction::label("body"),
            Instruction::constant("t", Literal::Int(1)),
            Instruction::jump("header"),
            Instruction::label("done"),
            Instruction::ret(),
        ]);
        let results = DataFlowSolver::new(DefinedVariables).solve(&cfg);

        assert_eq!(results.in_state("header"), Some(&vars(&["i", "t"])));
        assert_eq!(results.in_state("done"), Some(&vars(&["i", "t"])));
    }
}
