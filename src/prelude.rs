//! # tacscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the tacscope library. Import this module to get quick access to the essential
//! types for program loading, control flow construction and dataflow analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all tacscope operations
pub use crate::Error;

/// The result type used throughout tacscope
pub use crate::Result;

// ================================================================================================
// Program Model
// ================================================================================================

/// Program text decoding and the instruction model
pub use crate::ir::{Function, Instruction, Literal, Program};

/// Operation codes that transfer control and end their basic block
pub use crate::ir::TERMINATORS;

// ================================================================================================
// Control Flow
// ================================================================================================

/// Basic block formation over a function body
pub use crate::cfg::{form_blocks, BasicBlock};

/// The control flow graph and its Graphviz label escape helper
pub use crate::cfg::{escape_dot, ControlFlowGraph};

// ================================================================================================
// Graph Queries
// ================================================================================================

/// The successor-relation capability every structural query runs against
pub use crate::graph::FlowGraph;

/// Traversal orders and breadth-first path lengths
pub use crate::graph::{path_lengths, postorder, reverse_postorder};

/// Loop structure queries
pub use crate::graph::{back_edges, dominators, is_reducible, is_reducible_by_dominance};

// ================================================================================================
// Analysis Framework
// ================================================================================================

/// The analysis trait, its lattice bound and the worklist solver
pub use crate::analysis::{
    AnalysisResults, DataFlowAnalysis, DataFlowSolver, Direction, MeetSemiLattice,
};

/// The textual analysis catalog and its render-ready results
pub use crate::analysis::{AnalysisFacts, AnalysisKind};

// ================================================================================================
// Stock Analyses
// ================================================================================================

/// The five stock analyses
pub use crate::analysis::{
    AvailableExpressions, ConstantPropagation, DefinedVariables, LiveVariables,
    ReachingDefinitions,
};

/// Fact domains used by the stock analyses
pub use crate::analysis::{
    ConstMap, ConstValue, DefScheme, DefSet, Definition, Expr, ExprSet, VarSet,
};
