// Copyright 2025 The tacscope authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # tacscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/tacscope.svg)](https://crates.io/crates/tacscope)
//! [![Documentation](https://docs.rs/tacscope/badge.svg)](https://docs.rs/tacscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/tacscope/tacscope/blob/main/LICENSE)
//!
//! A compact, cross-platform framework for classic dataflow analysis over three-address code.
//! Built in pure Rust, `tacscope` decodes JSON program text into a flat instruction model,
//! partitions function bodies into basic blocks and control flow graphs, and drives forward
//! and backward analyses to a fixed point with a worklist engine.
//!
//! ## Features
//!
//! - **📦 Simple program model** - Flat JSON instruction lists decode directly into typed records
//! - **🔍 Five classic analyses** - Defined variables, live variables, constant propagation,
//!   reaching definitions and available expressions, ready to run by name
//! - **⚡ Worklist fixed-point solver** - One direction-aware engine shared by every analysis
//! - **🔧 Control flow toolkit** - Block formation, terminator normalization and Graphviz export
//! - **📊 Graph queries** - Shortest path lengths, reverse postorder, back edges, dominator sets
//!   and two reducibility tests
//! - **🧩 Extensible architecture** - Implementing one trait is enough to plug in a new analysis
//! - **🛡️ Deterministic output** - Ordered state maps and sorted fact rendering, run after run
//!
//! ## Quick Start
//!
//! Add `tacscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tacscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use tacscope::prelude::*;
//!
//! let text = r#"{"functions": [{"name": "main", "instrs": [
//!     {"op": "const", "dest": "x", "value": 4},
//!     {"op": "const", "dest": "y", "value": 2},
//!     {"op": "add", "dest": "sum", "args": ["x", "y"]},
//!     {"op": "print", "args": ["sum"]}
//! ]}]}"#;
//!
//! let program = Program::from_json_str(text)?;
//! let cfg = ControlFlowGraph::from_function(&program.functions[0])?;
//!
//! let facts = AnalysisKind::Live.run(&cfg);
//! println!("live into b0: {}", facts.in_display("b0").unwrap_or_default());
//! # Ok::<(), tacscope::Error>(())
//! ```
//!
//! ### Basic Usage
//!
//! ```rust
//! use tacscope::{AnalysisKind, ControlFlowGraph, Program};
//!
//! let text = r#"{"functions": [{"name": "main", "instrs": [
//!     {"op": "const", "dest": "cond", "value": true},
//!     {"op": "br", "args": ["cond"], "labels": ["left", "right"]},
//!     {"label": "left"},
//!     {"op": "const", "dest": "a", "value": 1},
//!     {"op": "jmp", "labels": ["join"]},
//!     {"label": "right"},
//!     {"op": "const", "dest": "a", "value": 2},
//!     {"label": "join"},
//!     {"op": "print", "args": ["a"]}
//! ]}]}"#;
//!
//! let program = Program::from_json_str(text)?;
//!
//! for function in &program.functions {
//!     let cfg = ControlFlowGraph::from_function(function)?;
//!     let facts = AnalysisKind::Defined.run(&cfg);
//!
//!     for name in cfg.block_names() {
//!         println!("{name}:");
//!         println!("  in:  {}", facts.in_display(name).unwrap_or_default());
//!         println!("  out: {}", facts.out_display(name).unwrap_or_default());
//!     }
//! }
//! # Ok::<(), tacscope::Error>(())
//! ```
//!
//! ### Control Flow Example
//!
//! The [`cfg`] module builds named basic blocks and their successor/predecessor relation, and
//! the [`graph`] module answers structural questions about the result. See the module
//! documentation for detailed usage examples.
//!
//! ## Architecture
//!
//! `tacscope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`ir`] - The three-address instruction model and its JSON boundary
//! - [`cfg`] - Basic block formation and control flow graph construction
//! - [`graph`] - Traversal orders, back edges, dominators and reducibility
//! - [`analysis`] - The dataflow framework, solver and analysis catalog
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Program Model
//!
//! A [`Program`] is an ordered list of functions, and a function body is a flat list of
//! [`Instruction`] records in which every field is optional. [`cfg::form_blocks`] partitions
//! a body at labels and terminators, and [`ControlFlowGraph`] names the blocks and derives
//! the edge relation, optionally normalizing every block to end in an explicit terminator.
//!
//! ### Analysis Engine
//!
//! The [`analysis`] module provides:
//!
//! - **Lattices**: Fact domains with a pairwise meet, from plain variable sets to constant maps
//! - **Transfer functions**: Per-block fact transformers defined by each analysis
//! - **The solver**: A direction-aware worklist loop that iterates to a fixed point
//! - **The catalog**: [`AnalysisKind`] resolves textual names and runs the chosen analysis
//!
//! ## Advanced Usage
//!
//! ### Custom Analyses
//!
//! Anything with a lattice and a transfer function can ride the solver:
//!
//! ```rust
//! use tacscope::analysis::{DataFlowAnalysis, DataFlowSolver, Direction, VarSet};
//! use tacscope::{ControlFlowGraph, Instruction, Program};
//!
//! /// Collects variables written by constant definitions.
//! struct ConstWrites;
//!
//! impl DataFlowAnalysis for ConstWrites {
//!     type Lattice = VarSet;
//!     const DIRECTION: Direction = Direction::Forward;
//!
//!     fn init(&self) -> VarSet {
//!         VarSet::new()
//!     }
//!
//!     fn transfer(&self, _block: &str, instrs: &[Instruction], input: &VarSet) -> VarSet {
//!         let mut output = input.clone();
//!         for instr in instrs.iter().filter(|i| i.is_const()) {
//!             if let Some(dest) = &instr.dest {
//!                 output.insert(dest.clone());
//!             }
//!         }
//!         output
//!     }
//! }
//!
//! let text = r#"{"functions": [{"name": "main", "instrs": [
//!     {"op": "const", "dest": "x", "value": 4},
//!     {"op": "add", "dest": "y", "args": ["x", "x"]}
//! ]}]}"#;
//! let program = Program::from_json_str(text)?;
//! let cfg = ControlFlowGraph::from_function(&program.functions[0])?;
//!
//! let results = DataFlowSolver::new(ConstWrites).solve(&cfg);
//! assert_eq!(results.out_state("b0").map(ToString::to_string), Some("x".to_string()));
//! # Ok::<(), tacscope::Error>(())
//! ```
//!
//! ## Input Format
//!
//! The JSON program form follows the [Bril](https://capra.cs.cornell.edu/bril/) textbook
//! encoding: a `functions` array, each function carrying a flat `instrs` array whose entries
//! hold whichever of `op`, `dest`, `args`, `labels`, `funcs`, `value` and `label` their
//! operation uses. Unknown fields are accepted and ignored, so text produced by richer
//! toolchains (type annotations, positions) still decodes.
//!
//! ### References
//!
//! - [Bril](https://capra.cs.cornell.edu/bril/) - The Big Red Intermediate Language and its JSON encoding
//! - *Compilers: Principles, Techniques, and Tools* - The classic treatment of iterative dataflow analysis
//!
//! ## Performance
//!
//! The solver queues blocks in program order and re-queues only the neighbors of a block whose
//! output actually changed, so straight-line code settles in a single pass and loops iterate
//! only until their facts stop moving:
//!
//! - **Explicit stacks and queues** - No recursion in traversals or the solver
//! - **Ordered state maps** - `BTreeMap` keyed by block name, no hash-order artifacts
//! - **Sorted fact rendering** - Printed sets and maps are stable across runs
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with comprehensive error information:
//!
//! ```rust
//! use tacscope::{Error, Program};
//!
//! match Program::from_json_str(r#"{"functions": []}"#) {
//!     Ok(program) => println!("Loaded {} functions", program.functions.len()),
//!     Err(Error::JsonError(e)) => println!("Invalid program text: {e}"),
//!     Err(Error::MalformedInstruction { message, .. }) => println!("Malformed: {message}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! The crate includes fuzzing support for robustness against arbitrary program text:
//!
//! ### Fuzzing
//!
//! ```bash
//! # Install fuzzing tools
//! cargo install cargo-fuzz
//!
//! # Run fuzzer
//! cargo +nightly fuzz run program --release
//!
//! # Multi-core fuzzing
//! cargo +nightly fuzz run program --release -- -jobs=4 -fork=1
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench  # Solver throughput on synthetic programs
//! ```
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the tacscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use tacscope::prelude::*;
///
/// let program = Program::from_json_str(
///     r#"{"functions": [{"name": "main", "instrs": [{"op": "ret"}]}]}"#,
/// )?;
/// let cfg = ControlFlowGraph::from_function(&program.functions[0])?;
/// assert_eq!(cfg.block_count(), 1);
/// # Ok::<(), tacscope::Error>(())
/// ```
pub mod prelude;

/// Dataflow analyses and the worklist engine that drives them.
///
/// This module implements the complete analysis layer: fact lattices, the
/// analysis trait, the fixed-point solver, the five stock analyses and the
/// textual catalog over them.
///
/// # Key Components
///
/// ## Framework
/// - [`analysis::MeetSemiLattice`] - Fact domains with a pairwise meet
/// - [`analysis::DataFlowAnalysis`] - Direction, initial value and transfer function
/// - [`analysis::DataFlowSolver`] - The worklist loop, shared by every analysis
/// - [`analysis::AnalysisResults`] - Per-block input/output facts after solving
///
/// ## Stock Analyses
/// - [`analysis::DefinedVariables`] - Which variables have a definition on some path
/// - [`analysis::LiveVariables`] - Which variables may still be read
/// - [`analysis::ConstantPropagation`] - Which variables hold a single known constant
/// - [`analysis::ReachingDefinitions`] - Which definition sites still reach a point
/// - [`analysis::AvailableExpressions`] - Which computed expressions remain valid
///
/// ## Catalog
/// - [`analysis::AnalysisKind`] - Parse an analysis name and run it
/// - [`analysis::AnalysisFacts`] - Results across heterogeneous lattices, render-ready
///
/// # Examples
///
/// ```rust
/// use tacscope::{AnalysisKind, ControlFlowGraph, Program};
///
/// let text = r#"{"functions": [{"name": "main", "instrs": [
///     {"op": "const", "dest": "x", "value": 1},
///     {"op": "print", "args": ["x"]}
/// ]}]}"#;
/// let program = Program::from_json_str(text)?;
/// let cfg = ControlFlowGraph::from_function(&program.functions[0])?;
///
/// let kind = AnalysisKind::parse("cprop")?;
/// let facts = kind.run(&cfg);
/// assert_eq!(facts.out_display("b0"), Some("x: 1".to_string()));
/// # Ok::<(), tacscope::Error>(())
/// ```
pub mod analysis;

/// Basic blocks and control flow graphs over the instruction model.
///
/// This module turns a flat function body into structure:
///
/// - [`cfg::form_blocks`] - Partition instructions at labels and terminators
/// - [`cfg::BasicBlock`] - One maximal straight-line run, with its optional label
/// - [`cfg::ControlFlowGraph`] - Named blocks plus the successor/predecessor relation
/// - [`cfg::ControlFlowGraph::to_dot`] - Graphviz rendering of the edge relation
///
/// Construction validates control transfers, so a `jmp` to a label that names
/// no block is rejected up front rather than surfacing as a phantom edge. The
/// `_normalized` constructors additionally rewrite every block to end in an
/// explicit terminator, which the dataflow layer relies on.
///
/// # Examples
///
/// ```rust
/// use tacscope::{ControlFlowGraph, Program};
///
/// let text = r#"{"functions": [{"name": "main", "instrs": [
///     {"label": "top"},
///     {"op": "br", "args": ["c"], "labels": ["top", "done"]},
///     {"label": "done"},
///     {"op": "ret"}
/// ]}]}"#;
/// let program = Program::from_json_str(text)?;
/// let cfg = ControlFlowGraph::from_function(&program.functions[0])?;
///
/// assert_eq!(cfg.successors("top"), ["top", "done"]);
/// assert_eq!(cfg.predecessors("done"), ["top"]);
/// # Ok::<(), tacscope::Error>(())
/// ```
pub mod cfg;

/// Structural queries over any successor relation.
///
/// Everything here runs against the [`graph::FlowGraph`] capability rather
/// than a concrete graph type, so the same queries serve
/// [`ControlFlowGraph`] and plain successor maps alike:
///
/// - [`graph::path_lengths`] - Breadth-first shortest path lengths from an entry
/// - [`graph::postorder`] / [`graph::reverse_postorder`] - Depth-first orders
/// - [`graph::back_edges`] - Edges into an ancestor on the depth-first path
/// - [`graph::dominators`] - Iterative dominator sets
/// - [`graph::is_reducible`] / [`graph::is_reducible_by_dominance`] - Loop structure tests
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use tacscope::graph::reverse_postorder;
///
/// let mut succs: HashMap<String, Vec<String>> = HashMap::new();
/// succs.insert("a".into(), vec!["b".into()]);
/// succs.insert("b".into(), vec![]);
///
/// assert_eq!(reverse_postorder(&succs, "a")?, ["a", "b"]);
/// # Ok::<(), tacscope::Error>(())
/// ```
pub mod graph;

/// The three-address program representation consumed by every other layer.
///
/// - [`Program`] / [`Function`] - The containers decoded from JSON
/// - [`Instruction`] - One instruction or label marker, all fields optional
/// - [`Literal`] - Constant values carried by `const` instructions
/// - [`ir::TERMINATORS`] - The operation codes that end a basic block
///
/// # Examples
///
/// ```rust
/// use tacscope::{Instruction, Literal};
///
/// let instr = Instruction::constant("x", Literal::Int(4));
/// assert!(instr.is_const());
/// assert!(!instr.is_terminator());
/// ```
pub mod ir;

/// `tacscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use tacscope::{Program, Result};
///
/// fn load_program(text: &str) -> Result<Program> {
///     Program::from_json_str(text)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `tacscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error information
/// for program decoding, control flow construction and analysis requests.
///
/// # Examples
///
/// ```rust
/// use tacscope::{Error, Program};
///
/// match Program::from_json_str("not a program") {
///     Ok(_) => println!("Loaded"),
///     Err(Error::JsonError(e)) => println!("Invalid program text: {e}"),
///     Err(e) => println!("Error: {e}"),
/// }
/// ```
pub use error::Error;

/// Core program model types, re-exported for convenience.
///
/// See [`ir`] for the full module documentation.
///
/// # Example
///
/// ```rust
/// use tacscope::{Function, Instruction, Literal, Program};
///
/// let function = Function::new(
///     "main",
///     vec![
///         Instruction::constant("x", Literal::Int(4)),
///         Instruction::ret_value("x"),
///     ],
/// );
/// let program = Program { functions: vec![function] };
/// assert_eq!(program.functions[0].instrs.len(), 2);
/// ```
pub use ir::{Function, Instruction, Literal, Program};

/// Main entry point for control flow structure.
///
/// See [`cfg::ControlFlowGraph`] for construction options and graph queries.
///
/// # Example
///
/// ```rust
/// use tacscope::{ControlFlowGraph, Program};
///
/// let program = Program::from_json_str(
///     r#"{"functions": [{"name": "main", "instrs": [{"op": "ret"}]}]}"#,
/// )?;
/// let cfg = ControlFlowGraph::from_function(&program.functions[0])?;
/// assert_eq!(cfg.entry(), Some("b0"));
/// # Ok::<(), tacscope::Error>(())
/// ```
pub use cfg::ControlFlowGraph;

/// The analysis catalog, re-exported for convenience.
///
/// [`AnalysisKind`] resolves textual analysis names and runs the chosen
/// analysis; [`AnalysisFacts`] holds the results in render-ready form.
///
/// # Example
///
/// ```rust
/// use tacscope::AnalysisKind;
///
/// let kind = AnalysisKind::parse("live")?;
/// assert_eq!(kind.to_string(), "live");
/// # Ok::<(), tacscope::Error>(())
/// ```
pub use analysis::{AnalysisFacts, AnalysisKind};
