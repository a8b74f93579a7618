//! Data flow analysis framework and the analysis catalog.
//!
//! This module computes facts that propagate along control flow edges of a
//! [`ControlFlowGraph`](crate::cfg::ControlFlowGraph). It supports both
//! forward and backward analyses using a worklist-based solver.
//!
//! # Architecture
//!
//! The framework is built around three core abstractions:
//!
//! - **Lattice**: the domain of abstract values with a meet operation
//! - **Analysis**: direction, initial value and transfer function
//! - **Solver**: iterates merge and transfer to a fixpoint
//!
//! # Analyses Provided
//!
//! - [`DefinedVariables`]: variables assigned on some path from the entry
//! - [`LiveVariables`]: variables that may still be read ahead
//! - [`ConstantPropagation`]: per-variable constant tracking
//! - [`ReachingDefinitions`]: definition sites that may still be current
//! - [`AvailableExpressions`]: expressions computed on every incoming path
//!
//! [`AnalysisKind`] exposes the same five under their catalog names for
//! name-driven callers.
//!
//! # Example
//!
//! ```rust
//! use tacscope::analysis::{DataFlowSolver, LiveVariables};
//! use tacscope::cfg::ControlFlowGraph;
//! use tacscope::ir::Program;
//!
//! # fn main() -> tacscope::Result<()> {
//! let program = Program::from_json_str(
//!     r#"{"functions": [{"name": "main", "instrs": [
//!         {"op": "const", "dest": "x", "value": 4},
//!         {"op": "print", "args": ["x"]}
//!     ]}]}"#,
//! )?;
//!
//! let cfg = ControlFlowGraph::from_function(&program.functions[0])?;
//! let results = DataFlowSolver::new(LiveVariables).solve(&cfg);
//!
//! // x is computed and consumed inside the single block.
//! assert_eq!(results.in_state("b0").map(ToString::to_string), Some("∅".into()));
//! # Ok(())
//! # }
//! ```

mod available;
mod catalog;
mod constprop;
mod defined;
mod framework;
mod lattice;
mod liveness;
mod reaching;
mod solver;

// Re-export primary types
pub use available::{AvailableExpressions, Expr, ExprSet, COMMUTATIVE};
pub use catalog::{AnalysisFacts, AnalysisKind};
pub use constprop::{ConstMap, ConstValue, ConstantPropagation};
pub use defined::DefinedVariables;
pub use framework::{AnalysisResults, DataFlowAnalysis, Direction};
pub use lattice::{MeetSemiLattice, VarSet};
pub use liveness::LiveVariables;
pub use reaching::{DefScheme, DefSet, Definition, ReachingDefinitions};
pub use solver::DataFlowSolver;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cfg::ControlFlowGraph,
        ir::{Function, Instruction, Literal},
    };

    /// Helper to build a CFG from a raw instruction stream.
    fn build_cfg(instrs: Vec<Instruction>) -> ControlFlowGraph {
        let func = Function::new("main", instrs);
        ControlFlowGraph::from_function(&func).expect("CFG construction failed")
    }

    /// A diamond: entry branches to two arms that rejoin at the bottom.
    fn diamond(then_def: Instruction, else_def: Instruction) -> ControlFlowGraph {
        build_cfg(vec![
            Instruction::label("top"),
            Instruction::constant("c", Literal::Bool(true)),
            Instruction::branch("c", "then", "else"),
            Instruction::label("then"),
            then_def,
            Instruction::jump("join"),
            Instruction::label("else"),
            else_def,
            Instruction::jump("join"),
            Instruction::label("join"),
            Instruction::ret(),
        ])
    }

    #[test]
    fn test_defined_diamond_union() {
        let cfg = diamond(
            Instruction::constant("a", Literal::Int(1)),
            Instruction::constant("b", Literal::Int(2)),
        );
        let results = DataFlowSolver::new(DefinedVariables).solve(&cfg);

        // Either arm may have run, so both definitions reach the join.
        let join_in = results.in_state("join").unwrap();
        assert!(join_in.contains("a"));
        assert!(join_in.contains("b"));
        assert!(join_in.contains("c"));
    }

    #[test]
    fn test_reaching_diamond_keeps_both_sites() {
        let cfg = diamond(
            Instruction::constant("x", Literal::Int(1)),
            Instruction::constant("x", Literal::Int(2)),
        );
        let results =
            DataFlowSolver::new(ReachingDefinitions::with_scheme(DefScheme::Qualified)).solve(&cfg);

        let join_in = results.in_state("join").unwrap();
        assert!(join_in.contains(&Definition::new("x", "then.0")));
        assert!(join_in.contains(&Definition::new("x", "else.0")));
    }

    #[test]
    fn test_cprop_diamond_disagreement() {
        let cfg = diamond(
            Instruction::constant("x", Literal::Int(1)),
            Instruction::constant("x", Literal::Int(2)),
        );
        let results = DataFlowSolver::new(ConstantPropagation).solve(&cfg);

        let join_in = results.in_state("join").unwrap();
        assert_eq!(join_in.get("x"), Some(&ConstValue::Unknown));
        assert_eq!(
            join_in.get("c"),
            Some(&ConstValue::Known(Literal::Bool(true)))
        );
    }

    #[test]
    fn test_available_diamond_intersection() {
        // Both arms compute add(x, y); only one also computes mul(x, y).
        let cfg = build_cfg(vec![
            Instruction::label("top"),
            Instruction::branch("c", "then", "else"),
            Instruction::label("then"),
            Instruction::compute("add", "t1", &["x", "y"]),
            Instruction::compute("mul", "t2", &["x", "y"]),
            Instruction::jump("join"),
            Instruction::label("else"),
            Instruction::compute("add", "t3", &["y", "x"]),
            Instruction::jump("join"),
            Instruction::label("join"),
            Instruction::ret(),
        ]);
        let results = DataFlowSolver::new(AvailableExpressions).solve(&cfg);

        let join_in = results.in_state("join").unwrap();
        assert_eq!(join_in.to_string(), "add(x, y)");
    }

    #[test]
    fn test_available_single_predecessor_is_identity() {
        let cfg = build_cfg(vec![
            Instruction::label("first"),
            Instruction::compute("sub", "d", &["x", "y"]),
            Instruction::label("second"),
            Instruction::ret(),
        ]);
        let results = DataFlowSolver::new(AvailableExpressions).solve(&cfg);

        assert_eq!(
            results.in_state("second"),
            results.out_state("first"),
        );
        assert_eq!(results.in_state("second").unwrap().to_string(), "sub(x, y)");
    }

    #[test]
    fn test_live_variables_through_a_loop() {
        // i is carried around the loop: incremented in the body, tested in
        // the header, printed at the exit. It must be live on the back edge.
        let cfg = build_cfg(vec![
            Instruction::label("entry"),
            Instruction::constant("i", Literal::Int(0)),
            Instruction::label("header"),
            Instruction::compute("lt", "cond", &["i", "n"]),
            Instruction::branch("cond", "body", "done"),
            Instruction::label("body"),
            Instruction::compute("add", "i", &["i", "one"]),
            Instruction::jump("header"),
            Instruction::label("done"),
            Instruction::effect("print", &["i"]),
            Instruction::ret(),
        ]);
        let results = DataFlowSolver::new(LiveVariables).solve(&cfg);

        assert!(results.out_state("body").unwrap().contains("i"));
        assert!(results.in_state("header").unwrap().contains("i"));
        assert!(results.in_state("header").unwrap().contains("n"));
        // After the final print nothing is live.
        assert!(results.out_state("done").unwrap().is_empty());
    }
}
