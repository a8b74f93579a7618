//! Live variable analysis.
//!
//! A variable is *live* at a program point if some path from that point
//! reaches a read of the variable without passing through a redefinition.
//! Liveness is the classic backward analysis: facts flow from uses back
//! toward definitions.
//!
//! # Algorithm
//!
//! - `USE[B]` = variables read in B before any local definition
//! - `DEF[B]` = variables assigned in B
//! - `OUT[B]` = ∪{IN[S] | S is a successor of B}
//! - `IN[B]` = `USE[B]` ∪ (`OUT[B]` − `DEF[B]`)

use crate::{
    analysis::{
        framework::{DataFlowAnalysis, Direction},
        lattice::VarSet,
    },
    ir::Instruction,
};

/// Live variable analysis.
///
/// Computes which variables may still be read on some path from each
/// program point. Backward analysis, union merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveVariables;

impl DataFlowAnalysis for LiveVariables {
    type Lattice = VarSet;
    const DIRECTION: Direction = Direction::Backward;

    fn init(&self) -> VarSet {
        VarSet::new()
    }

    fn transfer(&self, _block: &str, instrs: &[Instruction], output: &VarSet) -> VarSet {
        let mut uses = VarSet::new();
        let mut defs = VarSet::new();
        for instr in instrs {
            for arg in &instr.args {
                if !defs.contains(arg) {
                    uses.insert(arg.clone());
                }
            }
            if let Some(dest) = &instr.dest {
                defs.insert(dest.clone());
            }
        }

        // IN = USE ∪ (OUT − DEF)
        let mut result = uses;
        for var in output.iter() {
            if !defs.contains(var) {
                result.insert(var);
            }
        }
        result
    }
}
