//! Defined variable analysis.
//!
//! Accumulates, for each program point, the set of variables that have been
//! assigned on some path from the entry. This is the simplest member of the
//! catalog and a useful smoke test for the solver: the transfer function
//! only ever grows its input.

use crate::{
    analysis::{
        framework::{DataFlowAnalysis, Direction},
        lattice::VarSet,
    },
    ir::Instruction,
};

/// Defined variable analysis.
///
/// A variable is *defined* at a point if some path from the entry to that
/// point assigns it. Forward analysis, union merge:
///
/// - `OUT[B]` = `IN[B]` ∪ {destinations assigned in B}
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinedVariables;

impl DataFlowAnalysis for DefinedVariables {
    type Lattice = VarSet;
    const DIRECTION: Direction = Direction::Forward;

    fn init(&self) -> VarSet {
        VarSet::new()
    }

    fn transfer(&self, _block: &str, instrs: &[Instruction], input: &VarSet) -> VarSet {
        let mut out = input.clone();
        for instr in instrs {
            if let Some(dest) = &instr.dest {
                out.insert(dest.clone());
            }
        }
        out
    }
}
