//! Basic-block formation from a flat instruction stream.
//!
//! A block boundary occurs immediately before any label marker (the marker
//! starts the new block) and immediately after any terminator (the terminator
//! stays with the block it ends). The produced blocks partition the input:
//! concatenating their instructions in order reproduces the original
//! sequence exactly.

use crate::ir::Instruction;

/// An ordered, non-empty run of instructions with no internal control
/// transfer.
///
/// If the first instruction is a label marker, it names the block; naming and
/// marker stripping happen later, in [`crate::cfg::ControlFlowGraph`]. A
/// terminator, if present, is the last instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    instructions: Vec<Instruction>,
}

impl BasicBlock {
    /// Creates a block from its instruction run.
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self {
        BasicBlock { instructions }
    }

    /// The instructions of this block, in program order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The label naming this block, if its first instruction is a marker.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self.instructions.first() {
            Some(first) if first.is_label() => first.label.as_deref(),
            _ => None,
        }
    }

    /// Consumes the block, yielding its instructions.
    #[must_use]
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

/// Splits a function body into basic blocks.
///
/// The sequence is built eagerly; the whole body has to be consumed before
/// successor computation can run anyway, since fallthrough needs program
/// order and the full block set. Empty input yields an empty vector; there
/// are no error conditions.
///
/// # Examples
///
/// ```rust
/// use tacscope::{cfg::form_blocks, Instruction, Literal};
///
/// let body = vec![
///     Instruction::constant("x", Literal::Int(1)),
///     Instruction::jump("next"),
///     Instruction::label("next"),
///     Instruction::ret(),
/// ];
///
/// let blocks = form_blocks(&body);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[1].label(), Some("next"));
/// ```
#[must_use]
pub fn form_blocks(instrs: &[Instruction]) -> Vec<BasicBlock> {
    let mut blocks = Vec::new();
    let mut current: Vec<Instruction> = Vec::new();

    for instr in instrs {
        if instr.op.is_some() {
            current.push(instr.clone());
            if instr.is_terminator() {
                blocks.push(BasicBlock::new(std::mem::take(&mut current)));
            }
        } else {
            // A label marker starts a new block.
            if !current.is_empty() {
                blocks.push(BasicBlock::new(std::mem::take(&mut current)));
            }
            current.push(instr.clone());
        }
    }

    if !current.is_empty() {
        blocks.push(BasicBlock::new(current));
    }

    blocks
}
