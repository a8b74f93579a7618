//! Named basic blocks and the successor relation between them.
//!
//! [`ControlFlowGraph`] is built once from the blocks of a single function
//! and is immutable afterwards: naming, validation, optional terminator
//! normalization and edge computation all happen inside the constructor, so
//! everything downstream (the worklist engine, the graph queries, rendering)
//! can assume a well-formed graph and never fails on structure.
//!
//! # Construction
//!
//! - [`ControlFlowGraph::from_function`] / [`ControlFlowGraph::from_blocks`]
//!   build the raw graph: successor edges use the target labels of a
//!   terminator, and a block whose last instruction does not transfer
//!   control falls through to the next block in program order.
//! - [`ControlFlowGraph::from_function_normalized`] /
//!   [`ControlFlowGraph::from_blocks_normalized`] additionally guarantee
//!   every block ends in an explicit terminator, appending a fallthrough
//!   `jmp` (or a `ret` on the last block) where one is missing. The dataflow
//!   engine runs on the normalized form.
//!
//! # Naming
//!
//! A block whose first instruction is a label marker takes that label as its
//! name, and the marker is stripped from the stored instruction list. Every
//! other block gets the next synthetic name `b{count}` in encounter order.

use std::collections::{HashMap, HashSet};

use crate::{
    cfg::{dot, BasicBlock},
    graph::{self, FlowGraph},
    ir::{Function, Instruction},
    Result,
};

/// The control flow graph of one function.
///
/// Nodes are named blocks in program order; edges are the possible control
/// transfers between them. Every successor name is guaranteed to be a block
/// name, and both the successor and the derived predecessor relation are
/// fixed at construction.
///
/// # Examples
///
/// ```rust
/// use tacscope::{cfg::ControlFlowGraph, Function, Instruction, Literal};
///
/// let func = Function::new(
///     "main",
///     vec![
///         Instruction::constant("cond", Literal::Bool(true)),
///         Instruction::branch("cond", "left", "right"),
///         Instruction::label("left"),
///         Instruction::ret(),
///         Instruction::label("right"),
///         Instruction::ret(),
///     ],
/// );
///
/// let cfg = ControlFlowGraph::from_function(&func)?;
/// assert_eq!(cfg.block_names(), ["b0", "left", "right"]);
/// assert_eq!(cfg.successors("b0"), ["left", "right"]);
/// assert_eq!(cfg.predecessors("right"), ["b0"]);
/// # Ok::<(), tacscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    /// Block names in program order.
    names: Vec<String>,
    /// Block instruction lists, label markers stripped.
    blocks: HashMap<String, Vec<Instruction>>,
    /// Ordered successor names per block.
    successors: HashMap<String, Vec<String>>,
    /// Predecessor names per block, the inverse of `successors`.
    predecessors: HashMap<String, Vec<String>>,
}

impl ControlFlowGraph {
    /// Builds the raw graph of a function.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedInstruction`] if a block name is
    /// duplicated, a label marker appears mid-block, a terminator is not
    /// last in its block, a `jmp`/`br` has no target labels, a `const`
    /// lacks its destination or value, a `call` lacks a callee, or a
    /// control transfer targets a label that names no block.
    pub fn from_function(func: &Function) -> Result<Self> {
        Self::from_blocks(super::form_blocks(&func.instrs))
    }

    /// Builds the graph of a function with terminator normalization applied.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ControlFlowGraph::from_function`].
    pub fn from_function_normalized(func: &Function) -> Result<Self> {
        Self::from_blocks_normalized(super::form_blocks(&func.instrs))
    }

    /// Builds the raw graph from already-formed blocks.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ControlFlowGraph::from_function`].
    pub fn from_blocks(blocks: Vec<BasicBlock>) -> Result<Self> {
        Self::build(blocks, false)
    }

    /// Builds the graph from already-formed blocks, normalizing terminators.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ControlFlowGraph::from_function`].
    pub fn from_blocks_normalized(blocks: Vec<BasicBlock>) -> Result<Self> {
        Self::build(blocks, true)
    }

    fn build(raw: Vec<BasicBlock>, normalize: bool) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        let mut blocks: HashMap<String, Vec<Instruction>> = HashMap::new();

        for block in raw {
            let mut instrs = block.into_instructions();
            let label = match instrs.first() {
                Some(first) if first.is_label() => first.label.clone(),
                _ => None,
            };
            let name = match label {
                Some(label) => {
                    instrs.remove(0);
                    label
                }
                None => format!("b{}", names.len()),
            };

            if blocks.contains_key(&name) {
                return Err(malformed_error!("duplicate block name `{}`", name));
            }
            Self::validate_block(&name, &instrs)?;

            names.push(name.clone());
            blocks.insert(name, instrs);
        }

        if normalize {
            Self::add_terminators(&names, &mut blocks);
        }

        let (successors, predecessors) = Self::compute_edges(&names, &blocks)?;
        Ok(ControlFlowGraph {
            names,
            blocks,
            successors,
            predecessors,
        })
    }

    /// Checks the per-instruction shape rules of one named block.
    fn validate_block(name: &str, instrs: &[Instruction]) -> Result<()> {
        for (index, instr) in instrs.iter().enumerate() {
            if instr.is_label() {
                return Err(malformed_error!(
                    "label marker inside block `{}` at position {}",
                    name,
                    index
                ));
            }
            if instr.is_terminator() && index + 1 != instrs.len() {
                return Err(malformed_error!(
                    "terminator is not the last instruction of block `{}`",
                    name
                ));
            }
            match instr.opcode() {
                Some(op @ ("jmp" | "br")) if instr.labels.is_empty() => {
                    return Err(malformed_error!(
                        "`{}` without target labels in block `{}`",
                        op,
                        name
                    ));
                }
                Some("const") if instr.dest.is_none() || instr.value.is_none() => {
                    return Err(malformed_error!(
                        "`const` without destination or value in block `{}`",
                        name
                    ));
                }
                Some("call") if instr.funcs.is_empty() => {
                    return Err(malformed_error!(
                        "`call` without a callee in block `{}`",
                        name
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Appends an explicit terminator to every block that lacks one: a `jmp`
    /// to the next block in program order, or a `ret` on the last block.
    fn add_terminators(names: &[String], blocks: &mut HashMap<String, Vec<Instruction>>) {
        for (index, name) in names.iter().enumerate() {
            let unterminated = blocks
                .get(name)
                .is_some_and(|block| block.last().is_none_or(|last| !last.is_terminator()));
            if unterminated {
                let terminator = if index + 1 == names.len() {
                    Instruction::ret()
                } else {
                    Instruction::jump(&names[index + 1])
                };
                if let Some(block) = blocks.get_mut(name) {
                    block.push(terminator);
                }
            }
        }
    }

    /// Computes the successor relation and its inverse.
    #[allow(clippy::type_complexity)]
    fn compute_edges(
        names: &[String],
        blocks: &HashMap<String, Vec<Instruction>>,
    ) -> Result<(HashMap<String, Vec<String>>, HashMap<String, Vec<String>>)> {
        let mut successors: HashMap<String, Vec<String>> = HashMap::new();
        let mut predecessors: HashMap<String, Vec<String>> = HashMap::new();
        for name in names {
            successors.insert(name.clone(), Vec::new());
            predecessors.insert(name.clone(), Vec::new());
        }

        for (index, name) in names.iter().enumerate() {
            let last = blocks.get(name).and_then(|block| block.last());
            let targets: Vec<String> = match last.and_then(Instruction::opcode) {
                None => Vec::new(),
                Some("jmp" | "br") => last.map(|instr| instr.labels.clone()).unwrap_or_default(),
                Some("ret") => Vec::new(),
                Some(_) => match names.get(index + 1) {
                    Some(next) => vec![next.clone()],
                    None => Vec::new(),
                },
            };

            for target in &targets {
                if !blocks.contains_key(target) {
                    return Err(malformed_error!(
                        "control transfer from block `{}` to unknown label `{}`",
                        name,
                        target
                    ));
                }
                if let Some(preds) = predecessors.get_mut(target) {
                    preds.push(name.clone());
                }
            }
            successors.insert(name.clone(), targets);
        }

        Ok((successors, predecessors))
    }

    /// Block names in program order.
    #[must_use]
    pub fn block_names(&self) -> &[String] {
        &self.names
    }

    /// The instructions of the named block, label marker stripped.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&[Instruction]> {
        self.blocks.get(name).map(Vec::as_slice)
    }

    /// Iterates blocks as `(name, instructions)` in program order.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &[Instruction])> {
        self.names.iter().filter_map(move |name| {
            self.blocks
                .get(name)
                .map(|block| (name.as_str(), block.as_slice()))
        })
    }

    /// Ordered successor names of a block; empty for unknown names.
    #[must_use]
    pub fn successors(&self, name: &str) -> &[String] {
        self.successors.get(name).map_or(&[], Vec::as_slice)
    }

    /// Predecessor names of a block; empty for unknown names.
    #[must_use]
    pub fn predecessors(&self, name: &str) -> &[String] {
        self.predecessors.get(name).map_or(&[], Vec::as_slice)
    }

    /// Whether `name` names a block of this graph.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// The entry block name (first in program order), if any.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// The exit block name (last in program order), if any.
    #[must_use]
    pub fn exit(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    /// Number of blocks in the graph.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.names.len()
    }

    /// Whether the graph has no blocks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Shortest hop distance from `entry` to every reachable block.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownEntryNode`] if `entry` is not a block.
    pub fn path_lengths(&self, entry: &str) -> Result<HashMap<String, usize>> {
        graph::path_lengths(self, entry)
    }

    /// Reverse postorder of the blocks reachable from `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownEntryNode`] if `entry` is not a block.
    pub fn reverse_postorder(&self, entry: &str) -> Result<Vec<String>> {
        graph::reverse_postorder(self, entry)
    }

    /// Back edges found by depth-first traversal from `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownEntryNode`] if `entry` is not a block.
    pub fn back_edges(&self, entry: &str) -> Result<Vec<(String, String)>> {
        graph::back_edges(self, entry)
    }

    /// The reachability form of the reducibility test.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownEntryNode`] if `entry` is not a block.
    pub fn is_reducible(&self, entry: &str) -> Result<bool> {
        graph::is_reducible(self, entry)
    }

    /// The dominance form of the reducibility test.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownEntryNode`] if `entry` is not a block.
    pub fn is_reducible_by_dominance(&self, entry: &str) -> Result<bool> {
        graph::is_reducible_by_dominance(self, entry)
    }

    /// Dominator sets of the blocks reachable from `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownEntryNode`] if `entry` is not a block.
    pub fn dominators(&self, entry: &str) -> Result<HashMap<String, HashSet<String>>> {
        graph::dominators(self, entry)
    }

    /// Renders the graph in DOT digraph form under the given title.
    #[must_use]
    pub fn to_dot(&self, title: &str) -> String {
        dot::to_dot(self, title)
    }
}

impl FlowGraph for ControlFlowGraph {
    fn successor_names(&self, node: &str) -> &[String] {
        self.successors(node)
    }

    fn contains_node(&self, node: &str) -> bool {
        self.contains(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Literal;

    fn diamond() -> ControlFlowGraph {
        let func = Function::new(
            "diamond",
            vec![
                Instruction::constant("cond", Literal::Bool(true)),
                Instruction::branch("cond", "left", "right"),
                Instruction::label("left"),
                Instruction::constant("x", Literal::Int(1)),
                Instruction::jump("join"),
                Instruction::label("right"),
                Instruction::constant("x", Literal::Int(2)),
                Instruction::jump("join"),
                Instruction::label("join"),
                Instruction::ret(),
            ],
        );
        ControlFlowGraph::from_function(&func).unwrap()
    }

    #[test]
    fn test_diamond_structure() {
        let cfg = diamond();
        assert_eq!(cfg.block_names(), ["b0", "left", "right", "join"]);
        assert_eq!(cfg.successors("b0"), ["left", "right"]);
        assert_eq!(cfg.successors("left"), ["join"]);
        assert_eq!(cfg.successors("join"), Vec::<String>::new());
        assert_eq!(cfg.predecessors("join"), ["left", "right"]);
        assert_eq!(cfg.entry(), Some("b0"));
        assert_eq!(cfg.exit(), Some("join"));
        assert_eq!(cfg.block_count(), 4);
    }

    #[test]
    fn test_label_markers_are_stripped() {
        let cfg = diamond();
        for (_, block) in cfg.blocks() {
            assert!(block.iter().all(|instr| !instr.is_label()));
        }
        // "left" keeps its two real instructions.
        assert_eq!(cfg.block("left").unwrap().len(), 2);
    }

    #[test]
    fn test_synthetic_names_count_all_blocks() {
        // First block labeled, second unlabeled: the synthetic counter runs
        // over all named blocks, so the second block is b1, not b0.
        let func = Function::new(
            "mix",
            vec![
                Instruction::label("start"),
                Instruction::jump("tail"),
                Instruction::constant("x", Literal::Int(1)),
                Instruction::label("tail"),
                Instruction::ret(),
            ],
        );
        let cfg = ControlFlowGraph::from_function(&func).unwrap();
        assert_eq!(cfg.block_names(), ["start", "b1", "tail"]);
    }

    #[test]
    fn test_fallthrough_successor() {
        let func = Function::new(
            "fall",
            vec![
                Instruction::constant("x", Literal::Int(1)),
                Instruction::label("next"),
                Instruction::constant("y", Literal::Int(2)),
            ],
        );
        let cfg = ControlFlowGraph::from_function(&func).unwrap();
        assert_eq!(cfg.successors("b0"), ["next"]);
        // Last block has nothing to fall through to.
        assert_eq!(cfg.successors("next"), Vec::<String>::new());
    }

    #[test]
    fn test_empty_block_has_no_raw_successors() {
        // A label-only block is empty once the marker is stripped; without
        // normalization it gets no successors, not even fallthrough.
        let func = Function::new(
            "hollow",
            vec![
                Instruction::label("empty"),
                Instruction::label("tail"),
                Instruction::ret(),
            ],
        );
        let cfg = ControlFlowGraph::from_function(&func).unwrap();
        assert!(cfg.block("empty").unwrap().is_empty());
        assert_eq!(cfg.successors("empty"), Vec::<String>::new());
    }

    #[test]
    fn test_normalization_terminates_every_block() {
        let func = Function::new(
            "hollow",
            vec![
                Instruction::label("empty"),
                Instruction::label("tail"),
                Instruction::constant("x", Literal::Int(1)),
            ],
        );
        let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

        for (name, block) in cfg.blocks() {
            assert!(
                block.last().is_some_and(Instruction::is_terminator),
                "block {name} not terminated"
            );
        }
        // The empty block now jumps to its fallthrough target.
        assert_eq!(cfg.successors("empty"), ["tail"]);
        // The last block got a ret appended.
        assert_eq!(cfg.successors("tail"), Vec::<String>::new());
    }

    #[test]
    fn test_normalization_keeps_existing_terminators() {
        let func = Function::new(
            "done",
            vec![Instruction::constant("x", Literal::Int(1)), Instruction::ret()],
        );
        let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();
        assert_eq!(cfg.block("b0").unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_block_name_is_rejected() {
        // The unlabeled first block takes the synthetic name b0; an explicit
        // label b0 then collides with it.
        let func = Function::new(
            "dup",
            vec![
                Instruction::jump("b0"),
                Instruction::label("b0"),
                Instruction::ret(),
            ],
        );
        let err = ControlFlowGraph::from_function(&func).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInstruction { .. }));
    }

    #[test]
    fn test_jump_without_labels_is_rejected() {
        let mut jump = Instruction::jump("gone");
        jump.labels.clear();
        let func = Function::new("bad", vec![jump]);
        let err = ControlFlowGraph::from_function(&func).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInstruction { .. }));
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let func = Function::new("bad", vec![Instruction::jump("nowhere")]);
        let err = ControlFlowGraph::from_function(&func).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInstruction { .. }));
    }

    #[test]
    fn test_const_without_value_is_rejected() {
        let mut broken = Instruction::constant("x", Literal::Int(1));
        broken.value = None;
        let func = Function::new("bad", vec![broken]);
        let err = ControlFlowGraph::from_function(&func).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInstruction { .. }));
    }

    #[test]
    fn test_call_without_callee_is_rejected() {
        let mut call = Instruction::call("f", Some("x"), &["a"]);
        call.funcs.clear();
        let func = Function::new("bad", vec![call]);
        let err = ControlFlowGraph::from_function(&func).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInstruction { .. }));
    }

    #[test]
    fn test_mid_block_terminator_is_rejected() {
        let blocks = vec![BasicBlock::new(vec![
            Instruction::ret(),
            Instruction::constant("x", Literal::Int(1)),
        ])];
        let err = ControlFlowGraph::from_blocks(blocks).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInstruction { .. }));
    }

    #[test]
    fn test_empty_function_builds_empty_graph() {
        let func = Function::new("empty", vec![]);
        let cfg = ControlFlowGraph::from_function(&func).unwrap();
        assert!(cfg.is_empty());
        assert_eq!(cfg.entry(), None);
        assert_eq!(cfg.exit(), None);
    }

    #[test]
    fn test_branch_duplicate_targets_are_kept_in_order() {
        let func = Function::new(
            "twice",
            vec![
                Instruction::constant("cond", Literal::Bool(true)),
                Instruction::branch("cond", "same", "same"),
                Instruction::label("same"),
                Instruction::ret(),
            ],
        );
        let cfg = ControlFlowGraph::from_function(&func).unwrap();
        assert_eq!(cfg.successors("b0"), ["same", "same"]);
        assert_eq!(cfg.predecessors("same"), ["b0", "b0"]);
    }
}
