//! Reaching definitions analysis.
//!
//! Computes, for each program point, which assignments may still be the
//! most recent write to their variable. A definition reaches a point if
//! some path from the assignment gets there without an intervening write
//! to the same variable.
//!
//! # Definition sites
//!
//! A definition is identified by its instruction position. Two identifier
//! schemes are supported:
//!
//! - [`DefScheme::BlockLocal`] tags a definition `instr_{i}` where `i` is
//!   the instruction index within its block. Definitions in different
//!   blocks can collide (the first instruction of every block is
//!   `instr_0`), so two unrelated writes to the same variable may become
//!   indistinguishable after a merge.
//! - [`DefScheme::Qualified`] tags a definition `{block}.{i}`, which is
//!   unique across the function.
//!
//! `BlockLocal` is the default; `Qualified` is the textbook-accurate
//! variant for callers that need globally unique sites.

use std::collections::BTreeSet;
use std::fmt;

use crate::{
    analysis::{
        framework::{DataFlowAnalysis, Direction},
        lattice::{write_elements, MeetSemiLattice},
    },
    ir::Instruction,
};

/// How definition sites are identified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DefScheme {
    /// `instr_{i}` with `i` the index within the defining block.
    #[default]
    BlockLocal,
    /// `{block}.{i}`, unique across the function.
    Qualified,
}

/// A single reaching definition: a variable and the site that wrote it.
///
/// Displays as `var:site`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Definition {
    var: String,
    site: String,
}

impl Definition {
    /// Creates a definition of `var` at `site`.
    #[must_use]
    pub fn new(var: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            site: site.into(),
        }
    }

    /// The variable being defined.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The identifier of the defining instruction.
    #[must_use]
    pub fn site(&self) -> &str {
        &self.site
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.var, self.site)
    }
}

/// An ordered set of reaching definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefSet(BTreeSet<Definition>);

impl DefSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition. Returns `true` if it was not already present.
    pub fn insert(&mut self, def: Definition) -> bool {
        self.0.insert(def)
    }

    /// Returns `true` if the set contains `def`.
    #[must_use]
    pub fn contains(&self, def: &Definition) -> bool {
        self.0.contains(def)
    }

    /// Drops every definition of `var`.
    pub fn kill_var(&mut self, var: &str) {
        self.0.retain(|def| def.var != var);
    }

    /// Returns the number of definitions in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the definitions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.0.iter()
    }
}

impl FromIterator<Definition> for DefSet {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl MeetSemiLattice for DefSet {
    /// Meet is union (a definition reaches if it reaches on any path).
    fn meet(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }
}

impl fmt::Display for DefSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self.0.iter())
    }
}

/// Reaching definitions analysis.
///
/// Forward analysis over [`DefSet`]. Each assignment first kills every
/// reaching definition of its destination, then adds its own site:
///
/// - `OUT[B]` = gen-and-kill applied instruction by instruction to `IN[B]`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReachingDefinitions {
    scheme: DefScheme,
}

impl ReachingDefinitions {
    /// Creates the analysis with the default block-local site scheme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the analysis with an explicit site scheme.
    #[must_use]
    pub fn with_scheme(scheme: DefScheme) -> Self {
        Self { scheme }
    }

    fn site(&self, block: &str, index: usize) -> String {
        match self.scheme {
            DefScheme::BlockLocal => format!("instr_{index}"),
            DefScheme::Qualified => format!("{block}.{index}"),
        }
    }
}

impl DataFlowAnalysis for ReachingDefinitions {
    type Lattice = DefSet;
    const DIRECTION: Direction = Direction::Forward;

    fn init(&self) -> DefSet {
        DefSet::new()
    }

    fn transfer(&self, block: &str, instrs: &[Instruction], input: &DefSet) -> DefSet {
        let mut out = input.clone();
        for (index, instr) in instrs.iter().enumerate() {
            if let Some(dest) = &instr.dest {
                out.kill_var(dest);
                out.insert(Definition::new(dest.clone(), self.site(block, index)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Literal;

    #[test]
    fn test_transfer_kills_then_generates() {
        let instrs = [
            Instruction::constant("x", Literal::Int(1)),
            Instruction::constant("x", Literal::Int(2)),
        ];
        let input: DefSet = [Definition::new("x", "instr_9")].into_iter().collect();
        let out = ReachingDefinitions::new().transfer("b0", &instrs, &input);

        // Only the last local write to x survives.
        assert_eq!(out, [Definition::new("x", "instr_1")].into_iter().collect());
    }

    #[test]
    fn test_site_index_counts_every_instruction() {
        // The effect instruction occupies index 1, so the second definition
        // sits at index 2.
        let instrs = [
            Instruction::constant("x", Literal::Int(1)),
            Instruction::effect("print", &["x"]),
            Instruction::constant("y", Literal::Int(2)),
        ];
        let out = ReachingDefinitions::new().transfer("b0", &instrs, &DefSet::new());

        let expected: DefSet = [
            Definition::new("x", "instr_0"),
            Definition::new("y", "instr_2"),
        ]
        .into_iter()
        .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_unrelated_definitions_pass_through() {
        let instrs = [Instruction::constant("y", Literal::Int(3))];
        let input: DefSet = [Definition::new("x", "instr_0")].into_iter().collect();
        let out = ReachingDefinitions::new().transfer("b1", &instrs, &input);

        assert!(out.contains(&Definition::new("x", "instr_0")));
        assert!(out.contains(&Definition::new("y", "instr_0")));
    }

    #[test]
    fn test_qualified_sites_disambiguate_blocks() {
        let instrs = [Instruction::constant("x", Literal::Int(1))];
        let analysis = ReachingDefinitions::with_scheme(DefScheme::Qualified);

        let from_a = analysis.transfer("a", &instrs, &DefSet::new());
        let from_b = analysis.transfer("b", &instrs, &DefSet::new());

        let merged = from_a.meet(&from_b);
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&Definition::new("x", "a.0")));
        assert!(merged.contains(&Definition::new("x", "b.0")));
    }

    #[test]
    fn test_block_local_sites_collide_across_blocks() {
        // Both blocks tag their write instr_0; after a union merge the two
        // definitions collapse into one element.
        let instrs = [Instruction::constant("x", Literal::Int(1))];
        let analysis = ReachingDefinitions::new();

        let from_a = analysis.transfer("a", &instrs, &DefSet::new());
        let from_b = analysis.transfer("b", &instrs, &DefSet::new());

        assert_eq!(from_a.meet(&from_b).len(), 1);
    }

    #[test]
    fn test_display_pairs() {
        let set: DefSet = [
            Definition::new("y", "instr_0"),
            Definition::new("x", "instr_2"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.to_string(), "x:instr_2, y:instr_0");
        assert_eq!(DefSet::new().to_string(), "∅");
    }
}
