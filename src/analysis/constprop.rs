//! Constant propagation.
//!
//! Tracks, for each variable, whether it holds a single known literal on
//! every path reaching a program point. The domain is a mapping from
//! variable names to a three-valued abstraction: absent (never assigned),
//! a known literal, or `?` (not a constant).

use std::collections::BTreeMap;
use std::fmt;

use crate::{
    analysis::{
        framework::{DataFlowAnalysis, Direction},
        lattice::{write_elements, MeetSemiLattice},
    },
    ir::{Instruction, Literal},
};

/// The abstract value of a single variable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    /// The variable holds this literal on every path seen so far.
    Known(Literal),
    /// The variable is assigned a non-constant, or paths disagree.
    Unknown,
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(literal) => literal.fmt(f),
            Self::Unknown => f.write_str("?"),
        }
    }
}

/// A mapping from variable names to abstract constant values.
///
/// Displays as sorted `name: value` pairs, or `∅` when empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstMap(BTreeMap<String, ConstValue>);

impl ConstMap {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the abstract value for a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: ConstValue) {
        self.0.insert(name.into(), value);
    }

    /// Returns the abstract value for a variable, if any assignment reaches.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConstValue> {
        self.0.get(name)
    }

    /// Returns the number of tracked variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no variable is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the entries in variable-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl MeetSemiLattice for ConstMap {
    /// Per-key join: `?` on either side wins, disagreeing literals become
    /// `?`, and a variable known on only one side keeps its value there.
    fn meet(&self, other: &Self) -> Self {
        let mut merged = self.0.clone();
        for (name, value) in &other.0 {
            match value {
                ConstValue::Unknown => {
                    merged.insert(name.clone(), ConstValue::Unknown);
                }
                known => match merged.get(name) {
                    Some(existing) if existing != known => {
                        merged.insert(name.clone(), ConstValue::Unknown);
                    }
                    Some(_) => {}
                    None => {
                        merged.insert(name.clone(), known.clone());
                    }
                },
            }
        }
        Self(merged)
    }
}

impl fmt::Display for ConstMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self.0.iter().map(|(name, value)| format!("{name}: {value}")))
    }
}

/// Constant propagation analysis.
///
/// Forward analysis over [`ConstMap`]: a `const` instruction binds its
/// destination to the literal, any other assignment binds it to `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantPropagation;

impl DataFlowAnalysis for ConstantPropagation {
    type Lattice = ConstMap;
    const DIRECTION: Direction = Direction::Forward;

    fn init(&self) -> ConstMap {
        ConstMap::new()
    }

    fn transfer(&self, _block: &str, instrs: &[Instruction], input: &ConstMap) -> ConstMap {
        let mut out = input.clone();
        for instr in instrs {
            if let Some(dest) = &instr.dest {
                let value = match (instr.is_const(), &instr.value) {
                    (true, Some(literal)) => ConstValue::Known(literal.clone()),
                    _ => ConstValue::Unknown,
                };
                out.insert(dest.clone(), value);
            }
        }
        out
    }
}
