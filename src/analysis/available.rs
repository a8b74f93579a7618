//! Available expressions analysis.
//!
//! An expression is *available* at a program point if it has been computed
//! on every path reaching that point and none of its operands has been
//! written since. This is the lone *must* analysis in the catalog: paths
//! combine by intersection rather than union.
//!
//! # Canonical descriptors
//!
//! Expressions are compared structurally. Operands of commutative
//! operations are sorted so that `add a b` and `add b a` canonicalize to
//! the same descriptor; other operations keep their operand order. Calls
//! are described by the callee name plus arguments.
//!
//! The merge over zero predecessors yields the empty set rather than a
//! conceptual universal set, so no expression is ever available on entry.

use std::collections::BTreeSet;
use std::fmt;

use crate::{
    analysis::{
        framework::{DataFlowAnalysis, Direction},
        lattice::{write_elements, MeetSemiLattice},
    },
    ir::Instruction,
};

/// Operations whose operand order does not matter.
pub const COMMUTATIVE: [&str; 5] = ["add", "mul", "eq", "and", "or"];

/// A canonical expression descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Expr {
    /// A value operation over its (canonically ordered) operands.
    Op {
        /// The operation code.
        op: String,
        /// The operand names, sorted when the operation is commutative.
        args: Vec<String>,
    },
    /// A function call with its arguments.
    Call {
        /// The callee name.
        func: String,
        /// The argument names, in call order.
        args: Vec<String>,
    },
}

impl Expr {
    /// Builds the canonical descriptor for the expression an instruction
    /// computes, or `None` for constants, labels and operand-less
    /// operations.
    #[must_use]
    pub fn from_instruction(instr: &Instruction) -> Option<Self> {
        let op = instr.opcode()?;
        if op == "const" {
            return None;
        }
        if op == "call" {
            let func = instr.funcs.first()?;
            return Some(Self::Call {
                func: func.clone(),
                args: instr.args.clone(),
            });
        }
        if instr.args.is_empty() {
            return None;
        }
        let mut args = instr.args.clone();
        if COMMUTATIVE.contains(&op) {
            args.sort();
        }
        Some(Self::Op {
            op: op.to_string(),
            args,
        })
    }

    /// Returns `true` if the expression reads `var`.
    #[must_use]
    pub fn references(&self, var: &str) -> bool {
        let (Self::Op { args, .. } | Self::Call { args, .. }) = self;
        args.iter().any(|arg| arg == var)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op { op, args } => write!(f, "{op}({})", args.join(", ")),
            Self::Call { func, args } => write!(f, "call {func}({})", args.join(", ")),
        }
    }
}

/// An ordered set of available expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExprSet(BTreeSet<Expr>);

impl ExprSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an expression. Returns `true` if it was not already present.
    pub fn insert(&mut self, expr: Expr) -> bool {
        self.0.insert(expr)
    }

    /// Returns `true` if the set contains `expr`.
    #[must_use]
    pub fn contains(&self, expr: &Expr) -> bool {
        self.0.contains(expr)
    }

    /// Drops every expression that reads `var`.
    pub fn kill_operand(&mut self, var: &str) {
        self.0.retain(|expr| !expr.references(var));
    }

    /// Returns the number of expressions in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the expressions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Expr> {
        self.0.iter()
    }
}

impl FromIterator<Expr> for ExprSet {
    fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl MeetSemiLattice for ExprSet {
    /// Meet is intersection (an expression must be available on all paths).
    fn meet(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).cloned().collect())
    }
}

impl fmt::Display for ExprSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self.0.iter())
    }
}

/// Available expressions analysis.
///
/// Forward analysis over [`ExprSet`] with intersection merge. Each
/// assignment first kills every expression reading its destination, then
/// adds the descriptor of the expression it computes, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailableExpressions;

impl DataFlowAnalysis for AvailableExpressions {
    type Lattice = ExprSet;
    const DIRECTION: Direction = Direction::Forward;

    fn init(&self) -> ExprSet {
        ExprSet::new()
    }

    fn transfer(&self, _block: &str, instrs: &[Instruction], input: &ExprSet) -> ExprSet {
        let mut out = input.clone();
        for instr in instrs {
            if let Some(dest) = &instr.dest {
                out.kill_operand(dest);
                if let Some(expr) = Expr::from_instruction(instr) {
                    out.insert(expr);
                }
            }
        }
        out
    }
}
