//! Instruction model for the three-address program representation.
//!
//! A function body is a flat, ordered list of [`Instruction`] records. Every
//! field is optional; which fields are present depends on the operation:
//!
//! - **Label markers** carry only `label` and no operation code. They never
//!   appear mid-block once blocks are formed.
//! - **Constant definitions** (`const`) carry `dest` and a literal `value`.
//! - **Value operations** (`add`, `mul`, `id`, ...) carry `dest` and `args`.
//! - **Effect operations** (`print`, ...) carry only `args`.
//! - **Control transfers** (`jmp`, `br`) carry target `labels`; `ret` carries
//!   an optional result in `args`.
//! - **Calls** carry the callee in `funcs`, plus `args` and optionally `dest`.
//!
//! The serialized form is JSON with exactly the present fields; unknown fields
//! in the input are accepted and ignored, so program text produced by richer
//! toolchains still decodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operation codes that transfer control and therefore end their basic block.
pub const TERMINATORS: [&str; 3] = ["jmp", "br", "ret"];

/// A literal value carried by a constant-defining instruction.
///
/// Deserialization is untagged: JSON `4` becomes [`Literal::Int`], `true`
/// becomes [`Literal::Bool`], and `2.5` becomes [`Literal::Float`]. Display
/// renders the bare value, which is the form constant-propagation facts use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// A signed integer literal.
    Int(i64),
    /// A boolean literal.
    Bool(bool),
    /// A floating point literal.
    Float(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A single instruction (or label marker) in a function body.
///
/// This is a plain data record; the constructors below build the common
/// shapes, and the predicates classify an instruction without the caller
/// inspecting raw fields.
///
/// # Examples
///
/// ```rust
/// use tacscope::{Instruction, Literal};
///
/// let c = Instruction::constant("x", Literal::Int(4));
/// assert!(c.is_const());
///
/// let j = Instruction::jump("done");
/// assert!(j.is_terminator());
///
/// let l = Instruction::label("done");
/// assert!(l.is_label());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation code, absent on pure label markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,

    /// Destination variable name, present on value-producing operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    /// Ordered operand variable names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Ordered target labels, present on jumps and branches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Ordered called-function names, present on calls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<String>,

    /// Literal value, present on constant-defining operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,

    /// Block-entry label, present only on label markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Instruction {
    /// Creates a pure label marker.
    #[must_use]
    pub fn label(name: &str) -> Self {
        Instruction {
            label: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Creates a constant definition `dest = const value`.
    #[must_use]
    pub fn constant(dest: &str, value: Literal) -> Self {
        Instruction {
            op: Some("const".to_string()),
            dest: Some(dest.to_string()),
            value: Some(value),
            ..Default::default()
        }
    }

    /// Creates a value operation `dest = op(args)`.
    #[must_use]
    pub fn compute(op: &str, dest: &str, args: &[&str]) -> Self {
        Instruction {
            op: Some(op.to_string()),
            dest: Some(dest.to_string()),
            args: args.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    /// Creates an effect operation `op(args)` with no destination.
    #[must_use]
    pub fn effect(op: &str, args: &[&str]) -> Self {
        Instruction {
            op: Some(op.to_string()),
            args: args.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    /// Creates an unconditional jump to `target`.
    #[must_use]
    pub fn jump(target: &str) -> Self {
        Instruction {
            op: Some("jmp".to_string()),
            labels: vec![target.to_string()],
            ..Default::default()
        }
    }

    /// Creates a conditional branch on `cond` to `if_true` / `if_false`.
    #[must_use]
    pub fn branch(cond: &str, if_true: &str, if_false: &str) -> Self {
        Instruction {
            op: Some("br".to_string()),
            args: vec![cond.to_string()],
            labels: vec![if_true.to_string(), if_false.to_string()],
            ..Default::default()
        }
    }

    /// Creates a call to `func` with `args`, optionally binding a result.
    #[must_use]
    pub fn call(func: &str, dest: Option<&str>, args: &[&str]) -> Self {
        Instruction {
            op: Some("call".to_string()),
            dest: dest.map(ToString::to_string),
            args: args.iter().map(ToString::to_string).collect(),
            funcs: vec![func.to_string()],
            ..Default::default()
        }
    }

    /// Creates a `ret` with no result.
    #[must_use]
    pub fn ret() -> Self {
        Instruction {
            op: Some("ret".to_string()),
            ..Default::default()
        }
    }

    /// Creates a `ret` returning `arg`.
    #[must_use]
    pub fn ret_value(arg: &str) -> Self {
        Instruction {
            op: Some("ret".to_string()),
            args: vec![arg.to_string()],
            ..Default::default()
        }
    }

    /// The operation code, if this is not a label marker.
    #[must_use]
    pub fn opcode(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Whether this instruction is a pure label marker (a label and no
    /// operation code).
    #[must_use]
    pub fn is_label(&self) -> bool {
        self.op.is_none() && self.label.is_some()
    }

    /// Whether this instruction transfers control (`jmp`, `br` or `ret`).
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        self.op
            .as_deref()
            .is_some_and(|op| TERMINATORS.contains(&op))
    }

    /// Whether this instruction is a constant definition.
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.op.as_deref() == Some("const")
    }
}
