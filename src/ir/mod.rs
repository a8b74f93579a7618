//! The three-address program representation consumed by every other layer.
//!
//! The model is deliberately small: a [`Program`] is an ordered list of
//! [`Function`]s, and a function body is a flat, ordered list of
//! [`Instruction`] records whose optional fields encode everything the
//! analyses need (destinations, operands, labels, callees, literal values).
//!
//! # Key Types
//!
//! - [`Instruction`] - One instruction or label marker
//! - [`Literal`] - Constant values carried by `const` instructions
//! - [`Function`] / [`Program`] - The containers decoded from JSON
//!
//! Block formation and the control flow graph live in [`crate::cfg`]; this
//! module only defines the data shapes.

mod function;
mod instruction;

pub use function::{Function, Program};
pub use instruction::{Instruction, Literal, TERMINATORS};
