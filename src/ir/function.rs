//! Function and program containers around the instruction stream.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{ir::Instruction, Result};

/// A named function: an ordered sequence of instructions.
///
/// The instruction order is the program order that block formation, successor
/// fallthrough and the worklist engine all rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// The function name.
    pub name: String,
    /// The flat instruction sequence, in program order.
    #[serde(default)]
    pub instrs: Vec<Instruction>,
}

impl Function {
    /// Creates a function from a name and its instruction sequence.
    #[must_use]
    pub fn new(name: &str, instrs: Vec<Instruction>) -> Self {
        Function {
            name: name.to_string(),
            instrs,
        }
    }
}

/// A whole program: an ordered list of functions.
///
/// Each function is analyzed independently; the program object exists so the
/// serialized form can be decoded in one step.
///
/// # Examples
///
/// ```rust
/// use tacscope::Program;
///
/// let text = r#"{"functions": [{"name": "main", "instrs": [
///     {"op": "const", "dest": "x", "value": 4},
///     {"op": "print", "args": ["x"]}
/// ]}]}"#;
///
/// let program = Program::from_json_str(text)?;
/// assert_eq!(program.functions.len(), 1);
/// assert_eq!(program.functions[0].name, "main");
/// # Ok::<(), tacscope::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// The functions of the program, in source order.
    pub functions: Vec<Function>,
}

impl Program {
    /// Decodes a program from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonError`] if the text is not valid JSON of
    /// the expected shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decodes a program from a JSON byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if reading fails, or
    /// [`crate::Error::JsonError`] if the bytes are not valid JSON of the
    /// expected shape.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Literal;

    #[test]
    fn test_program_decoding() {
        let text = r#"{"functions": [{"name": "main", "instrs": [
            {"op": "const", "dest": "a", "value": 1},
            {"label": "here"},
            {"op": "jmp", "labels": ["here"]}
        ]}]}"#;
        let program = Program::from_json_str(text).unwrap();

        assert_eq!(program.functions.len(), 1);
        let func = &program.functions[0];
        assert_eq!(func.name, "main");
        assert_eq!(func.instrs.len(), 3);
        assert_eq!(func.instrs[0], Instruction::constant("a", Literal::Int(1)));
        assert!(func.instrs[1].is_label());
        assert!(func.instrs[2].is_terminator());
    }

    #[test]
    fn test_program_roundtrip() {
        let program = Program {
            functions: vec![Function::new(
                "main",
                vec![
                    Instruction::constant("x", Literal::Int(4)),
                    Instruction::compute("add", "y", &["x", "x"]),
                    Instruction::ret_value("y"),
                ],
            )],
        };

        let text = serde_json::to_string(&program).unwrap();
        let back = Program::from_json_str(&text).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn test_program_rejects_bad_text() {
        assert!(Program::from_json_str("not json").is_err());
        assert!(Program::from_json_str(r#"{"functions": 3}"#).is_err());
    }

    #[test]
    fn test_function_without_instrs_field() {
        let program = Program::from_json_str(r#"{"functions": [{"name": "empty"}]}"#).unwrap();
        assert!(program.functions[0].instrs.is_empty());
    }
}
