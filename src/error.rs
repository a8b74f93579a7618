use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::MalformedInstruction {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedInstruction {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while decoding a program,
/// building its control flow graph, and running analyses over it. Each variant provides
/// specific context about the failure mode to enable appropriate error handling.
///
/// # Error Categories
///
/// ## Program Structure Errors
/// - [`Error::MalformedInstruction`] - An instruction is missing a field its operation requires
///
/// ## Request Errors
/// - [`Error::UnknownAnalysis`] - A named analysis is not in the catalog
/// - [`Error::UnknownEntryNode`] - A graph query names a block the CFG does not contain
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::JsonError`] - Serialization errors from the JSON boundary
///
/// # Examples
///
/// ```rust
/// use tacscope::{Error, Program};
///
/// match Program::from_json_str("not json") {
///     Ok(program) => {
///         println!("Loaded {} functions", program.functions.len());
///     }
///     Err(Error::JsonError(json_err)) => {
///         eprintln!("Invalid program text: {}", json_err);
///     }
///     Err(e) => {
///         eprintln!("Other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An instruction is missing a field required by the operation it claims to perform.
    ///
    /// This error indicates that an instruction does not conform to the shape its
    /// operation code demands, such as a jump or branch without target labels, a
    /// constant definition without a literal value, or a control transfer to a label
    /// that names no block. The error includes the source location where the
    /// malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed instruction - {file}:{line}: {message}")]
    MalformedInstruction {
        /// The message to be printed for the malformed instruction
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The requested analysis is not present in the catalog.
    ///
    /// The catalog is a closed set; a request must name one of its members
    /// exactly. Nothing is run when the name does not match, rather than
    /// silently defaulting to some analysis.
    ///
    /// The associated value is the name that failed to resolve.
    #[error("No such analysis: `{0}`")]
    UnknownAnalysis(String),

    /// A graph query was invoked with an entry name absent from the CFG.
    ///
    /// All traversals and loop queries start from a designated entry block.
    /// When that name does not key a block, the query fails instead of
    /// returning a partial or empty result.
    ///
    /// The associated value is the entry name that was not found.
    #[error("No such block in the control flow graph: `{0}`")]
    UnknownEntryNode(String),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading program text
    /// from disk or a stream, such as permission issues or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the JSON boundary.
    ///
    /// Wraps any failure to decode program text into the in-memory program
    /// model, or to encode results back out.
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),
}
