use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tacscope - dataflow analysis over three-address-code programs
#[derive(Debug, Parser)]
#[command(name = "tacscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a dataflow analysis and print per-block in/out facts.
    Analyze {
        /// Analysis to run: defined, live, cprop, reaching, or available.
        #[arg(value_name = "ANALYSIS")]
        analysis: String,

        /// Path to the JSON program. Reads stdin when absent or `-`.
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Use globally unique `block.index` definition sites for reaching definitions.
        #[arg(long)]
        qualified_ids: bool,
    },

    /// Display the control flow graph of every function.
    Cfg {
        /// Path to the JSON program. Reads stdin when absent or `-`.
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Output format: text, dot, json.
        #[arg(long, default_value = "text")]
        format: String,

        /// Entry block for distances, orders and loop queries (default: first block).
        #[arg(long, value_name = "BLOCK")]
        entry: Option<String>,
    },
}
