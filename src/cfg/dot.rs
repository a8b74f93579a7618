//! DOT format rendering of a control flow graph.
//!
//! The output can be rendered with Graphviz tools. Nodes are quoted block
//! names (listed in program order, entry and exit annotated), followed by one
//! edge line per control transfer.

use std::fmt::Write;

use crate::cfg::ControlFlowGraph;

/// Escapes a string for safe use in DOT format labels and identifiers.
///
/// This function handles all characters that have special meaning in DOT
/// format, including quotes, backslashes, newlines, and angle brackets.
///
/// # Arguments
///
/// * `s` - The string to escape
///
/// # Returns
///
/// A new string with all special characters properly escaped.
#[must_use]
pub fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
        .replace('<', "\\<")
        .replace('>', "\\>")
}

/// Renders a control flow graph as a DOT digraph.
///
/// Block names are listed first, then the edges of the successor relation,
/// both in program order.
#[must_use]
pub fn to_dot(cfg: &ControlFlowGraph, title: &str) -> String {
    let mut dot = String::new();

    dot.push_str("digraph CFG {\n");
    let _ = writeln!(dot, "    label=\"CFG: {}\";", escape_dot(title));
    dot.push_str("    labelloc=t;\n");
    dot.push_str("    node [shape=box, fontname=\"Courier\", fontsize=10];\n\n");

    for name in cfg.block_names() {
        let mut label = escape_dot(name);
        if cfg.entry() == Some(name.as_str()) {
            label.push_str(" (entry)");
        }
        if cfg.exit() == Some(name.as_str()) {
            label.push_str(" (exit)");
        }
        let _ = writeln!(dot, "    \"{}\" [label=\"{}\"];", escape_dot(name), label);
    }

    dot.push('\n');
    for name in cfg.block_names() {
        for succ in cfg.successors(name) {
            let _ = writeln!(dot, "    \"{}\" -> \"{}\";", escape_dot(name), escape_dot(succ));
        }
    }

    dot.push_str("}\n");
    dot
}
