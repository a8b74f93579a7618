use std::collections::BTreeMap;
use std::path::Path;

use anyhow::bail;
use serde::Serialize;
use tacscope::{ControlFlowGraph, Function};

use crate::{
    commands::common::load_program,
    output::{Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct BlockOutput {
    name: String,
    instruction_count: usize,
    successors: Vec<String>,
    predecessors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BackEdgeOutput {
    from: String,
    to: String,
}

#[derive(Debug, Serialize)]
struct CfgOutput {
    function: String,
    block_count: usize,
    entry: Option<String>,
    exit: Option<String>,
    blocks: Vec<BlockOutput>,
    path_lengths: BTreeMap<String, usize>,
    reverse_postorder: Vec<String>,
    back_edges: Vec<BackEdgeOutput>,
    reducible: bool,
    reducible_by_dominance: bool,
}

pub fn run(path: Option<&Path>, format: &str, entry: Option<&str>) -> anyhow::Result<()> {
    let program = load_program(path)?;

    match format {
        "json" => {
            let outputs = program
                .functions
                .iter()
                .map(|function| describe(function, entry))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let json = serde_json::to_string_pretty(&outputs)?;
            println!("{json}");
        }
        "dot" => {
            for function in &program.functions {
                let cfg = ControlFlowGraph::from_function(function)?;
                print!("{}", cfg.to_dot(&function.name));
            }
        }
        "text" => {
            for function in &program.functions {
                print_text(function, entry)?;
            }
        }
        other => bail!("unsupported format '{other}'; expected 'text', 'dot', or 'json'"),
    }

    Ok(())
}

fn describe(function: &Function, entry: Option<&str>) -> anyhow::Result<CfgOutput> {
    let cfg = ControlFlowGraph::from_function(function)?;

    let blocks = cfg
        .blocks()
        .map(|(name, instrs)| BlockOutput {
            name: name.to_string(),
            instruction_count: instrs.len(),
            successors: cfg.successors(name).to_vec(),
            predecessors: cfg.predecessors(name).to_vec(),
        })
        .collect();

    let entry = entry
        .map(ToString::to_string)
        .or_else(|| cfg.entry().map(ToString::to_string));

    let mut output = CfgOutput {
        function: function.name.clone(),
        block_count: cfg.block_count(),
        entry: entry.clone(),
        exit: cfg.exit().map(ToString::to_string),
        blocks,
        path_lengths: BTreeMap::new(),
        reverse_postorder: Vec::new(),
        back_edges: Vec::new(),
        reducible: true,
        reducible_by_dominance: true,
    };

    // A function without blocks has nothing to traverse.
    if let Some(entry) = &entry {
        output.path_lengths = cfg.path_lengths(entry)?.into_iter().collect();
        output.reverse_postorder = cfg.reverse_postorder(entry)?;
        output.back_edges = cfg
            .back_edges(entry)?
            .into_iter()
            .map(|(from, to)| BackEdgeOutput { from, to })
            .collect();
        output.reducible = cfg.is_reducible(entry)?;
        output.reducible_by_dominance = cfg.is_reducible_by_dominance(entry)?;
    }

    Ok(output)
}

fn print_text(function: &Function, entry: Option<&str>) -> anyhow::Result<()> {
    let output = describe(function, entry)?;

    println!("Control flow graph for {}", output.function);
    println!(
        "Blocks: {}, Entry: {}, Exit: {}",
        output.block_count,
        output.entry.as_deref().unwrap_or("(none)"),
        output.exit.as_deref().unwrap_or("(none)"),
    );

    if output.blocks.is_empty() {
        println!();
        return Ok(());
    }
    println!();

    let mut tw = TabWriter::new(vec![
        ("Block", Align::Left),
        ("Instructions", Align::Right),
        ("Successors", Align::Left),
        ("Predecessors", Align::Left),
    ]);
    for block in &output.blocks {
        tw.row(vec![
            block.name.clone(),
            block.instruction_count.to_string(),
            join_or_none(&block.successors),
            join_or_none(&block.predecessors),
        ]);
    }
    tw.print();
    println!();

    if let Some(entry) = &output.entry {
        let mut distances: Vec<(&String, &usize)> = output.path_lengths.iter().collect();
        distances.sort_by_key(|(name, len)| (**len, (*name).clone()));
        let distances: Vec<String> = distances
            .iter()
            .map(|(name, len)| format!("{name}={len}"))
            .collect();

        let back_edges: Vec<String> = output
            .back_edges
            .iter()
            .map(|edge| format!("{} -> {}", edge.from, edge.to))
            .collect();

        println!("Path lengths from {entry}: {}", distances.join(", "));
        println!("Reverse postorder: {}", output.reverse_postorder.join(", "));
        println!(
            "Back edges: {}",
            if back_edges.is_empty() {
                "(none)".to_string()
            } else {
                back_edges.join(", ")
            }
        );
        println!(
            "Reducible: {} (reachability), {} (dominance)",
            yes_no(output.reducible),
            yes_no(output.reducible_by_dominance),
        );
    }
    println!();

    Ok(())
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
