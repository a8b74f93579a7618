use std::path::Path;

use serde::Serialize;
use tacscope::{analysis::DefScheme, AnalysisKind, ControlFlowGraph};

use crate::{app::GlobalOptions, commands::common::load_program, output::print_output};

#[derive(Debug, Serialize)]
struct AnalyzeOutput {
    analysis: String,
    functions: Vec<FunctionFacts>,
}

#[derive(Debug, Serialize)]
struct FunctionFacts {
    name: String,
    iterations: usize,
    blocks: Vec<BlockFacts>,
}

#[derive(Debug, Serialize)]
struct BlockFacts {
    name: String,
    #[serde(rename = "in")]
    input: String,
    #[serde(rename = "out")]
    output: String,
}

pub fn run(
    analysis: &str,
    path: Option<&Path>,
    qualified_ids: bool,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let kind = AnalysisKind::parse(analysis)?;
    let program = load_program(path)?;

    let mut functions = Vec::new();
    for function in &program.functions {
        let cfg = ControlFlowGraph::from_function_normalized(function)?;

        let facts = if kind == AnalysisKind::Reaching && qualified_ids {
            kind.run_reaching(&cfg, DefScheme::Qualified)
        } else {
            kind.run(&cfg)
        };

        log::debug!(
            "{}: {} block(s), {} worklist pop(s)",
            function.name,
            cfg.block_count(),
            facts.iterations()
        );

        let blocks = cfg
            .block_names()
            .iter()
            .map(|name| BlockFacts {
                name: name.clone(),
                input: facts.in_display(name).unwrap_or_default(),
                output: facts.out_display(name).unwrap_or_default(),
            })
            .collect();

        functions.push(FunctionFacts {
            name: function.name.clone(),
            iterations: facts.iterations(),
            blocks,
        });
    }

    let report = AnalyzeOutput {
        analysis: kind.to_string(),
        functions,
    };

    print_output(&report, opts, |report| {
        for function in &report.functions {
            for block in &function.blocks {
                println!("{}:", block.name);
                println!("  in:  {}", block.input);
                println!("  out: {}", block.output);
            }
        }
    })
}
