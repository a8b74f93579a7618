//! Benchmarks for the analysis pipeline.
//!
//! Covers each stage on synthetic programs of a fixed size:
//! - JSON decoding
//! - Basic block partitioning and graph construction
//! - The five stock worklist analyses
//! - Dominators and the reducibility tests

extern crate tacscope;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tacscope::{
    cfg::form_blocks, AnalysisKind, ControlFlowGraph, Function, Instruction, Literal, Program,
};

/// Builds one block of `length` chained additions.
fn straight_line(length: usize) -> Function {
    let mut instrs = vec![Instruction::constant("x0", Literal::Int(1))];
    for i in 1..length {
        let dest = format!("x{i}");
        let prev = format!("x{}", i - 1);
        instrs.push(Instruction::compute("add", &dest, &[prev.as_str(), prev.as_str()]));
    }
    instrs.push(Instruction::ret());
    Function::new("straight", instrs)
}

/// Builds `levels` stacked branch diamonds, each redefining `x` on both arms.
fn diamond_chain(levels: usize) -> Function {
    let mut instrs = vec![
        Instruction::constant("cond", Literal::Bool(true)),
        Instruction::constant("x", Literal::Int(0)),
        Instruction::jump("head0"),
    ];
    for i in 0..levels {
        let then = format!("then{i}");
        let other = format!("else{i}");
        let join = format!("join{i}");
        instrs.push(Instruction::label(&format!("head{i}")));
        instrs.push(Instruction::branch("cond", &then, &other));
        instrs.push(Instruction::label(&then));
        instrs.push(Instruction::compute("add", "x", &["x", "x"]));
        instrs.push(Instruction::jump(&join));
        instrs.push(Instruction::label(&other));
        instrs.push(Instruction::compute("mul", "x", &["x", "x"]));
        instrs.push(Instruction::jump(&join));
        instrs.push(Instruction::label(&join));
        if i + 1 < levels {
            instrs.push(Instruction::jump(&format!("head{}", i + 1)));
        } else {
            instrs.push(Instruction::ret());
        }
    }
    Function::new("diamonds", instrs)
}

/// Builds a counted loop whose body is a chain of `length` blocks, so the
/// back edge forces the worklist around the whole chain more than once.
fn loop_chain(length: usize) -> Function {
    let mut instrs = vec![
        Instruction::constant("i", Literal::Int(0)),
        Instruction::constant("one", Literal::Int(1)),
        Instruction::jump("head"),
        Instruction::label("head"),
        Instruction::compute("lt", "cond", &["i", "n"]),
        Instruction::branch("cond", "step0", "done"),
    ];
    for i in 0..length {
        instrs.push(Instruction::label(&format!("step{i}")));
        instrs.push(Instruction::compute("add", "i", &["i", "one"]));
        let next = if i + 1 < length {
            format!("step{}", i + 1)
        } else {
            "head".to_string()
        };
        instrs.push(Instruction::jump(&next));
    }
    instrs.push(Instruction::label("done"));
    instrs.push(Instruction::ret());
    Function::new("loop", instrs)
}

/// Benchmark decoding a 256-instruction straight-line program from JSON.
fn bench_decode_straight_line(c: &mut Criterion) {
    let program = Program {
        functions: vec![straight_line(256)],
    };
    let text = serde_json::to_string(&program).unwrap();

    c.bench_function("decode_straight_line_256", |b| {
        b.iter(|| {
            let program = Program::from_json_str(black_box(&text)).unwrap();
            black_box(program)
        });
    });
}

/// Benchmark partitioning a 64-diamond function body into basic blocks.
fn bench_form_blocks_diamonds(c: &mut Criterion) {
    let func = diamond_chain(64);

    c.bench_function("form_blocks_diamond_64", |b| {
        b.iter(|| black_box(form_blocks(black_box(&func.instrs))));
    });
}

/// Benchmark graph construction with terminator normalization.
fn bench_build_cfg_diamonds(c: &mut Criterion) {
    let func = diamond_chain(64);

    c.bench_function("build_cfg_diamond_64", |b| {
        b.iter(|| {
            let cfg = ControlFlowGraph::from_function_normalized(black_box(&func)).unwrap();
            black_box(cfg)
        });
    });
}

/// Benchmark defined variables over the diamond chain.
fn bench_defined_variables(c: &mut Criterion) {
    let func = diamond_chain(64);
    let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

    c.bench_function("defined_variables_diamond_64", |b| {
        b.iter(|| black_box(AnalysisKind::Defined.run(black_box(&cfg))));
    });
}

/// Benchmark live variables over the diamond chain.
fn bench_live_variables(c: &mut Criterion) {
    let func = diamond_chain(64);
    let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

    c.bench_function("live_variables_diamond_64", |b| {
        b.iter(|| black_box(AnalysisKind::Live.run(black_box(&cfg))));
    });
}

/// Benchmark constant propagation over the diamond chain, where every join
/// merges two disagreeing values of `x`.
fn bench_constant_propagation(c: &mut Criterion) {
    let func = diamond_chain(64);
    let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

    c.bench_function("constant_propagation_diamond_64", |b| {
        b.iter(|| black_box(AnalysisKind::ConstProp.run(black_box(&cfg))));
    });
}

/// Benchmark reaching definitions over the diamond chain.
fn bench_reaching_definitions(c: &mut Criterion) {
    let func = diamond_chain(64);
    let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

    c.bench_function("reaching_definitions_diamond_64", |b| {
        b.iter(|| black_box(AnalysisKind::Reaching.run(black_box(&cfg))));
    });
}

/// Benchmark available expressions over the diamond chain.
fn bench_available_expressions(c: &mut Criterion) {
    let func = diamond_chain(64);
    let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

    c.bench_function("available_expressions_diamond_64", |b| {
        b.iter(|| black_box(AnalysisKind::Available.run(black_box(&cfg))));
    });
}

/// Benchmark liveness over a 64-block loop body, where convergence needs a
/// second sweep after the back edge fires.
fn bench_live_variables_loop(c: &mut Criterion) {
    let func = loop_chain(64);
    let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

    c.bench_function("live_variables_loop_64", |b| {
        b.iter(|| black_box(AnalysisKind::Live.run(black_box(&cfg))));
    });
}

/// Benchmark both reducibility tests, dominator computation included.
fn bench_reducibility(c: &mut Criterion) {
    let func = loop_chain(64);
    let cfg = ControlFlowGraph::from_function_normalized(&func).unwrap();

    c.bench_function("reducibility_loop_64", |b| {
        b.iter(|| {
            let fast = cfg.is_reducible(black_box("b0")).unwrap();
            let exact = cfg.is_reducible_by_dominance(black_box("b0")).unwrap();
            black_box((fast, exact))
        });
    });
}

criterion_group!(
    benches,
    // Decoding and graph construction
    bench_decode_straight_line,
    bench_form_blocks_diamonds,
    bench_build_cfg_diamonds,
    // Worklist analyses
    bench_defined_variables,
    bench_live_variables,
    bench_constant_propagation,
    bench_reaching_definitions,
    bench_available_expressions,
    bench_live_variables_loop,
    // Graph queries
    bench_reducibility,
);
criterion_main!(benches);
