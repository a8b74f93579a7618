#![no_main]

use libfuzzer_sys::fuzz_target;
use tacscope::{AnalysisKind, ControlFlowGraph, Program};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(program) = Program::from_json_str(text) else {
        return;
    };
    for func in &program.functions {
        let _ = ControlFlowGraph::from_function(func);
        let Ok(cfg) = ControlFlowGraph::from_function_normalized(func) else {
            continue;
        };
        for kind in [
            AnalysisKind::Defined,
            AnalysisKind::Live,
            AnalysisKind::ConstProp,
            AnalysisKind::Reaching,
            AnalysisKind::Available,
        ] {
            let _ = kind.run(&cfg);
        }
        if let Some(entry) = cfg.entry() {
            let _ = cfg.path_lengths(entry);
            let _ = cfg.reverse_postorder(entry);
            let _ = cfg.back_edges(entry);
            let _ = cfg.is_reducible(entry);
            let _ = cfg.is_reducible_by_dominance(entry);
            let _ = cfg.to_dot(&func.name);
        }
    }
});
