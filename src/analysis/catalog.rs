//! The closed catalog of analyses and name-based dispatch.
//!
//! Callers that know which analysis they want can instantiate it directly
//! and keep the typed [`AnalysisResults`](crate::analysis::AnalysisResults).
//! The catalog is for name-driven callers, such as a command line: it maps
//! the catalog names (`defined`, `live`, `cprop`, `reaching`, `available`)
//! to analysis runs and wraps the differently-typed results in one
//! [`AnalysisFacts`] value that can be rendered uniformly.

use strum::{Display, EnumIter, EnumString};

use crate::{
    analysis::{
        available::{AvailableExpressions, ExprSet},
        constprop::{ConstMap, ConstantPropagation},
        defined::DefinedVariables,
        framework::{AnalysisResults, DataFlowAnalysis, Direction},
        lattice::VarSet,
        liveness::LiveVariables,
        reaching::{DefScheme, DefSet, ReachingDefinitions},
        solver::DataFlowSolver,
    },
    cfg::ControlFlowGraph,
    Result,
};

/// The analyses in the catalog, one variant per name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AnalysisKind {
    /// Variables assigned on some path from the entry.
    Defined,
    /// Variables that may still be read on some path ahead.
    Live,
    /// Per-variable constant tracking.
    #[strum(serialize = "cprop")]
    ConstProp,
    /// Definition sites that may still be the latest write.
    Reaching,
    /// Expressions computed on every incoming path.
    Available,
}

impl AnalysisKind {
    /// Looks up an analysis by its catalog name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownAnalysis`](crate::Error::UnknownAnalysis) if
    /// `name` is not in the catalog.
    pub fn parse(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| crate::Error::UnknownAnalysis(name.to_string()))
    }

    /// The direction the analysis runs in.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::Defined => DefinedVariables::DIRECTION,
            Self::Live => LiveVariables::DIRECTION,
            Self::ConstProp => ConstantPropagation::DIRECTION,
            Self::Reaching => ReachingDefinitions::DIRECTION,
            Self::Available => AvailableExpressions::DIRECTION,
        }
    }

    /// Runs the analysis to a fixpoint over `cfg`.
    ///
    /// Reaching definitions uses the default block-local site scheme; use
    /// [`AnalysisKind::run_reaching`] to choose the scheme explicitly.
    #[must_use]
    pub fn run(self, cfg: &ControlFlowGraph) -> AnalysisFacts {
        match self {
            Self::Defined => {
                AnalysisFacts::VarSets(DataFlowSolver::new(DefinedVariables).solve(cfg))
            }
            Self::Live => AnalysisFacts::VarSets(DataFlowSolver::new(LiveVariables).solve(cfg)),
            Self::ConstProp => {
                AnalysisFacts::Constants(DataFlowSolver::new(ConstantPropagation).solve(cfg))
            }
            Self::Reaching => self.run_reaching(cfg, DefScheme::default()),
            Self::Available => {
                AnalysisFacts::Expressions(DataFlowSolver::new(AvailableExpressions).solve(cfg))
            }
        }
    }

    /// Runs reaching definitions with an explicit site scheme.
    #[must_use]
    pub fn run_reaching(self, cfg: &ControlFlowGraph, scheme: DefScheme) -> AnalysisFacts {
        let analysis = ReachingDefinitions::with_scheme(scheme);
        AnalysisFacts::Definitions(DataFlowSolver::new(analysis).solve(cfg))
    }
}

/// Applies an expression to the [`AnalysisResults`] inside any
/// [`AnalysisFacts`] variant.
macro_rules! each_results {
    ($facts:expr, $results:ident => $body:expr) => {
        match $facts {
            AnalysisFacts::VarSets($results) => $body,
            AnalysisFacts::Constants($results) => $body,
            AnalysisFacts::Definitions($results) => $body,
            AnalysisFacts::Expressions($results) => $body,
        }
    };
}

/// Analysis results with the lattice type erased behind one enum.
///
/// Each variant carries the typed results of the analyses sharing that
/// value domain.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisFacts {
    /// Variable-set facts (`defined`, `live`).
    VarSets(AnalysisResults<VarSet>),
    /// Constant-mapping facts (`cprop`).
    Constants(AnalysisResults<ConstMap>),
    /// Definition-site facts (`reaching`).
    Definitions(AnalysisResults<DefSet>),
    /// Expression facts (`available`).
    Expressions(AnalysisResults<ExprSet>),
}

impl AnalysisFacts {
    /// Renders the input state of a block, or `None` for an unknown name.
    #[must_use]
    pub fn in_display(&self, block: &str) -> Option<String> {
        each_results!(self, results => results.in_state(block).map(ToString::to_string))
    }

    /// Renders the output state of a block, or `None` for an unknown name.
    #[must_use]
    pub fn out_display(&self, block: &str) -> Option<String> {
        each_results!(self, results => results.out_state(block).map(ToString::to_string))
    }

    /// Returns the number of blocks covered by the results.
    #[must_use]
    pub fn block_count(&self) -> usize {
        each_results!(self, results => results.block_count())
    }

    /// Returns the number of block evaluations the solver performed.
    #[must_use]
    pub fn iterations(&self) -> usize {
        each_results!(self, results => results.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ir::{Function, Instruction, Literal},
        Error,
    };
    use strum::IntoEnumIterator;

    fn sample_cfg() -> ControlFlowGraph {
        let func = Function::new(
            "main",
            vec![
                Instruction::constant("x", Literal::Int(4)),
                Instruction::compute("add", "y", &["x", "x"]),
            ],
        );
        ControlFlowGraph::from_function(&func).unwrap()
    }

    #[test]
    fn test_catalog_names_round_trip() {
        for kind in AnalysisKind::iter() {
            assert_eq!(AnalysisKind::parse(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_constprop_short_name() {
        assert_eq!(AnalysisKind::ConstProp.to_string(), "cprop");
        assert_eq!(
            AnalysisKind::parse("cprop").unwrap(),
            AnalysisKind::ConstProp
        );
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = AnalysisKind::parse("dominators").unwrap_err();
        assert!(matches!(err, Error::UnknownAnalysis(name) if name == "dominators"));
    }

    #[test]
    fn test_only_liveness_runs_backward() {
        for kind in AnalysisKind::iter() {
            let expected = if kind == AnalysisKind::Live {
                Direction::Backward
            } else {
                Direction::Forward
            };
            assert_eq!(kind.direction(), expected);
        }
    }

    #[test]
    fn test_run_dispatches_to_matching_variant() {
        let cfg = sample_cfg();

        assert!(matches!(
            AnalysisKind::Defined.run(&cfg),
            AnalysisFacts::VarSets(_)
        ));
        assert!(matches!(
            AnalysisKind::Live.run(&cfg),
            AnalysisFacts::VarSets(_)
        ));
        assert!(matches!(
            AnalysisKind::ConstProp.run(&cfg),
            AnalysisFacts::Constants(_)
        ));
        assert!(matches!(
            AnalysisKind::Reaching.run(&cfg),
            AnalysisFacts::Definitions(_)
        ));
        assert!(matches!(
            AnalysisKind::Available.run(&cfg),
            AnalysisFacts::Expressions(_)
        ));
    }

    #[test]
    fn test_facts_render_by_block_name() {
        let facts = AnalysisKind::Defined.run(&sample_cfg());

        assert_eq!(facts.block_count(), 1);
        assert_eq!(facts.in_display("b0"), Some("∅".to_string()));
        assert_eq!(facts.out_display("b0"), Some("x, y".to_string()));
        assert_eq!(facts.in_display("nope"), None);
    }

    #[test]
    fn test_reaching_site_scheme_selection() {
        let cfg = sample_cfg();

        let local = AnalysisKind::Reaching.run(&cfg);
        assert_eq!(
            local.out_display("b0"),
            Some("x:instr_0, y:instr_1".to_string())
        );

        let qualified = AnalysisKind::Reaching.run_reaching(&cfg, DefScheme::Qualified);
        assert_eq!(qualified.out_display("b0"), Some("x:b0.0, y:b0.1".to_string()));
    }
}
