//! Compiler from a module graph root into an executable [`NoiseProgram`].
//!
//! Compilation walks the subgraph reachable from the root, checks that every source slot on
//! the way is set and resolves the slots into plain id lists so evaluation never has to look
//! at an `Option` again.
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{ModuleGraph, ModuleId, NoiseProgram};

/// Options for compiling a module graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompileOptions {
    /// Reject graphs whose reachable subgraph contains a cycle.
    ///
    /// Off by default: a cycle is then the caller's responsibility and evaluating it recurses
    /// without bound. Compilation itself terminates either way.
    pub detect_cycles: bool,
}

impl CompileOptions {
    /// Enables the cycle check.
    pub fn with_detect_cycles(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    InProgress,
    Done,
}

/// Compiler for module graphs into executable programs.
pub struct GraphCompiler;

impl GraphCompiler {
    /// Compiles the subgraph reachable from `root`, applying the given options.
    pub fn compile<'g>(
        graph: &'g ModuleGraph,
        root: ModuleId,
        opts: &CompileOptions,
    ) -> Result<NoiseProgram<'g>> {
        graph.node(root)?;

        let mut state = vec![Visit::Unseen; graph.len()];
        let mut inputs: Vec<Box<[ModuleId]>> = vec![Box::default(); graph.len()];
        let mut reachable = 0usize;

        // Depth-first with an explicit stack of (module, next slot to visit).
        let mut stack = vec![(root, 0usize)];
        state[root.0] = Visit::InProgress;

        while let Some((id, slot)) = stack.pop() {
            let node = graph.node(id)?;

            if slot == node.sources.len() {
                inputs[id.0] = node.sources.iter().flatten().copied().collect();
                state[id.0] = Visit::Done;
                reachable += 1;
                continue;
            }

            stack.push((id, slot + 1));
            let source = node.sources[slot].ok_or(Error::NoModule { module: id, slot })?;
            match state[source.0] {
                Visit::Unseen => {
                    state[source.0] = Visit::InProgress;
                    stack.push((source, 0));
                }
                Visit::InProgress if opts.detect_cycles => {
                    return Err(Error::Cycle { module: source });
                }
                Visit::InProgress | Visit::Done => {}
            }
        }

        debug!(
            "Compiled program rooted at {} ({} reachable modules).",
            root, reachable
        );
        Ok(NoiseProgram::new(graph, root, inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ModuleKind;

    fn cyclic_graph() -> (ModuleGraph, ModuleId) {
        let mut graph = ModuleGraph::new();
        let a = graph.add(ModuleKind::Abs).unwrap();
        let b = graph.add(ModuleKind::Invert).unwrap();
        graph.set_source(a, 0, b).unwrap();
        graph.set_source(b, 0, a).unwrap();
        (graph, a)
    }

    #[test]
    fn compiles_shared_subgraph_once() {
        let mut graph = ModuleGraph::new();
        let c = graph.add(ModuleKind::constant(0.25)).unwrap();
        let add = graph.add_with_sources(ModuleKind::Add, &[c, c]).unwrap();
        let program = GraphCompiler::compile(&graph, add, &CompileOptions::default()).unwrap();
        assert_eq!(program.root(), add);
        assert_eq!(program.sample(0.0, 0.0, 0.0), 0.5);
    }

    #[test]
    fn unknown_root_is_rejected() {
        let graph = ModuleGraph::new();
        let err = GraphCompiler::compile(&graph, ModuleId(0), &CompileOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownModule { .. }));
    }

    #[test]
    fn missing_source_deep_in_the_graph_is_reported() {
        let mut graph = ModuleGraph::new();
        let abs = graph.add(ModuleKind::Abs).unwrap();
        let c = graph.add(ModuleKind::constant(1.0)).unwrap();
        let add = graph.add_with_sources(ModuleKind::Add, &[c, abs]).unwrap();
        let err = GraphCompiler::compile(&graph, add, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoModule { module, slot: 0 } if module == abs));
    }

    #[test]
    fn cycles_are_only_reported_when_requested() {
        let (graph, root) = cyclic_graph();
        assert!(GraphCompiler::compile(&graph, root, &CompileOptions::default()).is_ok());

        let opts = CompileOptions::default().with_detect_cycles(true);
        let err = GraphCompiler::compile(&graph, root, &opts).unwrap_err();
        assert!(matches!(err, Error::Cycle { .. }));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut graph = ModuleGraph::new();
        let c = graph.add(ModuleKind::constant(1.0)).unwrap();
        let left = graph.add_with_sources(ModuleKind::Abs, &[c]).unwrap();
        let right = graph.add_with_sources(ModuleKind::Invert, &[c]).unwrap();
        let max = graph
            .add_with_sources(ModuleKind::Max, &[left, right])
            .unwrap();
        let opts = CompileOptions::default().with_detect_cycles(true);
        let program = GraphCompiler::compile(&graph, max, &opts).unwrap();
        assert_eq!(program.sample(0.0, 0.0, 0.0), 1.0);
    }
}
