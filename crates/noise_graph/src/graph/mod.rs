//! Module graph: authoring, validation and evaluation of noise DAGs.
//!
//! A [`ModuleGraph`] owns every module. Modules refer to their sources by [`ModuleId`], so a
//! module never owns the subgraph it reads from. Wiring is checked as it happens (slot range,
//! self-reference, unknown ids); unset slots are reported when a root is compiled into a
//! [`NoiseProgram`], which is the only thing that evaluates.
//!
//! Typical flow:
//! - [`ModuleGraph::add`] modules, [`ModuleGraph::set_source`] to wire them
//! - [`ModuleGraph::compile`] a root with [`CompileOptions`]
//! - sample the program directly or hand it to a builder
use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::modules::{CacheMemo, ModuleKind};

pub mod compiler;
pub mod program;

pub use compiler::{CompileOptions, GraphCompiler};
pub use program::NoiseProgram;

/// Handle to a module inside a [`ModuleGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) usize);

impl ModuleId {
    /// Position of the module in its graph, in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) kind: ModuleKind,
    pub(crate) sources: Vec<Option<ModuleId>>,
    pub(crate) memo: CacheMemo,
}

impl Node {
    fn new(kind: ModuleKind) -> Self {
        let sources = vec![None; kind.arity()];
        Self {
            kind,
            sources,
            memo: CacheMemo::new(),
        }
    }
}

/// Arena of noise modules and their source wiring.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    nodes: Vec<Node>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of modules in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a module with all source slots unset.
    ///
    /// Parameters are validated here; a Curve or Terrace has its points sorted and a Select has
    /// its falloff clamped before it is stored.
    pub fn add(&mut self, kind: ModuleKind) -> Result<ModuleId> {
        let kind = kind.normalized()?;
        let id = ModuleId(self.nodes.len());
        trace!("Adding {} module {}.", kind.name(), id);
        self.nodes.push(Node::new(kind));
        Ok(id)
    }

    /// Reconfigures a module in place.
    ///
    /// Sources are kept when the new kind has the same arity and reset otherwise.
    pub fn replace(&mut self, id: ModuleId, kind: ModuleKind) -> Result<()> {
        let kind = kind.normalized()?;
        let node = self.node_mut(id)?;
        if node.kind.arity() != kind.arity() {
            node.sources = vec![None; kind.arity()];
        }
        trace!("Replacing module {} with {}.", id, kind.name());
        node.kind = kind;
        self.clear_caches();
        Ok(())
    }

    /// Connects `source` to `slot` of `module`, replacing any previous occupant.
    pub fn set_source(&mut self, module: ModuleId, slot: usize, source: ModuleId) -> Result<()> {
        if source.0 >= self.nodes.len() {
            return Err(Error::UnknownModule { module: source });
        }
        if module == source {
            return Err(Error::SelfReference { module });
        }
        let slot_ref = self.slot_mut(module, slot)?;
        *slot_ref = Some(source);
        trace!("Module {} slot {} <- {}.", module, slot, source);
        self.clear_caches();
        Ok(())
    }

    /// Connects `sources` to slots `0..sources.len()` of `module`.
    pub fn set_sources(&mut self, module: ModuleId, sources: &[ModuleId]) -> Result<()> {
        for (slot, &source) in sources.iter().enumerate() {
            self.set_source(module, slot, source)?;
        }
        Ok(())
    }

    /// Adds `kind` and wires `sources` into its leading slots.
    pub fn add_with_sources(&mut self, kind: ModuleKind, sources: &[ModuleId]) -> Result<ModuleId> {
        let id = self.add(kind)?;
        self.set_sources(id, sources)?;
        Ok(id)
    }

    /// Unsets `slot` of `module`.
    pub fn clear_source(&mut self, module: ModuleId, slot: usize) -> Result<()> {
        let slot_ref = self.slot_mut(module, slot)?;
        *slot_ref = None;
        self.clear_caches();
        Ok(())
    }

    /// Returns the module connected to `slot`, or [`Error::NoModule`] if it is unset.
    pub fn source(&self, module: ModuleId, slot: usize) -> Result<ModuleId> {
        let node = self.node(module)?;
        match node.sources.get(slot) {
            Some(Some(source)) => Ok(*source),
            Some(None) => Err(Error::NoModule { module, slot }),
            None => Err(Error::SlotOutOfRange {
                module,
                slot,
                arity: node.sources.len(),
            }),
        }
    }

    pub fn kind(&self, module: ModuleId) -> Result<&ModuleKind> {
        Ok(&self.node(module)?.kind)
    }

    pub fn arity(&self, module: ModuleId) -> Result<usize> {
        Ok(self.node(module)?.sources.len())
    }

    /// Forgets every cache module's memo.
    pub fn clear_caches(&self) {
        for node in &self.nodes {
            node.memo.clear();
        }
    }

    /// Compiles the subgraph reachable from `root` into an evaluable program.
    pub fn compile(&self, root: ModuleId, opts: &CompileOptions) -> Result<NoiseProgram<'_>> {
        GraphCompiler::compile(self, root, opts)
    }

    /// Evaluates `module` at one point, compiling it first.
    pub fn get_value(&self, module: ModuleId, x: f64, y: f64, z: f64) -> Result<f64> {
        let program = self.compile(module, &CompileOptions::default())?;
        Ok(program.sample(x, y, z))
    }

    pub(crate) fn node(&self, module: ModuleId) -> Result<&Node> {
        self.nodes
            .get(module.0)
            .ok_or(Error::UnknownModule { module })
    }

    fn node_mut(&mut self, module: ModuleId) -> Result<&mut Node> {
        self.nodes
            .get_mut(module.0)
            .ok_or(Error::UnknownModule { module })
    }

    fn slot_mut(&mut self, module: ModuleId, slot: usize) -> Result<&mut Option<ModuleId>> {
        let node = self.node_mut(module)?;
        let arity = node.sources.len();
        node.sources
            .get_mut(slot)
            .ok_or(Error::SlotOutOfRange {
                module,
                slot,
                arity,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::FractalParams;

    #[test]
    fn add_issues_sequential_ids() {
        let mut graph = ModuleGraph::new();
        let a = graph.add(ModuleKind::constant(1.0)).unwrap();
        let b = graph.add(ModuleKind::Abs).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.arity(b).unwrap(), 1);
        assert_eq!(b.to_string(), "#1");
    }

    #[test]
    fn add_rejects_invalid_parameters() {
        let mut graph = ModuleGraph::new();
        let err = graph.add(ModuleKind::clamp(2.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(graph.is_empty());
    }

    #[test]
    fn slot_out_of_range_is_reported() {
        let mut graph = ModuleGraph::new();
        let c = graph.add(ModuleKind::constant(1.0)).unwrap();
        let abs = graph.add(ModuleKind::Abs).unwrap();
        let err = graph.set_source(abs, 1, c).unwrap_err();
        assert!(matches!(
            err,
            Error::SlotOutOfRange {
                slot: 1,
                arity: 1,
                ..
            }
        ));
    }

    #[test]
    fn self_reference_is_rejected() {
        let mut graph = ModuleGraph::new();
        let abs = graph.add(ModuleKind::Abs).unwrap();
        let err = graph.set_source(abs, 0, abs).unwrap_err();
        assert!(matches!(err, Error::SelfReference { module } if module == abs));
    }

    #[test]
    fn unknown_source_is_rejected() {
        let mut graph = ModuleGraph::new();
        let abs = graph.add(ModuleKind::Abs).unwrap();
        let err = graph.set_source(abs, 0, ModuleId(7)).unwrap_err();
        assert!(matches!(err, Error::UnknownModule { .. }));
    }

    #[test]
    fn reassigning_a_slot_leaves_others_untouched() {
        let mut graph = ModuleGraph::new();
        let one = graph.add(ModuleKind::constant(1.0)).unwrap();
        let two = graph.add(ModuleKind::constant(2.0)).unwrap();
        let three = graph.add(ModuleKind::constant(3.0)).unwrap();
        let sub = graph.add_with_sources(ModuleKind::Subtract, &[one, two]).unwrap();
        assert_eq!(graph.get_value(sub, 0.0, 0.0, 0.0).unwrap(), -1.0);

        graph.set_source(sub, 0, three).unwrap();
        assert_eq!(graph.source(sub, 0).unwrap(), three);
        assert_eq!(graph.source(sub, 1).unwrap(), two);
        assert_eq!(graph.get_value(sub, 0.0, 0.0, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn unset_slot_surfaces_on_evaluation() {
        let mut graph = ModuleGraph::new();
        let c = graph.add(ModuleKind::constant(1.0)).unwrap();
        let add = graph.add(ModuleKind::Add).unwrap();
        graph.set_source(add, 0, c).unwrap();

        assert!(matches!(
            graph.source(add, 1),
            Err(Error::NoModule { slot: 1, .. })
        ));
        let err = graph.get_value(add, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::NoModule { module, slot: 1 } if module == add));
    }

    #[test]
    fn clear_source_unsets_slot() {
        let mut graph = ModuleGraph::new();
        let c = graph.add(ModuleKind::constant(1.0)).unwrap();
        let abs = graph.add_with_sources(ModuleKind::Abs, &[c]).unwrap();
        graph.clear_source(abs, 0).unwrap();
        assert!(graph.get_value(abs, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn replace_keeps_sources_for_same_arity() {
        let mut graph = ModuleGraph::new();
        let c = graph.add(ModuleKind::constant(-2.0)).unwrap();
        let m = graph.add_with_sources(ModuleKind::Abs, &[c]).unwrap();
        assert_eq!(graph.get_value(m, 0.0, 0.0, 0.0).unwrap(), 2.0);

        graph.replace(m, ModuleKind::Invert).unwrap();
        assert_eq!(graph.get_value(m, 0.0, 0.0, 0.0).unwrap(), 2.0);
        assert_eq!(graph.kind(m).unwrap().name(), "Invert");

        graph.replace(m, ModuleKind::Add).unwrap();
        assert!(matches!(
            graph.source(m, 0),
            Err(Error::NoModule { slot: 0, .. })
        ));

        graph
            .replace(m, ModuleKind::perlin(FractalParams::default()))
            .unwrap();
        assert_eq!(graph.arity(m).unwrap(), 0);
        assert!(graph.get_value(m, 0.1, 0.2, 0.3).is_ok());
    }
}
