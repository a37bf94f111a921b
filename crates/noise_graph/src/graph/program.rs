//! Executable form of a compiled module graph.
use crate::graph::{ModuleGraph, ModuleId};
use crate::modules::{blend, checkerboard, ModuleKind, NoiseFn};

/// A compiled, validated view of the subgraph under one root module.
///
/// Sampling is total: every source slot reachable from the root was checked at compile time.
/// The program borrows its graph, so the graph cannot be rewired while a program is alive.
#[derive(Clone, Debug)]
pub struct NoiseProgram<'g> {
    graph: &'g ModuleGraph,
    root: ModuleId,
    inputs: Vec<Box<[ModuleId]>>,
}

impl<'g> NoiseProgram<'g> {
    pub(crate) fn new(graph: &'g ModuleGraph, root: ModuleId, inputs: Vec<Box<[ModuleId]>>) -> Self {
        Self {
            graph,
            root,
            inputs,
        }
    }

    pub fn root(&self) -> ModuleId {
        self.root
    }

    pub fn graph(&self) -> &'g ModuleGraph {
        self.graph
    }

    /// Evaluates the root module at `(x, y, z)`.
    #[inline]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.eval(self.root, x, y, z)
    }

    /// Evaluates the root module at a point given as any mint-compatible vector
    /// (`glam::DVec3`, `[f64; 3]`, ...).
    pub fn sample_point(&self, point: impl Into<mint::Vector3<f64>>) -> f64 {
        let p = point.into();
        self.sample(p.x, p.y, p.z)
    }

    fn eval(&self, id: ModuleId, x: f64, y: f64, z: f64) -> f64 {
        let node = &self.graph.nodes[id.0];
        let src = &self.inputs[id.0];
        let input = |slot: usize| self.eval(src[slot], x, y, z);

        match &node.kind {
            ModuleKind::Constant { params } => params.value,
            ModuleKind::Perlin { params } => params.perlin(x, y, z),
            ModuleKind::Billow { params } => params.billow(x, y, z),
            ModuleKind::RidgedMulti { params } => params.value(x, y, z),
            ModuleKind::Voronoi { params } => params.value(x, y, z),
            ModuleKind::White { params } => params.value(x, y, z),
            ModuleKind::Checkerboard => checkerboard(x, y, z),
            ModuleKind::Cylinders { params } => params.cylinders(x, y, z),
            ModuleKind::Spheres { params } => params.spheres(x, y, z),
            ModuleKind::Function { function } => function.sample(x, y, z),

            ModuleKind::Abs => input(0).abs(),
            ModuleKind::Invert => -input(0),
            ModuleKind::Clamp { params } => params.apply(input(0)),
            ModuleKind::ScaleBias { params } => params.apply(input(0)),
            ModuleKind::Curve { params } => params.apply(input(0)),
            ModuleKind::Exponent { params } => params.apply(input(0)),
            ModuleKind::Terrace { params } => params.apply(input(0)),

            ModuleKind::Add => input(0) + input(1),
            ModuleKind::Subtract => input(0) - input(1),
            ModuleKind::Multiply => input(0) * input(1),
            ModuleKind::Max => input(0).max(input(1)),
            ModuleKind::Min => input(0).min(input(1)),
            ModuleKind::Power => input(0).powf(input(1)),

            ModuleKind::Blend => blend(input(0), input(1), input(2)),
            ModuleKind::Select { params } => params.select(input(2), || input(0), || input(1)),

            ModuleKind::RotatePoint { params } => {
                let (x, y, z) = params.apply(x, y, z);
                self.eval(src[0], x, y, z)
            }
            ModuleKind::ScalePoint { params } => {
                let (x, y, z) = params.apply(x, y, z);
                self.eval(src[0], x, y, z)
            }
            ModuleKind::TranslatePoint { params } => {
                let (x, y, z) = params.apply(x, y, z);
                self.eval(src[0], x, y, z)
            }
            ModuleKind::Turbulence { params } => {
                let (x, y, z) = params.apply(x, y, z);
                self.eval(src[0], x, y, z)
            }
            ModuleKind::Displace => {
                let (dx, dy, dz) = (input(1), input(2), input(3));
                self.eval(src[0], x + dx, y + dy, z + dz)
            }

            ModuleKind::Cache => node.memo.get_or_compute(x, y, z, || input(0)),
        }
    }
}

impl NoiseFn for NoiseProgram<'_> {
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        NoiseProgram::sample(self, x, y, z)
    }
}
