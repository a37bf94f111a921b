#![forbid(unsafe_code)]
//! noise_graph: Coherent noise synthesis from composable module graphs, with parallel grid building.
//!
//! Modules:
//! - kernel: deterministic lattice hashing, value/gradient noise and interpolation curves
//! - modules: the module catalog (generators, modifiers, combiners, selectors, transformers, cache)
//! - graph: author module DAGs, compile a root into a program, evaluate it
//! - grid: dense `NoiseMap`/`NoiseCube` containers and trilinear resampling
//! - builder: plane/cylinder/sphere projections and the parallel map and cube builders
//!
//! For examples and docs, see README and docs.rs.
pub mod builder;
pub mod error;
pub mod graph;
pub mod grid;
pub mod kernel;
pub mod modules;

/// Convenient re-exports for common types. Import with `use noise_graph::prelude::*;`.
pub mod prelude {
    pub use crate::builder::{
        build_cube, build_map, Bounds, CancelToken, CubeBuilderConfig, CylinderProjection,
        FillMode, MapBuilderConfig, NoiseCubeBuilder, NoiseMapBuilder, PlaneProjection,
        Projection, SphereProjection, VolumeBounds,
    };
    pub use crate::error::{Error, Result};
    pub use crate::graph::{CompileOptions, GraphCompiler, ModuleGraph, ModuleId, NoiseProgram};
    pub use crate::grid::{NoiseCube, NoiseMap, ResampleFilter};
    pub use crate::kernel::NoiseQuality;
    pub use crate::modules::{
        CellFunction, ClampParams, ControlPoint, CurveParams, ExponentParams, ExternalFn,
        FractalParams, ModuleKind, NoiseFn, RidgedMultiParams, RotatePointParams,
        ScaleBiasParams, ScalePointParams, SelectParams, ShellParams, TerraceParams,
        TranslatePointParams, TurbulenceParams, VoronoiParams, WhiteParams,
    };
}
