//! Module catalog: the closed set of node kinds a [`crate::graph::ModuleGraph`] can hold.
//!
//! Each [`ModuleKind`] carries its own parameters and has a fixed arity, the number of source
//! slots it reads. Generators have none; modifiers and transformers read one; combiners two;
//! selectors three (two values and a control); displace four.
pub mod cache;
pub mod function;
pub mod generator;
pub mod modifier;
pub mod selector;
pub mod transformer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use cache::CacheMemo;
pub use function::{ExternalFn, NoiseFn};
pub use generator::{
    checkerboard, CellFunction, ConstParams, FractalParams, RidgedMultiParams, ShellParams,
    VoronoiParams, WhiteParams, MAX_OCTAVES,
};
pub use modifier::{
    ClampParams, ControlPoint, CurveParams, ExponentParams, ScaleBiasParams, TerraceParams,
};
pub use selector::{blend, SelectParams};
pub use transformer::{
    RotatePointParams, ScalePointParams, TranslatePointParams, TurbulenceParams,
};

use crate::error::Result;

/// Kind and parameters of a module in the graph.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub enum ModuleKind {
    Constant {
        params: ConstParams,
    },
    Perlin {
        params: FractalParams,
    },
    Billow {
        params: FractalParams,
    },
    RidgedMulti {
        params: RidgedMultiParams,
    },
    Voronoi {
        params: VoronoiParams,
    },
    White {
        params: WhiteParams,
    },
    Checkerboard,
    Cylinders {
        params: ShellParams,
    },
    Spheres {
        params: ShellParams,
    },
    /// Caller-defined field; not serializable.
    #[cfg_attr(feature = "serde", serde(skip))]
    Function {
        function: ExternalFn,
    },

    Abs,
    Invert,
    Clamp {
        params: ClampParams,
    },
    ScaleBias {
        params: ScaleBiasParams,
    },
    Curve {
        params: CurveParams,
    },
    Exponent {
        params: ExponentParams,
    },
    Terrace {
        params: TerraceParams,
    },

    Add,
    Subtract,
    Multiply,
    Max,
    Min,
    /// Source 0 raised to the power of source 1.
    Power,

    /// Sources 0 and 1 weighted by control source 2.
    Blend,
    /// Source 0 or 1 chosen by control source 2.
    Select {
        params: SelectParams,
    },

    RotatePoint {
        params: RotatePointParams,
    },
    ScalePoint {
        params: ScalePointParams,
    },
    TranslatePoint {
        params: TranslatePointParams,
    },
    Turbulence {
        params: TurbulenceParams,
    },
    /// Source 0 sampled at the input offset by sources 1, 2 and 3.
    Displace,

    /// Single-entry memo in front of source 0.
    Cache,
}

impl ModuleKind {
    /// Number of source slots this kind reads.
    pub fn arity(&self) -> usize {
        match self {
            ModuleKind::Constant { .. }
            | ModuleKind::Perlin { .. }
            | ModuleKind::Billow { .. }
            | ModuleKind::RidgedMulti { .. }
            | ModuleKind::Voronoi { .. }
            | ModuleKind::White { .. }
            | ModuleKind::Checkerboard
            | ModuleKind::Cylinders { .. }
            | ModuleKind::Spheres { .. }
            | ModuleKind::Function { .. } => 0,
            ModuleKind::Abs
            | ModuleKind::Invert
            | ModuleKind::Clamp { .. }
            | ModuleKind::ScaleBias { .. }
            | ModuleKind::Curve { .. }
            | ModuleKind::Exponent { .. }
            | ModuleKind::Terrace { .. }
            | ModuleKind::RotatePoint { .. }
            | ModuleKind::ScalePoint { .. }
            | ModuleKind::TranslatePoint { .. }
            | ModuleKind::Turbulence { .. }
            | ModuleKind::Cache => 1,
            ModuleKind::Add
            | ModuleKind::Subtract
            | ModuleKind::Multiply
            | ModuleKind::Max
            | ModuleKind::Min
            | ModuleKind::Power => 2,
            ModuleKind::Blend | ModuleKind::Select { .. } => 3,
            ModuleKind::Displace => 4,
        }
    }

    /// Human-readable kind name.
    pub fn name(&self) -> &'static str {
        match self {
            ModuleKind::Constant { .. } => "Constant",
            ModuleKind::Perlin { .. } => "Perlin",
            ModuleKind::Billow { .. } => "Billow",
            ModuleKind::RidgedMulti { .. } => "RidgedMulti",
            ModuleKind::Voronoi { .. } => "Voronoi",
            ModuleKind::White { .. } => "White",
            ModuleKind::Checkerboard => "Checkerboard",
            ModuleKind::Cylinders { .. } => "Cylinders",
            ModuleKind::Spheres { .. } => "Spheres",
            ModuleKind::Function { .. } => "Function",
            ModuleKind::Abs => "Abs",
            ModuleKind::Invert => "Invert",
            ModuleKind::Clamp { .. } => "Clamp",
            ModuleKind::ScaleBias { .. } => "ScaleBias",
            ModuleKind::Curve { .. } => "Curve",
            ModuleKind::Exponent { .. } => "Exponent",
            ModuleKind::Terrace { .. } => "Terrace",
            ModuleKind::Add => "Add",
            ModuleKind::Subtract => "Subtract",
            ModuleKind::Multiply => "Multiply",
            ModuleKind::Max => "Max",
            ModuleKind::Min => "Min",
            ModuleKind::Power => "Power",
            ModuleKind::Blend => "Blend",
            ModuleKind::Select { .. } => "Select",
            ModuleKind::RotatePoint { .. } => "RotatePoint",
            ModuleKind::ScalePoint { .. } => "ScalePoint",
            ModuleKind::TranslatePoint { .. } => "TranslatePoint",
            ModuleKind::Turbulence { .. } => "Turbulence",
            ModuleKind::Displace => "Displace",
            ModuleKind::Cache => "Cache",
        }
    }

    /// Validates parameters, returning the kind in canonical form (sorted control points,
    /// clamped select falloff).
    pub(crate) fn normalized(self) -> Result<Self> {
        Ok(match self {
            ModuleKind::Perlin { params } => {
                params.validate("Perlin")?;
                ModuleKind::Perlin { params }
            }
            ModuleKind::Billow { params } => {
                params.validate("Billow")?;
                ModuleKind::Billow { params }
            }
            ModuleKind::RidgedMulti { params } => {
                params.validate()?;
                ModuleKind::RidgedMulti { params }
            }
            ModuleKind::White { params } => {
                params.validate()?;
                ModuleKind::White { params }
            }
            ModuleKind::Clamp { params } => {
                params.validate()?;
                ModuleKind::Clamp { params }
            }
            ModuleKind::Curve { params } => ModuleKind::Curve {
                params: params.normalized()?,
            },
            ModuleKind::Terrace { params } => ModuleKind::Terrace {
                params: params.normalized()?,
            },
            ModuleKind::Select { params } => ModuleKind::Select {
                params: params.normalized()?,
            },
            ModuleKind::Turbulence { params } => {
                params.validate()?;
                ModuleKind::Turbulence { params }
            }
            other => other,
        })
    }

    /// Creates a constant module.
    pub fn constant(value: f64) -> Self {
        ModuleKind::Constant {
            params: ConstParams { value },
        }
    }

    /// Creates a Perlin module with the given parameters.
    pub fn perlin(params: FractalParams) -> Self {
        ModuleKind::Perlin { params }
    }

    /// Creates a billow module with the given parameters.
    pub fn billow(params: FractalParams) -> Self {
        ModuleKind::Billow { params }
    }

    /// Creates a ridged multifractal module with the given parameters.
    pub fn ridged_multi(params: RidgedMultiParams) -> Self {
        ModuleKind::RidgedMulti { params }
    }

    /// Creates a Voronoi module with the given parameters.
    pub fn voronoi(params: VoronoiParams) -> Self {
        ModuleKind::Voronoi { params }
    }

    /// Creates a leaf backed by a closure. Other [`NoiseFn`] implementors go through
    /// [`ExternalFn::new`] and the `Function` variant directly.
    pub fn function<F>(function: F) -> Self
    where
        F: Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
    {
        ModuleKind::Function {
            function: ExternalFn::new(function),
        }
    }

    /// Creates a clamp module.
    pub fn clamp(lower: f64, upper: f64) -> Self {
        ModuleKind::Clamp {
            params: ClampParams { lower, upper },
        }
    }

    /// Creates a scale-bias module.
    pub fn scale_bias(scale: f64, bias: f64) -> Self {
        ModuleKind::ScaleBias {
            params: ScaleBiasParams { scale, bias },
        }
    }

    /// Creates a select module.
    pub fn select(lower: f64, upper: f64, edge_falloff: f64) -> Self {
        ModuleKind::Select {
            params: SelectParams::new(lower, upper).with_edge_falloff(edge_falloff),
        }
    }

    /// Creates a translate-point module.
    pub fn translate(x: f64, y: f64, z: f64) -> Self {
        ModuleKind::TranslatePoint {
            params: TranslatePointParams::new(x, y, z),
        }
    }

    /// Creates a rotate-point module, angles in degrees.
    pub fn rotate(x_angle: f64, y_angle: f64, z_angle: f64) -> Self {
        ModuleKind::RotatePoint {
            params: RotatePointParams::new(x_angle, y_angle, z_angle),
        }
    }
}
