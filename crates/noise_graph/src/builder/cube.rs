//! 3D cube builder.
use tracing::{debug, warn};

use crate::builder::{fill_chunks, CancelToken, FillMode, VolumeBounds};
use crate::error::{Error, Result};
use crate::graph::{CompileOptions, ModuleGraph, ModuleId};
use crate::grid::NoiseCube;
use crate::modules::NoiseFn;

/// Configuration for building a [`NoiseCube`].
#[derive(Clone, Debug, PartialEq)]
pub struct CubeBuilderConfig {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    /// Box swept by the cube, one [`crate::builder::Bounds`] per axis.
    pub bounds: VolumeBounds,
    /// Slice scheduling.
    pub fill_mode: FillMode,
}

impl CubeBuilderConfig {
    pub fn new(width: usize, height: usize, depth: usize, bounds: VolumeBounds) -> Self {
        Self {
            width,
            height,
            depth,
            bounds,
            fill_mode: FillMode::default(),
        }
    }

    /// Sets how rows or slices are scheduled.
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(Error::InvalidConfig(format!(
                "cube size must be > 0 in every dimension, got {}x{}x{}",
                self.width, self.height, self.depth
            )));
        }
        self.bounds.validate()
    }
}

/// Fills a [`NoiseCube`] by sampling a noise function over a box, one depth slice per task.
pub struct NoiseCubeBuilder<'a, F: NoiseFn + ?Sized> {
    pub config: CubeBuilderConfig,
    source: &'a F,
    cancel: Option<CancelToken>,
}

impl<'a, F: NoiseFn + ?Sized> NoiseCubeBuilder<'a, F> {
    pub fn try_new(config: CubeBuilderConfig, source: &'a F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            cancel: None,
        })
    }

    pub fn new(config: CubeBuilderConfig, source: &'a F) -> Self {
        debug_assert!(
            config.width > 0 && config.height > 0 && config.depth > 0,
            "cube size must be > 0 in every dimension"
        );
        debug_assert!(config.bounds.validate().is_ok(), "volume bounds must be valid");
        Self {
            config,
            source,
            cancel: None,
        }
    }

    /// Attaches a cancellation token checked before each slice.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(&self) -> Result<NoiseCube> {
        let mut cube = NoiseCube::empty();
        self.build_into(&mut cube)?;
        Ok(cube)
    }

    /// Builds into `cube`, resizing it to the configured size.
    pub fn build_into(&self, cube: &mut NoiseCube) -> Result<()> {
        self.config.validate()?;
        let CubeBuilderConfig {
            width,
            height,
            depth,
            bounds,
            fill_mode,
        } = self.config;
        let size = (width, height, depth);

        debug!(
            "Building {}x{}x{} noise cube ({:?}).",
            width, height, depth, fill_mode
        );
        cube.set_size(width, height, depth);
        let slice_len = cube.slice_len();

        let source = self.source;
        let result = fill_chunks(
            cube.as_mut_slice(),
            slice_len,
            fill_mode,
            self.cancel.as_ref(),
            |z, cells| {
                for (i, cell) in cells.iter_mut().enumerate() {
                    let [px, py, pz] = bounds.point(i % width, i / width, z, size);
                    *cell = source.sample(px, py, pz) as f32;
                }
            },
        );

        if let Err(err) = &result {
            warn!("Noise cube build stopped: {}.", err);
        } else {
            debug!("Finished {}x{}x{} noise cube.", width, height, depth);
        }
        result
    }
}

/// Compiles `root` and builds a cube from it.
pub fn build_cube(
    graph: &ModuleGraph,
    root: ModuleId,
    config: CubeBuilderConfig,
) -> Result<NoiseCube> {
    let program = graph.compile(root, &CompileOptions::default())?;
    NoiseCubeBuilder::try_new(config, &program)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Bounds;
    use crate::modules::{ModuleKind, VoronoiParams};

    fn unit_box() -> VolumeBounds {
        VolumeBounds::new(
            Bounds::new(0.0, 2.0),
            Bounds::new(0.0, 3.0),
            Bounds::new(0.0, 4.0),
        )
    }

    #[test]
    fn cells_map_to_volume_points() {
        let source = |x: f64, y: f64, z: f64| x + 10.0 * y + 100.0 * z;
        let cube = NoiseCubeBuilder::try_new(CubeBuilderConfig::new(2, 3, 4, unit_box()), &source)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(cube.size(), (2, 3, 4));
        assert_eq!(cube.get(0, 0, 0), 0.0);
        assert_eq!(cube.get(1, 2, 3), 321.0);
    }

    #[test]
    fn parallel_and_sequential_are_identical() {
        let mut graph = ModuleGraph::new();
        let root = graph
            .add(ModuleKind::voronoi(VoronoiParams::default().with_seed(11)))
            .unwrap();
        let config = CubeBuilderConfig::new(9, 7, 5, unit_box());
        let parallel = build_cube(&graph, root, config.clone()).unwrap();
        let sequential =
            build_cube(&graph, root, config.with_fill_mode(FillMode::Sequential)).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let source = |_x: f64, _y: f64, _z: f64| 0.0;
        let result = NoiseCubeBuilder::try_new(CubeBuilderConfig::new(2, 2, 0, unit_box()), &source);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
