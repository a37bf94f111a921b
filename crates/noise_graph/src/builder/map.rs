//! 2D map builder.
use tracing::{debug, warn};

use crate::builder::{fill_chunks, CancelToken, FillMode, Projection};
use crate::error::{Error, Result};
use crate::graph::{CompileOptions, ModuleGraph, ModuleId};
use crate::grid::NoiseMap;
use crate::modules::NoiseFn;

/// Configuration for building a [`NoiseMap`].
#[derive(Clone, Debug, PartialEq)]
pub struct MapBuilderConfig {
    /// Output width in cells.
    pub width: usize,
    /// Output height in cells.
    pub height: usize,
    /// Mapping from cells to sample points.
    pub projection: Projection,
    /// Row scheduling.
    pub fill_mode: FillMode,
}

impl MapBuilderConfig {
    /// Creates a configuration for a `width` x `height` map over `projection`.
    pub fn new(width: usize, height: usize, projection: impl Into<Projection>) -> Self {
        Self {
            width,
            height,
            projection: projection.into(),
            fill_mode: FillMode::default(),
        }
    }

    /// Sets the projection.
    pub fn with_projection(mut self, projection: impl Into<Projection>) -> Self {
        self.projection = projection.into();
        self
    }

    /// Sets how rows or slices are scheduled.
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "map size must be > 0 in both dimensions, got {}x{}",
                self.width, self.height
            )));
        }
        self.projection.validate()
    }
}

/// Fills a [`NoiseMap`] by sampling a noise function under a projection.
pub struct NoiseMapBuilder<'a, F: NoiseFn + ?Sized> {
    /// Build configuration.
    pub config: MapBuilderConfig,
    source: &'a F,
    cancel: Option<CancelToken>,
}

impl<'a, F: NoiseFn + ?Sized> NoiseMapBuilder<'a, F> {
    pub fn try_new(config: MapBuilderConfig, source: &'a F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            cancel: None,
        })
    }

    pub fn new(config: MapBuilderConfig, source: &'a F) -> Self {
        debug_assert!(
            config.width > 0 && config.height > 0,
            "map size must be > 0 in both dimensions"
        );
        debug_assert!(
            config.projection.validate().is_ok(),
            "projection ranges must be valid"
        );
        Self {
            config,
            source,
            cancel: None,
        }
    }

    /// Attaches a cancellation token checked before each row.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds a new map.
    pub fn build(&self) -> Result<NoiseMap> {
        let mut map = NoiseMap::empty();
        self.build_into(&mut map)?;
        Ok(map)
    }

    /// Builds into `map`, resizing it to the configured size. The border value is kept.
    pub fn build_into(&self, map: &mut NoiseMap) -> Result<()> {
        self.config.validate()?;
        let MapBuilderConfig {
            width,
            height,
            projection,
            fill_mode,
        } = self.config;

        debug!(
            "Building {}x{} noise map ({:?}).",
            width, height, fill_mode
        );
        map.set_size(width, height);

        let source = self.source;
        let result = fill_chunks(
            map.as_mut_slice(),
            width,
            fill_mode,
            self.cancel.as_ref(),
            |row, cells| {
                for (col, cell) in cells.iter_mut().enumerate() {
                    *cell = projection.sample(source, col, row, width, height) as f32;
                }
            },
        );

        match result {
            Ok(()) => {
                debug!("Finished {}x{} noise map.", width, height);
                Ok(())
            }
            Err(err) => {
                warn!("Noise map build stopped: {}.", err);
                Err(err)
            }
        }
    }
}

/// Compiles `root` and builds a map from it.
pub fn build_map(graph: &ModuleGraph, root: ModuleId, config: MapBuilderConfig) -> Result<NoiseMap> {
    let program = graph.compile(root, &CompileOptions::default())?;
    NoiseMapBuilder::try_new(config, &program)?.build()
}
