//! Bulk sampling of noise functions into dense containers.
//!
//! Builders project grid indices through a [`Projection`] (or a [`VolumeBounds`] for cubes) and
//! evaluate a [`crate::modules::NoiseFn`] once per cell. Rows (maps) or depth slices (cubes) are
//! independent, so they are filled in parallel with `rayon` unless [`FillMode::Sequential`] is
//! requested. Both modes produce bit-identical output.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod cube;
pub mod map;
pub mod projection;

pub use cube::{build_cube, CubeBuilderConfig, NoiseCubeBuilder};
pub use map::{build_map, MapBuilderConfig, NoiseMapBuilder};
pub use projection::{
    Bounds, CylinderProjection, PlaneProjection, Projection, SphereProjection, VolumeBounds,
};

/// How a builder distributes rows or slices over threads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// Fork-join over the rayon thread pool.
    #[default]
    Parallel,
    /// Single thread, in row order.
    Sequential,
}

/// Cooperative cancellation flag shared between a caller and running builds.
///
/// Builders check it before each row or slice; once set, the build stops and returns
/// [`Error::Cancelled`].
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fills `data` in chunks of `chunk_len`, calling `fill(chunk_index, chunk)` for each.
pub(crate) fn fill_chunks<F>(
    data: &mut [f32],
    chunk_len: usize,
    mode: FillMode,
    cancel: Option<&CancelToken>,
    fill: F,
) -> Result<()>
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    if chunk_len == 0 {
        return Ok(());
    }

    let run = |(index, chunk): (usize, &mut [f32])| -> Result<()> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(Error::Cancelled);
        }
        fill(index, chunk);
        Ok(())
    };

    match mode {
        FillMode::Parallel => data.par_chunks_mut(chunk_len).enumerate().try_for_each(run),
        FillMode::Sequential => data.chunks_mut(chunk_len).enumerate().try_for_each(run),
    }
}
