//! Trilinear resampling between dense containers.
//!
//! Destination cell `i` of `n` reads the source at fractional index `(i + 0.5) * m / n - 0.5`,
//! so cell centres line up between resolutions. The two neighbouring source cells per axis are
//! blended linearly; without clamping, neighbours outside the source read its border value.
use tracing::debug;

use crate::builder::{fill_chunks, FillMode};
use crate::grid::{NoiseCube, NoiseMap};
use crate::kernel::linear;

#[derive(Clone, Copy, Debug)]
struct Tap {
    lo: isize,
    hi: isize,
    t: f64,
}

impl Tap {
    fn new(index: usize, src_len: usize, dst_len: usize, clamp: bool) -> Self {
        let u = (index as f64 + 0.5) * src_len as f64 / dst_len as f64 - 0.5;
        let base = u.floor();
        let mut lo = base as isize;
        let mut hi = lo + 1;
        if clamp {
            let max = src_len as isize - 1;
            lo = lo.clamp(0, max);
            hi = hi.clamp(0, max);
        }
        Self { lo, hi, t: u - base }
    }

    fn axis(src_len: usize, dst_len: usize, clamp: bool) -> Vec<Tap> {
        (0..dst_len)
            .map(|i| Tap::new(i, src_len, dst_len, clamp))
            .collect()
    }
}

/// Trilinear up/down-sampling filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResampleFilter {
    /// Clamp neighbour indices into the source instead of reading its border value.
    pub clamp: bool,
    pub fill_mode: FillMode,
}

impl ResampleFilter {
    pub fn new(clamp: bool) -> Self {
        Self {
            clamp,
            fill_mode: FillMode::default(),
        }
    }

    /// Sets how rows or slices are scheduled.
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Resamples `src` to `width` x `height` x `depth`.
    ///
    /// A zero target dimension yields an empty cube; an empty source yields a cube filled with
    /// the source's border value. The border value carries over.
    pub fn resample_cube(&self, src: &NoiseCube, width: usize, height: usize, depth: usize) -> NoiseCube {
        let mut dst = NoiseCube::new(width, height, depth);
        dst.set_border_value(src.border_value());
        if dst.is_empty() {
            return dst;
        }
        if src.is_empty() {
            dst.clear(src.border_value());
            return dst;
        }

        debug!(
            "Resampling cube {:?} -> {:?} (clamp: {}).",
            src.size(),
            dst.size(),
            self.clamp
        );
        let xs = Tap::axis(src.width(), width, self.clamp);
        let ys = Tap::axis(src.height(), height, self.clamp);
        let zs = Tap::axis(src.depth(), depth, self.clamp);
        let get = |x: isize, y: isize, z: isize| src.get(x, y, z) as f64;

        let slice_len = dst.slice_len();
        let filled = fill_chunks(dst.as_mut_slice(), slice_len, self.fill_mode, None, |z, cells| {
            let tz = zs[z];
            for (i, cell) in cells.iter_mut().enumerate() {
                let tx = xs[i % width];
                let ty = ys[i / width];

                let plane = |zi: isize| {
                    let lo = linear(get(tx.lo, ty.lo, zi), get(tx.hi, ty.lo, zi), tx.t);
                    let hi = linear(get(tx.lo, ty.hi, zi), get(tx.hi, ty.hi, zi), tx.t);
                    linear(lo, hi, ty.t)
                };
                *cell = linear(plane(tz.lo), plane(tz.hi), tz.t) as f32;
            }
        });
        debug_assert!(filled.is_ok(), "uncancellable fill cannot fail");
        dst
    }

    /// Resamples `src` to `width` x `height`; see [`ResampleFilter::resample_cube`].
    pub fn resample_map(&self, src: &NoiseMap, width: usize, height: usize) -> NoiseMap {
        let mut dst = NoiseMap::new(width, height);
        dst.set_border_value(src.border_value());
        if dst.is_empty() {
            return dst;
        }
        if src.is_empty() {
            dst.clear(src.border_value());
            return dst;
        }

        debug!(
            "Resampling map {:?} -> {:?} (clamp: {}).",
            src.size(),
            dst.size(),
            self.clamp
        );
        let xs = Tap::axis(src.width(), width, self.clamp);
        let ys = Tap::axis(src.height(), height, self.clamp);
        let get = |x: isize, y: isize| src.get(x, y) as f64;

        let filled = fill_chunks(dst.as_mut_slice(), width, self.fill_mode, None, |y, cells| {
            let ty = ys[y];
            for (tx, cell) in xs.iter().zip(cells.iter_mut()) {
                let lo = linear(get(tx.lo, ty.lo), get(tx.hi, ty.lo), tx.t);
                let hi = linear(get(tx.lo, ty.hi), get(tx.hi, ty.hi), tx.t);
                *cell = linear(lo, hi, ty.t) as f32;
            }
        });
        debug_assert!(filled.is_ok(), "uncancellable fill cannot fail");
        dst
    }
}

impl NoiseMap {
    /// Resamples `src` to a new resolution with a trilinear filter.
    pub fn resample(src: &NoiseMap, width: usize, height: usize, clamp: bool) -> NoiseMap {
        ResampleFilter::new(clamp).resample_map(src, width, height)
    }
}

impl NoiseCube {
    /// Resamples `src` to a new resolution with a trilinear filter.
    pub fn resample(
        src: &NoiseCube,
        width: usize,
        height: usize,
        depth: usize,
        clamp: bool,
    ) -> NoiseCube {
        ResampleFilter::new(clamp).resample_cube(src, width, height, depth)
    }
}
