//! Lattice hashing, value noise and gradient noise.
//!
//! All hashing uses wrapping 32-bit integer arithmetic, so results are bit-identical on every
//! platform for a given lattice point and seed.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::interp::{linear, s_curve3, s_curve5};
use super::{fast_floor, make_int32_range};

const X_NOISE_GEN: i32 = 1619;
const Y_NOISE_GEN: i32 = 31337;
const Z_NOISE_GEN: i32 = 6971;
const SEED_NOISE_GEN: i32 = 1013;
const SHIFT_NOISE_GEN: u32 = 8;

/// Keeps the magnitude of [`gradient_coherent_noise_3d`] below 1 for every gradient assignment.
const GRADIENT_SCALE: f64 = 1.3;

/// Unit gradients: the twelve cube-edge directions, four of them repeated to fill 16 slots.
const GRADIENTS: [[f64; 3]; 16] = {
    const H: f64 = std::f64::consts::FRAC_1_SQRT_2;
    [
        [H, H, 0.0],
        [-H, H, 0.0],
        [H, -H, 0.0],
        [-H, -H, 0.0],
        [H, 0.0, H],
        [-H, 0.0, H],
        [H, 0.0, -H],
        [-H, 0.0, -H],
        [0.0, H, H],
        [0.0, -H, H],
        [0.0, H, -H],
        [0.0, -H, -H],
        [H, H, 0.0],
        [0.0, -H, H],
        [-H, H, 0.0],
        [0.0, -H, -H],
    ]
};

/// Interpolation quality used when blending lattice samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NoiseQuality {
    /// Linear weights; visible creases at lattice boundaries.
    Fast,
    /// Cubic S-curve weights.
    #[default]
    Standard,
    /// Quintic S-curve weights; smooth second derivative.
    Best,
}

impl NoiseQuality {
    /// Maps a fractional lattice offset in `[0, 1)` to an interpolation weight.
    #[inline]
    pub fn weight(self, t: f64) -> f64 {
        match self {
            NoiseQuality::Fast => t,
            NoiseQuality::Standard => s_curve3(t),
            NoiseQuality::Best => s_curve5(t),
        }
    }
}

#[inline]
fn lattice_hash(ix: i32, iy: i32, iz: i32, seed: i32) -> i32 {
    X_NOISE_GEN
        .wrapping_mul(ix)
        .wrapping_add(Y_NOISE_GEN.wrapping_mul(iy))
        .wrapping_add(Z_NOISE_GEN.wrapping_mul(iz))
        .wrapping_add(SEED_NOISE_GEN.wrapping_mul(seed))
}

/// Hashes a lattice point and seed into an integer in `[0, 2^31)`.
#[inline]
pub fn int_value_noise_3d(ix: i32, iy: i32, iz: i32, seed: i32) -> i32 {
    let mut n = lattice_hash(ix, iy, iz, seed) & 0x7fff_ffff;
    n = (n >> 13) ^ n;
    n.wrapping_mul(
        n.wrapping_mul(n)
            .wrapping_mul(60493)
            .wrapping_add(19_990_303),
    )
    .wrapping_add(1_376_312_589)
        & 0x7fff_ffff
}

/// Hashes a lattice point and seed into a value in `[-1, 1]`.
#[inline]
pub fn value_noise_3d(ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    1.0 - (int_value_noise_3d(ix, iy, iz, seed) as f64 / 1_073_741_824.0)
}

/// Dot product of the pseudo-random unit gradient at lattice point `(ix, iy, iz)` with the
/// displacement from that lattice point to `(fx, fy, fz)`.
#[inline]
pub fn gradient_noise_3d(fx: f64, fy: f64, fz: f64, ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    let mut index = lattice_hash(ix, iy, iz, seed) as u32;
    index ^= index >> SHIFT_NOISE_GEN;
    let g = GRADIENTS[(index & 0x0f) as usize];

    let dx = fx - ix as f64;
    let dy = fy - iy as f64;
    let dz = fz - iz as f64;

    (g[0] * dx + g[1] * dy + g[2] * dz) * GRADIENT_SCALE
}

/// Folds a point into the range where its lattice cell is representable in `i32`.
#[inline]
fn fold_point(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    (make_int32_range(x), make_int32_range(y), make_int32_range(z))
}

/// Lower lattice corner and per-axis interpolation weights for the cube containing a point.
#[inline]
fn lattice_cell(x: f64, y: f64, z: f64, quality: NoiseQuality) -> ([i32; 3], [f64; 3]) {
    let x0 = fast_floor(x);
    let y0 = fast_floor(y);
    let z0 = fast_floor(z);
    let weights = [
        quality.weight(x - x0 as f64),
        quality.weight(y - y0 as f64),
        quality.weight(z - z0 as f64),
    ];
    ([x0, y0, z0], weights)
}

/// Smooth gradient noise: the eight corner gradients of the lattice cube around `(x, y, z)`,
/// blended trilinearly with weights shaped by `quality`. Output stays inside `(-1, 1)`.
///
/// Coordinates are folded with [`make_int32_range`] first, so any finite input is accepted.
pub fn gradient_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let (x, y, z) = fold_point(x, y, z);
    let ([x0, y0, z0], [xs, ys, zs]) = lattice_cell(x, y, z, quality);
    let (x1, y1, z1) = (x0.wrapping_add(1), y0.wrapping_add(1), z0.wrapping_add(1));

    let g = |ix, iy, iz| gradient_noise_3d(x, y, z, ix, iy, iz, seed);

    let ix0 = linear(g(x0, y0, z0), g(x1, y0, z0), xs);
    let ix1 = linear(g(x0, y1, z0), g(x1, y1, z0), xs);
    let iy0 = linear(ix0, ix1, ys);
    let ix0 = linear(g(x0, y0, z1), g(x1, y0, z1), xs);
    let ix1 = linear(g(x0, y1, z1), g(x1, y1, z1), xs);
    let iy1 = linear(ix0, ix1, ys);

    linear(iy0, iy1, zs)
}

/// Smooth value noise: lattice values at the eight cube corners blended trilinearly.
pub fn value_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let (x, y, z) = fold_point(x, y, z);
    let ([x0, y0, z0], [xs, ys, zs]) = lattice_cell(x, y, z, quality);
    let (x1, y1, z1) = (x0.wrapping_add(1), y0.wrapping_add(1), z0.wrapping_add(1));

    let v = |ix, iy, iz| value_noise_3d(ix, iy, iz, seed);

    let ix0 = linear(v(x0, y0, z0), v(x1, y0, z0), xs);
    let ix1 = linear(v(x0, y1, z0), v(x1, y1, z0), xs);
    let iy0 = linear(ix0, ix1, ys);
    let ix0 = linear(v(x0, y0, z1), v(x1, y0, z1), xs);
    let ix1 = linear(v(x0, y1, z1), v(x1, y1, z1), xs);
    let iy1 = linear(ix0, ix1, ys);

    linear(iy0, iy1, zs)
}
