//! Deterministic coherent-noise primitives.
//!
//! Everything in this module is a pure function of its arguments: lattice hashing, value and
//! gradient noise, and the interpolation curves used to blend lattice samples. None of it holds
//! state, so the kernels are safe to call from any number of threads at once.
pub mod interp;
pub mod noise;

pub use interp::{cubic_interp, linear, s_curve3, s_curve5};
pub use noise::{
    gradient_coherent_noise_3d, gradient_noise_3d, int_value_noise_3d, value_coherent_noise_3d,
    value_noise_3d, NoiseQuality,
};

/// Floors `v` to an `i32` without going through `f64::floor`.
///
/// Values outside the `i32` range saturate to `i32::MIN` or `i32::MAX`; NaN maps to 0.
#[inline]
pub fn fast_floor(v: f64) -> i32 {
    let i = v as i32;
    if v < i as f64 {
        i.saturating_sub(1)
    } else {
        i
    }
}

/// Folds `n` into a range that stays representable once converted to a 32-bit lattice coordinate.
///
/// Coordinates far away from the origin would otherwise saturate and collapse onto the same
/// lattice cell.
#[inline]
pub fn make_int32_range(n: f64) -> f64 {
    const LIMIT: f64 = 1_073_741_824.0;
    if n >= LIMIT {
        (2.0 * (n % LIMIT)) - LIMIT
    } else if n <= -LIMIT {
        (2.0 * (n % LIMIT)) + LIMIT
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_floor_matches_floor() {
        for v in [-2.5, -2.0, -1.0, -0.25, 0.0, 0.25, 0.999, 1.0, 7.5] {
            assert_eq!(fast_floor(v), v.floor() as i32, "floor({v})");
        }
    }

    #[test]
    fn fast_floor_saturates_out_of_range() {
        assert_eq!(fast_floor(-3.0e9), i32::MIN);
        assert_eq!(fast_floor(-2_147_483_648.5), i32::MIN);
        assert_eq!(fast_floor(3.0e9), i32::MAX);
        assert_eq!(fast_floor(-2_147_483_647.5), i32::MIN);
    }

    #[test]
    fn make_int32_range_keeps_small_values() {
        assert_eq!(make_int32_range(12.5), 12.5);
        assert_eq!(make_int32_range(-12.5), -12.5);
    }

    #[test]
    fn make_int32_range_folds_large_values() {
        let folded = make_int32_range(3.0e9 + 0.25);
        assert!(folded.abs() < 1_073_741_824.0);
        assert_eq!(folded, 631_290_880.5);

        let folded = make_int32_range(-3.0e9 - 0.25);
        assert!(folded.abs() < 1_073_741_824.0);
    }
}
