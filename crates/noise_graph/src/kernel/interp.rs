//! Interpolation and easing curves.

/// Linear interpolation between `n0` and `n1`; `alpha` of 0 yields `n0`, 1 yields `n1`.
#[inline]
pub fn linear(n0: f64, n1: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * n0 + alpha * n1
}

/// Cubic S-curve `3t² - 2t³`, first derivative zero at both ends.
#[inline]
pub fn s_curve3(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Quintic S-curve `6t⁵ - 15t⁴ + 10t³`, first and second derivatives zero at both ends.
#[inline]
pub fn s_curve5(t: f64) -> f64 {
    let t3 = t * t * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    (6.0 * t5) - (15.0 * t4) + (10.0 * t3)
}

/// Cubic interpolation through four evenly spaced samples.
///
/// `alpha` runs from `n1` (0) to `n2` (1); `n0` and `n3` shape the tangents. Values of `alpha`
/// outside `[0, 1]` extrapolate along the same polynomial.
#[inline]
pub fn cubic_interp(n0: f64, n1: f64, n2: f64, n3: f64, alpha: f64) -> f64 {
    let p = (n3 - n2) - (n0 - n1);
    let q = (n0 - n1) - p;
    let r = n2 - n0;
    let s = n1;
    p * alpha * alpha * alpha + q * alpha * alpha + r * alpha + s
}
