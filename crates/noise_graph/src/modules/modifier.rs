//! Single-source value modifiers.
//!
//! These map the value of their source through a fixed function. Parameter structs validate
//! themselves when the module is added to a graph; after that every mapping is total.
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kernel::{cubic_interp, linear};

/// Parameters for a clamp module.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampParams {
    pub lower: f64,
    pub upper: f64,
}

impl Default for ClampParams {
    fn default() -> Self {
        Self {
            lower: -1.0,
            upper: 1.0,
        }
    }
}

impl ClampParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.lower.is_nan() || self.upper.is_nan() || self.lower > self.upper {
            return Err(Error::InvalidParameter(format!(
                "Clamp lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        if value < self.lower {
            self.lower
        } else if value > self.upper {
            self.upper
        } else {
            value
        }
    }
}

/// Parameters for a scale-bias module: `value * scale + bias`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBiasParams {
    pub scale: f64,
    pub bias: f64,
}

impl Default for ScaleBiasParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            bias: 0.0,
        }
    }
}

impl ScaleBiasParams {
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.bias
    }
}

/// Parameters for an exponent module.
///
/// The source value is remapped from `[-1, 1]` to `[0, 1]`, raised to `exponent` and mapped back.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentParams {
    pub exponent: f64,
}

impl Default for ExponentParams {
    fn default() -> Self {
        Self { exponent: 1.0 }
    }
}

impl ExponentParams {
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        ((value + 1.0) / 2.0).abs().powf(self.exponent) * 2.0 - 1.0
    }
}

/// An input/output pair of a [`CurveParams`] spline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub input: f64,
    pub output: f64,
}

impl ControlPoint {
    pub fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

/// Parameters for a curve module: a cubic spline through at least four control points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveParams {
    /// Control points, kept sorted by input once validated.
    pub points: Vec<ControlPoint>,
}

impl CurveParams {
    pub const MIN_POINTS: usize = 4;

    pub fn new(points: impl IntoIterator<Item = ControlPoint>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Appends a control point; order does not matter.
    pub fn with_point(mut self, input: f64, output: f64) -> Self {
        self.points.push(ControlPoint::new(input, output));
        self
    }

    /// Sorts the control points by input and rejects curves that cannot be evaluated.
    pub(crate) fn normalized(mut self) -> Result<Self> {
        if self.points.len() < Self::MIN_POINTS {
            return Err(Error::InvalidParameter(format!(
                "Curve needs at least {} control points, got {}",
                Self::MIN_POINTS,
                self.points.len()
            )));
        }
        if self.points.iter().any(|p| !p.input.is_finite()) {
            return Err(Error::InvalidParameter(
                "Curve control point inputs must be finite".into(),
            ));
        }
        self.points
            .sort_by(|a, b| a.input.partial_cmp(&b.input).unwrap_or(Ordering::Equal));
        if let Some(pair) = self.points.windows(2).find(|w| w[0].input == w[1].input) {
            return Err(Error::InvalidParameter(format!(
                "Curve has duplicate control point input {}",
                pair[0].input
            )));
        }
        Ok(self)
    }

    /// Maps `value` through the spline.
    ///
    /// Inside the control range this interpolates the segment containing `value`; outside it the
    /// first or last segment's polynomial is extrapolated. Unvalidated params are tolerated: with
    /// no points `value` passes through, and a single point is a constant.
    pub fn apply(&self, value: f64) -> f64 {
        let points = &self.points;
        let last = match points.len() {
            0 => return value,
            1 => return points[0].output,
            len => len - 1,
        };

        let pos = points
            .iter()
            .position(|p| value < p.input)
            .unwrap_or(points.len());
        let segment = pos.clamp(1, last);

        let i1 = segment - 1;
        let i2 = segment;
        let i0 = i1.saturating_sub(1);
        let i3 = (i2 + 1).min(last);

        let in1 = points[i1].input;
        let in2 = points[i2].input;
        let alpha = (value - in1) / (in2 - in1);

        cubic_interp(
            points[i0].output,
            points[i1].output,
            points[i2].output,
            points[i3].output,
            alpha,
        )
    }
}

/// Parameters for a terrace module: the source value snaps toward terrace levels.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerraceParams {
    /// Terrace levels, kept sorted once validated.
    pub points: Vec<f64>,
    /// Inverts the easing between levels.
    pub invert: bool,
}

impl TerraceParams {
    pub const MIN_POINTS: usize = 2;

    pub fn new(points: impl IntoIterator<Item = f64>) -> Self {
        Self {
            points: points.into_iter().collect(),
            invert: false,
        }
    }

    /// `count` levels evenly spaced over `[-1, 1]`.
    pub fn evenly_spaced(count: usize) -> Self {
        let step = if count > 1 {
            2.0 / (count - 1) as f64
        } else {
            0.0
        };
        Self::new((0..count).map(|i| -1.0 + i as f64 * step))
    }

    /// Sets whether the easing between levels is inverted.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub(crate) fn normalized(mut self) -> Result<Self> {
        if self.points.len() < Self::MIN_POINTS {
            return Err(Error::InvalidParameter(format!(
                "Terrace needs at least {} points, got {}",
                Self::MIN_POINTS,
                self.points.len()
            )));
        }
        if self.points.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidParameter(
                "Terrace points must be finite".into(),
            ));
        }
        self.points
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        if let Some(pair) = self.points.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::InvalidParameter(format!(
                "Terrace has duplicate point {}",
                pair[0]
            )));
        }
        Ok(self)
    }

    /// Snaps `value` toward the surrounding terrace levels. With no levels `value` passes through.
    pub fn apply(&self, value: f64) -> f64 {
        let points = &self.points;
        let Some(last) = points.len().checked_sub(1) else {
            return value;
        };
        let pos = points
            .iter()
            .position(|&p| value < p)
            .unwrap_or(points.len());

        let i0 = pos.saturating_sub(1).min(last);
        let i1 = pos.min(last);
        if i0 == i1 {
            return points[i1];
        }

        let (mut v0, mut v1) = (points[i0], points[i1]);
        let mut alpha = (value - v0) / (v1 - v0);
        if self.invert {
            alpha = 1.0 - alpha;
            std::mem::swap(&mut v0, &mut v1);
        }
        alpha *= alpha;

        linear(v0, v1, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn curve() -> CurveParams {
        CurveParams::default()
            .with_point(1.0, 1.0)
            .with_point(-1.0, -1.0)
            .with_point(2.0, 2.0)
            .with_point(0.0, 0.0)
            .normalized()
            .expect("valid curve")
    }

    #[test]
    fn clamp_rejects_inverted_bounds() {
        let err = ClampParams {
            lower: 1.0,
            upper: 0.0,
        }
        .validate()
        .expect_err("inverted bounds");
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn clamp_limits_value() {
        let params = ClampParams {
            lower: -0.5,
            upper: 0.25,
        };
        assert_eq!(params.apply(-2.0), -0.5);
        assert_eq!(params.apply(0.1), 0.1);
        assert_eq!(params.apply(3.0), 0.25);
    }

    #[test]
    fn scale_bias_and_exponent() {
        let sb = ScaleBiasParams {
            scale: 2.0,
            bias: 0.5,
        };
        assert_eq!(sb.apply(1.5), 3.5);

        let exp = ExponentParams { exponent: 2.0 };
        assert_eq!(exp.apply(1.0), 1.0);
        assert_eq!(exp.apply(-1.0), -1.0);
        assert_eq!(exp.apply(0.0), -0.5);
    }

    #[test]
    fn curve_sorts_points_and_interpolates_them() {
        let curve = curve();
        let inputs: Vec<f64> = curve.points.iter().map(|p| p.input).collect();
        assert_eq!(inputs, vec![-1.0, 0.0, 1.0, 2.0]);

        for p in &curve.points {
            approx_eq(curve.apply(p.input), p.output);
        }
        approx_eq(curve.apply(0.5), 0.5);
        approx_eq(curve.apply(0.25), 0.34375);
    }

    #[test]
    fn curve_extrapolates_along_end_segments() {
        let curve = curve();
        approx_eq(curve.apply(-2.0), cubic_interp(-1.0, -1.0, 0.0, 1.0, -1.0));
        approx_eq(curve.apply(3.0), cubic_interp(0.0, 1.0, 2.0, 2.0, 2.0));
        assert!(curve.apply(-2.0) < -1.0);
    }

    #[test]
    fn curve_validation_errors() {
        let too_few = CurveParams::default()
            .with_point(0.0, 0.0)
            .with_point(1.0, 1.0)
            .normalized();
        assert!(too_few.is_err());

        let duplicate = CurveParams::default()
            .with_point(0.0, 0.0)
            .with_point(0.0, 1.0)
            .with_point(1.0, 1.0)
            .with_point(2.0, 1.0)
            .normalized();
        assert!(duplicate.is_err());
    }

    #[test]
    fn terrace_snaps_to_levels() {
        let terrace = TerraceParams::evenly_spaced(3).normalized().expect("valid");
        assert_eq!(terrace.apply(-1.0), -1.0);
        assert_eq!(terrace.apply(0.0), 0.0);
        assert_eq!(terrace.apply(2.0), 1.0);
        assert_eq!(terrace.apply(-3.0), -1.0);
        approx_eq(terrace.apply(0.5), 0.25);

        let inverted = terrace.with_invert(true);
        approx_eq(inverted.apply(0.5), 0.75);
    }

    #[test]
    fn terrace_validation_errors() {
        assert!(TerraceParams::new([0.5]).normalized().is_err());
        assert!(TerraceParams::new([0.5, 0.5]).normalized().is_err());
    }

    #[test]
    fn unvalidated_point_lists_do_not_panic() {
        assert_eq!(CurveParams::default().apply(0.3), 0.3);
        assert_eq!(CurveParams::default().with_point(0.0, 0.7).apply(-5.0), 0.7);
        let two = CurveParams::default().with_point(0.0, 0.0).with_point(1.0, 1.0);
        assert!(two.apply(0.5).is_finite());

        assert_eq!(TerraceParams::default().apply(-0.4), -0.4);
        assert_eq!(TerraceParams::new([0.25]).apply(0.9), 0.25);
    }
}
