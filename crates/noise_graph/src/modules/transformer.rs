//! Coordinate transformers.
//!
//! A transformer moves the sample point before its source is evaluated. It never touches the
//! value that comes back.
use glam::{DMat3, DVec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::generator::{FractalParams, MAX_OCTAVES};
use crate::error::{Error, Result};

/// Rotation of the input coordinate, angles in degrees around each axis.
///
/// The rotation matrix is built once when the angles are set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RotateAngles", into = "RotateAngles"))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotatePointParams {
    angles: [f64; 3],
    matrix: DMat3,
}

impl Default for RotatePointParams {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl RotatePointParams {
    pub fn new(x_angle: f64, y_angle: f64, z_angle: f64) -> Self {
        Self {
            angles: [x_angle, y_angle, z_angle],
            matrix: rotation_matrix(x_angle, y_angle, z_angle),
        }
    }

    pub fn x_angle(&self) -> f64 {
        self.angles[0]
    }

    pub fn y_angle(&self) -> f64 {
        self.angles[1]
    }

    pub fn z_angle(&self) -> f64 {
        self.angles[2]
    }

    /// Rotation matrix built from the three angles.
    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let p = self.matrix * DVec3::new(x, y, z);
        (p.x, p.y, p.z)
    }
}

fn rotation_matrix(x_angle: f64, y_angle: f64, z_angle: f64) -> DMat3 {
    let (x_sin, x_cos) = x_angle.to_radians().sin_cos();
    let (y_sin, y_cos) = y_angle.to_radians().sin_cos();
    let (z_sin, z_cos) = z_angle.to_radians().sin_cos();

    let row0 = DVec3::new(
        y_sin * x_sin * z_sin + y_cos * z_cos,
        x_cos * z_sin,
        y_sin * z_cos - y_cos * x_sin * z_sin,
    );
    let row1 = DVec3::new(
        y_sin * x_sin * z_cos - y_cos * z_sin,
        x_cos * z_cos,
        -y_cos * x_sin * z_cos - y_sin * z_sin,
    );
    let row2 = DVec3::new(-y_sin * x_cos, x_sin, y_cos * x_cos);

    DMat3::from_cols(row0, row1, row2).transpose()
}

/// Serialized form of [`RotatePointParams`]; the matrix is rebuilt on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RotateAngles {
    x_angle: f64,
    y_angle: f64,
    z_angle: f64,
}

#[cfg(feature = "serde")]
impl From<RotateAngles> for RotatePointParams {
    fn from(a: RotateAngles) -> Self {
        Self::new(a.x_angle, a.y_angle, a.z_angle)
    }
}

#[cfg(feature = "serde")]
impl From<RotatePointParams> for RotateAngles {
    fn from(p: RotatePointParams) -> Self {
        let [x_angle, y_angle, z_angle] = p.angles;
        Self {
            x_angle,
            y_angle,
            z_angle,
        }
    }
}

/// Per-axis scaling of the input coordinate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePointParams {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for ScalePointParams {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl ScalePointParams {
    pub fn uniform(scale: f64) -> Self {
        Self {
            x: scale,
            y: scale,
            z: scale,
        }
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (x * self.x, y * self.y, z * self.z)
    }
}

/// Per-axis offset of the input coordinate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TranslatePointParams {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TranslatePointParams {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (x + self.x, y + self.y, z + self.z)
    }
}

/// Pseudo-random displacement of the input coordinate by three Perlin fields.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbulenceParams {
    /// Frequency of the distortion fields.
    pub frequency: f64,
    /// Scale of the displacement.
    pub power: f64,
    /// Octave count of the distortion fields.
    pub roughness: u32,
    /// Seed of the x distortion field; y and z use `seed + 1` and `seed + 2`.
    pub seed: i32,
}

impl Default for TurbulenceParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            power: 1.0,
            roughness: 3,
            seed: 0,
        }
    }
}

impl TurbulenceParams {
    // Offsets decorrelate the three distortion fields from each other and from the input lattice.
    const X_OFFSET: [f64; 3] = [12414.0 / 65536.0, 65124.0 / 65536.0, 31337.0 / 65536.0];
    const Y_OFFSET: [f64; 3] = [26519.0 / 65536.0, 18128.0 / 65536.0, 60493.0 / 65536.0];
    const Z_OFFSET: [f64; 3] = [53820.0 / 65536.0, 11213.0 / 65536.0, 44845.0 / 65536.0];

    /// Sets the frequency of the distortion fields.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the displacement scale.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Sets the octave count of the distortion fields.
    pub fn with_roughness(mut self, roughness: u32) -> Self {
        self.roughness = roughness;
        self
    }

    /// Sets the seed of the x distortion field.
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.roughness == 0 || self.roughness > MAX_OCTAVES {
            return Err(Error::InvalidParameter(format!(
                "Turbulence roughness must be in 1..={MAX_OCTAVES}, got {}",
                self.roughness
            )));
        }
        Ok(())
    }

    fn field(&self, seed_offset: i32) -> FractalParams {
        FractalParams::default()
            .with_frequency(self.frequency)
            .with_octave_count(self.roughness)
            .with_seed(self.seed.wrapping_add(seed_offset))
    }

    /// Returns the distorted coordinate.
    pub fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let offset = |o: [f64; 3]| (x + o[0], y + o[1], z + o[2]);

        let (x0, y0, z0) = offset(Self::X_OFFSET);
        let (x1, y1, z1) = offset(Self::Y_OFFSET);
        let (x2, y2, z2) = offset(Self::Z_OFFSET);

        (
            x + self.field(0).perlin(x0, y0, z0) * self.power,
            y + self.field(1).perlin(x1, y1, z1) * self.power,
            z + self.field(2).perlin(x2, y2, z2) * self.power,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: (f64, f64, f64), b: (f64, f64, f64)) {
        let close = |p: f64, q: f64| (p - q).abs() < 1e-9;
        assert!(close(a.0, b.0) && close(a.1, b.1) && close(a.2, b.2), "{a:?} != {b:?}");
    }

    #[test]
    fn zero_rotation_is_identity() {
        let params = RotatePointParams::default();
        approx_eq(params.apply(1.0, 2.0, 3.0), (1.0, 2.0, 3.0));
    }

    #[test]
    fn rotation_preserves_length() {
        let params = RotatePointParams::new(30.0, 45.0, 60.0);
        let (x, y, z) = params.apply(1.0, -2.0, 0.5);
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - (1.0f64 + 4.0 + 0.25).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn matrix_is_built_once_from_angles() {
        let params = RotatePointParams::new(10.0, 20.0, 30.0);
        assert_eq!(params.matrix(), rotation_matrix(10.0, 20.0, 30.0));
        assert_eq!(
            (params.x_angle(), params.y_angle(), params.z_angle()),
            (10.0, 20.0, 30.0)
        );
        let p = params.matrix() * DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(params.apply(1.0, 2.0, 3.0), (p.x, p.y, p.z));
        assert_eq!(RotatePointParams::default().matrix(), DMat3::IDENTITY);
    }

    #[test]
    fn quarter_turn_about_y() {
        let params = RotatePointParams::new(0.0, 90.0, 0.0);
        approx_eq(params.apply(1.0, 0.0, 0.0), (0.0, 0.0, -1.0));
        approx_eq(params.apply(0.0, 5.0, 0.0), (0.0, 5.0, 0.0));
    }

    #[test]
    fn scale_and_translate() {
        let scale = ScalePointParams {
            x: 2.0,
            y: 3.0,
            z: 4.0,
        };
        assert_eq!(scale.apply(1.0, 1.0, 1.0), (2.0, 3.0, 4.0));

        let translate = TranslatePointParams::new(1.0, -1.0, 0.5);
        assert_eq!(translate.apply(1.0, 1.0, 1.0), (2.0, 0.0, 1.5));
    }

    #[test]
    fn turbulence_with_zero_power_is_identity() {
        let params = TurbulenceParams::default().with_power(0.0);
        assert_eq!(params.apply(0.3, -1.2, 4.5), (0.3, -1.2, 4.5));
    }

    #[test]
    fn turbulence_displaces_and_is_deterministic() {
        let params = TurbulenceParams::default().with_power(0.5).with_seed(4);
        let a = params.apply(0.3, -1.2, 4.5);
        assert_eq!(a, params.apply(0.3, -1.2, 4.5));
        assert_ne!(a, (0.3, -1.2, 4.5));
    }

    #[test]
    fn turbulence_roughness_is_validated() {
        assert!(TurbulenceParams::default()
            .with_roughness(0)
            .validate()
            .is_err());
    }
}
