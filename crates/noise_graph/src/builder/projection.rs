//! Coordinate projections from grid indices to 3D sample points.
//!
//! Index `i` of `n` cells maps to `lower + i * (upper - lower) / n`, so the first cell sits on the
//! lower bound and the upper bound itself is never sampled.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kernel::linear;
use crate::modules::NoiseFn;

/// A half-open coordinate range `[lower, upper)` swept by one grid axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn extent(&self) -> f64 {
        self.upper - self.lower
    }

    /// Coordinate of cell `index` out of `count`.
    #[inline]
    pub fn at(&self, index: usize, count: usize) -> f64 {
        self.lower + index as f64 * self.extent() / count as f64
    }

    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "{name} bounds must be finite, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.lower >= self.upper {
            return Err(Error::InvalidConfig(format!(
                "{name} lower bound {} must be below upper bound {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    fn validate_within(&self, name: &str, min: f64, max: f64) -> Result<()> {
        self.validate(name)?;
        if self.lower < min || self.upper > max {
            return Err(Error::InvalidConfig(format!(
                "{name} range [{}, {}] must lie within [{min}, {max}]",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

/// Flat projection: columns sweep x, rows sweep y, z is fixed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneProjection {
    pub x: Bounds,
    pub y: Bounds,
    pub z: f64,
    /// Blend four offset samples per cell so the map tiles along both axes.
    pub seamless: bool,
}

impl Default for PlaneProjection {
    fn default() -> Self {
        Self {
            x: Bounds::new(-1.0, 1.0),
            y: Bounds::new(-1.0, 1.0),
            z: 0.0,
            seamless: false,
        }
    }
}

impl PlaneProjection {
    pub fn new(x: Bounds, y: Bounds) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Sets the fixed z coordinate of the plane.
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// Sets whether the map tiles seamlessly.
    pub fn with_seamless(mut self, seamless: bool) -> Self {
        self.seamless = seamless;
        self
    }
}

/// Cylindrical projection around the y axis: columns sweep the angle (degrees), rows the height.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylinderProjection {
    pub angle: Bounds,
    pub height: Bounds,
}

impl Default for CylinderProjection {
    fn default() -> Self {
        Self {
            angle: Bounds::new(-180.0, 180.0),
            height: Bounds::new(-1.0, 1.0),
        }
    }
}

/// Projection onto the unit sphere: rows sweep latitude, columns longitude (degrees).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereProjection {
    pub latitude: Bounds,
    pub longitude: Bounds,
}

impl Default for SphereProjection {
    fn default() -> Self {
        Self {
            latitude: Bounds::new(-90.0, 90.0),
            longitude: Bounds::new(-180.0, 180.0),
        }
    }
}

impl SphereProjection {
    /// Unit-sphere point for a latitude/longitude pair in degrees.
    pub fn to_cartesian(latitude: f64, longitude: f64) -> [f64; 3] {
        let (lat_sin, lat_cos) = latitude.to_radians().sin_cos();
        let (lon_sin, lon_cos) = longitude.to_radians().sin_cos();
        [lat_cos * lon_cos, lat_sin, lat_cos * lon_sin]
    }
}

/// Mapping from map cells to sample points.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Plane(PlaneProjection),
    Cylinder(CylinderProjection),
    Sphere(SphereProjection),
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Plane(PlaneProjection::default())
    }
}

impl From<PlaneProjection> for Projection {
    fn from(value: PlaneProjection) -> Self {
        Projection::Plane(value)
    }
}

impl From<CylinderProjection> for Projection {
    fn from(value: CylinderProjection) -> Self {
        Projection::Cylinder(value)
    }
}

impl From<SphereProjection> for Projection {
    fn from(value: SphereProjection) -> Self {
        Projection::Sphere(value)
    }
}

impl Projection {
    pub fn validate(&self) -> Result<()> {
        match self {
            Projection::Plane(p) => {
                p.x.validate("plane x")?;
                p.y.validate("plane y")?;
                if !p.z.is_finite() {
                    return Err(Error::InvalidConfig(format!(
                        "plane z must be finite, got {}",
                        p.z
                    )));
                }
                Ok(())
            }
            Projection::Cylinder(c) => {
                c.angle.validate("cylinder angle")?;
                c.height.validate("cylinder height")
            }
            Projection::Sphere(s) => {
                s.latitude.validate_within("sphere latitude", -90.0, 90.0)?;
                s.longitude.validate_within("sphere longitude", -180.0, 180.0)
            }
        }
    }

    /// Sample point of cell `(col, row)` in a `width` x `height` map.
    pub fn point(&self, col: usize, row: usize, width: usize, height: usize) -> [f64; 3] {
        match self {
            Projection::Plane(p) => [p.x.at(col, width), p.y.at(row, height), p.z],
            Projection::Cylinder(c) => {
                let (sin, cos) = c.angle.at(col, width).to_radians().sin_cos();
                [cos, c.height.at(row, height), sin]
            }
            Projection::Sphere(s) => SphereProjection::to_cartesian(
                s.latitude.at(row, height),
                s.longitude.at(col, width),
            ),
        }
    }

    /// Value of `source` for cell `(col, row)`.
    pub fn sample<F>(&self, source: &F, col: usize, row: usize, width: usize, height: usize) -> f64
    where
        F: NoiseFn + ?Sized,
    {
        match self {
            Projection::Plane(p) if p.seamless => {
                let x = p.x.at(col, width);
                let y = p.y.at(row, height);
                let (x_extent, y_extent) = (p.x.extent(), p.y.extent());

                let sw = source.sample(x, y, p.z);
                let se = source.sample(x + x_extent, y, p.z);
                let nw = source.sample(x, y + y_extent, p.z);
                let ne = source.sample(x + x_extent, y + y_extent, p.z);

                let x_blend = 1.0 - (x - p.x.lower) / x_extent;
                let y_blend = 1.0 - (y - p.y.lower) / y_extent;
                let south = linear(sw, se, x_blend);
                let north = linear(nw, ne, x_blend);
                linear(south, north, y_blend)
            }
            _ => {
                let [x, y, z] = self.point(col, row, width, height);
                source.sample(x, y, z)
            }
        }
    }
}

/// Axis-aligned box swept by a cube builder.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeBounds {
    pub x: Bounds,
    pub y: Bounds,
    pub z: Bounds,
}

impl Default for VolumeBounds {
    fn default() -> Self {
        let unit = Bounds::new(-1.0, 1.0);
        Self {
            x: unit,
            y: unit,
            z: unit,
        }
    }
}

impl VolumeBounds {
    pub fn new(x: Bounds, y: Bounds, z: Bounds) -> Self {
        Self { x, y, z }
    }

    pub fn validate(&self) -> Result<()> {
        self.x.validate("volume x")?;
        self.y.validate("volume y")?;
        self.z.validate("volume z")
    }

    /// Sample point of cell `(x, y, z)` in a volume of `size`.
    pub fn point(&self, x: usize, y: usize, z: usize, size: (usize, usize, usize)) -> [f64; 3] {
        [
            self.x.at(x, size.0),
            self.y.at(y, size.1),
            self.z.at(z, size.2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: [f64; 3], b: [f64; 3]) {
        for (p, q) in a.iter().zip(&b) {
            assert!((p - q).abs() < 1e-12, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn plane_maps_indices_linearly() {
        let projection = Projection::from(
            PlaneProjection::new(Bounds::new(0.0, 4.0), Bounds::new(-2.0, 2.0)).with_z(1.5),
        );
        assert_eq!(projection.point(0, 0, 4, 4), [0.0, -2.0, 1.5]);
        assert_eq!(projection.point(3, 2, 4, 4), [3.0, 0.0, 1.5]);
    }

    #[test]
    fn sphere_poles_and_equator() {
        approx_eq(SphereProjection::to_cartesian(90.0, 0.0), [0.0, 1.0, 0.0]);
        approx_eq(SphereProjection::to_cartesian(-90.0, 45.0), [0.0, -1.0, 0.0]);
        approx_eq(SphereProjection::to_cartesian(0.0, 0.0), [1.0, 0.0, 0.0]);
        approx_eq(SphereProjection::to_cartesian(0.0, 90.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn sphere_rows_sweep_latitude() {
        let projection = Projection::from(SphereProjection::default());
        approx_eq(projection.point(0, 0, 4, 2), [0.0, -1.0, 0.0]);
        approx_eq(projection.point(2, 1, 4, 2), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn cylinder_points_lie_on_unit_cylinder() {
        let projection = Projection::from(CylinderProjection::default());
        for col in 0..8 {
            let [x, y, z] = projection.point(col, 3, 8, 4);
            assert!(((x * x + z * z).sqrt() - 1.0).abs() < 1e-12);
            assert_eq!(y, 0.5);
        }
    }

    #[test]
    fn validation_rejects_bad_ranges() {
        let inverted = PlaneProjection::new(Bounds::new(1.0, 0.0), Bounds::new(0.0, 1.0));
        assert!(matches!(
            Projection::from(inverted).validate(),
            Err(Error::InvalidConfig(_))
        ));

        let too_far = SphereProjection {
            latitude: Bounds::new(-95.0, 90.0),
            ..Default::default()
        };
        assert!(Projection::from(too_far).validate().is_err());
        assert!(Projection::from(SphereProjection::default()).validate().is_ok());
        assert!(VolumeBounds::default().validate().is_ok());
    }

    #[test]
    fn seamless_plane_tiles() {
        let source = |x: f64, y: f64, _z: f64| (x * 1.3).sin() + (y * 0.7).cos();
        let plane = PlaneProjection::new(Bounds::new(0.0, 2.0), Bounds::new(0.0, 2.0));
        let seamless = Projection::from(plane.with_seamless(true));

        // Cell 0 blends entirely toward the far edge, so it equals the far-edge sample.
        let v = seamless.sample(&source, 0, 0, 4, 4);
        assert!((v - source(2.0, 2.0, 0.0)).abs() < 1e-12);

        let plain = Projection::from(plane);
        assert_eq!(plain.sample(&source, 1, 1, 4, 4), source(0.5, 0.5, 0.0));
    }
}
