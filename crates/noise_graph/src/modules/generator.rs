//! Source-free generator modules.
//!
//! Every generator here is a pure function of the sample coordinate and its parameters. The
//! octave generators share one summation loop; they differ only in how each octave's signal is
//! shaped before it is accumulated.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kernel::{
    fast_floor, gradient_coherent_noise_3d, make_int32_range, value_noise_3d, NoiseQuality,
};

/// Largest octave count any fractal generator accepts.
pub const MAX_OCTAVES: u32 = 30;

/// Seed used for octave `octave`, masked to a non-negative value.
#[inline]
pub(crate) fn octave_seed(seed: i32, octave: u32) -> i32 {
    seed.wrapping_add(octave as i32) & 0x7fff_ffff
}

fn validate_octaves(module: &str, octave_count: u32) -> Result<()> {
    if octave_count == 0 || octave_count > MAX_OCTAVES {
        return Err(Error::InvalidParameter(format!(
            "{module} octave count must be in 1..={MAX_OCTAVES}, got {octave_count}"
        )));
    }
    Ok(())
}

/// Parameters for a constant value module.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstParams {
    /// The constant value.
    pub value: f64,
}

/// Parameters shared by the Perlin and Billow generators.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalParams {
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Number of octaves summed.
    pub octave_count: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Seed of the first octave; octave `i` uses `seed + i`.
    pub seed: i32,
    /// Interpolation quality of the underlying gradient noise.
    pub quality: NoiseQuality,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            lacunarity: 2.0,
            octave_count: 6,
            persistence: 0.5,
            seed: 0,
            quality: NoiseQuality::Standard,
        }
    }
}

impl FractalParams {
    /// Sets the frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the lacunarity.
    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sets the octave count.
    pub fn with_octave_count(mut self, octave_count: u32) -> Self {
        self.octave_count = octave_count;
        self
    }

    /// Sets the persistence.
    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the interpolation quality.
    pub fn with_quality(mut self, quality: NoiseQuality) -> Self {
        self.quality = quality;
        self
    }

    pub(crate) fn validate(&self, module: &str) -> Result<()> {
        validate_octaves(module, self.octave_count)
    }

    /// Classic Perlin noise: octaves summed with geometrically decreasing amplitude.
    pub fn perlin(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octave_sum(x, y, z, |signal| signal)
    }

    /// Billowy noise: each octave folded to `2|s| - 1`, the sum offset by 0.5.
    pub fn billow(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octave_sum(x, y, z, |signal| 2.0 * signal.abs() - 1.0) + 0.5
    }

    fn octave_sum(&self, x: f64, y: f64, z: f64, shape: impl Fn(f64) -> f64) -> f64 {
        let (mut x, mut y, mut z) = (x * self.frequency, y * self.frequency, z * self.frequency);
        let mut value = 0.0;
        let mut amplitude = 1.0;

        for octave in 0..self.octave_count {
            let signal = gradient_coherent_noise_3d(
                make_int32_range(x),
                make_int32_range(y),
                make_int32_range(z),
                octave_seed(self.seed, octave),
                self.quality,
            );
            value += shape(signal) * amplitude;

            x *= self.lacunarity;
            y *= self.lacunarity;
            z *= self.lacunarity;
            amplitude *= self.persistence;
        }

        value
    }
}

/// Parameters for the ridged multifractal generator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RidgedMultiParams {
    pub frequency: f64,
    pub lacunarity: f64,
    pub octave_count: u32,
    pub seed: i32,
    pub quality: NoiseQuality,
}

impl Default for RidgedMultiParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            lacunarity: 2.0,
            octave_count: 6,
            seed: 0,
            quality: NoiseQuality::Standard,
        }
    }
}

impl RidgedMultiParams {
    const OFFSET: f64 = 1.0;
    const GAIN: f64 = 2.0;

    /// Sets the frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the lacunarity.
    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sets the octave count.
    pub fn with_octave_count(mut self, octave_count: u32) -> Self {
        self.octave_count = octave_count;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the interpolation quality.
    pub fn with_quality(mut self, quality: NoiseQuality) -> Self {
        self.quality = quality;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate_octaves("RidgedMulti", self.octave_count)?;
        if self.lacunarity == 0.0 {
            return Err(Error::InvalidParameter(
                "RidgedMulti lacunarity must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Ridged multifractal value. Each octave's ridge `(1 - |s|)²` is attenuated by the previous
    /// octave's magnitude; octave `i` carries spectral weight `lacunarity^-i`. The sum is returned
    /// as is, so it is non-negative.
    pub fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        let (mut x, mut y, mut z) = (x * self.frequency, y * self.frequency, z * self.frequency);
        let mut value = 0.0;
        let mut weight = 1.0;
        let mut spectral = 1.0;

        for octave in 0..self.octave_count {
            let signal = gradient_coherent_noise_3d(
                make_int32_range(x),
                make_int32_range(y),
                make_int32_range(z),
                octave_seed(self.seed, octave),
                self.quality,
            );
            let mut ridge = Self::OFFSET - signal.abs();
            ridge *= ridge;
            ridge *= weight;

            weight = (ridge * Self::GAIN).clamp(0.0, 1.0);
            value += ridge * spectral;

            x *= self.lacunarity;
            y *= self.lacunarity;
            z *= self.lacunarity;
            spectral /= self.lacunarity;
        }

        value
    }
}

/// What a Voronoi module reports for the nearest seed point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellFunction {
    /// `displacement * cellValue`: flat plateaus, one pseudo-random value per cell.
    #[default]
    Value,
    /// `distance * √3 - 1 + displacement * cellValue`.
    Distance,
}

/// Parameters for the cellular (Voronoi) generator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoronoiParams {
    pub frequency: f64,
    /// Scale of the per-cell pseudo-random value.
    pub displacement: f64,
    pub seed: i32,
    pub cell_function: CellFunction,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            displacement: 1.0,
            seed: 0,
            cell_function: CellFunction::Value,
        }
    }
}

impl VoronoiParams {
    /// Sets the frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the displacement.
    pub fn with_displacement(mut self, displacement: f64) -> Self {
        self.displacement = displacement;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the cell function.
    pub fn with_cell_function(mut self, cell_function: CellFunction) -> Self {
        self.cell_function = cell_function;
        self
    }

    /// Seed point of lattice cell `(ix, iy, iz)`, jittered inside the cell.
    #[inline]
    fn seed_point(&self, ix: i32, iy: i32, iz: i32) -> [f64; 3] {
        let jitter = |offset: i32| {
            value_noise_3d(ix, iy, iz, self.seed.wrapping_add(offset)) * 0.5 + 0.5
        };
        [
            ix as f64 + jitter(0),
            iy as f64 + jitter(1),
            iz as f64 + jitter(2),
        ]
    }

    pub fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        let x = make_int32_range(x * self.frequency);
        let y = make_int32_range(y * self.frequency);
        let z = make_int32_range(z * self.frequency);
        let (cx, cy, cz) = (fast_floor(x), fast_floor(y), fast_floor(z));

        let mut nearest = f64::MAX;
        let mut cell = [cx, cy, cz];
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (ix, iy, iz) = (cx.wrapping_add(dx), cy.wrapping_add(dy), cz.wrapping_add(dz));
                    let [px, py, pz] = self.seed_point(ix, iy, iz);
                    let d2 = (px - x) * (px - x) + (py - y) * (py - y) + (pz - z) * (pz - z);
                    if d2 < nearest {
                        nearest = d2;
                        cell = [ix, iy, iz];
                    }
                }
            }
        }

        let cell_value = value_noise_3d(cell[0], cell[1], cell[2], self.seed);
        match self.cell_function {
            CellFunction::Value => self.displacement * cell_value,
            CellFunction::Distance => {
                nearest.sqrt() * 3f64.sqrt() - 1.0 + self.displacement * cell_value
            }
        }
    }
}

/// Parameters for the white (uncorrelated) noise generator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WhiteParams {
    /// Lattice cells per unit; the coordinate is multiplied by this and truncated.
    pub scale: i32,
    pub seed: i32,
}

impl Default for WhiteParams {
    fn default() -> Self {
        Self { scale: 1, seed: 0 }
    }
}

impl WhiteParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.scale < 1 {
            return Err(Error::InvalidParameter(format!(
                "White scale must be >= 1, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    pub fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        let scale = self.scale as f64;
        let ix = make_int32_range(x * scale) as i32;
        let iy = make_int32_range(y * scale) as i32;
        let iz = make_int32_range(z * scale) as i32;
        value_noise_3d(ix, iy, iz, self.seed)
    }
}

/// `-1` or `+1` depending on the parity of the unit cube containing the point.
pub fn checkerboard(x: f64, y: f64, z: f64) -> f64 {
    let ix = fast_floor(make_int32_range(x));
    let iy = fast_floor(make_int32_range(y));
    let iz = fast_floor(make_int32_range(z));
    if (ix & 1) ^ (iy & 1) ^ (iz & 1) != 0 {
        -1.0
    } else {
        1.0
    }
}

/// Parameters for the concentric cylinders and spheres generators.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellParams {
    /// Shells per unit of distance from the origin.
    pub frequency: f64,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self { frequency: 1.0 }
    }
}

impl ShellParams {
    /// Concentric cylinders around the Y axis: +1 on each shell, -1 halfway between.
    pub fn cylinders(&self, x: f64, _y: f64, z: f64) -> f64 {
        let (x, z) = (x * self.frequency, z * self.frequency);
        shell_profile((x * x + z * z).sqrt())
    }

    /// Concentric spheres around the origin: +1 on each shell, -1 halfway between.
    pub fn spheres(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x, y, z) = (x * self.frequency, y * self.frequency, z * self.frequency);
        shell_profile((x * x + y * y + z * z).sqrt())
    }
}

#[inline]
fn shell_profile(distance: f64) -> f64 {
    let inner = distance - distance.floor();
    let outer = 1.0 - inner;
    1.0 - inner.min(outer) * 4.0
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn sample_points(seed: u64, count: usize) -> Vec<[f64; 3]> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut coord = || (rng.next_u32() as f64 / u32::MAX as f64) * 40.0 - 20.0;
        (0..count).map(|_| [coord(), coord(), coord()]).collect()
    }

    #[test]
    fn octave_seed_is_masked_non_negative() {
        assert_eq!(octave_seed(5, 2), 7);
        assert!(octave_seed(i32::MAX, 3) >= 0);
        assert!(octave_seed(-10, 0) >= 0);
    }

    #[test]
    fn perlin_is_deterministic() {
        let params = FractalParams::default().with_seed(17);
        for [x, y, z] in sample_points(1, 200) {
            assert_eq!(
                params.perlin(x, y, z).to_bits(),
                params.perlin(x, y, z).to_bits()
            );
        }
    }

    #[test]
    fn perlin_seed_changes_output() {
        let a = FractalParams::default().with_seed(1);
        let b = FractalParams::default().with_seed(2);
        let differs = sample_points(2, 50)
            .into_iter()
            .any(|[x, y, z]| a.perlin(x, y, z) != b.perlin(x, y, z));
        assert!(differs);
    }

    #[test]
    fn single_octave_perlin_equals_kernel() {
        let params = FractalParams::default()
            .with_octave_count(1)
            .with_frequency(2.0)
            .with_seed(3);
        let expected = gradient_coherent_noise_3d(0.5, 1.0, 1.5, 3, NoiseQuality::Standard);
        assert_eq!(params.perlin(0.25, 0.5, 0.75), expected);
    }

    #[test]
    fn billow_single_octave_is_offset_fold() {
        let params = FractalParams::default().with_octave_count(1);
        for [x, y, z] in sample_points(3, 2_000) {
            let v = params.billow(x, y, z);
            assert!((-0.5..=1.5).contains(&v), "{v}");
            let signal = gradient_coherent_noise_3d(x, y, z, 0, NoiseQuality::Standard);
            assert!((v - (2.0 * signal.abs() - 0.5)).abs() < 1e-12);
        }
    }

    #[test]
    fn ridged_multi_is_non_negative_and_bounded() {
        let params = RidgedMultiParams::default();
        for [x, y, z] in sample_points(4, 2_000) {
            let v = params.value(x, y, z);
            assert!((0.0..2.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn octave_count_is_validated() {
        assert!(FractalParams::default()
            .with_octave_count(0)
            .validate("Perlin")
            .is_err());
        assert!(FractalParams::default()
            .with_octave_count(MAX_OCTAVES + 1)
            .validate("Perlin")
            .is_err());
        assert!(RidgedMultiParams::default()
            .with_octave_count(MAX_OCTAVES)
            .validate()
            .is_ok());
    }

    #[test]
    fn voronoi_value_is_constant_inside_a_cell_neighbourhood() {
        let params = VoronoiParams::default().with_seed(9);
        let a = params.value(0.5, 0.5, 0.5);
        let b = params.value(0.5 + 1e-9, 0.5, 0.5);
        assert_eq!(a, b);
        assert!((-1.0..=1.0).contains(&a));
    }

    #[test]
    fn voronoi_distance_is_bounded() {
        let params = VoronoiParams::default()
            .with_cell_function(CellFunction::Distance)
            .with_displacement(0.0);
        for [x, y, z] in sample_points(5, 500) {
            let v = params.value(x, y, z);
            assert!((-1.0..=2.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn white_noise_is_piecewise_constant() {
        let params = WhiteParams { scale: 4, seed: 1 };
        assert_eq!(params.value(0.30, 0.30, 0.30), params.value(0.26, 0.49, 0.40));
        assert_eq!(params.value(0.30, 0.0, 0.0), value_noise_3d(1, 0, 0, 1));
        assert!(WhiteParams { scale: 0, seed: 0 }.validate().is_err());
    }

    #[test]
    fn checkerboard_alternates() {
        assert_eq!(checkerboard(0.5, 0.5, 0.5), 1.0);
        assert_eq!(checkerboard(1.5, 0.5, 0.5), -1.0);
        assert_eq!(checkerboard(1.5, 1.5, 0.5), 1.0);
        assert_eq!(checkerboard(-0.5, 0.5, 0.5), -1.0);
    }

    #[test]
    fn shells_peak_on_integer_radii() {
        let params = ShellParams::default();
        assert_eq!(params.spheres(1.0, 0.0, 0.0), 1.0);
        assert_eq!(params.spheres(0.0, 1.5, 0.0), -1.0);
        assert_eq!(params.cylinders(0.0, 100.0, 2.0), 1.0);
        assert_eq!(params.cylinders(0.0, -3.0, 0.5), -1.0);
    }
}
