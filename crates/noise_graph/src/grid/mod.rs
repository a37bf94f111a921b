//! Dense sample containers and resampling.
//!
//! [`NoiseMap`] and [`NoiseCube`] store values as `f32`; evaluation and resampling run in `f64`.
pub mod cube;
pub mod map;
pub mod resample;

pub use cube::NoiseCube;
pub use map::NoiseMap;
pub use resample::ResampleFilter;

fn min_max(data: &[f32]) -> Option<(f32, f32)> {
    let (first, rest) = data.split_first()?;
    Some(
        rest.iter()
            .fold((*first, *first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
