//! PNG output for noise maps.
use std::path::Path;

use anyhow::{bail, Context};
use image::{ImageBuffer, Rgb};
use noise_graph::grid::NoiseMap;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,noise_graph=debug".into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Piecewise-linear colour ramp over sample values.
#[derive(Clone, Debug)]
pub struct ColorGradient {
    stops: Vec<(f32, [u8; 3])>,
}

impl ColorGradient {
    /// Black at -1, white at +1.
    pub fn grayscale() -> Self {
        Self::new()
            .with_stop(-1.0, [0, 0, 0])
            .with_stop(1.0, [255, 255, 255])
    }

    /// Deep water to snow.
    pub fn terrain() -> Self {
        Self::new()
            .with_stop(-1.0, [0, 0, 128])
            .with_stop(-0.25, [0, 0, 255])
            .with_stop(0.0, [0, 128, 255])
            .with_stop(0.0625, [240, 240, 64])
            .with_stop(0.125, [32, 160, 0])
            .with_stop(0.375, [224, 224, 0])
            .with_stop(0.75, [128, 128, 128])
            .with_stop(1.0, [255, 255, 255])
    }

    pub fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Adds a stop; stops are kept sorted by value.
    pub fn with_stop(mut self, value: f32, color: [u8; 3]) -> Self {
        let at = self.stops.partition_point(|(v, _)| *v < value);
        self.stops.insert(at, (value, color));
        self
    }

    pub fn color(&self, value: f32) -> [u8; 3] {
        let Some(&(first_value, first_color)) = self.stops.first() else {
            return [0, 0, 0];
        };
        if value <= first_value {
            return first_color;
        }
        for pair in self.stops.windows(2) {
            let (v0, c0) = pair[0];
            let (v1, c1) = pair[1];
            if value <= v1 {
                let t = if v1 > v0 { (value - v0) / (v1 - v0) } else { 1.0 };
                let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
                return [mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2])];
            }
        }
        self.stops.last().map_or(first_color, |&(_, color)| color)
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::grayscale()
    }
}

/// How a map is turned into pixels.
#[derive(Clone, Debug, Default)]
pub struct RenderConfig {
    pub gradient: ColorGradient,
    /// Stretch the map's own min/max onto [-1, 1] before colouring.
    pub normalize: bool,
}

impl RenderConfig {
    pub fn new(gradient: ColorGradient) -> Self {
        Self {
            gradient,
            normalize: false,
        }
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// Writes `map` to `out` as an RGB PNG, row 0 at the top.
pub fn render_map_to_png(
    map: &NoiseMap,
    config: &RenderConfig,
    out: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let out = out.as_ref();
    let Some((lo, hi)) = map.min_max() else {
        bail!("cannot render an empty map to {}", out.display());
    };
    let (width, height) = map.size();
    let remap = |v: f32| {
        if config.normalize && hi > lo {
            (v - lo) / (hi - lo) * 2.0 - 1.0
        } else {
            v
        }
    };

    let img = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        Rgb(config.gradient.color(remap(map.get(x as isize, y as isize))))
    });
    img.save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!(
        "Wrote {} ({}x{}, values in [{:.3}, {:.3}]).",
        out.display(),
        width,
        height,
        lo,
        hi
    );
    Ok(())
}
