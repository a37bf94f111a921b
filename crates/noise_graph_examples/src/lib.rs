#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_map_to_png, ColorGradient, RenderConfig};
