use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, render_map_to_png, ColorGradient, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut graph = ModuleGraph::new();
    let perlin = graph.add(ModuleKind::perlin(FractalParams::default().with_seed(5)))?;
    let terrace = graph.add_with_sources(
        ModuleKind::Terrace {
            params: TerraceParams::evenly_spaced(6),
        },
        &[perlin],
    )?;

    let plane = PlaneProjection::new(Bounds::new(0.0, 2.0), Bounds::new(0.0, 2.0));
    let coarse = build_map(&graph, terrace, MapBuilderConfig::new(32, 32, plane))?;
    let config = RenderConfig::new(ColorGradient::grayscale());
    render_map_to_png(&coarse, &config, "grids-resample-coarse.png")?;

    for (clamp, out) in [
        (true, "grids-resample-clamped.png"),
        (false, "grids-resample-border.png"),
    ] {
        let fine = NoiseMap::resample(&coarse, 512, 512, clamp);
        render_map_to_png(&fine, &config, out)?;
    }

    let cube = build_cube(
        &graph,
        perlin,
        CubeBuilderConfig::new(16, 16, 16, VolumeBounds::default()),
    )?;
    let fine = NoiseCube::resample(&cube, 64, 64, 64, true);
    if let Some((lo, hi)) = fine.min_max() {
        info!("Upsampled cube {:?} spans [{:.3}, {:.3}].", fine.size(), lo, hi);
    }
    Ok(())
}
