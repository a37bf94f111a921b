use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, render_map_to_png, ColorGradient, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut graph = ModuleGraph::new();
    let perlin = graph.add(ModuleKind::perlin(
        FractalParams::default()
            .with_frequency(2.0)
            .with_octave_count(8)
            .with_seed(42),
    ))?;

    let plane = PlaneProjection::new(Bounds::new(0.0, 4.0), Bounds::new(0.0, 4.0));
    let map = build_map(&graph, perlin, MapBuilderConfig::new(512, 512, plane))?;

    let config = RenderConfig::new(ColorGradient::grayscale());
    render_map_to_png(&map, &config, "generators-perlin-plane.png")?;
    Ok(())
}
