use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, render_map_to_png, ColorGradient, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let (graph, root) = terrain()?;
    let plane = PlaneProjection::new(Bounds::new(0.0, 6.0), Bounds::new(0.0, 6.0)).with_seamless(true);
    let map = build_map(&graph, root, MapBuilderConfig::new(768, 768, plane))?;

    let config = RenderConfig::new(ColorGradient::terrain());
    render_map_to_png(&map, &config, "selectors-terrain.png")?;
    Ok(())
}

/// Flat billowy lowlands and ridged mountains, picked by a low-frequency Perlin control.
fn terrain() -> Result<(ModuleGraph, ModuleId)> {
    let mut graph = ModuleGraph::new();

    let lowlands = graph.add(ModuleKind::billow(
        FractalParams::default().with_frequency(2.0).with_seed(1),
    ))?;
    let lowlands = graph.add_with_sources(ModuleKind::scale_bias(0.125, -0.75), &[lowlands])?;

    let mountains = graph.add(ModuleKind::ridged_multi(
        RidgedMultiParams::default().with_seed(2),
    ))?;
    let mountains = graph.add_with_sources(ModuleKind::scale_bias(0.75, -0.5), &[mountains])?;

    let control = graph.add(ModuleKind::perlin(
        FractalParams::default()
            .with_frequency(0.5)
            .with_persistence(0.25)
            .with_seed(3),
    ))?;
    let control = graph.add_with_sources(ModuleKind::Cache, &[control])?;

    let select = graph.add_with_sources(
        ModuleKind::select(0.0, 1000.0, 0.125),
        &[lowlands, mountains, control],
    )?;

    let root = graph.add_with_sources(
        ModuleKind::Turbulence {
            params: TurbulenceParams::default()
                .with_frequency(4.0)
                .with_power(0.125)
                .with_seed(4),
        },
        &[select],
    )?;

    let opts = CompileOptions::default().with_detect_cycles(true);
    graph.compile(root, &opts)?;
    Ok((graph, root))
}
