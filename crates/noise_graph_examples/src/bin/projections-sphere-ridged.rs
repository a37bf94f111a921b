use glam::DVec3;
use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, render_map_to_png, ColorGradient, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut graph = ModuleGraph::new();
    let ridged = graph.add(ModuleKind::ridged_multi(
        RidgedMultiParams::default()
            .with_frequency(1.5)
            .with_seed(9),
    ))?;
    let shifted = graph.add_with_sources(ModuleKind::scale_bias(1.0, -1.0), &[ridged])?;
    let curve = graph.add_with_sources(
        ModuleKind::Curve {
            params: CurveParams::default()
                .with_point(-2.0, -1.5)
                .with_point(-1.0, -1.0)
                .with_point(0.0, -0.25)
                .with_point(0.5, 0.5)
                .with_point(1.0, 1.0),
        },
        &[shifted],
    )?;
    let root = graph.add_with_sources(ModuleKind::clamp(-1.0, 1.0), &[curve])?;

    let program = graph.compile(root, &CompileOptions::default())?;
    info!(
        "North pole {:.3}, south pole {:.3}.",
        program.sample_point(DVec3::Y),
        program.sample_point(DVec3::NEG_Y)
    );
    let config = RenderConfig::new(ColorGradient::terrain());

    let sphere = MapBuilderConfig::new(1024, 512, SphereProjection::default());
    let map = NoiseMapBuilder::try_new(sphere, &program)?.build()?;
    render_map_to_png(&map, &config, "projections-sphere-ridged.png")?;

    let cylinder = MapBuilderConfig::new(1024, 256, CylinderProjection::default());
    let map = NoiseMapBuilder::try_new(cylinder, &program)?.build()?;
    render_map_to_png(&map, &config, "projections-cylinder-ridged.png")?;
    Ok(())
}
