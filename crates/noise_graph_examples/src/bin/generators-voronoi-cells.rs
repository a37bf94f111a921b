use noise_graph::prelude::*;
use noise_graph_examples::{init_tracing, render_map_to_png, ColorGradient, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let plane = PlaneProjection::new(Bounds::new(0.0, 8.0), Bounds::new(0.0, 8.0));
    let config = RenderConfig::new(ColorGradient::grayscale()).with_normalize(true);

    for (cell_function, out) in [
        (CellFunction::Value, "generators-voronoi-value.png"),
        (CellFunction::Distance, "generators-voronoi-distance.png"),
    ] {
        let mut graph = ModuleGraph::new();
        let voronoi = graph.add(ModuleKind::voronoi(
            VoronoiParams::default()
                .with_seed(7)
                .with_displacement(if cell_function == CellFunction::Distance {
                    0.0
                } else {
                    1.0
                })
                .with_cell_function(cell_function),
        ))?;
        let map = build_map(&graph, voronoi, MapBuilderConfig::new(512, 512, plane))?;
        render_map_to_png(&map, &config, out)?;
    }
    Ok(())
}
