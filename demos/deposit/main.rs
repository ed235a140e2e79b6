mod gltf;
mod partition;
mod svg;

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;
use voroprism::{Gradient, Pipeline, PipelineConfig, RegionPartitioner, Ring};

#[derive(Serialize)]
struct LegendEntry {
    well: usize,
    value: f64,
    color: [u8; 3],
    marker_height: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Deposit outline: a concave octagon around the well field.
    let outline = Ring::new(vec![
        0.0, 0.0, 60.0, -10.0, 120.0, 0.0, 130.0, 50.0, 120.0, 100.0, 60.0, 85.0, 0.0, 100.0,
        -10.0, 50.0,
    ])?;

    // Wells on a jittered grid, deterministic across runs.
    let mut rng = StdRng::seed_from_u64(42);
    let mut wells = Vec::new();
    for row in 0..5 {
        for col in 0..6 {
            wells.push([
                15.0 + col as f64 * 18.0 + rng.r#gen::<f64>() * 8.0,
                12.0 + row as f64 * 16.0 + rng.r#gen::<f64>() * 6.0,
            ]);
        }
    }
    let attributes: Vec<f64> = wells.iter().map(|_| 5.0 + rng.r#gen::<f64>() * 35.0).collect();

    let cells = partition::HalfPlanePartitioner.partition(&outline, &wells)?;
    println!("Partitioned {} wells into {} cells", wells.len(), cells.len());

    let pipeline = Pipeline::new(PipelineConfig {
        base_elevation: 0.0,
        gradient: Gradient::default(),
    });

    println!("Rendering 2D map...");
    let flats = pipeline.build_flat(&cells, &attributes)?;
    svg::draw_deposit(&outline, &flats, &wells, "deposit_2d.svg")?;

    println!("Rendering 3D prisms...");
    let build = pipeline.build_prisms(&cells, &attributes)?;
    for (id, error) in &build.failures {
        eprintln!("cell {id} skipped: {error}");
    }
    gltf::save_prisms(&build.prisms, "deposit_3d.glb")?;

    let heights = pipeline.marker_heights(&cells, &attributes, wells.len())?;
    let legend: Vec<LegendEntry> = build
        .prisms
        .iter()
        .map(|p| LegendEntry {
            well: p.source_index,
            value: p.value,
            color: [p.color.r, p.color.g, p.color.b],
            marker_height: heights[p.source_index],
        })
        .collect();
    std::fs::write("deposit_legend.json", serde_json::to_string_pretty(&legend)?)?;
    println!("Output saved to deposit_legend.json");

    Ok(())
}
