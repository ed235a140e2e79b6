use plotters::prelude::*;
use voroprism::{FlatCell, Ring};

/// Draws the flat 2D view: each cell filled with its gradient color, the
/// deposit outline on top, and the wells as black dots.
pub fn draw_deposit(
    outline: &Ring,
    cells: &[FlatCell],
    wells: &[[f64; 2]],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (x_range, y_range) = ring_bounds(outline);

    let root = SVGBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Deposit cells by attribute", ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(x_range, y_range)?;

    chart.configure_mesh().draw()?;

    for cell in cells {
        let poly: Vec<(f64, f64)> = (0..cell.ring.len())
            .map(|i| (cell.ring.x(i), cell.ring.y(i)))
            .collect();
        let fill = RGBColor(cell.color.r, cell.color.g, cell.color.b);
        chart.draw_series(std::iter::once(Polygon::new(
            poly.clone(),
            fill.mix(0.8).filled(),
        )))?;

        let mut border = poly;
        border.push(border[0]);
        chart.draw_series(std::iter::once(PathElement::new(border, BLACK)))?;
    }

    let mut edge: Vec<(f64, f64)> = (0..outline.len())
        .map(|i| (outline.x(i), outline.y(i)))
        .collect();
    edge.push(edge[0]);
    chart.draw_series(std::iter::once(PathElement::new(
        edge,
        BLACK.stroke_width(2),
    )))?;

    chart.draw_series(
        wells
            .iter()
            .map(|&[x, y]| Circle::new((x, y), 3, BLACK.filled())),
    )?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}

fn ring_bounds(ring: &Ring) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let mut min = [f64::MAX; 2];
    let mut max = [f64::MIN; 2];
    for i in 0..ring.len() {
        let (x, y) = (ring.x(i), ring.y(i));
        min[0] = min[0].min(x);
        min[1] = min[1].min(y);
        max[0] = max[0].max(x);
        max[1] = max[1].max(y);
    }
    (min[0] - 5.0..max[0] + 5.0, min[1] - 5.0..max[1] + 5.0)
}
