use voroprism::{Cell, GeometryError, RegionPartitioner, Ring};

/// Voronoi partition by repeated half-plane clipping.
///
/// For each well, the outline is clipped against the perpendicular bisector
/// of every other well; what survives is that well's cell. Quadratic in the
/// number of wells, which is fine at demo scale.
pub struct HalfPlanePartitioner;

impl RegionPartitioner for HalfPlanePartitioner {
    fn partition(
        &self,
        boundary: &Ring,
        points: &[[f64; 2]],
    ) -> Result<Vec<Cell>, GeometryError> {
        let mut cells = Vec::with_capacity(points.len());
        for (i, &site) in points.iter().enumerate() {
            let mut coords = boundary.coords().to_vec();
            for (j, &other) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                coords = clip_half_plane(&coords, site, other);
                if coords.len() < 6 {
                    break;
                }
            }
            if coords.len() < 6 {
                return Err(GeometryError::InvalidRing(format!(
                    "well {i} has an empty cell"
                )));
            }
            let ring = Ring::new(dedup_consecutive(coords))?;
            cells.push(Cell::new(i, ring, site, i));
        }
        Ok(cells)
    }
}

/// Keeps the part of the ring closer to `a` than to `b` (Sutherland-Hodgman
/// against the perpendicular bisector of the two sites).
fn clip_half_plane(coords: &[f64], a: [f64; 2], b: [f64; 2]) -> Vec<f64> {
    let side = |x: f64, y: f64| {
        (x - a[0]) * (x - a[0]) + (y - a[1]) * (y - a[1])
            - (x - b[0]) * (x - b[0])
            - (y - b[1]) * (y - b[1])
    };

    let n = coords.len() / 2;
    let mut out = Vec::with_capacity(coords.len() + 4);
    for i in 0..n {
        let (x0, y0) = (coords[i * 2], coords[i * 2 + 1]);
        let j = (i + 1) % n;
        let (x1, y1) = (coords[j * 2], coords[j * 2 + 1]);
        let (d0, d1) = (side(x0, y0), side(x1, y1));

        if d0 <= 0.0 {
            out.push(x0);
            out.push(y0);
        }
        if (d0 < 0.0) != (d1 < 0.0) && d0 != d1 {
            let t = d0 / (d0 - d1);
            out.push(x0 + t * (x1 - x0));
            out.push(y0 + t * (y1 - y0));
        }
    }
    out
}

/// Clipping can emit coincident neighbors when a vertex lies exactly on a
/// bisector; collapse them before ring validation.
fn dedup_consecutive(coords: Vec<f64>) -> Vec<f64> {
    const EPS: f64 = 1e-9;
    let n = coords.len() / 2;
    let mut out: Vec<f64> = Vec::with_capacity(coords.len());
    for i in 0..n {
        let (x, y) = (coords[i * 2], coords[i * 2 + 1]);
        let same = |px: f64, py: f64| (x - px).abs() < EPS && (y - py).abs() < EPS;
        if let [.., px, py] = out[..] {
            if same(px, py) {
                continue;
            }
        }
        out.push(x);
        out.push(y);
    }
    // last vertex may coincide with the first
    if out.len() >= 4
        && (out[0] - out[out.len() - 2]).abs() < EPS
        && (out[1] - out[out.len() - 1]).abs() < EPS
    {
        out.truncate(out.len() - 2);
    }
    out
}
