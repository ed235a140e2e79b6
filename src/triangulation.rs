use crate::error::GeometryError;
use crate::ring::Ring;

/// Collinearity threshold on the doubled signed area of a candidate ear.
const EPS_AREA: f64 = 1e-12;

/// Triangulates a simple ring by ear clipping.
///
/// Returns a flat list of index triples `[i, j, k, ...]` referencing the
/// ring's ORIGINAL vertex order, so the same list can index both caps of an
/// extruded prism without re-triangulating. A ring of n vertices always
/// yields exactly n - 2 triangles, and the scan order is fixed, so the output
/// is deterministic.
///
/// Works for convex and concave rings in either winding: the convexity test
/// takes its sign from the ring's signed area. Collinear triples are never
/// ears (they would emit zero-area triangles). If a full pass over the
/// working list finds no ear the ring is malformed (typically
/// self-intersecting) and the scan aborts with
/// [`GeometryError::TriangulationStalled`] instead of spinning.
pub fn triangulate(ring: &Ring) -> Result<Vec<u32>, GeometryError> {
    let n = ring.len();
    let ccw = ring.is_counter_clockwise();

    let mut work: Vec<u32> = (0..n as u32).collect();
    let mut triangles = Vec::with_capacity((n - 2) * 3);

    let mut cursor = 0;
    let mut rejected = 0;
    while work.len() > 3 {
        let m = work.len();
        if rejected >= m {
            return Err(GeometryError::TriangulationStalled(m));
        }

        let prev = work[(cursor + m - 1) % m];
        let curr = work[cursor];
        let next = work[(cursor + 1) % m];

        if is_ear(ring, &work, prev, curr, next, ccw) {
            triangles.push(prev);
            triangles.push(curr);
            triangles.push(next);
            work.remove(cursor);
            rejected = 0;
            if cursor >= work.len() {
                cursor = 0;
            }
        } else {
            rejected += 1;
            cursor = (cursor + 1) % m;
        }
    }

    triangles.extend_from_slice(&work);
    Ok(triangles)
}

/// Doubled signed area of the triangle (a, b, c); positive when the turn at b
/// is counter-clockwise.
fn cross(ring: &Ring, a: u32, b: u32, c: u32) -> f64 {
    let (ax, ay) = (ring.x(a as usize), ring.y(a as usize));
    let (bx, by) = (ring.x(b as usize), ring.y(b as usize));
    let (cx, cy) = (ring.x(c as usize), ring.y(c as usize));
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

fn is_ear(ring: &Ring, work: &[u32], prev: u32, curr: u32, next: u32, ccw: bool) -> bool {
    // The vertex must be convex with respect to the ring's winding.
    let area2 = cross(ring, prev, curr, next);
    let convex = if ccw { area2 > EPS_AREA } else { area2 < -EPS_AREA };
    if !convex {
        return false;
    }

    // No other remaining vertex may lie strictly inside the candidate.
    for &k in work {
        if k == prev || k == curr || k == next {
            continue;
        }
        if inside_triangle(ring, prev, curr, next, k, ccw) {
            return false;
        }
    }
    true
}

fn inside_triangle(ring: &Ring, a: u32, b: u32, c: u32, p: u32, ccw: bool) -> bool {
    let d0 = cross(ring, a, b, p);
    let d1 = cross(ring, b, c, p);
    let d2 = cross(ring, c, a, p);
    if ccw {
        d0 > EPS_AREA && d1 > EPS_AREA && d2 > EPS_AREA
    } else {
        d0 < -EPS_AREA && d1 < -EPS_AREA && d2 < -EPS_AREA
    }
}
