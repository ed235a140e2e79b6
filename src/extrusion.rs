use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::ring::Ring;

/// The three meshes of one extruded cell.
///
/// Both caps index the same ring vertices (bottom at `z0`, top at `z1`) with
/// mutually reversed winding so each faces away from the solid; the side wall
/// owns its own doubled vertex ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Prism {
    pub bottom: Mesh,
    pub top: Mesh,
    pub side: Mesh,
}

/// Extrudes a triangulated ring into a closed prism between `z0` and `z1`.
///
/// `cap_triangles` is the ear-clipping output for `ring` and is reused for
/// both caps. The caps are oriented from the ring's winding: the top cap
/// always faces +z and the bottom cap -z, whichever way the ring is wound.
/// `z1 == z0` is permitted and produces a zero-height prism whose side wall
/// triangles are all degenerate; renderers simply draw nothing for them.
pub fn extrude(
    ring: &Ring,
    cap_triangles: &[u32],
    z0: f64,
    z1: f64,
) -> Result<Prism, GeometryError> {
    let n = ring.len();
    for &idx in cap_triangles {
        if idx as usize >= n {
            return Err(GeometryError::InvalidRing(format!(
                "cap index {idx} out of range for ring of {n} vertices"
            )));
        }
    }

    // A CCW ring's cap triangles wind CCW seen from above (+z normal), so
    // they serve as-is for the top cap and flipped for the bottom; a CW ring
    // is the mirror case.
    let ccw = ring.is_counter_clockwise();
    let bottom = cap(ring, cap_triangles, z0, ccw);
    let top = cap(ring, cap_triangles, z1, !ccw);
    let side = side_wall(ring, z0, z1);

    Ok(Prism { bottom, top, side })
}

/// Builds one flat cap at elevation `z`, flipping the triangle winding when
/// `flip` is set.
pub fn cap(ring: &Ring, cap_triangles: &[u32], z: f64, flip: bool) -> Mesh {
    let n = ring.len();
    let mut mesh = Mesh {
        x: Vec::with_capacity(n),
        y: Vec::with_capacity(n),
        z: vec![z; n],
        triangles: cap_triangles.to_vec(),
    };
    for i in 0..n {
        mesh.x.push(ring.x(i));
        mesh.y.push(ring.y(i));
    }
    if flip {
        mesh.reverse_winding();
    }
    mesh
}

/// Builds the vertical skirt connecting the two cap boundaries.
///
/// The vertex array is the "double ring" `[v0@z0, v0@z1, v1@z0, v1@z1, ...]`
/// of length 2n, covered by a zigzag strip of triangles `(t, t+1, t+2)` taken
/// modulo 2n. The modulo wraps the strip across the seam between the last and
/// first ring vertices; without those two wrap triangles one quad of the wall
/// would stay open.
fn side_wall(ring: &Ring, z0: f64, z1: f64) -> Mesh {
    let n = ring.len();
    let double = (2 * n) as u32;

    let mut mesh = Mesh {
        x: Vec::with_capacity(2 * n),
        y: Vec::with_capacity(2 * n),
        z: Vec::with_capacity(2 * n),
        triangles: Vec::with_capacity(2 * n * 3),
    };
    for i in 0..n {
        mesh.x.push(ring.x(i));
        mesh.y.push(ring.y(i));
        mesh.z.push(z0);
        mesh.x.push(ring.x(i));
        mesh.y.push(ring.y(i));
        mesh.z.push(z1);
    }
    for t in 0..double {
        mesh.triangles.push(t);
        mesh.triangles.push((t + 1) % double);
        mesh.triangles.push((t + 2) % double);
    }
    mesh
}
