use crate::error::GeometryError;

/// Minimum distance between consecutive ring vertices.
const MIN_EDGE_LENGTH: f64 = 1e-9;

/// A simple closed polygon boundary in the XY plane.
///
/// Vertices are stored as a flat array `[x, y, x, y, ...]` in traversal
/// order. The ring is implicitly closed: the last vertex connects back to the
/// first and the first vertex is never repeated at the end. Construction
/// validates the invariants (at least 3 vertices, no coincident consecutive
/// vertices); a `Ring` is immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    vertices: Vec<f64>,
}

impl Ring {
    pub fn new(vertices: Vec<f64>) -> Result<Ring, GeometryError> {
        if vertices.len() % 2 != 0 {
            return Err(GeometryError::InvalidRing(format!(
                "odd coordinate count {}",
                vertices.len()
            )));
        }
        let n = vertices.len() / 2;
        if n < 3 {
            return Err(GeometryError::InvalidRing(format!(
                "needs at least 3 vertices, got {n}"
            )));
        }
        for i in 0..n {
            let j = (i + 1) % n;
            let dx = vertices[j * 2] - vertices[i * 2];
            let dy = vertices[j * 2 + 1] - vertices[i * 2 + 1];
            if dx * dx + dy * dy < MIN_EDGE_LENGTH * MIN_EDGE_LENGTH {
                return Err(GeometryError::InvalidRing(format!(
                    "coincident consecutive vertices at index {i}"
                )));
            }
        }
        Ok(Ring { vertices })
    }

    /// Builds a ring from a sequence that repeats the first vertex at the
    /// end, the convention of most polygon exporters.
    pub fn from_closed(mut vertices: Vec<f64>) -> Result<Ring, GeometryError> {
        let len = vertices.len();
        if len >= 4 && len % 2 == 0 {
            let dx = vertices[len - 2] - vertices[0];
            let dy = vertices[len - 1] - vertices[1];
            if dx * dx + dy * dy < MIN_EDGE_LENGTH * MIN_EDGE_LENGTH {
                vertices.truncate(len - 2);
            }
        }
        Ring::new(vertices)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Flat `[x, y, x, y, ...]` coordinate slice.
    pub fn coords(&self) -> &[f64] {
        &self.vertices
    }

    pub fn x(&self, i: usize) -> f64 {
        self.vertices[i * 2]
    }

    pub fn y(&self, i: usize) -> f64 {
        self.vertices[i * 2 + 1]
    }

    /// Signed shoelace area: positive for counter-clockwise traversal.
    pub fn signed_area(&self) -> f64 {
        let n = self.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.x(i) * self.y(j) - self.x(j) * self.y(i);
        }
        area * 0.5
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }
}
