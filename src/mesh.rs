/// An indexed triangle mesh with per-axis coordinate arrays.
///
/// The split `x`/`y`/`z` layout is what column-oriented scene renderers
/// consume directly; `triangles` is a flat list of index triples
/// `[i0, j0, k0, i1, j1, k1, ...]` into those arrays. A `Mesh` is a value
/// type: each producer hands out an independently owned instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub triangles: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Total unsigned area of all triangles projected onto the XY plane.
    pub fn xy_area(&self) -> f64 {
        let mut area = 0.0;
        for t in self.triangles.chunks_exact(3) {
            let (i, j, k) = (t[0] as usize, t[1] as usize, t[2] as usize);
            let cross = (self.x[j] - self.x[i]) * (self.y[k] - self.y[i])
                - (self.y[j] - self.y[i]) * (self.x[k] - self.x[i]);
            area += cross.abs() * 0.5;
        }
        area
    }

    /// Flips the facing of every triangle by swapping its last two indices.
    pub fn reverse_winding(&mut self) {
        for t in self.triangles.chunks_exact_mut(3) {
            t.swap(1, 2);
        }
    }

    /// Interleaved `[x, y, z, x, y, z, ...]` copy of the vertex coordinates.
    pub fn interleaved_coords(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.x.len() * 3);
        for i in 0..self.x.len() {
            out.push(self.x[i]);
            out.push(self.y[i]);
            out.push(self.z[i]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        Mesh {
            x: vec![0.0, 1.0, 1.0, 0.0],
            y: vec![0.0, 0.0, 1.0, 1.0],
            z: vec![0.0; 4],
            triangles: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_counts_and_area() {
        let mesh = unit_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!((mesh.xy_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reverse_winding_is_involutive() {
        let mut mesh = unit_quad();
        let original = mesh.triangles.clone();
        mesh.reverse_winding();
        assert_eq!(mesh.triangles, vec![0, 2, 1, 0, 3, 2]);
        mesh.reverse_winding();
        assert_eq!(mesh.triangles, original);
    }

    #[test]
    fn test_interleaved_coords() {
        let mesh = unit_quad();
        let flat = mesh.interleaved_coords();
        assert_eq!(flat.len(), 12);
        assert_eq!(&flat[3..6], &[1.0, 0.0, 0.0]);
    }
}
