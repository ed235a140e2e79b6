use crate::error::GeometryError;
use crate::ring::Ring;

/// One region of the spatial partition.
///
/// Carries the ring, the sample point that generated it, and that point's
/// index in the ORIGINAL input order. Partitioners may emit cells in any
/// order, so the `source_index` tag is the only way to get back to the
/// caller's point ordering; geometric values are never used as lookup keys.
/// Cells are produced once by a [`RegionPartitioner`] and read-only
/// afterwards.
#[derive(Clone, Debug)]
pub struct Cell {
    id: usize,
    ring: Ring,
    source: [f64; 2],
    source_index: usize,
}

impl Cell {
    pub fn new(id: usize, ring: Ring, source: [f64; 2], source_index: usize) -> Cell {
        Cell {
            id,
            ring,
            source,
            source_index,
        }
    }

    /// Stable integer id, assigned in partition output order.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// The sample point this cell grew from.
    pub fn source(&self) -> [f64; 2] {
        self.source
    }

    /// Index of the source point in the original input slice.
    pub fn source_index(&self) -> usize {
        self.source_index
    }
}

/// External capability that splits a boundary into one cell per sample point.
///
/// The core treats implementations as opaque: it makes no assumption about
/// the partition algorithm or the order cells come back in. Implementations
/// MUST tag every cell with the index of its source point in `points`; the
/// height resolver depends on that tag.
pub trait RegionPartitioner {
    fn partition(
        &self,
        boundary: &Ring,
        points: &[[f64; 2]],
    ) -> Result<Vec<Cell>, GeometryError>;
}

/// Supplies the scalar attribute for each sample point.
///
/// Keyed by original input index so providers stay correct regardless of
/// partition order. Keeping this a capability (rather than baking values into
/// cells) keeps the core deterministic; demo randomness lives in
/// implementations outside the core.
///
/// The pipeline checks every cell's tag against `point_count` before calling
/// `attribute`, so implementations may index unchecked within that range.
pub trait AttributeProvider: Send + Sync {
    /// Number of sample points the provider covers; valid indices are
    /// `0..point_count()`.
    fn point_count(&self) -> usize;

    fn attribute(&self, index: usize, point: &[f64; 2]) -> f64;
}

/// Plain per-point slices are the common provider: `values[i]` belongs to the
/// i-th input point.
impl AttributeProvider for [f64] {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn attribute(&self, index: usize, _point: &[f64; 2]) -> f64 {
        self[index]
    }
}

impl AttributeProvider for Vec<f64> {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn attribute(&self, index: usize, point: &[f64; 2]) -> f64 {
        self.as_slice().attribute(index, point)
    }
}
