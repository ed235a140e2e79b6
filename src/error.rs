use thiserror::Error;

/// Errors emitted by the geometry core.
///
/// Every variant is a deterministic input-validation failure: the same input
/// always produces the same error, so callers should never retry. A failure
/// concerns exactly one cell and must not discard results already produced
/// for other cells.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The scalar normalizer saw a constant field.
    #[error("cannot normalize a constant attribute field (all values are {0})")]
    DegenerateRange(f64),

    /// The scalar normalizer received no values at all.
    #[error("cannot normalize an empty attribute field")]
    EmptyAttributes,

    /// A ring with fewer than 3 vertices, an odd coordinate count, or
    /// coincident consecutive vertices.
    #[error("invalid ring: {0}")]
    InvalidRing(String),

    /// Ear clipping completed a full pass without finding a valid ear.
    /// Happens on self-intersecting or numerically degenerate rings.
    #[error("triangulation stalled with {0} vertices remaining")]
    TriangulationStalled(usize),

    /// Two cells carry the same source-point tag.
    #[error("cells {first_cell} and {second_cell} both claim source point {index}")]
    AmbiguousKey {
        index: usize,
        first_cell: usize,
        second_cell: usize,
    },

    /// A cell's source-point tag does not fit the declared point count.
    #[error("source index {index} is out of range for {point_count} sample points")]
    SourceOutOfRange { index: usize, point_count: usize },

    /// No cell claimed this sample point, so no height can be restored for it.
    #[error("no cell claims source point {0}")]
    UnresolvedSource(usize),
}
