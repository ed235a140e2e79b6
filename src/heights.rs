use crate::cell::Cell;
use crate::error::GeometryError;

/// Restores a per-point value array in the ORIGINAL input-point order.
///
/// Partitioners are free to scramble cell order, so each value is scattered
/// into the slot named by its cell's `source_index` tag. Reconstructing the
/// order from coordinates (e.g. sorting by x) would silently break whenever
/// two points share a coordinate; the tag makes the mapping collision-free by
/// construction, and any violation is reported by name:
///
/// - a tag claimed by two cells is [`GeometryError::AmbiguousKey`],
/// - a tag outside `0..point_count` is [`GeometryError::SourceOutOfRange`],
/// - a point no cell claims is [`GeometryError::UnresolvedSource`].
///
/// `values[i]` is the scalar of `cells[i]`.
pub fn resolve(
    cells: &[Cell],
    values: &[f64],
    point_count: usize,
) -> Result<Vec<f64>, GeometryError> {
    debug_assert_eq!(cells.len(), values.len());

    let mut resolved: Vec<Option<f64>> = vec![None; point_count];
    let mut claimed_by: Vec<Option<usize>> = vec![None; point_count];

    for (cell, &value) in cells.iter().zip(values) {
        let index = cell.source_index();
        if index >= point_count {
            return Err(GeometryError::SourceOutOfRange { index, point_count });
        }
        if let Some(first_cell) = claimed_by[index] {
            return Err(GeometryError::AmbiguousKey {
                index,
                first_cell,
                second_cell: cell.id(),
            });
        }
        claimed_by[index] = Some(cell.id());
        resolved[index] = Some(value);
    }

    resolved
        .into_iter()
        .enumerate()
        .map(|(i, v)| v.ok_or(GeometryError::UnresolvedSource(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Ring;

    fn cell(id: usize, source_index: usize) -> Cell {
        let ring = Ring::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
        Cell::new(id, ring, [0.0, 0.0], source_index)
    }

    #[test]
    fn test_resolve_scrambled_order() {
        // Partition output order 2, 0, 1
        let cells = vec![cell(0, 2), cell(1, 0), cell(2, 1)];
        let heights = resolve(&cells, &[30.0, 10.0, 20.0], 3).unwrap();
        assert_eq!(heights, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_duplicate_tag_is_ambiguous() {
        let cells = vec![cell(0, 1), cell(1, 1)];
        let err = resolve(&cells, &[1.0, 2.0], 2).unwrap_err();
        assert_eq!(
            err,
            GeometryError::AmbiguousKey {
                index: 1,
                first_cell: 0,
                second_cell: 1,
            }
        );
    }

    #[test]
    fn test_out_of_range_tag() {
        let cells = vec![cell(0, 5)];
        let err = resolve(&cells, &[1.0], 2).unwrap_err();
        assert_eq!(
            err,
            GeometryError::SourceOutOfRange {
                index: 5,
                point_count: 2,
            }
        );
    }

    #[test]
    fn test_unclaimed_point() {
        let cells = vec![cell(0, 0)];
        let err = resolve(&cells, &[1.0], 2).unwrap_err();
        assert_eq!(err, GeometryError::UnresolvedSource(1));
    }
}
