use crate::cell::{AttributeProvider, Cell};
use crate::color::{ColorRgb, Gradient, normalize};
use crate::error::GeometryError;
use crate::extrusion::{Prism, extrude};
use crate::heights;
use crate::ring::Ring;
use crate::triangulation::triangulate;
use rayon::prelude::*;

/// Configuration consumed from the environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Elevation of every bottom cap.
    pub base_elevation: f64,
    /// Gradient endpoints for cell coloring.
    pub gradient: Gradient,
}

impl Default for PipelineConfig {
    fn default() -> PipelineConfig {
        PipelineConfig {
            base_elevation: 0.0,
            gradient: Gradient::default(),
        }
    }
}

/// One cell of the flat 2D view: its outline and fill color.
#[derive(Clone, Debug)]
pub struct FlatCell {
    pub id: usize,
    pub source_index: usize,
    pub ring: Ring,
    pub color: ColorRgb,
    pub value: f64,
}

/// One cell of the 3D view: the extruded prism plus its color and the raw
/// scalar for legend display.
#[derive(Clone, Debug)]
pub struct PrismCell {
    pub id: usize,
    pub source_index: usize,
    pub prism: Prism,
    pub color: ColorRgb,
    pub value: f64,
}

/// Result of a prism build.
///
/// Failures are kept per cell so one malformed ring cannot block rendering
/// of the rest; `failures` pairs each failed cell's id with its error.
#[derive(Clone, Debug, Default)]
pub struct PrismBuild {
    pub prisms: Vec<PrismCell>,
    pub failures: Vec<(usize, GeometryError)>,
}

/// Turns partitioned cells plus per-point attributes into renderable
/// geometry for the external scene renderer.
///
/// Each cell's triangulation and extrusion is independent, so the prism
/// build fans out over rayon workers and just collects the results.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    pub config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Pipeline {
        Pipeline { config }
    }

    /// Builds the flat 2D view: each cell's ring with its gradient color.
    pub fn build_flat(
        &self,
        cells: &[Cell],
        attributes: &dyn AttributeProvider,
    ) -> Result<Vec<FlatCell>, GeometryError> {
        let values = cell_values(cells, attributes)?;
        let colors = self.cell_colors(&values)?;

        Ok(cells
            .iter()
            .zip(values.iter().zip(colors))
            .map(|(cell, (&value, color))| FlatCell {
                id: cell.id(),
                source_index: cell.source_index(),
                ring: cell.ring().clone(),
                color,
                value,
            })
            .collect())
    }

    /// Builds the 3D view: one prism per cell, height taken from the cell's
    /// attribute on top of the configured base elevation.
    ///
    /// Cells are processed in parallel; a cell that fails triangulation or
    /// extrusion lands in `failures` without affecting its neighbors. Only a
    /// whole-input failure (an attribute field that cannot be normalized for
    /// a reason other than being constant) aborts the build.
    pub fn build_prisms(
        &self,
        cells: &[Cell],
        attributes: &dyn AttributeProvider,
    ) -> Result<PrismBuild, GeometryError> {
        let values = cell_values(cells, attributes)?;
        let colors = self.cell_colors(&values)?;
        let z0 = self.config.base_elevation;

        let results: Vec<Result<PrismCell, (usize, GeometryError)>> = cells
            .par_iter()
            .zip(values.par_iter().zip(colors))
            .map(|(cell, (&value, color))| {
                let cap = triangulate(cell.ring()).map_err(|e| (cell.id(), e))?;
                let prism =
                    extrude(cell.ring(), &cap, z0, z0 + value).map_err(|e| (cell.id(), e))?;
                Ok(PrismCell {
                    id: cell.id(),
                    source_index: cell.source_index(),
                    prism,
                    color,
                    value,
                })
            })
            .collect();

        let mut build = PrismBuild::default();
        for result in results {
            match result {
                Ok(prism) => build.prisms.push(prism),
                Err(failure) => build.failures.push(failure),
            }
        }
        Ok(build)
    }

    /// Per-point heights in the original input order, for marker placement.
    pub fn marker_heights(
        &self,
        cells: &[Cell],
        attributes: &dyn AttributeProvider,
        point_count: usize,
    ) -> Result<Vec<f64>, GeometryError> {
        let values = cell_values(cells, attributes)?;
        heights::resolve(cells, &values, point_count)
    }

    /// Normalizes per-cell values and samples the gradient. A constant field
    /// cannot be normalized; every cell gets the midpoint color instead.
    fn cell_colors(&self, values: &[f64]) -> Result<Vec<ColorRgb>, GeometryError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let gradient = self.config.gradient;
        match normalize(values) {
            Ok(normalized) => Ok(normalized.iter().map(|&t| gradient.sample(t)).collect()),
            Err(GeometryError::DegenerateRange(_)) => {
                Ok(vec![gradient.sample(0.5); values.len()])
            }
            Err(other) => Err(other),
        }
    }
}

/// Pulls each cell's scalar from the provider, keyed by the source tag.
///
/// A tag outside the provider's range is a build-aborting input error, not a
/// per-cell one: it means the partitioner and the attribute data disagree
/// about the sample points, so no cell's value can be trusted.
fn cell_values(
    cells: &[Cell],
    attributes: &dyn AttributeProvider,
) -> Result<Vec<f64>, GeometryError> {
    let point_count = attributes.point_count();
    cells
        .iter()
        .map(|cell| {
            let index = cell.source_index();
            if index >= point_count {
                return Err(GeometryError::SourceOutOfRange { index, point_count });
            }
            Ok(attributes.attribute(index, &cell.source()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_cell(id: usize, offset: f64, source_index: usize) -> Cell {
        let ring = Ring::new(vec![
            offset,
            0.0,
            offset + 1.0,
            0.0,
            offset + 1.0,
            1.0,
            offset,
            1.0,
        ])
        .unwrap();
        Cell::new(id, ring, [offset + 0.5, 0.5], source_index)
    }

    #[test]
    fn test_build_flat_colors_span_gradient() {
        let cells = vec![
            square_cell(0, 0.0, 0),
            square_cell(1, 2.0, 1),
            square_cell(2, 4.0, 2),
        ];
        let pipeline = Pipeline::default();
        let flats = pipeline.build_flat(&cells, &vec![10.0, 20.0, 30.0]).unwrap();

        assert_eq!(flats.len(), 3);
        assert_eq!(flats[0].color, ColorRgb::new(0, 0, 255));
        assert_eq!(flats[2].color, ColorRgb::new(255, 0, 0));
    }

    #[test]
    fn test_constant_field_maps_to_midpoint() {
        let cells = vec![square_cell(0, 0.0, 0), square_cell(1, 2.0, 1)];
        let pipeline = Pipeline::default();
        let flats = pipeline.build_flat(&cells, &vec![5.0, 5.0]).unwrap();

        let midpoint = Gradient::default().sample(0.5);
        assert!(flats.iter().all(|f| f.color == midpoint));
    }

    #[test]
    fn test_build_prisms_heights_and_counts() {
        let cells = vec![square_cell(0, 0.0, 0), square_cell(1, 2.0, 1)];
        let pipeline = Pipeline::new(PipelineConfig {
            base_elevation: 1.0,
            gradient: Gradient::default(),
        });
        let build = pipeline.build_prisms(&cells, &vec![2.0, 4.0]).unwrap();

        assert!(build.failures.is_empty());
        assert_eq!(build.prisms.len(), 2);
        let first = &build.prisms[0];
        assert!(first.prism.bottom.z.iter().all(|&z| z == 1.0));
        assert!(first.prism.top.z.iter().all(|&z| z == 3.0));
        assert_eq!(first.prism.side.triangle_count(), 8);
    }

    #[test]
    fn test_out_of_range_tag_is_a_named_error() {
        // One attribute, but the cell claims sample point 9.
        let cells = vec![square_cell(0, 0.0, 9)];
        let pipeline = Pipeline::default();
        let attributes = vec![1.0];

        let expected = GeometryError::SourceOutOfRange {
            index: 9,
            point_count: 1,
        };
        assert_eq!(
            pipeline.marker_heights(&cells, &attributes, 1).unwrap_err(),
            expected
        );
        assert_eq!(
            pipeline.build_flat(&cells, &attributes).unwrap_err(),
            expected
        );
        assert_eq!(
            pipeline.build_prisms(&cells, &attributes).unwrap_err(),
            expected
        );
    }

    #[test]
    fn test_empty_partition_builds_nothing() {
        let pipeline = Pipeline::default();
        let attributes: Vec<f64> = Vec::new();
        assert!(pipeline.build_flat(&[], &attributes).unwrap().is_empty());
        let build = pipeline.build_prisms(&[], &attributes).unwrap();
        assert!(build.prisms.is_empty() && build.failures.is_empty());
    }

    #[test]
    fn test_marker_heights_follow_input_order() {
        // Cells arrive in scrambled partition order.
        let cells = vec![square_cell(0, 0.0, 1), square_cell(1, 2.0, 0)];
        let pipeline = Pipeline::default();
        let heights = pipeline
            .marker_heights(&cells, &vec![10.0, 20.0], 2)
            .unwrap();
        assert_eq!(heights, vec![10.0, 20.0]);
    }
}
