use crate::cell::Cell;
use crate::color::{ColorRgb, Gradient};
use crate::pipeline::{Pipeline, PipelineConfig, PrismCell};
use crate::ring::Ring;
use rand::prelude::*;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// JS-facing adapter around the [`Pipeline`].
///
/// Cells arrive flattened: one coordinate buffer for all rings plus per-cell
/// vertex offsets and source-index tags. After `build()`, per-prism getters
/// hand the scene renderer flat coordinate/index/color buffers, and
/// `marker_heights()` returns the per-well heights in the original input
/// order.
#[wasm_bindgen]
pub struct DepositView {
    pipeline: Pipeline,
    cells: Vec<Cell>,
    attributes: Vec<f64>,
    point_count: usize,
    prisms: Vec<PrismCell>,
    failures: Vec<String>,
}

#[wasm_bindgen]
impl DepositView {
    #[wasm_bindgen(constructor)]
    pub fn new(base_elevation: f64) -> DepositView {
        DepositView {
            pipeline: Pipeline::new(PipelineConfig {
                base_elevation,
                gradient: Gradient::default(),
            }),
            cells: Vec::new(),
            attributes: Vec::new(),
            point_count: 0,
            prisms: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Replaces the gradient endpoints (t = 0 and t = 1 colors).
    pub fn set_gradient(&mut self, r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) {
        self.pipeline.config.gradient =
            Gradient::new(ColorRgb::new(r0, g0, b0), ColorRgb::new(r1, g1, b1));
    }

    /// Loads the partition output.
    ///
    /// # Arguments
    /// * `coords` - Ring coordinates of all cells, `[x, y, x, y, ...]`.
    /// * `offsets` - For each cell, its starting VERTEX index into `coords`;
    ///   cell i owns vertices `offsets[i]..offsets[i+1]` (the last cell runs
    ///   to the end of the buffer).
    /// * `sources` - Sample point per cell, `[x, y, x, y, ...]`.
    /// * `source_indices` - Original input index of each cell's sample point.
    /// * `point_count` - Number of sample points in the original input.
    pub fn set_cells(
        &mut self,
        coords: &[f64],
        offsets: &[u32],
        sources: &[f64],
        source_indices: &[u32],
        point_count: usize,
    ) -> Result<(), JsValue> {
        let cell_count = offsets.len();
        if sources.len() != cell_count * 2 {
            return Err(JsValue::from_str(&format!(
                "sources has {} coordinates, expected {} for {} cells",
                sources.len(),
                cell_count * 2,
                cell_count
            )));
        }
        if source_indices.len() != cell_count {
            return Err(JsValue::from_str(&format!(
                "source_indices has {} entries, expected {}",
                source_indices.len(),
                cell_count
            )));
        }

        let mut cells = Vec::with_capacity(cell_count);
        for (i, &start) in offsets.iter().enumerate() {
            let start = start as usize * 2;
            let end = offsets
                .get(i + 1)
                .map(|&o| o as usize * 2)
                .unwrap_or(coords.len());
            if start > end || end > coords.len() {
                return Err(JsValue::from_str(&format!(
                    "cell {i} offsets are not monotonic within the coordinate buffer"
                )));
            }
            let ring = Ring::new(coords[start..end].to_vec())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            cells.push(Cell::new(
                i,
                ring,
                [sources[i * 2], sources[i * 2 + 1]],
                source_indices[i] as usize,
            ));
        }
        self.cells = cells;
        self.point_count = point_count;
        self.prisms.clear();
        self.failures.clear();
        Ok(())
    }

    /// Per-point attributes in original input order.
    pub fn set_attributes(&mut self, values: &[f64]) {
        self.attributes = values.to_vec();
    }

    /// Fills the attribute array with seeded placeholder values in
    /// `[low, high)`, for demos without real per-well data.
    pub fn random_attributes(&mut self, low: f64, high: f64) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        self.attributes = (0..self.point_count)
            .map(|_| low + rng.r#gen::<f64>() * (high - low))
            .collect();
    }

    /// Runs triangulation and extrusion for every loaded cell.
    ///
    /// Cells that fail validation are recorded (see `failure_count` /
    /// `failure_message`) and skipped; the rest still build.
    pub fn build(&mut self) -> Result<(), JsValue> {
        let build = self
            .pipeline
            .build_prisms(&self.cells, &self.attributes)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.prisms = build.prisms;
        self.failures = build
            .failures
            .iter()
            .map(|(id, e)| format!("cell {id}: {e}"))
            .collect();
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize {
        self.cells.len()
    }

    #[wasm_bindgen(getter)]
    pub fn count_prisms(&self) -> usize {
        self.prisms.len()
    }

    #[wasm_bindgen(getter)]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failure_message(&self, i: usize) -> Option<String> {
        self.failures.get(i).cloned()
    }

    pub fn prism_id(&self, i: usize) -> usize {
        self.prisms[i].id
    }

    pub fn prism_value(&self, i: usize) -> f64 {
        self.prisms[i].value
    }

    /// RGB fill color of prism `i`.
    pub fn prism_color(&self, i: usize) -> Vec<u8> {
        let c = self.prisms[i].color;
        vec![c.r, c.g, c.b]
    }

    /// Bottom cap of prism `i` as `[x, y, z, ...]`.
    pub fn bottom_coords(&self, i: usize) -> Vec<f64> {
        self.prisms[i].prism.bottom.interleaved_coords()
    }

    pub fn bottom_triangles(&self, i: usize) -> Vec<u32> {
        self.prisms[i].prism.bottom.triangles.clone()
    }

    pub fn top_coords(&self, i: usize) -> Vec<f64> {
        self.prisms[i].prism.top.interleaved_coords()
    }

    pub fn top_triangles(&self, i: usize) -> Vec<u32> {
        self.prisms[i].prism.top.triangles.clone()
    }

    pub fn side_coords(&self, i: usize) -> Vec<f64> {
        self.prisms[i].prism.side.interleaved_coords()
    }

    pub fn side_triangles(&self, i: usize) -> Vec<u32> {
        self.prisms[i].prism.side.triangles.clone()
    }

    /// Per-well marker heights in the original input order.
    pub fn marker_heights(&self) -> Result<Vec<f64>, JsValue> {
        self.pipeline
            .marker_heights(&self.cells, &self.attributes, self.point_count)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_workflow() {
        let mut view = DepositView::new(0.0);
        // Two unit squares side by side, partition order reversed.
        let coords = vec![
            2.0, 0.0, 3.0, 0.0, 3.0, 1.0, 2.0, 1.0, // cell 0 (well 1)
            0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, // cell 1 (well 0)
        ];
        let sources = vec![2.5, 0.5, 0.5, 0.5];
        view.set_cells(&coords, &[0, 4], &sources, &[1, 0], 2)
            .expect("cells should load");
        view.set_attributes(&[3.0, 7.0]);
        view.build().expect("build should succeed");

        assert_eq!(view.count_prisms(), 2);
        assert_eq!(view.failure_count(), 0);
        // Cell 0 is well 1, so its prism rises to attribute 7.
        assert!(view.top_coords(0).chunks(3).all(|v| v[2] == 7.0));
        assert_eq!(view.marker_heights().unwrap(), vec![3.0, 7.0]);
        assert_eq!(view.side_triangles(0).len() / 3, 8);
    }

    #[test]
    fn test_set_cells_rejects_short_buffers() {
        let coords = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];

        // sources holds one point but offsets declare two cells
        let mut view = DepositView::new(0.0);
        assert!(
            view.set_cells(&coords, &[0, 2], &[0.5, 0.5], &[0, 1], 2)
                .is_err()
        );
        assert_eq!(view.count_cells(), 0);

        // source_indices shorter than the cell count
        let mut view = DepositView::new(0.0);
        assert!(
            view.set_cells(&coords, &[0], &[0.5, 0.5], &[], 1)
                .is_err()
        );
    }

    #[test]
    fn test_set_cells_rejects_bad_offsets() {
        let coords = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let sources = vec![0.5, 0.5, 0.5, 0.5];

        // decreasing offsets
        let mut view = DepositView::new(0.0);
        assert!(
            view.set_cells(&coords, &[3, 0], &sources, &[0, 1], 2)
                .is_err()
        );

        // offset past the end of the coordinate buffer
        let mut view = DepositView::new(0.0);
        assert!(
            view.set_cells(&coords, &[0, 9], &sources, &[0, 1], 2)
                .is_err()
        );
    }

    #[test]
    fn test_random_attributes_are_seeded() {
        let mut view = DepositView::new(0.0);
        view.point_count = 5;
        view.random_attributes(0.0, 100.0);
        let first = view.attributes.clone();
        view.random_attributes(0.0, 100.0);
        assert_eq!(view.attributes, first);
        assert!(view.attributes.iter().all(|&v| (0.0..100.0).contains(&v)));
    }
}
