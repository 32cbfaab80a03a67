//! Hierarchical region selection over engine-produced image segmentations.
//!
//! An external segmentation engine emits candidate regions at several
//! contrast levels. This crate repairs those regions, arranges them into a
//! containment tree, and supports interactive selection over that tree:
//! per-level toggles, lasso picks, variable-width paint and erase strokes,
//! direct mask edits, and gradient-guided contour snapping. The accumulated
//! result is a normalized union of disjoint polygons ready for export.

pub mod engine;
pub mod error;
pub mod model;
pub mod raster;
pub mod session;
pub mod geometry {
    pub mod convert;
    pub mod ops;
    pub mod repair;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod build;
    pub mod ingest;
    pub mod refine;
    pub mod select;
    pub mod union;
}
mod json;

pub use algorithms::union::SelectionUnion;
pub use error::{BuildError, PersistError, RecordError};
pub use model::{NodeId, RawRegion, SegNode, SelectMode};
pub use raster::{RasterSource, SliceRaster};
pub use session::Session;

use geo::Polygon;

/// The containment tree. Nodes live in a flat arena and reference their
/// children by index; `root` is the single entry point (synthesized when
/// the engine emitted multiple top-level regions).
pub struct SegTree {
    pub(crate) nodes: Vec<SegNode>,
    pub(crate) root: NodeId,
    pub(crate) levels: Vec<i32>,
}

impl SegTree {
    pub fn build(regions: &[RawRegion]) -> Result<SegTree, BuildError> {
        algorithms::build::build(regions)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&SegNode> {
        self.nodes.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Contrast levels present in the input, descending (coarse to fine),
    /// including levels whose every region was discarded during ingestion.
    pub fn contrast_levels(&self) -> &[i32] {
        &self.levels
    }

    // Selection
    pub fn toggle_at_level(&mut self, pos: (f64, f64), level: i32) {
        algorithms::select::toggle_at_level(self, self.root, pos, level);
    }
    pub fn pick_by_overlap(&mut self, selection: &Polygon<f64>) {
        algorithms::select::pick_by_overlap(self, self.root, selection);
    }
    pub fn edit_with_stroke(&mut self, band: &Polygon<f64>, adding: bool) -> bool {
        algorithms::select::edit_with_stroke(self, self.root, band, adding, false)
    }
    pub fn update_hover(&mut self, pos: (f64, f64)) {
        algorithms::select::update_hover(self, pos);
    }
    pub fn clear_selection(&mut self) {
        algorithms::select::clear_subtree(self, self.root);
    }
    pub fn selected_contains(&self, pos: (f64, f64)) -> bool {
        algorithms::select::selected_contains(self, self.root, pos)
    }

    /// Every selected node's polygon, each grown by the seam buffer so
    /// adjacent selections dissolve cleanly when unioned.
    pub fn collect_selected(&self) -> Vec<Polygon<f64>> {
        let mut out = Vec::new();
        algorithms::select::collect_selected(self, self.root, &mut out);
        out
    }

    /// Synthesize children for the area of each parent its existing
    /// children leave uncovered.
    pub fn fill_missing_children(&mut self) {
        algorithms::select::fill_missing_children(self, self.root);
    }

    // Persistence
    pub fn to_records(&self) -> serde_json::Value {
        json::to_records_impl(self)
    }
    pub fn from_records(value: &serde_json::Value) -> Result<SegTree, PersistError> {
        json::from_records_impl(value)
    }
}
