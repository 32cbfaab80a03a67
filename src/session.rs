//! Interactive editing session: one tree, one running selection union, and
//! the stroke dispatch that turns released input strokes into tree or union
//! edits depending on the active mode.

use geo::{Polygon, Simplify};
use log::debug;

use crate::algorithms::refine::refine_band;
use crate::algorithms::union::SelectionUnion;
use crate::error::BuildError;
use crate::geometry::convert::{exterior_coords, polygon_from_coords};
use crate::geometry::ops::widen_stroke;
use crate::geometry::tolerance::MIN_STENCIL_RADIUS;
use crate::model::{RawRegion, SelectMode};
use crate::raster::RasterSource;
use crate::SegTree;

const DEFAULT_STENCIL_RADIUS: f64 = 20.0;

pub struct Session {
    tree: SegTree,
    selection: SelectionUnion,
    stencil_radius: f64,
    level_index: usize,
}

impl Session {
    pub fn new(tree: SegTree) -> Self {
        Session {
            tree,
            selection: SelectionUnion::new(),
            stencil_radius: DEFAULT_STENCIL_RADIUS,
            level_index: 0,
        }
    }

    pub fn from_regions(regions: &[RawRegion]) -> Result<Self, BuildError> {
        Ok(Session::new(SegTree::build(regions)?))
    }

    pub fn tree(&self) -> &SegTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SegTree {
        &mut self.tree
    }

    /// Contrast level currently targeted by level toggles.
    pub fn current_level(&self) -> Option<i32> {
        self.tree.contrast_levels().get(self.level_index).copied()
    }

    /// Step the targeted level along the descending level ladder. Positive
    /// steps move toward finer (lower-contrast) levels; the index saturates
    /// at both ends.
    pub fn step_level(&mut self, steps: i32) {
        let count = self.tree.contrast_levels().len();
        if count == 0 {
            return;
        }
        let idx = self.level_index as i64 + steps as i64;
        self.level_index = idx.clamp(0, count as i64 - 1) as usize;
    }

    pub fn stencil_radius(&self) -> f64 {
        self.stencil_radius
    }

    pub fn adjust_stencil_radius(&mut self, delta: f64) {
        self.stencil_radius = (self.stencil_radius + delta).max(MIN_STENCIL_RADIUS);
    }

    pub fn hover(&mut self, pos: (f64, f64)) {
        self.tree.update_hover(pos);
    }

    /// Dispatch one released stroke. `points` is the sampled stroke
    /// polyline in image coordinates; `raster` is only consulted by the
    /// contour-snap mode. Tree-state modes recompute the selection union
    /// wholesale afterwards; mask modes edit it in place.
    pub fn release_stroke(
        &mut self,
        points: &[(f64, f64)],
        mode: SelectMode,
        raster: Option<&dyn RasterSource>,
    ) {
        if points.is_empty() {
            return;
        }
        match mode {
            SelectMode::LevelToggle => {
                let Some(level) = self.current_level() else {
                    return;
                };
                // Last sample is where the stroke was released.
                let pos = points[points.len() - 1];
                self.tree.toggle_at_level(pos, level);
                self.selection = SelectionUnion::from_tree(&self.tree);
            }
            SelectMode::LassoPick => {
                if points.len() < 3 {
                    return;
                }
                // The drawn loop is widened like any other stroke; filling
                // its exterior ring turns the resulting annulus into a
                // solid polygon covering everything the loop traced around.
                let Some(band) = self.band(points) else {
                    return;
                };
                let lasso = polygon_from_coords(&exterior_coords(&band)).simplify(&0.0);
                self.tree.pick_by_overlap(&lasso);
                self.selection = SelectionUnion::from_tree(&self.tree);
            }
            SelectMode::SegmentPaint | SelectMode::SegmentErase => {
                let Some(band) = self.band(points) else {
                    return;
                };
                let adding = mode == SelectMode::SegmentPaint;
                self.tree.edit_with_stroke(&band, adding);
                self.selection = SelectionUnion::from_tree(&self.tree);
            }
            SelectMode::MaskPaint | SelectMode::MaskErase => {
                let Some(band) = self.band(points) else {
                    return;
                };
                self.selection
                    .apply_stroke(&band, mode == SelectMode::MaskPaint);
            }
            SelectMode::ContourSnap => {
                let Some(raster) = raster else {
                    debug!("contour snap released without a raster; ignoring");
                    return;
                };
                let Some(band) = self.band(points) else {
                    return;
                };
                if let Some(refined) =
                    refine_band(&band, raster, self.stencil_radius, &self.selection)
                {
                    self.selection.merge(refined);
                }
            }
        }
    }

    fn band(&self, points: &[(f64, f64)]) -> Option<Polygon<f64>> {
        widen_stroke(points, self.stencil_radius / 2.0)
    }

    pub fn clear_selection(&mut self) {
        self.tree.clear_selection();
        self.selection.clear();
    }

    pub fn final_selection(&self) -> &[Polygon<f64>] {
        self.selection.polygons()
    }

    pub fn final_polygon_count(&self) -> usize {
        self.selection.len()
    }

    /// Materialize every component of the final selection as an independent
    /// vertex list. A multi-component selection is surfaced as data; the
    /// caller decides how to treat it.
    pub fn commit(&self) -> Vec<Vec<(f64, f64)>> {
        self.selection
            .polygons()
            .iter()
            .map(exterior_coords)
            .collect()
    }
}
