//! The materialized "final selection": an ordered list of pairwise
//! disjoint simple polygons, kept normalized through one shared rule so
//! callers see the same representation regardless of which editing mode
//! produced it.

use geo::{BooleanOps, Intersects, MultiPolygon, Point, Polygon, Simplify};

use crate::geometry::ops::{components, union_all};
use crate::SegTree;

#[derive(Clone, Debug, Default)]
pub struct SelectionUnion {
    polygons: Vec<Polygon<f64>>,
}

impl SelectionUnion {
    pub fn new() -> Self {
        SelectionUnion::default()
    }

    /// Wholesale recompute from the tree's `selected` flags.
    pub fn from_tree(tree: &SegTree) -> Self {
        let selected = tree.collect_selected();
        if selected.is_empty() {
            return SelectionUnion::default();
        }
        SelectionUnion {
            polygons: normalize(union_all(&selected)),
        }
    }

    /// Incremental direct edit: adding appends the stroke polygon and
    /// re-unions the whole set; removing subtracts it (a no-op while the
    /// set is empty).
    pub fn apply_stroke(&mut self, stroke: &Polygon<f64>, adding: bool) {
        let stroke = stroke.simplify(&0.0);
        if adding {
            self.polygons.push(stroke);
            self.polygons = normalize(union_all(&self.polygons));
        } else {
            if self.polygons.is_empty() {
                return;
            }
            let combined = union_all(&self.polygons);
            let remainder = combined.difference(&MultiPolygon::new(vec![stroke]));
            self.polygons = normalize(remainder);
        }
    }

    /// Union a refined contour into the set, decomposing the result into
    /// components like every other path.
    pub fn merge(&mut self, addition: MultiPolygon<f64>) {
        let mut all = self.polygons.clone();
        all.extend(addition.0);
        self.polygons = normalize(union_all(&all));
    }

    /// Closed membership test: boundary points count as inside.
    pub fn contains_point(&self, pos: (f64, f64)) -> bool {
        let point = Point::new(pos.0, pos.1);
        self.polygons.iter().any(|p| p.intersects(&point))
    }

    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn clear(&mut self) {
        self.polygons.clear();
    }
}

/// Shared normalization: empty stays empty, a connected result is a
/// singleton, anything else splits into components; every output polygon
/// gets the zero-tolerance simplify pass.
fn normalize(mp: MultiPolygon<f64>) -> Vec<Polygon<f64>> {
    components(mp)
        .into_iter()
        .map(|p| p.simplify(&0.0))
        .collect()
}
