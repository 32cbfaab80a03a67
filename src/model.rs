use geo::{Polygon, Simplify};
use serde::{Deserialize, Serialize};

use crate::geometry::convert::polygon_from_coords;

/// Node handle into the tree arena.
pub type NodeId = u32;

/// Contrast level reserved for the synthetic combined root.
pub const SYNTHETIC_ROOT_LEVEL: i32 = -1;

/// Raw region record handed over by the segmentation engine: a contrast
/// level plus a closed boundary loop of integer pixel coordinates (the
/// first point is not repeated at the end).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRegion {
    pub contrast_level: i32,
    pub boundary: Vec<(i32, i32)>,
}

/// One node of the containment tree. Nodes live in the [`SegTree`] arena
/// and reference their children by id, in insertion order.
///
/// [`SegTree`]: crate::SegTree
#[derive(Clone, Debug)]
pub struct SegNode {
    pub polygon: Polygon<f64>,
    pub contrast_level: i32,
    pub children: Vec<NodeId>,
    pub selected: bool,
    pub hovered: bool,
}

impl SegNode {
    /// Wrap a polygon as a tree node, applying the zero-tolerance simplify
    /// pass that removes exactly-collinear duplicate vertices.
    pub fn new(polygon: Polygon<f64>, contrast_level: i32) -> Self {
        SegNode {
            polygon: polygon.simplify(&0.0),
            contrast_level,
            children: Vec::new(),
            selected: false,
            hovered: false,
        }
    }

    /// Exterior boundary vertices, without the closing duplicate.
    pub fn boundary(&self) -> Vec<(f64, f64)> {
        crate::geometry::convert::exterior_coords(&self.polygon)
    }
}

/// Flat serialization record for one tree node (record 0 of the exported
/// list carries the sorted contrast-level list instead).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRecord {
    pub polygon: Vec<(f64, f64)>,
    pub children: usize,
    pub contrast_level: i32,
}

impl NodeRecord {
    pub(crate) fn to_node(&self) -> SegNode {
        SegNode::new(polygon_from_coords(&self.polygon), self.contrast_level)
    }
}

/// Interactive selection modes. Each maps to exactly one tree or refiner
/// operation; the caller picks the variant, the session dispatches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    /// Toggle the region under the cursor at the current contrast level.
    LevelToggle,
    /// Lasso pick: claim regions mostly enclosed by the drawn loop.
    LassoPick,
    /// Variable-width stroke that adds regions to the tree selection.
    SegmentPaint,
    /// Variable-width stroke that removes regions from the tree selection.
    SegmentErase,
    /// Free-form stroke added directly to the final selection.
    MaskPaint,
    /// Free-form stroke subtracted directly from the final selection.
    MaskErase,
    /// Rough stroke refined onto the nearest strong intensity edge.
    ContourSnap,
}
