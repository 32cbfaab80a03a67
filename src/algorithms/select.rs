//! Recursive node-level selection operations over the containment tree.
//!
//! Every operation states its pruning rule; the containment invariant
//! (children lie inside their parent) is what makes the point-based prunes
//! sound.

use geo::{Area, BooleanOps, Contains, Intersects, MultiPolygon, Point, Polygon};

use crate::geometry::ops::{buffer, overlap_ratio, union_all};
use crate::geometry::tolerance::{
    GAP_MIN_AREA, PICK_AREA_RATIO, PICK_BOUNDARY_RATIO, SEAM_BUFFER, STROKE_CLAIM_RATIO,
};
use crate::model::{NodeId, SegNode};
use crate::SegTree;

/// Flip the selection of the region containing `pos` at `level`. Subtrees
/// whose root does not contain the point are pruned outright; a matching
/// level stops the descent because a point maps to exactly one region per
/// level.
pub fn toggle_at_level(tree: &mut SegTree, id: NodeId, pos: (f64, f64), level: i32) {
    let point = Point::new(pos.0, pos.1);
    if !tree.nodes[id as usize].polygon.contains(&point) {
        return;
    }
    if tree.nodes[id as usize].contrast_level == level {
        let node = &mut tree.nodes[id as usize];
        node.selected = !node.selected;
        return;
    }
    let children = tree.nodes[id as usize].children.clone();
    for child in children {
        toggle_at_level(tree, child, pos, level);
    }
}

/// Lasso pick: a node is claimed when the selection covers more than 95%
/// of its area and encloses more than 95% of its boundary vertices; a
/// claimed node's subtree is not re-examined. Partial matches keep
/// descending into every branch, and degenerate geometry counts as no
/// match without aborting the traversal.
pub fn pick_by_overlap(tree: &mut SegTree, id: NodeId, selection: &Polygon<f64>) {
    let claimed = {
        let node = &tree.nodes[id as usize];
        match overlap_ratio(&node.polygon, selection) {
            Some(ratio) if ratio > PICK_AREA_RATIO => boundary_enclosed(node, selection),
            _ => false,
        }
    };
    if claimed {
        tree.nodes[id as usize].selected = true;
        return;
    }
    let children = tree.nodes[id as usize].children.clone();
    for child in children {
        pick_by_overlap(tree, child, selection);
    }
}

/// Vertex-enclosure half of the lasso rule. Membership is closed: a vertex
/// lying exactly on the selection boundary counts, so a selection polygon
/// equal to the region's own polygon claims it.
fn boundary_enclosed(node: &SegNode, selection: &Polygon<f64>) -> bool {
    let pts = node.boundary();
    if pts.is_empty() {
        return false;
    }
    let enclosed = pts
        .iter()
        .filter(|&&(x, y)| selection.intersects(&Point::new(x, y)))
        .count();
    enclosed as f64 / pts.len() as f64 > PICK_BOUNDARY_RATIO
}

/// Variable-width stroke edit. Returns whether this subtree was modified.
///
/// A node claimed by the band (overlap > 0.9) has its subtree selection
/// replaced (adding) or cleared (removing) and the descent stops there.
/// Otherwise the edit recurses, and the removal branch reconciles
/// afterwards: once any child was modified, every untouched child is
/// forced selected so the area not explicitly erased keeps its coverage,
/// and a selected node hands its own selection down the same way. This can
/// select more area than intended when children do not fully tile their
/// parent; that behavior is deliberate and pinned by tests.
pub fn edit_with_stroke(
    tree: &mut SegTree,
    id: NodeId,
    band: &Polygon<f64>,
    adding: bool,
    parent_selected: bool,
) -> bool {
    let selected = tree.nodes[id as usize].selected;
    if adding && !selected {
        if band_claims(tree, id, band) {
            clear_subtree(tree, id);
            tree.nodes[id as usize].selected = true;
            return true;
        }
    } else if !adding && (selected || parent_selected) {
        if band_claims(tree, id, band) {
            clear_subtree(tree, id);
            return true;
        }
    }

    let children = tree.nodes[id as usize].children.clone();
    let mut modified = false;
    let mut touched = vec![false; children.len()];
    for (k, &child) in children.iter().enumerate() {
        let m = edit_with_stroke(tree, child, band, adding, parent_selected || selected);
        modified = modified || m;
        touched[k] = m;
    }

    if modified {
        if adding {
            // No parent-level consolidation: a fully repainted child set
            // does not auto-promote to the parent.
            return false;
        }
        if selected || parent_selected {
            for (k, &child) in children.iter().enumerate() {
                if !touched[k] {
                    tree.nodes[child as usize].selected = true;
                }
            }
            if tree.nodes[id as usize].selected {
                tree.nodes[id as usize].selected = false;
                return false;
            }
            return true;
        }
    }
    false
}

fn band_claims(tree: &SegTree, id: NodeId, band: &Polygon<f64>) -> bool {
    overlap_ratio(&tree.nodes[id as usize].polygon, band)
        .map_or(false, |ratio| ratio > STROKE_CLAIM_RATIO)
}

/// Pre-order gather of selected polygons, each expanded by the seam
/// buffer. Descent continues under selected nodes so selected descendants
/// are collected too.
pub fn collect_selected(tree: &SegTree, id: NodeId, out: &mut Vec<Polygon<f64>>) {
    let node = &tree.nodes[id as usize];
    if node.selected {
        out.extend(buffer(&node.polygon, SEAM_BUFFER).0);
    }
    for &child in &node.children {
        collect_selected(tree, child, out);
    }
}

/// Containment flag on every node; no pruning, the highlight wants exact
/// per-node state and trees stay small.
pub fn update_hover(tree: &mut SegTree, pos: (f64, f64)) {
    let point = Point::new(pos.0, pos.1);
    for node in &mut tree.nodes {
        node.hovered = node.polygon.contains(&point);
    }
}

pub fn clear_subtree(tree: &mut SegTree, id: NodeId) {
    tree.nodes[id as usize].selected = false;
    let children = tree.nodes[id as usize].children.clone();
    for child in children {
        clear_subtree(tree, child);
    }
}

/// True when `pos` lies inside a selected node's polygon.
pub fn selected_contains(tree: &SegTree, id: NodeId, pos: (f64, f64)) -> bool {
    let point = Point::new(pos.0, pos.1);
    selected_contains_rec(tree, id, &point)
}

fn selected_contains_rec(tree: &SegTree, id: NodeId, point: &Point<f64>) -> bool {
    let node = &tree.nodes[id as usize];
    if !node.polygon.contains(point) {
        return false;
    }
    if node.selected {
        return true;
    }
    node.children
        .iter()
        .any(|&child| selected_contains_rec(tree, child, point))
}

/// Append synthetic children covering the part of each parent not covered
/// by its existing children. New children inherit the first sibling's
/// contrast level and only gaps larger than the minimum area are filled.
pub fn fill_missing_children(tree: &mut SegTree, id: NodeId) {
    let children = tree.nodes[id as usize].children.clone();
    if !children.is_empty() {
        let child_polys: Vec<Polygon<f64>> = children
            .iter()
            .map(|&c| tree.nodes[c as usize].polygon.clone())
            .collect();
        let covered = union_all(&child_polys);
        if covered.unsigned_area() > 0.0 {
            let parent = MultiPolygon::new(vec![tree.nodes[id as usize].polygon.clone()]);
            let gaps = parent.difference(&covered);
            let level = tree.nodes[children[0] as usize].contrast_level;
            for gap in gaps.0 {
                if gap.unsigned_area() > GAP_MIN_AREA {
                    let new_id = tree.nodes.len() as NodeId;
                    tree.nodes.push(SegNode::new(gap, level));
                    tree.nodes[id as usize].children.push(new_id);
                }
            }
        }
    }
    let all = tree.nodes[id as usize].children.clone();
    for child in all {
        fill_missing_children(tree, child);
    }
}
