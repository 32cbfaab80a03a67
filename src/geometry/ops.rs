//! Thin wrappers over the polygon kernel: buffering through clipper,
//! dissolve-union, and the overlap ratio used by the selection rules.

use geo::orient::{Direction, Orient};
use geo::{unary_union, Area, BooleanOps, MultiPolygon, Polygon};
use geo_clipper::{Clipper, EndType, JoinType};
use log::debug;

use super::tolerance::{ARC_TOLERANCE, CLIPPER_FACTOR};

/// Outward buffer (dilation) of a polygon. Positive `delta` grows the
/// polygon; the result can split or merge lobes, hence a multi-polygon.
pub fn buffer(poly: &Polygon<f64>, delta: f64) -> MultiPolygon<f64> {
    poly.orient(Direction::Default).offset(
        delta,
        JoinType::Round(ARC_TOLERANCE),
        EndType::ClosedPolygon,
        CLIPPER_FACTOR,
    )
}

/// Dissolve a set of polygons into their disjoint union.
pub fn union_all(polys: &[Polygon<f64>]) -> MultiPolygon<f64> {
    unary_union(polys.iter())
}

/// Split a multi-polygon into its connected components.
pub fn components(mp: MultiPolygon<f64>) -> Vec<Polygon<f64>> {
    mp.0
}

/// Fraction of `node`'s area covered by `selection`, or `None` when the
/// node geometry is degenerate (zero area or non-finite coordinates).
pub fn overlap_ratio(node: &Polygon<f64>, selection: &Polygon<f64>) -> Option<f64> {
    let area = node.unsigned_area();
    if !(area > 0.0) || !finite(node) || !finite(selection) {
        debug!("degenerate geometry in overlap test; treating as no match");
        return None;
    }
    let intersection = BooleanOps::intersection(node, selection);
    Some(intersection.unsigned_area() / area)
}

/// Stroke polyline dilated by `radius`: round caps and joins, approximated
/// by a disc at every sample and a quad per segment, dissolved together.
/// Returns the largest piece (the pieces only disagree on degenerate
/// strokes) or `None` for an empty stroke.
pub fn widen_stroke(points: &[(f64, f64)], radius: f64) -> Option<Polygon<f64>> {
    if points.is_empty() || !(radius > 0.0) {
        return None;
    }
    let mut parts: Vec<Polygon<f64>> = Vec::with_capacity(points.len() * 2);
    for &(x, y) in points {
        parts.push(disc(x, y, radius));
    }
    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        let dx = x2 - x1;
        let dy = y2 - y1;
        let len = (dx * dx + dy * dy).sqrt();
        if len <= f64::EPSILON {
            continue;
        }
        let nx = -dy / len * radius;
        let ny = dx / len * radius;
        parts.push(crate::geometry::convert::polygon_from_coords(&[
            (x1 + nx, y1 + ny),
            (x2 + nx, y2 + ny),
            (x2 - nx, y2 - ny),
            (x1 - nx, y1 - ny),
        ]));
    }
    components(union_all(&parts))
        .into_iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
}

fn disc(cx: f64, cy: f64, r: f64) -> Polygon<f64> {
    const SIDES: usize = 16;
    let pts: Vec<(f64, f64)> = (0..SIDES)
        .map(|i| {
            let t = i as f64 / SIDES as f64 * std::f64::consts::TAU;
            (cx + r * t.cos(), cy + r * t.sin())
        })
        .collect();
    crate::geometry::convert::polygon_from_coords(&pts)
}

fn finite(poly: &Polygon<f64>) -> bool {
    poly.exterior().0.iter().all(|c| c.x.is_finite() && c.y.is_finite())
}
