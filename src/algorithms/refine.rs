//! Gradient-guided contour refinement: snap a rough stroke band onto the
//! nearest strong intensity edge, bounded by the refined points' convex
//! hull, ready to merge into the running selection union.

use geo::{BooleanOps, Contains, ConvexHull, MultiPolygon, Point, Polygon, Simplify, Validation};
use log::debug;

use crate::algorithms::union::SelectionUnion;
use crate::geometry::convert::{exterior_coords, polygon_from_coords};
use crate::geometry::ops::{buffer, union_all};
use crate::geometry::tolerance::{BAND_SIMPLIFY, MIN_TURN_DEG, REPAIR_BUFFER};
use crate::raster::{contrast_score, RasterSource};

// Bound for the connectivity-collapse loop; each round grows the pieces,
// so a handful of rounds always suffices in practice.
const MAX_COLLAPSE_ROUNDS: usize = 8;

/// Refine a stroke band against the raster. Each band-boundary vertex is
/// marched across the locally dominant boundary direction, snapping to the
/// existing selection when the march enters it and to the highest local
/// contrast otherwise. Returns `None` when too few points survive.
pub fn refine_band(
    band: &Polygon<f64>,
    raster: &dyn RasterSource,
    stencil_radius: f64,
    selection: &SelectionUnion,
) -> Option<MultiPolygon<f64>> {
    if raster.width() == 0 || raster.height() == 0 {
        debug!("empty raster; nothing to refine against");
        return None;
    }
    let simplified = band.simplify(&BAND_SIMPLIFY);
    let w = raster.width() as f64;
    let h = raster.height() as f64;
    let verts: Vec<(f64, f64)> = exterior_coords(&simplified)
        .into_iter()
        .map(|(x, y)| (x.clamp(0.0, w - 1.0), y.clamp(0.0, h - 1.0)))
        .collect();
    if verts.len() < 3 {
        return None;
    }

    let steps = stencil_radius.round().max(0.0) as i64;
    let n = verts.len();
    let mut refined: Vec<(f64, f64)> = Vec::with_capacity(n);
    for i in 0..n {
        let prev = verts[(i + n - 1) % n];
        let next = verts[(i + 1) % n];
        let vertex = verts[i];
        let axis = search_axis(prev, next);
        let dir = search_polarity(band, vertex, axis);
        refined.push(march(raster, selection, vertex, axis, dir, steps));
    }

    let smoothed = remove_acute_turns(refined);
    if smoothed.len() < 3 {
        debug!("refined contour degenerated during smoothing");
        return None;
    }

    let hull = polygon_from_coords(&smoothed).convex_hull();
    let region = collapse_to_connected(polygon_from_coords(&smoothed).simplify(&0.0));
    Some(region.intersection(&MultiPolygon::new(vec![hull])))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// The search runs across the locally dominant boundary direction: a
/// boundary running mostly horizontally is searched vertically and vice
/// versa.
fn search_axis(prev: (f64, f64), next: (f64, f64)) -> Axis {
    let spread_x = (next.0 - prev.0).abs();
    let spread_y = (next.1 - prev.1).abs();
    if spread_x > spread_y {
        Axis::Y
    } else {
        Axis::X
    }
}

/// March toward the band interior: probe one unit up/left and flip to
/// down/right when that side is outside the band.
fn search_polarity(band: &Polygon<f64>, vertex: (f64, f64), axis: Axis) -> f64 {
    let probe = step_point(vertex, axis, -1.0);
    if band.contains(&Point::new(probe.0, probe.1)) {
        -1.0
    } else {
        1.0
    }
}

fn step_point(origin: (f64, f64), axis: Axis, offset: f64) -> (f64, f64) {
    match axis {
        Axis::X => (origin.0 + offset, origin.1),
        Axis::Y => (origin.0, origin.1 + offset),
    }
}

/// Walk up to `steps` pixels along the chosen axis. A candidate already
/// inside the accumulated selection is accepted immediately (snap to the
/// existing boundary); otherwise the best contrast score seen wins.
fn march(
    raster: &dyn RasterSource,
    selection: &SelectionUnion,
    vertex: (f64, f64),
    axis: Axis,
    dir: f64,
    steps: i64,
) -> (f64, f64) {
    let mut best = vertex;
    let mut best_score = f64::NEG_INFINITY;
    for step in 0..=steps {
        let candidate = step_point(vertex, axis, dir * step as f64);
        if selection.contains_point(candidate) {
            return candidate;
        }
        let score = contrast_score(
            raster,
            candidate.0.round() as i64,
            candidate.1.round() as i64,
        );
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}

/// Noise-removal fixpoint: drop every point whose turn angle falls below
/// 90 degrees, re-scanning the whole ring until a pass removes nothing.
fn remove_acute_turns(mut pts: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let cos_limit = MIN_TURN_DEG.to_radians().cos();
    loop {
        let n = pts.len();
        if n < 3 {
            return pts;
        }
        let keep: Vec<bool> = (0..n)
            .map(|i| {
                let p = pts[i];
                let a = sub(pts[(i + n - 1) % n], p);
                let b = sub(pts[(i + 1) % n], p);
                let la = norm(a);
                let lb = norm(b);
                if la <= f64::EPSILON || lb <= f64::EPSILON {
                    // Coincident neighbor; treat as noise.
                    return false;
                }
                let cos = (a.0 * b.0 + a.1 * b.1) / (la * lb);
                cos <= cos_limit
            })
            .collect();
        if keep.iter().all(|&k| k) {
            return pts;
        }
        pts = pts
            .into_iter()
            .zip(keep)
            .filter_map(|(p, k)| k.then_some(p))
            .collect();
    }
}

fn sub(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 - b.0, a.1 - b.1)
}

fn norm(v: (f64, f64)) -> f64 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

/// A self-intersecting refined ring is grown by the repair buffer and
/// re-dissolved until it collapses to a single connected piece.
fn collapse_to_connected(poly: Polygon<f64>) -> MultiPolygon<f64> {
    if poly.is_valid() {
        return MultiPolygon::new(vec![poly]);
    }
    debug!("refined contour self-intersects; collapsing via buffer");
    let mut region = MultiPolygon::new(vec![poly]);
    for _ in 0..MAX_COLLAPSE_ROUNDS {
        let grown: Vec<Polygon<f64>> = region
            .0
            .iter()
            .flat_map(|p| buffer(p, REPAIR_BUFFER).0)
            .collect();
        region = union_all(&grown);
        if region.0.len() <= 1 {
            break;
        }
    }
    region
}
