//! Candidate polygon construction and repair for raw region boundaries.

use geo::{MultiPolygon, Polygon, Simplify, Validation};
use log::debug;

use super::convert::{exterior_coords, polygon_from_pixels};
use super::ops::buffer;
use super::tolerance::REPAIR_BUFFER;

/// Outcome of turning a raw boundary loop into candidate geometry.
#[derive(Clone, Debug)]
pub enum Candidate {
    /// A single polygon candidate.
    One(Polygon<f64>),
    /// The repair split the boundary into several parts; each becomes its
    /// own candidate at the same contrast level.
    Parts(Vec<Polygon<f64>>),
}

/// Build candidate geometry from a raw boundary loop.
///
/// The loop is closed into a polygon and simplified with tolerance zero.
/// A self-intersecting result is repaired with a small outward buffer and
/// re-simplified; if that yields multiple parts, each part with at least
/// three boundary vertices survives. The single-polygon repair result is
/// used without re-validating, matching the behavior this crate mirrors.
pub fn build_candidate(boundary: &[(i32, i32)]) -> Candidate {
    let poly = polygon_from_pixels(boundary).simplify(&0.0);
    if poly.is_valid() {
        return Candidate::One(poly);
    }
    debug!("invalid region boundary; repairing with +{REPAIR_BUFFER} buffer");
    let repaired: MultiPolygon<f64> = buffer(&poly, REPAIR_BUFFER);
    expand_parts(repaired)
}

/// Expand a repaired multi-polygon into candidates, dropping parts whose
/// exterior has fewer than three vertices.
pub fn expand_parts(mp: MultiPolygon<f64>) -> Candidate {
    let mut parts: Vec<Polygon<f64>> = Vec::with_capacity(mp.0.len());
    for part in mp.0 {
        let part = part.simplify(&0.0);
        if exterior_coords(&part).len() < 3 {
            debug!("dropping repaired part with fewer than 3 boundary points");
            continue;
        }
        parts.push(part);
    }
    if parts.len() == 1 {
        Candidate::One(parts.remove(0))
    } else {
        Candidate::Parts(parts)
    }
}
