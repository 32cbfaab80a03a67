//! Tree construction: area ordering, containment inference, root
//! consolidation.

use geo::{Area, Contains, ConvexHull, MultiPolygon};
use log::{debug, warn};

use crate::algorithms::ingest::ingest;
use crate::error::BuildError;
use crate::model::{NodeId, RawRegion, SegNode, SYNTHETIC_ROOT_LEVEL};
use crate::SegTree;

pub fn build(regions: &[RawRegion]) -> Result<SegTree, BuildError> {
    let ingested = ingest(regions);
    if ingested.candidates.is_empty() {
        return Err(BuildError::NoUsableRegions);
    }
    let mut nodes = order_by_area(ingested.candidates);

    // Containment pass, smallest area first. The parent is the first
    // larger candidate (scanning back toward the largest) whose polygon
    // contains this one; candidates without a parent become roots.
    let n = nodes.len();
    let mut roots: Vec<NodeId> = Vec::new();
    for i in (0..n).rev() {
        let mut parent = None;
        for j in (0..i).rev() {
            if nodes[j].polygon.contains(&nodes[i].polygon) {
                parent = Some(j);
                break;
            }
        }
        match parent {
            Some(j) => nodes[j].children.push(i as NodeId),
            None => roots.push(i as NodeId),
        }
    }

    let root = if roots.len() == 1 {
        roots[0]
    } else {
        debug!("{} roots found; synthesizing a combined root", roots.len());
        let hull = MultiPolygon::new(
            roots
                .iter()
                .map(|&r| nodes[r as usize].polygon.clone())
                .collect(),
        )
        .convex_hull();
        let mut combined = SegNode::new(hull, SYNTHETIC_ROOT_LEVEL);
        combined.children = roots;
        nodes.push(combined);
        (nodes.len() - 1) as NodeId
    };

    let levels: Vec<i32> = ingested.levels.iter().rev().copied().collect();
    Ok(SegTree { nodes, root, levels })
}

/// Candidates normally arrive largest-first from the engine. Verify that,
/// and fall back to an explicit selection sort when the order is violated;
/// region counts are small, so the O(n²) pass is acceptable.
fn order_by_area(candidates: Vec<SegNode>) -> Vec<SegNode> {
    let areas: Vec<f64> = candidates.iter().map(|c| c.polygon.unsigned_area()).collect();
    if is_descending(&areas) {
        return candidates;
    }
    debug!("candidate list not sorted by area; re-sorting");
    let mut slots: Vec<Option<SegNode>> = candidates.into_iter().map(Some).collect();
    let mut areas: Vec<f64> = areas;
    let mut ordered = Vec::with_capacity(slots.len());
    for _ in 0..slots.len() {
        let mut best: Option<usize> = None;
        for (j, slot) in slots.iter().enumerate() {
            if slot.is_some() && best.map_or(true, |b| areas[j] > areas[b]) {
                best = Some(j);
            }
        }
        if let Some(j) = best {
            if let Some(node) = slots[j].take() {
                ordered.push(node);
            }
            areas[j] = f64::NEG_INFINITY;
        }
    }
    let resorted: Vec<f64> = ordered.iter().map(|c| c.polygon.unsigned_area()).collect();
    if !is_descending(&resorted) {
        warn!("candidate areas remain unsorted after re-sort; proceeding anyway");
    }
    ordered
}

fn is_descending(areas: &[f64]) -> bool {
    areas.windows(2).all(|w| w[1] <= w[0])
}
