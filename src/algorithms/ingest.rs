//! Region ingestion: raw boundary loops into validated tree candidates.

use std::collections::BTreeSet;

use log::debug;

use crate::geometry::repair::{build_candidate, Candidate};
use crate::model::{RawRegion, SegNode};

/// Ingestion output: candidate nodes in input order plus every contrast
/// level encountered (including levels of regions that were discarded).
pub struct Ingested {
    pub candidates: Vec<SegNode>,
    pub levels: BTreeSet<i32>,
}

pub fn ingest(regions: &[RawRegion]) -> Ingested {
    let mut candidates = Vec::with_capacity(regions.len());
    let mut levels = BTreeSet::new();
    for region in regions {
        // Level is recorded before the size check; a discarded region still
        // contributes its level to the detail ladder.
        levels.insert(region.contrast_level);
        if region.boundary.len() < 3 {
            debug!(
                "discarding region with {} boundary points at level {}",
                region.boundary.len(),
                region.contrast_level
            );
            continue;
        }
        match build_candidate(&region.boundary) {
            Candidate::One(poly) => {
                candidates.push(SegNode::new(poly, region.contrast_level));
            }
            Candidate::Parts(parts) => {
                for part in parts {
                    candidates.push(SegNode::new(part, region.contrast_level));
                }
            }
        }
    }
    Ingested { candidates, levels }
}
