//! Binary record parsing for the external segmentation engine's output.
//!
//! Two records arrive per image: a general record
//! `[region_count, (point_count, aux, contrast_level) * n]` and a boundary
//! record holding every region's points as one contiguous block of
//! `[row, col]` pairs, split by the per-region counts. All values are
//! little-endian `i32`. Coordinates become `[x, y] = [col, row]` on read.

use std::path::Path;

use crate::error::RecordError;
use crate::model::RawRegion;

pub fn read_region_list(general: &[u8], boundary: &[u8]) -> Result<Vec<RawRegion>, RecordError> {
    let general = words(general)?;
    let boundary = words(boundary)?;

    let count = *general.first().ok_or(RecordError::Truncated {
        expected: 1,
        actual: 0,
    })?;
    if count < 0 {
        return Err(RecordError::NegativeRegionCount(count));
    }
    let count = count as usize;
    let expected = 1 + count * 3;
    if general.len() < expected {
        return Err(RecordError::Truncated {
            expected,
            actual: general.len(),
        });
    }

    let mut point_totals = 0usize;
    let mut headers = Vec::with_capacity(count);
    for i in 0..count {
        let points = general[1 + i * 3];
        let _aux = general[2 + i * 3];
        let level = general[3 + i * 3];
        if points < 0 {
            return Err(RecordError::NegativePointCount {
                region: i,
                count: points,
            });
        }
        point_totals += points as usize;
        headers.push((points as usize, level));
    }
    if boundary.len() != point_totals * 2 {
        return Err(RecordError::BoundaryMismatch {
            expected: point_totals,
            actual: boundary.len() / 2,
        });
    }

    let mut regions = Vec::with_capacity(count);
    let mut offset = 0usize;
    for (points, level) in headers {
        let mut loop_pts = Vec::with_capacity(points);
        for p in 0..points {
            let row = boundary[(offset + p) * 2];
            let col = boundary[(offset + p) * 2 + 1];
            loop_pts.push((col, row));
        }
        offset += points;
        regions.push(RawRegion {
            contrast_level: level,
            boundary: loop_pts,
        });
    }
    Ok(regions)
}

/// Filesystem convenience over [`read_region_list`].
pub fn read_region_files(
    general_path: &Path,
    boundary_path: &Path,
) -> Result<Vec<RawRegion>, RecordError> {
    let general = std::fs::read(general_path)?;
    let boundary = std::fs::read(boundary_path)?;
    read_region_list(&general, &boundary)
}

fn words(bytes: &[u8]) -> Result<Vec<i32>, RecordError> {
    if bytes.len() % 4 != 0 {
        return Err(RecordError::Misaligned(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
