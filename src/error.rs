use thiserror::Error;

/// Fatal tree construction failures. Per-region defects are recovered or
/// discarded during ingestion and never surface here; only an ingestion
/// that yields nothing usable aborts the build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no usable regions after ingestion")]
    NoUsableRegions,
}

/// Malformed binary records from the segmentation engine.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record length {0} is not a whole number of 32-bit words")]
    Misaligned(usize),
    #[error("general record truncated: expected {expected} words, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("boundary record holds {actual} points but the general record announces {expected}")]
    BoundaryMismatch { expected: usize, actual: usize },
    #[error("negative region count {0}")]
    NegativeRegionCount(i32),
    #[error("negative point count {count} for region {region}")]
    NegativePointCount { region: usize, count: i32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures while reconstructing a tree from its flat record list.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("record list is empty")]
    Empty,
    #[error("record 0 is not a contrast-level list")]
    BadLevelList,
    #[error("record {0} is not a node record")]
    BadNodeRecord(usize),
    #[error("record list ends before all announced children were read")]
    Truncated,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
