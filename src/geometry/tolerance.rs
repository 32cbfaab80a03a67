//! Fixed tolerances and thresholds shared across the crate.

/// Buffer distance used to repair self-intersecting region boundaries.
pub const REPAIR_BUFFER: f64 = 0.5;

/// Buffer applied to each selected polygon before unioning; closes the
/// sub-pixel seams between adjacent regions.
pub const SEAM_BUFFER: f64 = 0.5;

/// Simplification tolerance for the stroke band boundary before refining.
pub const BAND_SIMPLIFY: f64 = 0.1;

/// Area-overlap fraction a region must reach to be claimed by a lasso pick.
pub const PICK_AREA_RATIO: f64 = 0.95;

/// Fraction of boundary vertices a lasso must enclose to claim a region.
pub const PICK_BOUNDARY_RATIO: f64 = 0.95;

/// Area-overlap fraction a stroke band must reach to claim a region.
pub const STROKE_CLAIM_RATIO: f64 = 0.9;

/// Minimum area of a synthetic gap-filling child.
pub const GAP_MIN_AREA: f64 = 5.0;

/// Turn angle (degrees) below which a refined contour point is noise.
pub const MIN_TURN_DEG: f64 = 90.0;

/// Contrast score assigned to image-border pixels instead of sampling.
pub const BORDER_SCORE: f64 = 255.0;

/// Smallest stencil radius the session will clamp to.
pub const MIN_STENCIL_RADIUS: f64 = 5.0;

/// Fixed-point scaling factor handed to clipper offsets.
pub const CLIPPER_FACTOR: f64 = 1000.0;

/// Arc tolerance for round offset joins.
pub const ARC_TOLERANCE: f64 = 0.25;
