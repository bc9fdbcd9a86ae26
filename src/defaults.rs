//! Default tolerances and tip-model constants

/// Absolute per-axis tolerance when matching a point against an existing keypoint.
pub const MERGE_TOLERANCE: f64 = 1e-6;

/// Smallest indentation depth at which the fitted area function is trusted
/// (from experimental calibration). Below it a square-root fit is used.
pub const MIN_FITTED_DEPTH: f64 = 31.0;

/// Height of the tip body above its apex.
pub const TIP_HEIGHT: f64 = 1500.0;

/// Indentation depth covered by the spline profile.
pub const TIP_PROFILE_DEPTH: f64 = 1000.0;

/// Requested number of profile points before normalization to `5k + 1`.
pub const TIP_SPLINE_POINTS: usize = 20;

/// Largest accepted `spline_points` for a tip.
pub const MAX_TIP_SPLINE_POINTS: usize = 5_001;

/// Keypoints consumed by one spline segment.
pub const SPLINE_GROUP: usize = 6;

/// Most keypoints a single backend spline request accepts.
pub const MAX_SPLINE_KEYPOINTS: usize = 6;
