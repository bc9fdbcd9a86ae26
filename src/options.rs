//! Tunable settings for merging and tip generation

use crate::defaults;

/// How [`create_merged_to`](crate::shapes::Shape::create_merged_to) matches points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeOptions {
    /// Absolute tolerance applied to each axis separately
    pub tolerance: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            tolerance: defaults::MERGE_TOLERANCE,
        }
    }
}

impl MergeOptions {
    pub fn with_tolerance(tolerance: f64) -> Self {
        MergeOptions { tolerance }
    }
}

/// Dimensions and resolution of a [`Tip`](crate::shapes::Tip).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TipOptions {
    /// Requested profile points; normalized to the form `5k + 1`
    pub spline_points: usize,
    /// Height of the tip body
    pub height: f64,
    /// Deepest indentation covered by the profile
    pub profile_depth: f64,
}

impl Default for TipOptions {
    fn default() -> Self {
        TipOptions {
            spline_points: defaults::TIP_SPLINE_POINTS,
            height: defaults::TIP_HEIGHT,
            profile_depth: defaults::TIP_PROFILE_DEPTH,
        }
    }
}
