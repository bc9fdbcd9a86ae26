//! Error types with diagnostics using miette
//!
//! Precondition failures are reported locally and immediately. Backend
//! failures pass through unchanged: a half-built shape has no useful partial
//! state, so nothing is retried.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{AreaId, KeypointId, LineId, Point2D};

// ============================================================================
// Geometry Errors
// ============================================================================

/// Errors raised while constructing or materializing a shape
#[derive(Error, Diagnostic, Debug)]
pub enum GeometryError {
    #[error("indentation depth must be >= 0, got {depth}")]
    #[diagnostic(code(planform::profile::negative_depth))]
    NegativeDepth { depth: f64 },

    #[error("area function is negative ({area}) at depth {depth}")]
    #[diagnostic(
        code(planform::profile::invalid_profile),
        help("check the sign of the area-function coefficients")
    )]
    InvalidProfile { depth: f64, area: f64 },

    #[error("length fraction must lie in [0, 1], got {value}")]
    #[diagnostic(code(planform::fraction_out_of_range))]
    FractionOutOfRange { value: f64 },

    #[error("invalid {name}: {value} ({reason})")]
    #[diagnostic(code(planform::invalid_parameter))]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("a closed boundary needs at least {min} points, got {count}")]
    #[diagnostic(code(planform::too_few_points))]
    TooFewPoints { count: usize, min: usize },

    #[error("{shape} has not been created yet")]
    #[diagnostic(
        code(planform::not_materialized),
        help("call `create` or `create_merged_to` first")
    )]
    NotMaterialized { shape: &'static str },

    #[error("{shape} has already been created")]
    #[diagnostic(
        code(planform::already_materialized),
        help("a shape is materialized exactly once; build a new shape to place another copy")
    )]
    AlreadyMaterialized { shape: &'static str },

    #[error("{} keypoints lie within tolerance of {point}", .candidates.len())]
    #[diagnostic(
        code(planform::merge::ambiguous),
        help("tighten the merge tolerance or remove coincident keypoints from the target shape")
    )]
    AmbiguousMerge {
        point: Point2D,
        candidates: Vec<KeypointId>,
    },

    #[error("cannot build an area from an empty boundary")]
    #[diagnostic(code(planform::empty_boundary))]
    EmptyBoundary,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Backend(#[from] BackendError),
}

// ============================================================================
// Backend Errors
// ============================================================================

/// Failures reported by a geometry backend
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("unknown {0}")]
    #[diagnostic(code(planform::backend::unknown_keypoint))]
    UnknownKeypoint(KeypointId),

    #[error("unknown {0}")]
    #[diagnostic(code(planform::backend::unknown_line))]
    UnknownLine(LineId),

    #[error("unknown {0}")]
    #[diagnostic(code(planform::backend::unknown_area))]
    UnknownArea(AreaId),

    #[error("line would start and end at {0}")]
    #[diagnostic(code(planform::backend::degenerate_line))]
    DegenerateLine(KeypointId),

    #[error("a spline takes 2 to {max} keypoints, got {count}")]
    #[diagnostic(code(planform::backend::spline_arity))]
    SplineArity { count: usize, max: usize },

    #[error("an area needs at least one line")]
    #[diagnostic(code(planform::backend::empty_area))]
    EmptyArea,

    #[error("{0} appears twice in one boundary")]
    #[diagnostic(code(planform::backend::duplicate_line))]
    DuplicateLine(LineId),

    #[error("boundary is not closed at {0}")]
    #[diagnostic(code(planform::backend::open_boundary))]
    OpenBoundary(KeypointId),

    #[error("concatenation needs at least 2 lines, got {count}")]
    #[diagnostic(code(planform::backend::too_few_lines))]
    TooFewLines { count: usize },

    #[error("lines do not form one contiguous chain (break before {0})")]
    #[diagnostic(code(planform::backend::broken_chain))]
    BrokenChain(LineId),

    #[error("{0} does not bound an area shared by all concatenated lines")]
    #[diagnostic(
        code(planform::backend::not_on_area),
        help("concatenate only after the enclosing area has been created")
    )]
    NotOnArea(LineId),

    #[error("backend session failed: {0}")]
    #[diagnostic(code(planform::backend::session))]
    Session(String),
}
