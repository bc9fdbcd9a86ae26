//! The geometry backend shapes are materialized in
//!
//! This module is organized into submodules:
//! - `memory`: an in-process geometry store that validates requests and
//!   answers location queries
//! - `apdl`: a wrapper recording every request as an APDL command line
//!
//! A backend is a single mutable session. Shapes borrow it mutably for the
//! duration of each call, which serializes access within one thread; sharing a
//! session between threads needs external locking and is not supported.

pub mod apdl;
pub mod memory;

pub use apdl::ApdlRecorder;
pub use memory::MemoryBackend;

use glam::DVec2;

use crate::errors::BackendError;
use crate::types::{AreaId, Fraction, KeypointId, LineId, Point2D};

/// Optional tangent directions at the ends of a spline.
///
/// `None` leaves the tangent to the backend's default end condition.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EndTangents {
    pub start: Option<DVec2>,
    pub end: Option<DVec2>,
}

impl EndTangents {
    pub const FREE: EndTangents = EndTangents { start: None, end: None };

    pub fn end(direction: DVec2) -> Self {
        EndTangents { start: None, end: Some(direction) }
    }
}

/// Capability set of a geometry-modelling backend.
///
/// Every call is a blocking round trip. Handles are opaque to the caller and
/// stay valid for the lifetime of the session.
pub trait Backend {
    fn create_keypoint(&mut self, at: Point2D) -> Result<KeypointId, BackendError>;

    /// Straight line between two keypoints
    fn create_line(&mut self, a: KeypointId, b: KeypointId) -> Result<LineId, BackendError>;

    /// Spline through up to six keypoints
    fn create_spline(
        &mut self,
        keypoints: &[KeypointId],
        tangents: EndTangents,
    ) -> Result<LineId, BackendError>;

    /// Area bounded by the given lines
    fn create_area(&mut self, lines: &[LineId]) -> Result<AreaId, BackendError>;

    /// Join a contiguous chain of lines into one curve
    fn concatenate_lines(&mut self, lines: &[LineId]) -> Result<LineId, BackendError>;

    /// Location the backend actually stored for a keypoint
    fn keypoint_location(&mut self, keypoint: KeypointId) -> Result<Point2D, BackendError>;

    /// Location at a length fraction along a line
    fn line_location(&mut self, line: LineId, fraction: Fraction) -> Result<Point2D, BackendError>;

    /// Replace the active line selection
    fn select_lines(&mut self, lines: &[LineId]) -> Result<(), BackendError>;

    /// Replace the active area selection
    fn select_areas(&mut self, areas: &[AreaId]) -> Result<(), BackendError>;
}
