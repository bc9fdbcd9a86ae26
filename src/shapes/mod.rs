//! Shape generators
//!
//! Each shape is its own type that knows how to:
//! - Lay out its raw point template in local space
//! - Place that template in the world (rotation about the local origin, then translation)
//! - Materialize keypoints, lines and areas in a [`Backend`], fresh or glued to another shape
//!
//! Submodules:
//! - `polygon`: closed loop through arbitrary points, the base rule for the next two
//! - `rectangle`, `isogon`: polygons with parametric templates
//! - `film`: film with an inset region of interest, two areas sharing two edges
//! - `tip`: half profile of an axisymmetric nanoindenter tip

pub mod film;
pub mod isogon;
pub mod polygon;
pub mod rectangle;
pub mod tip;

pub use film::{FilmTopology, FilmWithRoi};
pub use isogon::Isogon;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use tip::{Tip, TipTopology};

use enum_dispatch::enum_dispatch;

use crate::backend::Backend;
use crate::binder::{bind_fresh, bind_merged};
use crate::errors::GeometryError;
use crate::options::MergeOptions;
use crate::transform::Placement;
use crate::types::{AreaId, KeypointId, LineId, Point2D};

/// Backend entities owned (or borrowed, after a merge) by a materialized shape.
///
/// `keypoints[i]` belongs to `points()[i]` of the shape that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltGeometry {
    keypoints: Vec<KeypointId>,
    lines: Vec<LineId>,
    areas: Vec<AreaId>,
}

impl BuiltGeometry {
    pub(crate) fn new(keypoints: Vec<KeypointId>, lines: Vec<LineId>, areas: Vec<AreaId>) -> Self {
        BuiltGeometry { keypoints, lines, areas }
    }

    pub fn keypoints(&self) -> &[KeypointId] {
        &self.keypoints
    }

    pub fn lines(&self) -> &[LineId] {
        &self.lines
    }

    pub fn areas(&self) -> &[AreaId] {
        &self.areas
    }
}

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// Short name used in errors and logs
    fn kind(&self) -> &'static str;

    /// Template in local, untransformed space
    fn raw_points(&self) -> &[Point2D];

    fn placement(&self) -> Placement;

    /// World-space points, always `raw_points` placed by `placement`
    fn points(&self) -> &[Point2D];

    /// Materialized backend entities, if `create` has run
    fn built(&self) -> Option<&BuiltGeometry>;

    /// Move the shape. Fails once the shape has been materialized.
    fn set_placement(&mut self, placement: Placement) -> Result<(), GeometryError>;

    /// Materialize with freshly created keypoints.
    fn create(&mut self, backend: &mut dyn Backend) -> Result<&BuiltGeometry, GeometryError>;

    /// Materialize, reusing keypoints of `other` that coincide with this shape's points.
    fn create_merged_with(
        &mut self,
        backend: &mut dyn Backend,
        other: &BuiltGeometry,
        options: MergeOptions,
    ) -> Result<&BuiltGeometry, GeometryError>;

    /// [`create_merged_with`](Shape::create_merged_with) using the default tolerance
    fn create_merged_to(
        &mut self,
        backend: &mut dyn Backend,
        other: &BuiltGeometry,
    ) -> Result<&BuiltGeometry, GeometryError> {
        self.create_merged_with(backend, other, MergeOptions::default())
    }

    /// Rotation in radians
    fn rotation_angle(&self) -> f64 {
        self.placement().rotation
    }

    fn destination(&self) -> Point2D {
        self.placement().destination
    }

    fn set_rotation(&mut self, radians: f64) -> Result<(), GeometryError> {
        let placement = self.placement().with_rotation(radians);
        self.set_placement(placement)
    }

    fn set_rotation_in_degree(&mut self, degrees: f64) -> Result<(), GeometryError> {
        let placement = self.placement().with_rotation_in_degree(degrees);
        self.set_placement(placement)
    }

    fn set_destination(&mut self, destination: Point2D) -> Result<(), GeometryError> {
        let placement = self.placement().with_destination(destination);
        self.set_placement(placement)
    }

    fn geometry(&self) -> Result<&BuiltGeometry, GeometryError> {
        self.built()
            .ok_or(GeometryError::NotMaterialized { shape: self.kind() })
    }

    fn keypoints(&self) -> Result<&[KeypointId], GeometryError> {
        Ok(self.geometry()?.keypoints())
    }

    fn lines(&self) -> Result<&[LineId], GeometryError> {
        Ok(self.geometry()?.lines())
    }

    fn areas(&self) -> Result<&[AreaId], GeometryError> {
        Ok(self.geometry()?.areas())
    }

    /// Make this shape's lines the backend's active line selection
    fn select_lines(&self, backend: &mut dyn Backend) -> Result<(), GeometryError> {
        backend.select_lines(self.lines()?)?;
        Ok(())
    }

    /// Make this shape's areas the backend's active area selection
    fn select_areas(&self, backend: &mut dyn Backend) -> Result<(), GeometryError> {
        backend.select_areas(self.areas()?)?;
        Ok(())
    }
}

/// A shape enum wrapping all shape types
#[enum_dispatch(Shape)]
#[derive(Debug, Clone)]
pub enum ShapeEnum {
    Polygon,
    Rectangle,
    Isogon,
    FilmWithRoi,
    Tip,
}

// ============================================================================
// Shared machinery
// ============================================================================

/// Raw template, placement, derived points and (once created) backend entities.
#[derive(Debug, Clone)]
pub(crate) struct Outline {
    kind: &'static str,
    raw_points: Vec<Point2D>,
    placement: Placement,
    points: Vec<Point2D>,
    built: Option<BuiltGeometry>,
}

impl Outline {
    pub(crate) fn new(
        kind: &'static str,
        raw_points: Vec<Point2D>,
        placement: Placement,
    ) -> Result<Self, GeometryError> {
        check_placement(placement)?;
        let points = placement.apply(&raw_points);
        Ok(Outline {
            kind,
            raw_points,
            placement,
            points,
            built: None,
        })
    }

    pub(crate) fn kind(&self) -> &'static str {
        self.kind
    }

    pub(crate) fn raw_points(&self) -> &[Point2D] {
        &self.raw_points
    }

    pub(crate) fn placement(&self) -> Placement {
        self.placement
    }

    pub(crate) fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub(crate) fn built(&self) -> Option<&BuiltGeometry> {
        self.built.as_ref()
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) -> Result<(), GeometryError> {
        self.ensure_unbuilt()?;
        check_placement(placement)?;
        self.placement = placement;
        self.points = placement.apply(&self.raw_points);
        Ok(())
    }

    pub(crate) fn ensure_unbuilt(&self) -> Result<(), GeometryError> {
        match self.built {
            Some(_) => Err(GeometryError::AlreadyMaterialized { shape: self.kind }),
            None => Ok(()),
        }
    }

    pub(crate) fn finish(&mut self, geometry: BuiltGeometry) -> &BuiltGeometry {
        self.built.insert(geometry)
    }
}

/// How a shape obtains its keypoints
#[derive(Clone, Copy, Debug)]
pub(crate) enum Binding<'a> {
    Fresh,
    Merged {
        target: &'a BuiltGeometry,
        options: MergeOptions,
    },
}

impl Binding<'_> {
    pub(crate) fn bind(
        self,
        backend: &mut dyn Backend,
        points: &[Point2D],
    ) -> Result<Vec<KeypointId>, GeometryError> {
        match self {
            Binding::Fresh => bind_fresh(backend, points),
            Binding::Merged { target, options } => {
                bind_merged(backend, points, target.keypoints(), options.tolerance)
            }
        }
    }
}

/// Reject templates with non-finite coordinates before they reach a backend.
pub(crate) fn check_finite(points: &[Point2D]) -> Result<(), GeometryError> {
    match points.iter().find(|p| !p.is_finite()) {
        Some(p) => Err(GeometryError::InvalidParameter {
            name: "point coordinate",
            value: if p.x.is_finite() { p.y } else { p.x },
            reason: "must be finite",
        }),
        None => Ok(()),
    }
}

/// Reject a non-finite rotation or destination; either would put NaN into every point.
pub(crate) fn check_placement(placement: Placement) -> Result<(), GeometryError> {
    if !placement.rotation.is_finite() {
        return Err(GeometryError::InvalidParameter {
            name: "rotation",
            value: placement.rotation,
            reason: "must be finite",
        });
    }
    let Point2D { x, y } = placement.destination;
    match [x, y].into_iter().find(|v| !v.is_finite()) {
        Some(value) => Err(GeometryError::InvalidParameter {
            name: "destination",
            value,
            reason: "must be finite",
        }),
        None => Ok(()),
    }
}
