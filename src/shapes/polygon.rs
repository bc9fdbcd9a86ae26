//! Closed polygon through a list of points.

use crate::backend::Backend;
use crate::errors::GeometryError;
use crate::log::debug;
use crate::options::MergeOptions;
use crate::topology::{area, closed_loop};
use crate::transform::Placement;
use crate::types::Point2D;

use super::{check_finite, Binding, BuiltGeometry, Outline, Shape};

/// A polygon with one line per edge and a single area.
///
/// Points should go around the boundary starting at the local origin, which is
/// the pivot for rotation and the anchor for the destination. Line `i` runs
/// from point `i` to point `i + 1`, the last one back to point 0.
#[derive(Debug, Clone)]
pub struct Polygon {
    outline: Outline,
}

impl Polygon {
    pub const MIN_POINTS: usize = 3;

    pub fn new(raw_points: Vec<Point2D>) -> Result<Self, GeometryError> {
        Self::with_placement(raw_points, Placement::IDENTITY)
    }

    pub fn with_placement(raw_points: Vec<Point2D>, placement: Placement) -> Result<Self, GeometryError> {
        Self::from_template("polygon", raw_points, placement)
    }

    /// Shared constructor for the polygon-based shapes.
    pub(crate) fn from_template(
        kind: &'static str,
        raw_points: Vec<Point2D>,
        placement: Placement,
    ) -> Result<Self, GeometryError> {
        if raw_points.len() < Self::MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                count: raw_points.len(),
                min: Self::MIN_POINTS,
            });
        }
        check_finite(&raw_points)?;
        Ok(Polygon {
            outline: Outline::new(kind, raw_points, placement)?,
        })
    }

    fn materialize(
        &mut self,
        backend: &mut dyn Backend,
        binding: Binding<'_>,
    ) -> Result<&BuiltGeometry, GeometryError> {
        self.outline.ensure_unbuilt()?;
        let keypoints = binding.bind(backend, self.outline.points())?;
        let lines = closed_loop(backend, &keypoints)?;
        let area = area(backend, &lines)?;
        debug!(
            shape = self.outline.kind(),
            keypoints = keypoints.len(),
            %area,
            "polygon created"
        );
        Ok(self.outline.finish(BuiltGeometry::new(keypoints, lines, vec![area])))
    }
}

impl Shape for Polygon {
    fn kind(&self) -> &'static str {
        self.outline.kind()
    }

    fn raw_points(&self) -> &[Point2D] {
        self.outline.raw_points()
    }

    fn placement(&self) -> Placement {
        self.outline.placement()
    }

    fn points(&self) -> &[Point2D] {
        self.outline.points()
    }

    fn built(&self) -> Option<&BuiltGeometry> {
        self.outline.built()
    }

    fn set_placement(&mut self, placement: Placement) -> Result<(), GeometryError> {
        self.outline.set_placement(placement)
    }

    fn create(&mut self, backend: &mut dyn Backend) -> Result<&BuiltGeometry, GeometryError> {
        self.materialize(backend, Binding::Fresh)
    }

    fn create_merged_with(
        &mut self,
        backend: &mut dyn Backend,
        other: &BuiltGeometry,
        options: MergeOptions,
    ) -> Result<&BuiltGeometry, GeometryError> {
        self.materialize(backend, Binding::Merged { target: other, options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, MemoryBackend};

    fn triangle() -> Vec<Point2D> {
        vec![Point2D::ORIGIN, Point2D::new(0.0, 1.0), Point2D::new(1.0, 0.0)]
    }

    #[test]
    fn polygon_needs_three_points() {
        let err = Polygon::new(triangle()[..2].to_vec()).unwrap_err();
        assert!(matches!(err, GeometryError::TooFewPoints { count: 2, min: 3 }));
    }

    #[test]
    fn polygon_rejects_non_finite_points() {
        let mut pts = triangle();
        pts[1].y = f64::NAN;
        assert!(Polygon::new(pts).is_err());
    }

    #[test]
    fn triangle_has_three_lines_and_one_area() {
        let mut backend = MemoryBackend::new();
        let mut tri = Polygon::new(triangle()).unwrap();
        let built = tri.create(&mut backend).unwrap();
        assert_eq!(built.keypoints().len(), 3);
        assert_eq!(built.lines().len(), 3);
        assert_eq!(built.areas().len(), 1);
    }

    #[test]
    fn second_create_is_rejected() {
        let mut backend = MemoryBackend::new();
        let mut tri = Polygon::new(triangle()).unwrap();
        tri.create(&mut backend).unwrap();
        assert!(matches!(
            tri.create(&mut backend),
            Err(GeometryError::AlreadyMaterialized { shape: "polygon" })
        ));
        assert_eq!(backend.keypoint_count(), 3);
    }

    #[test]
    fn placement_is_frozen_after_create() {
        let mut backend = MemoryBackend::new();
        let mut tri = Polygon::new(triangle()).unwrap();
        tri.create(&mut backend).unwrap();
        let before = tri.points().to_vec();
        assert!(tri.set_rotation(1.0).is_err());
        assert!(tri.set_destination(Point2D::new(4.0, 4.0)).is_err());
        assert_eq!(tri.points(), before.as_slice());
        assert_eq!(tri.rotation_angle(), 0.0);
    }

    #[test]
    fn non_finite_destination_is_rejected_before_create() {
        let mut backend = MemoryBackend::new();
        let mut tri = Polygon::new(triangle()).unwrap();
        assert!(matches!(
            tri.set_destination(Point2D::new(f64::NAN, 0.0)),
            Err(GeometryError::InvalidParameter { name: "destination", .. })
        ));
        assert!(tri.set_rotation(f64::INFINITY).is_err());
        assert_eq!(tri.placement(), Placement::IDENTITY);
        assert_eq!(tri.points(), triangle().as_slice());

        tri.create(&mut backend).unwrap();
        for &k in tri.keypoints().unwrap() {
            assert!(backend.keypoint_location(k).unwrap().is_finite());
        }
    }

    #[test]
    fn destination_moves_points_before_create() {
        let mut tri = Polygon::new(triangle()).unwrap();
        tri.set_destination(Point2D::new(2.0, 3.0)).unwrap();
        assert_eq!(tri.points()[0], Point2D::new(2.0, 3.0));
        assert_eq!(tri.raw_points()[0], Point2D::ORIGIN);
    }
}
