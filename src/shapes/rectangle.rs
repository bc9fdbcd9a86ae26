//! Axis-aligned rectangle anchored at its lower-left corner.

use crate::backend::Backend;
use crate::errors::GeometryError;
use crate::options::MergeOptions;
use crate::transform::Placement;
use crate::types::{require_positive, LineId, Point2D};

use super::{BuiltGeometry, Polygon, Shape};

/// Rectangle of `width × height`, with points ordered
/// lower-left, upper-left, upper-right, lower-right.
///
/// The four lines are, in order, left, top, right and bottom.
#[derive(Debug, Clone)]
pub struct Rectangle {
    width: f64,
    height: f64,
    polygon: Polygon,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::with_placement(width, height, Placement::IDENTITY)
    }

    pub fn with_placement(width: f64, height: f64, placement: Placement) -> Result<Self, GeometryError> {
        let width = require_positive("width", width)?;
        let height = require_positive("height", height)?;
        let raw = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, height),
            Point2D::new(width, height),
            Point2D::new(width, 0.0),
        ];
        Ok(Rectangle {
            width,
            height,
            polygon: Polygon::from_template("rectangle", raw, placement)?,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn line_left(&self) -> Result<LineId, GeometryError> {
        self.edge(0)
    }

    pub fn line_top(&self) -> Result<LineId, GeometryError> {
        self.edge(1)
    }

    pub fn line_right(&self) -> Result<LineId, GeometryError> {
        self.edge(2)
    }

    pub fn line_bottom(&self) -> Result<LineId, GeometryError> {
        self.edge(3)
    }

    fn edge(&self, index: usize) -> Result<LineId, GeometryError> {
        Ok(self.lines()?[index])
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> &'static str {
        self.polygon.kind()
    }

    fn raw_points(&self) -> &[Point2D] {
        self.polygon.raw_points()
    }

    fn placement(&self) -> Placement {
        self.polygon.placement()
    }

    fn points(&self) -> &[Point2D] {
        self.polygon.points()
    }

    fn built(&self) -> Option<&BuiltGeometry> {
        self.polygon.built()
    }

    fn set_placement(&mut self, placement: Placement) -> Result<(), GeometryError> {
        self.polygon.set_placement(placement)
    }

    fn create(&mut self, backend: &mut dyn Backend) -> Result<&BuiltGeometry, GeometryError> {
        self.polygon.create(backend)
    }

    fn create_merged_with(
        &mut self,
        backend: &mut dyn Backend,
        other: &BuiltGeometry,
        options: MergeOptions,
    ) -> Result<&BuiltGeometry, GeometryError> {
        self.polygon.create_merged_with(backend, other, options)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::backend::MemoryBackend;
    use crate::backend::memory::Curve;

    #[test]
    fn rectangle_points_follow_the_corners() {
        let rect = Rectangle::new(10.0, 30.0).unwrap();
        let expected: Vec<Point2D> = [(0.0, 0.0), (0.0, 30.0), (10.0, 30.0), (10.0, 0.0)]
            .iter()
            .map(|&c| c.into())
            .collect();
        assert_eq!(rect.points(), expected.as_slice());
    }

    #[test]
    fn rectangle_rejects_non_positive_sides() {
        assert!(matches!(
            Rectangle::new(0.0, 1.0),
            Err(GeometryError::InvalidParameter { name: "width", .. })
        ));
        assert!(matches!(
            Rectangle::new(1.0, -2.0),
            Err(GeometryError::InvalidParameter { name: "height", .. })
        ));
    }

    #[test]
    fn named_lines_match_the_corners() {
        let mut backend = MemoryBackend::new();
        let mut rect = Rectangle::new(2.0, 1.0).unwrap();
        rect.create(&mut backend).unwrap();
        let kps = rect.keypoints().unwrap().to_vec();
        assert_eq!(
            backend.curve(rect.line_left().unwrap()),
            Some(&Curve::Straight { start: kps[0], end: kps[1] })
        );
        assert_eq!(
            backend.curve(rect.line_bottom().unwrap()),
            Some(&Curve::Straight { start: kps[3], end: kps[0] })
        );
        assert_eq!(rect.areas().unwrap().len(), 1);
    }

    #[test]
    fn named_lines_need_a_created_rectangle() {
        let rect = Rectangle::new(2.0, 1.0).unwrap();
        assert!(rect.line_top().is_err());
    }

    #[test]
    fn rotation_pivots_on_the_first_corner() {
        let mut rect = Rectangle::new(2.0, 1.0).unwrap();
        rect.set_rotation(FRAC_PI_2).unwrap();
        rect.set_destination(Point2D::new(5.0, 5.0)).unwrap();
        let upper_right = rect.points()[2];
        assert!(upper_right.approx_eq(Point2D::new(4.0, 7.0), 1e-12));
        assert_eq!(rect.points()[0], Point2D::new(5.0, 5.0));
    }

    #[test]
    fn stacked_rectangles_share_an_edge() {
        let mut backend = MemoryBackend::new();
        let mut lower = Rectangle::new(4.0, 2.0).unwrap();
        lower.create(&mut backend).unwrap();

        let mut upper = Rectangle::new(4.0, 1.0).unwrap();
        upper.set_destination(lower.points()[1]).unwrap();
        let lower_geometry = lower.geometry().unwrap().clone();
        upper.create_merged_to(&mut backend, &lower_geometry).unwrap();

        assert_eq!(backend.keypoint_count(), 6);
        assert_eq!(upper.keypoints().unwrap()[0], lower.keypoints().unwrap()[1]);
        assert_eq!(upper.keypoints().unwrap()[3], lower.keypoints().unwrap()[2]);
        assert_eq!(upper.line_bottom().unwrap(), lower.line_top().unwrap());
        assert_eq!(backend.area_count(), 2);
    }
}
