//! Regular polygon inscribed in a circle.

use std::f64::consts::TAU;

use crate::backend::Backend;
use crate::errors::GeometryError;
use crate::options::MergeOptions;
use crate::transform::Placement;
use crate::types::{require_positive, Point2D};

use super::{BuiltGeometry, Polygon, Shape};

/// Regular `edges`-gon with circumradius `radius`, centered on the local origin.
///
/// Point `i` sits at angle `π - 2πi/edges`, so point 0 is `(-radius, 0)` and the
/// points run clockwise. Enough edges approximate a circle.
#[derive(Debug, Clone)]
pub struct Isogon {
    radius: f64,
    edges: usize,
    polygon: Polygon,
}

impl Isogon {
    pub fn new(radius: f64, edges: usize) -> Result<Self, GeometryError> {
        Self::with_placement(radius, edges, Placement::IDENTITY)
    }

    pub fn with_placement(radius: f64, edges: usize, placement: Placement) -> Result<Self, GeometryError> {
        let radius = require_positive("radius", radius)?;
        if edges < Polygon::MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                count: edges,
                min: Polygon::MIN_POINTS,
            });
        }
        let raw = (0..edges)
            .map(|i| {
                let theta = TAU * i as f64 / edges as f64;
                Point2D::new(-radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Ok(Isogon {
            radius,
            edges,
            polygon: Polygon::from_template("isogon", raw, placement)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn edges(&self) -> usize {
        self.edges
    }
}

impl Shape for Isogon {
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
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn eighty_gon_has_eighty_edges() {
        let mut backend = MemoryBackend::new();
        let mut circle = Isogon::new(1.0, 80).unwrap();
        assert_eq!(circle.points().len(), 80);
        assert_eq!(circle.points()[0], Point2D::new(-1.0, 0.0));
        let built = circle.create(&mut backend).unwrap();
        assert_eq!(built.lines().len(), 80);
        assert_eq!(built.areas().len(), 1);
    }

    #[test]
    fn points_lie_on_the_circumcircle() {
        let hex = Isogon::new(2.5, 6).unwrap();
        for p in hex.points() {
            assert!((p.distance(Point2D::ORIGIN) - 2.5).abs() < 1e-12);
        }
        assert!(hex.points()[3].approx_eq(Point2D::new(2.5, 0.0), 1e-12));
    }

    #[test]
    fn isogon_needs_three_edges() {
        assert!(matches!(
            Isogon::new(1.0, 2),
            Err(GeometryError::TooFewPoints { count: 2, min: 3 })
        ));
        assert!(Isogon::new(-1.0, 5).is_err());
    }
}
