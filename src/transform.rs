//! Placement of a local point template in world space.
//!
//! A shape is always rotated about its local origin first and only then moved
//! to its destination. Rotating about the destination is not offered.

use std::f64::consts::PI;

use glam::DVec2;

use crate::types::Point2D;

/// The two degrees of freedom of a planar shape.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Placement {
    /// Rotation about the local origin, in radians
    pub rotation: f64,
    /// Where the local origin ends up
    pub destination: Point2D,
}

impl Placement {
    pub const IDENTITY: Placement = Placement {
        rotation: 0.0,
        destination: Point2D::ORIGIN,
    };

    pub fn new(rotation: f64, destination: Point2D) -> Self {
        Placement { rotation, destination }
    }

    pub fn at(destination: Point2D) -> Self {
        Placement { rotation: 0.0, destination }
    }

    #[must_use]
    pub fn with_rotation(self, radians: f64) -> Self {
        Placement { rotation: radians, ..self }
    }

    #[must_use]
    pub fn with_rotation_in_degree(self, degrees: f64) -> Self {
        self.with_rotation(degrees_to_radians(degrees))
    }

    #[must_use]
    pub fn with_destination(self, destination: Point2D) -> Self {
        Placement { destination, ..self }
    }

    /// Map one local point to world space.
    pub fn apply_to(&self, raw: Point2D) -> Point2D {
        rotate_then_shift(raw, self.rotation, self.destination)
    }

    /// Map a whole template; the result always has the template's length.
    pub fn apply(&self, raw: &[Point2D]) -> Vec<Point2D> {
        raw.iter().map(|&p| self.apply_to(p)).collect()
    }

    /// Rotate a direction (e.g. a spline tangent). Directions never translate.
    pub fn rotate_direction(&self, direction: DVec2) -> DVec2 {
        DVec2::from_angle(self.rotation).rotate(direction)
    }
}

/// `p` rotated about the origin by `angle`, then shifted by `offset`.
pub fn rotate_then_shift(p: Point2D, angle: f64, offset: Point2D) -> Point2D {
    p.rotated(angle).shifted(offset)
}

/// Degrees to radians as `deg / 180 · π`, so 180° is exactly `π`.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees / 180.0 * PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_keeps_points() {
        let raw = [Point2D::new(1.0, 2.0), Point2D::new(-3.0, 0.5)];
        assert_eq!(Placement::IDENTITY.apply(&raw), raw.to_vec());
    }

    #[test]
    fn rotation_happens_before_translation() {
        let placement = Placement::new(FRAC_PI_2, Point2D::new(10.0, 0.0));
        let p = placement.apply_to(Point2D::new(1.0, 0.0));
        // rotated to (0, 1) first, then shifted
        assert!(p.approx_eq(Point2D::new(10.0, 1.0), 1e-12));
    }

    #[test]
    fn apply_preserves_length() {
        let raw: Vec<Point2D> = (0..17).map(|i| Point2D::new(i as f64, 1.0)).collect();
        let placement = Placement::new(0.3, Point2D::new(2.0, -1.0));
        assert_eq!(placement.apply(&raw).len(), raw.len());
    }

    #[test]
    fn degrees_half_turn_is_exactly_pi() {
        assert_eq!(degrees_to_radians(180.0), PI);
        assert_eq!(Placement::IDENTITY.with_rotation_in_degree(180.0).rotation, PI);
    }

    #[test]
    fn directions_rotate_without_shift() {
        let placement = Placement::new(FRAC_PI_2, Point2D::new(5.0, 5.0));
        let d = placement.rotate_direction(DVec2::new(-1.0, 0.0));
        assert!((d.x - 0.0).abs() < 1e-12);
        assert!((d.y + 1.0).abs() < 1e-12);
    }
}
