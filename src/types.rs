//! Strongly-typed primitives: points, backend handles and length fractions.
//!
//! Handles are zero-cost newtypes so a line number can never be passed where a
//! keypoint number is expected, even though the backend hands out plain integers
//! for both.

use std::fmt;

use glam::DVec2;

use crate::errors::GeometryError;

/// A point in the modelling plane.
///
/// Equality is exact; geometric comparisons go through [`Point2D::approx_eq`]
/// with an explicit tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    /// Rotate about the origin by `angle` radians (counter-clockwise).
    pub fn rotate(&mut self, angle: f64) {
        let v = DVec2::from_angle(angle).rotate(self.to_dvec2());
        self.x = v.x;
        self.y = v.y;
    }

    /// Translate in place by `offset`.
    pub fn shift_by(&mut self, offset: Point2D) {
        self.x += offset.x;
        self.y += offset.y;
    }

    #[must_use]
    pub fn rotated(mut self, angle: f64) -> Self {
        self.rotate(angle);
        self
    }

    #[must_use]
    pub fn shifted(mut self, offset: Point2D) -> Self {
        self.shift_by(offset);
        self
    }

    /// True when both coordinates differ by at most `tol`.
    pub fn approx_eq(self, other: Point2D, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    pub fn distance(self, other: Point2D) -> f64 {
        self.to_dvec2().distance(other.to_dvec2())
    }

    #[inline]
    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<DVec2> for Point2D {
    fn from(v: DVec2) -> Self {
        Point2D { x: v.x, y: v.y }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D { x, y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

macro_rules! handle_types {
    ($($(#[$meta:meta])* $name:ident => $label:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[repr(transparent)]
            pub struct $name(pub u32);

            impl $name {
                /// The backend's own number for this entity
                #[inline]
                pub fn raw(self) -> u32 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($label, " {}"), self.0)
                }
            }
        )*
    };
}

handle_types! {
    /// Backend handle of a keypoint
    KeypointId => "keypoint",
    /// Backend handle of a line (straight, spline or concatenated)
    LineId => "line",
    /// Backend handle of an area
    AreaId => "area",
}

/// A length fraction along a line, guaranteed to lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Fraction(f64);

impl Fraction {
    pub const START: Fraction = Fraction(0.0);
    pub const MID: Fraction = Fraction(0.5);
    pub const END: Fraction = Fraction(1.0);

    pub fn try_new(value: f64) -> Result<Self, GeometryError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Fraction(value))
        } else {
            Err(GeometryError::FractionOutOfRange { value })
        }
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

/// Check that a shape parameter is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidParameter {
            name,
            value,
            reason: "must be finite and greater than zero",
        })
    }
}
