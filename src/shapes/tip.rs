//! Half profile of an axisymmetric nanoindenter tip.
//!
//! The apex sits at the local origin with the axis of symmetry along +y. The
//! body is a block of the configured height whose outer flank follows
//! [`TipProfile::radius`] from the profile depth down to the apex:
//!
//! ```text
//!  1 ____ 2
//!   |    |
//!   |    |3
//!   |   /
//!   |  /   profile splines
//!   | /
//!  0|/
//! ```
//!
//! The profile is sampled quadratically in depth, so points crowd near the apex
//! where the radius changes fastest.

use glam::DVec2;

use crate::backend::{Backend, EndTangents};
use crate::defaults::MAX_TIP_SPLINE_POINTS;
use crate::errors::GeometryError;
use crate::log::{debug, warn};
use crate::options::{MergeOptions, TipOptions};
use crate::profile::TipProfile;
use crate::topology::{area, concatenate, spline_chain};
use crate::transform::Placement;
use crate::types::{require_positive, LineId, Point2D};

use super::{check_finite, Binding, BuiltGeometry, Outline, Shape};

/// Smallest accepted `spline_points` before normalization
const MIN_SPLINE_POINTS: usize = 5;

/// Line handles of a materialized [`Tip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipTopology {
    pub line_left: LineId,
    pub line_top: LineId,
    pub line_right: LineId,
    /// Profile splines, apex-closing spline last
    pub contact_lines: Vec<LineId>,
    /// The contact lines joined into one curve
    pub contact_curve: LineId,
}

#[derive(Debug, Clone)]
pub struct Tip {
    profile: TipProfile,
    options: TipOptions,
    outline: Outline,
    topology: Option<TipTopology>,
}

impl Tip {
    pub fn new(profile: TipProfile, options: TipOptions) -> Result<Self, GeometryError> {
        Self::with_placement(profile, options, Placement::IDENTITY)
    }

    pub fn with_placement(
        profile: TipProfile,
        options: TipOptions,
        placement: Placement,
    ) -> Result<Self, GeometryError> {
        let options = normalize(options)?;
        let raw = profile_points(&profile, &options)?;
        check_finite(&raw)?;
        Ok(Tip {
            profile,
            options,
            outline: Outline::new("tip", raw, placement)?,
            topology: None,
        })
    }

    pub fn profile(&self) -> &TipProfile {
        &self.profile
    }

    /// Options after normalization; `spline_points` has the form `5k + 1`.
    pub fn options(&self) -> TipOptions {
        self.options
    }

    pub fn topology(&self) -> Result<&TipTopology, GeometryError> {
        self.topology
            .as_ref()
            .ok_or(GeometryError::NotMaterialized { shape: self.outline.kind() })
    }

    pub fn contact_curve(&self) -> Result<LineId, GeometryError> {
        Ok(self.topology()?.contact_curve)
    }

    /// Make the profile splines the backend's active line selection
    pub fn select_spline_lines(&self, backend: &mut dyn Backend) -> Result<(), GeometryError> {
        backend.select_lines(&self.topology()?.contact_lines)?;
        Ok(())
    }

    fn materialize(
        &mut self,
        backend: &mut dyn Backend,
        binding: Binding<'_>,
    ) -> Result<&BuiltGeometry, GeometryError> {
        self.outline.ensure_unbuilt()?;
        let k = binding.bind(backend, self.outline.points())?;

        let line_left = backend.create_line(k[0], k[1])?;
        let line_top = backend.create_line(k[1], k[2])?;
        let line_right = backend.create_line(k[2], k[3])?;

        let mut contact_lines = spline_chain(backend, &k[3..])?;
        let apex = self.outline.placement().rotate_direction(DVec2::NEG_X);
        let last = k[k.len() - 1];
        contact_lines.push(backend.create_spline(&[last, k[0]], EndTangents::end(apex))?);

        let mut lines = vec![line_left, line_top, line_right];
        lines.extend_from_slice(&contact_lines);
        let body = area(backend, &lines)?;
        let contact_curve = concatenate(backend, &contact_lines)?;
        debug!(
            splines = contact_lines.len(),
            %body,
            %contact_curve,
            "tip created"
        );

        self.topology = Some(TipTopology {
            line_left,
            line_top,
            line_right,
            contact_lines,
            contact_curve,
        });
        Ok(self.outline.finish(BuiltGeometry::new(k, lines, vec![body])))
    }
}

/// Round `spline_points` to `5k + 1` and check the body dimensions.
fn normalize(options: TipOptions) -> Result<TipOptions, GeometryError> {
    let requested = options.spline_points;
    if requested < MIN_SPLINE_POINTS {
        return Err(GeometryError::InvalidParameter {
            name: "spline points",
            value: requested as f64,
            reason: "must be at least 5",
        });
    }
    if requested > MAX_TIP_SPLINE_POINTS {
        return Err(GeometryError::InvalidParameter {
            name: "spline points",
            value: requested as f64,
            reason: "must be at most 5001",
        });
    }
    let height = require_positive("tip height", options.height)?;
    let profile_depth = require_positive("profile depth", options.profile_depth)?;
    if height <= profile_depth {
        return Err(GeometryError::InvalidParameter {
            name: "tip height",
            value: height,
            reason: "must exceed the profile depth",
        });
    }

    let spline_points = requested / 5 * 5 + 1;
    if spline_points != requested {
        warn!(requested, used = spline_points, "spline points rounded to 5k + 1");
    }
    Ok(TipOptions {
        spline_points,
        height,
        profile_depth,
    })
}

fn profile_points(profile: &TipProfile, options: &TipOptions) -> Result<Vec<Point2D>, GeometryError> {
    let n = options.spline_points;
    let depth = options.profile_depth;
    let mut points = Vec::with_capacity(n + 3);
    points.push(Point2D::ORIGIN);
    points.push(Point2D::new(0.0, options.height));
    points.push(Point2D::new(profile.radius(depth)?, options.height));
    for i in (1..=n).rev() {
        let t = i as f64 / n as f64;
        let y = depth * t * t;
        points.push(Point2D::new(profile.radius(y)?, y));
    }
    Ok(points)
}

impl Shape for Tip {
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
