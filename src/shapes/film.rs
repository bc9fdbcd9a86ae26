//! Film with an inset region of interest (ROI).
//!
//! ```text
//!  6 ______ 3 _____________ 4
//!   | ROI  |                |
//!  1|______|2               |
//!   |                       |
//!   |         film          |
//!  0|_______________________|5
//! ```
//!
//! The ROI is a `roi_width × roi_height` rectangle cut out of the upper-left
//! corner. Its bottom (`1→2`) and right (`2→3`) edges also bound the film, so
//! they are created once and appear in both boundaries.

use crate::backend::Backend;
use crate::errors::GeometryError;
use crate::log::debug;
use crate::options::MergeOptions;
use crate::topology::area;
use crate::transform::Placement;
use crate::types::{require_positive, AreaId, LineId, Point2D};

use super::{check_finite, Binding, BuiltGeometry, Outline, Shape};

/// Line and area handles of a materialized [`FilmWithRoi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmTopology {
    /// left, roi horizontal, roi vertical, top, right, bottom
    pub film_lines: [LineId; 6],
    /// left, top, right, bottom
    pub roi_lines: [LineId; 4],
    pub film_area: AreaId,
    pub roi_area: AreaId,
}

impl FilmTopology {
    pub fn film_left(&self) -> LineId {
        self.film_lines[0]
    }

    /// Edge shared by the film and the ROI's bottom
    pub fn roi_horizontal(&self) -> LineId {
        self.film_lines[1]
    }

    /// Edge shared by the film and the ROI's right side
    pub fn roi_vertical(&self) -> LineId {
        self.film_lines[2]
    }

    pub fn film_top(&self) -> LineId {
        self.film_lines[3]
    }

    pub fn film_right(&self) -> LineId {
        self.film_lines[4]
    }

    pub fn film_bottom(&self) -> LineId {
        self.film_lines[5]
    }

    pub fn roi_left(&self) -> LineId {
        self.roi_lines[0]
    }

    pub fn roi_top(&self) -> LineId {
        self.roi_lines[1]
    }
}

/// A film of `radius × height` with a rectangular ROI in its upper-left corner.
#[derive(Debug, Clone)]
pub struct FilmWithRoi {
    radius: f64,
    height: f64,
    roi_width: f64,
    roi_height: f64,
    outline: Outline,
    topology: Option<FilmTopology>,
}

impl FilmWithRoi {
    pub fn new(radius: f64, height: f64, roi_width: f64, roi_height: f64) -> Result<Self, GeometryError> {
        Self::with_placement(radius, height, roi_width, roi_height, Placement::IDENTITY)
    }

    pub fn with_placement(
        radius: f64,
        height: f64,
        roi_width: f64,
        roi_height: f64,
        placement: Placement,
    ) -> Result<Self, GeometryError> {
        let radius = require_positive("radius", radius)?;
        let height = require_positive("height", height)?;
        let roi_width = require_positive("roi width", roi_width)?;
        let roi_height = require_positive("roi height", roi_height)?;
        if roi_width >= radius {
            return Err(GeometryError::InvalidParameter {
                name: "roi width",
                value: roi_width,
                reason: "must be smaller than the film radius",
            });
        }
        if roi_height >= height {
            return Err(GeometryError::InvalidParameter {
                name: "roi height",
                value: roi_height,
                reason: "must be smaller than the film height",
            });
        }

        let roi_floor = height - roi_height;
        let raw = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, roi_floor),
            Point2D::new(roi_width, roi_floor),
            Point2D::new(roi_width, height),
            Point2D::new(radius, height),
            Point2D::new(radius, 0.0),
            Point2D::new(0.0, height),
        ];
        check_finite(&raw)?;

        Ok(FilmWithRoi {
            radius,
            height,
            roi_width,
            roi_height,
            outline: Outline::new("film with roi", raw, placement)?,
            topology: None,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn roi_width(&self) -> f64 {
        self.roi_width
    }

    pub fn roi_height(&self) -> f64 {
        self.roi_height
    }

    /// Named line and area handles.
    pub fn topology(&self) -> Result<&FilmTopology, GeometryError> {
        self.topology
            .as_ref()
            .ok_or(GeometryError::NotMaterialized { shape: self.outline.kind() })
    }

    pub fn film_area(&self) -> Result<AreaId, GeometryError> {
        Ok(self.topology()?.film_area)
    }

    pub fn roi_area(&self) -> Result<AreaId, GeometryError> {
        Ok(self.topology()?.roi_area)
    }

    fn materialize(
        &mut self,
        backend: &mut dyn Backend,
        binding: Binding<'_>,
    ) -> Result<&BuiltGeometry, GeometryError> {
        self.outline.ensure_unbuilt()?;
        let k = binding.bind(backend, self.outline.points())?;

        let mut film_lines = [LineId(0); 6];
        for (i, line) in film_lines.iter_mut().enumerate() {
            *line = backend.create_line(k[i], k[(i + 1) % 6])?;
        }
        let roi_left = backend.create_line(k[1], k[6])?;
        let roi_top = backend.create_line(k[6], k[3])?;
        let roi_lines = [roi_left, roi_top, film_lines[2], film_lines[1]];

        let film_area = area(backend, &film_lines)?;
        let roi_area = area(backend, &roi_lines)?;
        debug!(%film_area, %roi_area, "film with roi created");

        let mut lines = film_lines.to_vec();
        lines.extend([roi_left, roi_top]);
        self.topology = Some(FilmTopology {
            film_lines,
            roi_lines,
            film_area,
            roi_area,
        });
        Ok(self
            .outline
            .finish(BuiltGeometry::new(k, lines, vec![film_area, roi_area])))
    }
}

impl Shape for FilmWithRoi {
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
    use crate::backend::MemoryBackend;
    use crate::backend::memory::Curve;

    fn film() -> FilmWithRoi {
        FilmWithRoi::new(10.0, 4.0, 3.0, 1.0).unwrap()
    }

    #[test]
    fn template_points() {
        let expected: Vec<Point2D> = [
            (0.0, 0.0),
            (0.0, 3.0),
            (3.0, 3.0),
            (3.0, 4.0),
            (10.0, 4.0),
            (10.0, 0.0),
            (0.0, 4.0),
        ]
        .iter()
        .map(|&c| c.into())
        .collect();
        assert_eq!(film().raw_points(), expected.as_slice());
    }

    #[test]
    fn roi_must_fit_inside_the_film() {
        assert!(matches!(
            FilmWithRoi::new(10.0, 4.0, 10.0, 1.0),
            Err(GeometryError::InvalidParameter { name: "roi width", .. })
        ));
        assert!(matches!(
            FilmWithRoi::new(10.0, 4.0, 3.0, 4.5),
            Err(GeometryError::InvalidParameter { name: "roi height", .. })
        ));
        assert!(FilmWithRoi::new(10.0, 0.0, 3.0, 1.0).is_err());
    }

    #[test]
    fn two_areas_share_two_edges() {
        let mut backend = MemoryBackend::new();
        let mut film = film();
        let built = film.create(&mut backend).unwrap().clone();
        assert_eq!(built.keypoints().len(), 7);
        assert_eq!(built.lines().len(), 8);
        assert_eq!(built.areas().len(), 2);
        assert_eq!(backend.line_count(), 8);

        let topo = film.topology().unwrap();
        assert_eq!(topo.roi_lines[2], topo.roi_vertical());
        assert_eq!(topo.roi_lines[3], topo.roi_horizontal());
        assert_eq!(backend.area_lines(topo.roi_area), Some(&topo.roi_lines[..]));
        assert_eq!(backend.area_lines(topo.film_area), Some(&topo.film_lines[..]));
    }

    #[test]
    fn roi_corner_edges_run_through_the_top_left_point() {
        let mut backend = MemoryBackend::new();
        let mut film = film();
        film.create(&mut backend).unwrap();
        let k = film.keypoints().unwrap().to_vec();
        let topo = film.topology().unwrap();
        assert_eq!(
            backend.curve(topo.roi_left()),
            Some(&Curve::Straight { start: k[1], end: k[6] })
        );
        assert_eq!(
            backend.curve(topo.roi_top()),
            Some(&Curve::Straight { start: k[6], end: k[3] })
        );
    }

    #[test]
    fn topology_needs_a_created_film() {
        assert!(matches!(
            film().topology(),
            Err(GeometryError::NotMaterialized { shape: "film with roi" })
        ));
    }
}
