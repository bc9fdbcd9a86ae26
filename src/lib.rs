//! Parametric 2D shapes for finite-element pre-processing.
//!
//! Shapes (rectangles, regular polygons, a film with a region of interest and
//! a nanoindenter tip) are described as ordered points in a local frame,
//! placed in the world by a rotation about their local origin followed by a
//! translation, and then materialized in a geometry [`Backend`] as keypoints,
//! lines and areas.
//!
//! A shape can be glued onto one that already exists with
//! [`Shape::create_merged_to`]: keypoints that coincide with the other shape's
//! keypoints are reused instead of duplicated.
//!
//! ```
//! use planform::{MemoryBackend, Point2D, Rectangle, Shape};
//!
//! let mut backend = MemoryBackend::new();
//! let mut substrate = Rectangle::new(100.0, 40.0)?;
//! substrate.create(&mut backend)?;
//!
//! let mut film = Rectangle::new(100.0, 5.0)?;
//! film.set_destination(substrate.points()[1])?;
//! film.create_merged_to(&mut backend, substrate.geometry()?)?;
//!
//! assert_eq!(backend.keypoint_count(), 6);
//! assert_eq!(film.line_bottom()?, substrate.line_top()?);
//! # Ok::<(), planform::GeometryError>(())
//! ```
//!
//! Enable the `tracing` feature to log shape construction and merging.

pub mod log;

pub mod backend;
pub mod binder;
pub mod defaults;
pub mod errors;
pub mod options;
pub mod profile;
pub mod shapes;
pub mod topology;
pub mod transform;
pub mod types;

pub use backend::{ApdlRecorder, Backend, EndTangents, MemoryBackend};
pub use errors::{BackendError, GeometryError};
pub use options::{MergeOptions, TipOptions};
pub use profile::TipProfile;
pub use shapes::{
    BuiltGeometry, FilmTopology, FilmWithRoi, Isogon, Polygon, Rectangle, Shape, ShapeEnum, Tip,
    TipTopology,
};
pub use transform::Placement;
pub use types::{AreaId, Fraction, KeypointId, LineId, Point2D};
