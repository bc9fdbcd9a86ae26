//! Keypoint binding: turning world-space points into backend keypoints.
//!
//! Fresh binding creates one keypoint per point. Merge binding first looks for
//! a keypoint of another shape at the same place (within a per-axis tolerance)
//! and reuses it, which glues two shapes together without the solver's own
//! merge/glue commands. Those renumber every entity in the session and would
//! invalidate the handles already held by existing shapes.

use crate::backend::Backend;
use crate::errors::GeometryError;
use crate::log::{debug, trace};
use crate::types::{KeypointId, Point2D};

/// Create one keypoint per point, in order.
pub fn bind_fresh(
    backend: &mut dyn Backend,
    points: &[Point2D],
) -> Result<Vec<KeypointId>, GeometryError> {
    points
        .iter()
        .map(|&p| backend.create_keypoint(p).map_err(GeometryError::from))
        .collect()
}

/// Bind `points`, reusing keypoints from `existing` where one lies within
/// `tolerance` of a point.
///
/// Locations are read back from the backend, so the comparison is against what
/// was actually stored, not against what a shape asked for. A point with more
/// than one distinct candidate fails with [`GeometryError::AmbiguousMerge`]
/// before any keypoint is created.
pub fn bind_merged(
    backend: &mut dyn Backend,
    points: &[Point2D],
    existing: &[KeypointId],
    tolerance: f64,
) -> Result<Vec<KeypointId>, GeometryError> {
    let mut targets: Vec<(KeypointId, Point2D)> = Vec::with_capacity(existing.len());
    for &k in existing {
        if targets.iter().any(|(seen, _)| *seen == k) {
            continue;
        }
        targets.push((k, backend.keypoint_location(k)?));
    }

    let mut matches: Vec<Option<KeypointId>> = Vec::with_capacity(points.len());
    for &point in points {
        let candidates: Vec<KeypointId> = targets
            .iter()
            .filter(|(_, at)| at.approx_eq(point, tolerance))
            .map(|(k, _)| *k)
            .collect();
        match candidates.as_slice() {
            [] => matches.push(None),
            [k] => {
                trace!(%point, keypoint = %k, "reusing keypoint");
                matches.push(Some(*k));
            }
            _ => return Err(GeometryError::AmbiguousMerge { point, candidates }),
        }
    }

    debug!(
        reused = matches.iter().flatten().count(),
        created = matches.iter().filter(|m| m.is_none()).count(),
        "merged keypoints"
    );

    points
        .iter()
        .zip(matches)
        .map(|(&p, found)| match found {
            Some(k) => Ok(k),
            None => backend.create_keypoint(p).map_err(GeometryError::from),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
        coords.iter().map(|&c| c.into()).collect()
    }

    #[test]
    fn fresh_binding_keeps_order() {
        let mut backend = MemoryBackend::new();
        let kps = bind_fresh(&mut backend, &pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])).unwrap();
        assert_eq!(kps, vec![KeypointId(1), KeypointId(2), KeypointId(3)]);
    }

    #[test]
    fn merge_reuses_coincident_keypoints() {
        let mut backend = MemoryBackend::new();
        let a = bind_fresh(&mut backend, &pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)])).unwrap();
        let b = bind_merged(
            &mut backend,
            &pts(&[(0.0, 1.0 + 1e-9), (5.0, 5.0), (1.0, 1.0)]),
            &a,
            1e-6,
        )
        .unwrap();
        assert_eq!(b, vec![a[1], KeypointId(4), a[2]]);
        assert_eq!(backend.keypoint_count(), 4);
    }

    #[test]
    fn merge_outside_tolerance_creates_new_keypoint() {
        let mut backend = MemoryBackend::new();
        let a = bind_fresh(&mut backend, &pts(&[(0.0, 0.0)])).unwrap();
        let b = bind_merged(&mut backend, &pts(&[(0.0, 1e-3)]), &a, 1e-6).unwrap();
        assert_ne!(b[0], a[0]);
    }

    #[test]
    fn ambiguous_merge_is_an_error() {
        let mut backend = MemoryBackend::new();
        let a = bind_fresh(&mut backend, &pts(&[(0.0, 0.0), (0.0, 5e-7)])).unwrap();
        let err = bind_merged(&mut backend, &pts(&[(1.0, 1.0), (0.0, 0.0)]), &a, 1e-6).unwrap_err();
        match err {
            GeometryError::AmbiguousMerge { point, candidates } => {
                assert_eq!(point, Point2D::ORIGIN);
                assert_eq!(candidates, a);
            }
            other => panic!("expected AmbiguousMerge, got {other:?}"),
        }
        // nothing was created for the first, unambiguous point either
        assert_eq!(backend.keypoint_count(), 2);
    }

    #[test]
    fn repeated_handles_count_once() {
        let mut backend = MemoryBackend::new();
        let a = bind_fresh(&mut backend, &pts(&[(2.0, 2.0)])).unwrap();
        let target = [a[0], a[0]];
        let b = bind_merged(&mut backend, &pts(&[(2.0, 2.0)]), &target, 1e-6).unwrap();
        assert_eq!(b, a);
    }
}
