//! Building boundaries and areas from ordered keypoints.

use crate::backend::{Backend, EndTangents};
use crate::defaults::SPLINE_GROUP;
use crate::errors::GeometryError;
use crate::types::{AreaId, KeypointId, LineId};

/// Line `i` joins `keypoints[i]` and `keypoints[(i + 1) % k]`, giving `k`
/// lines that close the loop.
pub fn closed_loop(
    backend: &mut dyn Backend,
    keypoints: &[KeypointId],
) -> Result<Vec<LineId>, GeometryError> {
    let k = keypoints.len();
    if k < 3 {
        return Err(GeometryError::TooFewPoints { count: k, min: 3 });
    }
    (0..k)
        .map(|i| {
            backend
                .create_line(keypoints[i], keypoints[(i + 1) % k])
                .map_err(GeometryError::from)
        })
        .collect()
}

/// One area bounded by `lines`, in the given order.
pub fn area(backend: &mut dyn Backend, lines: &[LineId]) -> Result<AreaId, GeometryError> {
    if lines.is_empty() {
        return Err(GeometryError::EmptyBoundary);
    }
    Ok(backend.create_area(lines)?)
}

/// Splines through consecutive groups of six keypoints, each group starting on
/// the last keypoint of the previous one.
///
/// `keypoints.len() - 1` must be a multiple of five so the last group ends
/// exactly on the last keypoint.
pub fn spline_chain(
    backend: &mut dyn Backend,
    keypoints: &[KeypointId],
) -> Result<Vec<LineId>, GeometryError> {
    let step = SPLINE_GROUP - 1;
    let n = keypoints.len();
    if n < SPLINE_GROUP || (n - 1) % step != 0 {
        return Err(GeometryError::InvalidParameter {
            name: "spline keypoints",
            value: n as f64,
            reason: "must be of the form 5k + 1 with k >= 1",
        });
    }
    (0..n - 1)
        .step_by(step)
        .map(|i| {
            backend
                .create_spline(&keypoints[i..i + SPLINE_GROUP], EndTangents::FREE)
                .map_err(GeometryError::from)
        })
        .collect()
}

/// Join a contiguous chain into one curve. The lines must already bound an area.
pub fn concatenate(backend: &mut dyn Backend, lines: &[LineId]) -> Result<LineId, GeometryError> {
    backend.select_lines(lines)?;
    Ok(backend.concatenate_lines(lines)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::backend::memory::Curve;
    use crate::binder::bind_fresh;
    use crate::types::Point2D;

    #[test]
    fn closed_loop_wraps_around() {
        let mut backend = MemoryBackend::new();
        let pts: Vec<Point2D> = [(0.0, 0.0), (0.0, 2.0), (3.0, 2.0)].iter().map(|&c| c.into()).collect();
        let kps = bind_fresh(&mut backend, &pts).unwrap();
        let lines = closed_loop(&mut backend, &kps).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            backend.curve(lines[2]),
            Some(&Curve::Straight { start: kps[2], end: kps[0] })
        );
    }

    #[test]
    fn closed_loop_needs_three_keypoints() {
        let mut backend = MemoryBackend::new();
        let kps = bind_fresh(&mut backend, &[Point2D::ORIGIN, Point2D::new(1.0, 0.0)]).unwrap();
        assert!(matches!(
            closed_loop(&mut backend, &kps),
            Err(GeometryError::TooFewPoints { count: 2, min: 3 })
        ));
    }

    #[test]
    fn empty_area_is_rejected_locally() {
        let mut backend = MemoryBackend::new();
        assert!(matches!(area(&mut backend, &[]), Err(GeometryError::EmptyBoundary)));
    }

    #[test]
    fn spline_chain_shares_group_ends() {
        let mut backend = MemoryBackend::new();
        let pts: Vec<Point2D> = (0..11).map(|i| Point2D::new(i as f64, 0.0)).collect();
        let kps = bind_fresh(&mut backend, &pts).unwrap();
        let splines = spline_chain(&mut backend, &kps).unwrap();
        assert_eq!(splines.len(), 2);
        let second = backend.curve(splines[1]).map(Curve::endpoints);
        assert_eq!(second, Some((kps[5], kps[10])));
    }

    #[test]
    fn spline_chain_rejects_misaligned_counts() {
        let mut backend = MemoryBackend::new();
        let pts: Vec<Point2D> = (0..8).map(|i| Point2D::new(i as f64, 0.0)).collect();
        let kps = bind_fresh(&mut backend, &pts).unwrap();
        assert!(spline_chain(&mut backend, &kps).is_err());
        assert_eq!(backend.line_count(), 0);
    }
}
