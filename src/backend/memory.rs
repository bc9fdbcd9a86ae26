//! In-process geometry store.
//!
//! Numbers keypoints, lines and areas from 1 in creation order, the way a
//! solver session does, and rejects the requests a solver would reject. Like
//! the solver, a straight line requested between two keypoints that are
//! already joined by a straight line returns the existing line, so shapes
//! glued at shared keypoints also share their common edges.

use std::collections::HashMap;

use crate::errors::BackendError;
use crate::log::trace;
use crate::types::{AreaId, Fraction, KeypointId, LineId, Point2D};

use super::{Backend, EndTangents};
use crate::defaults::MAX_SPLINE_KEYPOINTS;

/// A line as stored by [`MemoryBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Straight {
        start: KeypointId,
        end: KeypointId,
    },
    Spline {
        keypoints: Vec<KeypointId>,
        tangents: EndTangents,
    },
    Concatenated {
        parts: Vec<LineId>,
        start: KeypointId,
        end: KeypointId,
    },
}

impl Curve {
    /// First and last keypoint
    pub fn endpoints(&self) -> (KeypointId, KeypointId) {
        match self {
            Curve::Straight { start, end } | Curve::Concatenated { start, end, .. } => (*start, *end),
            Curve::Spline { keypoints, .. } => (keypoints[0], keypoints[keypoints.len() - 1]),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    keypoints: Vec<Point2D>,
    lines: Vec<Curve>,
    areas: Vec<Vec<LineId>>,
    selected_lines: Vec<LineId>,
    selected_areas: Vec<AreaId>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keypoint_count(&self) -> usize {
        self.keypoints.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn curve(&self, line: LineId) -> Option<&Curve> {
        index(line.0).and_then(|i| self.lines.get(i))
    }

    /// Boundary lines of an area, in the order they were given
    pub fn area_lines(&self, area: AreaId) -> Option<&[LineId]> {
        index(area.0).and_then(|i| self.areas.get(i)).map(Vec::as_slice)
    }

    pub fn selected_lines(&self) -> &[LineId] {
        &self.selected_lines
    }

    pub fn selected_areas(&self) -> &[AreaId] {
        &self.selected_areas
    }

    fn location(&self, keypoint: KeypointId) -> Result<Point2D, BackendError> {
        index(keypoint.0)
            .and_then(|i| self.keypoints.get(i))
            .copied()
            .ok_or(BackendError::UnknownKeypoint(keypoint))
    }

    fn stored_curve(&self, line: LineId) -> Result<&Curve, BackendError> {
        self.curve(line).ok_or(BackendError::UnknownLine(line))
    }

    fn check_area(&self, area: AreaId) -> Result<(), BackendError> {
        match index(area.0).and_then(|i| self.areas.get(i)) {
            Some(_) => Ok(()),
            None => Err(BackendError::UnknownArea(area)),
        }
    }

    fn push_line(&mut self, curve: Curve) -> LineId {
        self.lines.push(curve);
        LineId(self.lines.len() as u32)
    }

    /// Keypoints a line passes through, from its start to its end.
    fn keypoint_path(&self, line: LineId) -> Result<Vec<KeypointId>, BackendError> {
        match self.stored_curve(line)? {
            Curve::Straight { start, end } => Ok(vec![*start, *end]),
            Curve::Spline { keypoints, .. } => Ok(keypoints.clone()),
            Curve::Concatenated { parts, start, .. } => {
                let mut path: Vec<KeypointId> = Vec::new();
                for part in parts {
                    let mut segment = self.keypoint_path(*part)?;
                    let head = path.last().copied().unwrap_or(*start);
                    if segment.first() != Some(&head) {
                        segment.reverse();
                    }
                    let skip = usize::from(!path.is_empty());
                    path.extend(segment.into_iter().skip(skip));
                }
                Ok(path)
            }
        }
    }
}

/// Zero-based storage index of a one-based handle
fn index(handle: u32) -> Option<usize> {
    (handle as usize).checked_sub(1)
}

impl Backend for MemoryBackend {
    fn create_keypoint(&mut self, at: Point2D) -> Result<KeypointId, BackendError> {
        self.keypoints.push(at);
        let id = KeypointId(self.keypoints.len() as u32);
        trace!(%id, x = at.x, y = at.y, "keypoint created");
        Ok(id)
    }

    fn create_line(&mut self, a: KeypointId, b: KeypointId) -> Result<LineId, BackendError> {
        self.location(a)?;
        self.location(b)?;
        if a == b {
            return Err(BackendError::DegenerateLine(a));
        }

        let existing = self.lines.iter().position(|curve| {
            matches!(curve, Curve::Straight { start, end }
                if (*start == a && *end == b) || (*start == b && *end == a))
        });
        if let Some(i) = existing {
            let id = LineId(i as u32 + 1);
            trace!(%id, %a, %b, "reusing existing line");
            return Ok(id);
        }

        Ok(self.push_line(Curve::Straight { start: a, end: b }))
    }

    fn create_spline(
        &mut self,
        keypoints: &[KeypointId],
        tangents: EndTangents,
    ) -> Result<LineId, BackendError> {
        if !(2..=MAX_SPLINE_KEYPOINTS).contains(&keypoints.len()) {
            return Err(BackendError::SplineArity {
                count: keypoints.len(),
                max: MAX_SPLINE_KEYPOINTS,
            });
        }
        for &k in keypoints {
            self.location(k)?;
        }
        if let Some(pair) = keypoints.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(BackendError::DegenerateLine(pair[0]));
        }

        Ok(self.push_line(Curve::Spline {
            keypoints: keypoints.to_vec(),
            tangents,
        }))
    }

    fn create_area(&mut self, lines: &[LineId]) -> Result<AreaId, BackendError> {
        if lines.is_empty() {
            return Err(BackendError::EmptyArea);
        }

        let mut uses: HashMap<KeypointId, usize> = HashMap::new();
        for (i, &line) in lines.iter().enumerate() {
            if lines[..i].contains(&line) {
                return Err(BackendError::DuplicateLine(line));
            }
            let (start, end) = self.stored_curve(line)?.endpoints();
            *uses.entry(start).or_default() += 1;
            *uses.entry(end).or_default() += 1;
        }

        // Report the first dangling endpoint in boundary order
        for &line in lines {
            let (start, end) = self.stored_curve(line)?.endpoints();
            for k in [start, end] {
                if uses[&k] % 2 != 0 {
                    return Err(BackendError::OpenBoundary(k));
                }
            }
        }

        self.areas.push(lines.to_vec());
        let id = AreaId(self.areas.len() as u32);
        trace!(%id, lines = lines.len(), "area created");
        Ok(id)
    }

    fn concatenate_lines(&mut self, lines: &[LineId]) -> Result<LineId, BackendError> {
        if lines.len() < 2 {
            return Err(BackendError::TooFewLines { count: lines.len() });
        }
        for &line in lines {
            self.stored_curve(line)?;
        }

        let first = lines[0];
        let mut hosts = self.areas.iter().filter(|boundary| boundary.contains(&first));
        let Some(host) = hosts.next() else {
            return Err(BackendError::NotOnArea(first));
        };
        if !lines.iter().all(|l| host.contains(l)) {
            let shared = hosts.any(|boundary| lines.iter().all(|l| boundary.contains(l)));
            if !shared {
                let missing = lines.iter().find(|l| !host.contains(l)).copied().unwrap_or(first);
                return Err(BackendError::NotOnArea(missing));
            }
        }

        let (s0, e0) = self.stored_curve(first)?.endpoints();
        let (s1, e1) = self.stored_curve(lines[1])?.endpoints();
        let (start, mut tail) = if e0 == s1 || e0 == e1 {
            (s0, e0)
        } else if s0 == s1 || s0 == e1 {
            (e0, s0)
        } else {
            return Err(BackendError::BrokenChain(lines[1]));
        };
        for &line in &lines[1..] {
            let (s, e) = self.stored_curve(line)?.endpoints();
            tail = if s == tail {
                e
            } else if e == tail {
                s
            } else {
                return Err(BackendError::BrokenChain(line));
            };
        }

        Ok(self.push_line(Curve::Concatenated {
            parts: lines.to_vec(),
            start,
            end: tail,
        }))
    }

    fn keypoint_location(&mut self, keypoint: KeypointId) -> Result<Point2D, BackendError> {
        self.location(keypoint)
    }

    /// Splines are measured along their keypoint polygon, not the fitted curve.
    fn line_location(&mut self, line: LineId, fraction: Fraction) -> Result<Point2D, BackendError> {
        let path = self
            .keypoint_path(line)?
            .into_iter()
            .map(|k| self.location(k))
            .collect::<Result<Vec<_>, _>>()?;

        let total: f64 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
        let mut remaining = fraction.raw() * total;
        for w in path.windows(2) {
            let length = w[0].distance(w[1]);
            if remaining <= length && length > 0.0 {
                let t = remaining / length;
                return Ok(w[0].to_dvec2().lerp(w[1].to_dvec2(), t).into());
            }
            remaining -= length;
        }
        Ok(path[path.len() - 1])
    }

    fn select_lines(&mut self, lines: &[LineId]) -> Result<(), BackendError> {
        for &line in lines {
            self.stored_curve(line)?;
        }
        self.selected_lines = lines.to_vec();
        Ok(())
    }

    fn select_areas(&mut self, areas: &[AreaId]) -> Result<(), BackendError> {
        for &area in areas {
            self.check_area(area)?;
        }
        self.selected_areas = areas.to_vec();
        Ok(())
    }
}
