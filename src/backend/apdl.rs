//! APDL command recording.
//!
//! [`ApdlRecorder`] forwards every request to an inner backend and, once the
//! inner backend accepted it, appends the equivalent APDL command. Handles in
//! the commands are the ones the inner backend returned, so replaying the
//! script in a fresh solver session reproduces the same numbering.

use glam::DVec2;

use crate::errors::BackendError;
use crate::types::{AreaId, Fraction, KeypointId, LineId, Point2D};

use super::{Backend, EndTangents};
use crate::defaults::MAX_SPLINE_KEYPOINTS;

#[derive(Debug, Default, Clone)]
pub struct ApdlRecorder<B> {
    inner: B,
    commands: Vec<String>,
}

impl<B: Backend> ApdlRecorder<B> {
    pub fn new(inner: B) -> Self {
        ApdlRecorder {
            inner,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// All recorded commands, one per line
    pub fn script(&self) -> String {
        self.commands.join("\n")
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    fn record(&mut self, command: String) {
        self.commands.push(command);
    }
}

/// `CMD,a,b,c` with trailing empty fields dropped.
fn command(name: &str, fields: &[String]) -> String {
    let used = fields.iter().rposition(|f| !f.is_empty()).map_or(0, |i| i + 1);
    std::iter::once(name)
        .chain(fields[..used].iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(",")
}

fn handle_fields<I: IntoIterator<Item = u32>>(handles: I) -> Vec<String> {
    handles.into_iter().map(|h| h.to_string()).collect()
}

fn tangent_fields(tangent: Option<DVec2>) -> [String; 3] {
    match tangent {
        Some(v) => [v.x.to_string(), v.y.to_string(), String::new()],
        None => Default::default(),
    }
}

impl<B: Backend> Backend for ApdlRecorder<B> {
    fn create_keypoint(&mut self, at: Point2D) -> Result<KeypointId, BackendError> {
        let id = self.inner.create_keypoint(at)?;
        self.record(command("K", &[id.raw().to_string(), at.x.to_string(), at.y.to_string()]));
        Ok(id)
    }

    fn create_line(&mut self, a: KeypointId, b: KeypointId) -> Result<LineId, BackendError> {
        let id = self.inner.create_line(a, b)?;
        self.record(command("L", &handle_fields([a.raw(), b.raw()])));
        Ok(id)
    }

    fn create_spline(
        &mut self,
        keypoints: &[KeypointId],
        tangents: EndTangents,
    ) -> Result<LineId, BackendError> {
        let id = self.inner.create_spline(keypoints, tangents)?;
        let mut fields = handle_fields(keypoints.iter().map(|k| k.raw()));
        fields.resize(MAX_SPLINE_KEYPOINTS, String::new());
        fields.extend(tangent_fields(tangents.start));
        fields.extend(tangent_fields(tangents.end));
        self.record(command("BSPLIN", &fields));
        Ok(id)
    }

    fn create_area(&mut self, lines: &[LineId]) -> Result<AreaId, BackendError> {
        let id = self.inner.create_area(lines)?;
        self.record(command("AL", &handle_fields(lines.iter().map(|l| l.raw()))));
        Ok(id)
    }

    fn concatenate_lines(&mut self, lines: &[LineId]) -> Result<LineId, BackendError> {
        let id = self.inner.concatenate_lines(lines)?;
        self.record(command("LCCAT", &handle_fields(lines.iter().map(|l| l.raw()))));
        Ok(id)
    }

    fn keypoint_location(&mut self, keypoint: KeypointId) -> Result<Point2D, BackendError> {
        self.inner.keypoint_location(keypoint)
    }

    fn line_location(&mut self, line: LineId, fraction: Fraction) -> Result<Point2D, BackendError> {
        self.inner.line_location(line, fraction)
    }

    fn select_lines(&mut self, lines: &[LineId]) -> Result<(), BackendError> {
        self.inner.select_lines(lines)?;
        self.record("LSEL,NONE".to_string());
        for line in lines {
            self.record(format!("LSEL,A,LINE,,{}", line.raw()));
        }
        Ok(())
    }

    fn select_areas(&mut self, areas: &[AreaId]) -> Result<(), BackendError> {
        self.inner.select_areas(areas)?;
        self.record("ASEL,NONE".to_string());
        for area in areas {
            self.record(format!("ASEL,A,AREA,,{}", area.raw()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn trailing_empty_fields_are_dropped() {
        let fields = vec!["1".to_string(), String::new(), "3".to_string(), String::new()];
        assert_eq!(command("X", &fields), "X,1,,3");
        assert_eq!(command("LCCAT", &[]), "LCCAT");
    }

    #[test]
    fn rejected_requests_are_not_recorded() {
        let mut recorder = ApdlRecorder::new(MemoryBackend::new());
        let k = recorder.create_keypoint(Point2D::new(1.0, 2.5)).unwrap();
        assert!(recorder.create_line(k, k).is_err());
        assert_eq!(recorder.commands(), ["K,1,1,2.5"]);
    }

    #[test]
    fn spline_end_tangent_lands_in_second_tangent_slot() {
        let mut recorder = ApdlRecorder::new(MemoryBackend::new());
        let a = recorder.create_keypoint(Point2D::new(1.0, 1.0)).unwrap();
        let b = recorder.create_keypoint(Point2D::ORIGIN).unwrap();
        recorder
            .create_spline(&[a, b], EndTangents::end(DVec2::new(-1.0, 0.0)))
            .unwrap();
        assert_eq!(recorder.commands().last().map(String::as_str), Some("BSPLIN,1,2,,,,,,,,-1,0"));
    }

    #[test]
    fn queries_are_forwarded_silently() {
        let mut recorder = ApdlRecorder::new(MemoryBackend::new());
        let k = recorder.create_keypoint(Point2D::new(4.0, 0.0)).unwrap();
        assert_eq!(recorder.keypoint_location(k).unwrap(), Point2D::new(4.0, 0.0));
        assert_eq!(recorder.commands().len(), 1);
        assert_eq!(recorder.inner().keypoint_count(), 1);
    }
}
