//! Segment walker
//!
//! Walks a [`QuadraticPath`] contour by contour and emits the line and
//! quadratic curve segments that make up the outline, each with its length.
//!
//! Every contour is closed: an on-curve end point gets an extra line back to
//! the contour's start point, and an off-curve end point becomes the control
//! point of a curve that finishes on the start point.

use crate::math::{distance, quadratic_arc_length};
use crate::path::{PathPoint, QuadraticPath};
use crate::PathinsError;
use log::debug;

/// One outline segment with its length in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        from: PathPoint,
        to: PathPoint,
        length: f64,
    },
    QuadraticCurve {
        from: PathPoint,
        control: PathPoint,
        to: PathPoint,
        length: f64,
    },
}

impl Segment {
    fn line(from: PathPoint, to: PathPoint) -> Self {
        Segment::Line {
            from,
            to,
            length: distance(from.coordinate(), to.coordinate()),
        }
    }

    fn curve(from: PathPoint, control: PathPoint, to: PathPoint) -> Self {
        Segment::QuadraticCurve {
            from,
            control,
            to,
            length: quadratic_arc_length(from.as_f64(), control.as_f64(), to.as_f64()),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Segment::Line { length, .. } | Segment::QuadraticCurve { length, .. } => *length,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line { .. })
    }
}

/// Segments of one glyph and their summed length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentReport {
    pub segments: Vec<Segment>,
    pub total_length: f64,
}

impl SegmentReport {
    fn push(&mut self, segment: Segment) {
        self.total_length += segment.length();
        self.segments.push(segment);
    }
}

/// Walk `path` and collect its segments
///
/// The path must have been built with implied points included; otherwise a
/// control point may sit next to another control point, which is reported
/// as an `InvariantViolation`.
pub fn walk(path: &QuadraticPath) -> Result<SegmentReport, PathinsError> {
    let mut report = SegmentReport::default();
    let mut start: Option<PathPoint> = None;

    for (index, point) in path.iter().enumerate() {
        if point.start {
            start = Some(*point);
            continue;
        }

        let previous = path.previous(index).copied();

        if point.on_curve {
            if let Some(previous) = previous.filter(|previous| previous.on_curve) {
                report.push(Segment::line(previous, *point));
            }
            if let (true, Some(start)) = (point.end, start) {
                report.push(Segment::line(*point, start));
            }
            continue;
        }

        match (point.end, previous, start) {
            (true, Some(previous), Some(start)) => {
                report.push(Segment::curve(previous, *point, start));
            }
            _ => {
                let next = path.next(index).copied();
                if let (Some(previous), Some(next)) = (previous, next) {
                    if !previous.on_curve || !next.on_curve {
                        return Err(PathinsError::invariant(format!(
                            "control point {} at {} is not between two on-curve points",
                            index, point
                        )));
                    }
                    report.push(Segment::curve(previous, *point, next));
                }
            }
        }
    }

    debug!(
        "walked {} segments, total length {:.2}",
        report.segments.len(),
        report.total_length
    );
    Ok(report)
}
