//! Contour winding direction
//!
//! Direction is derived from the signed area of the whole flattened outline.
//! Font coordinates are y-up, so a positive area means counter-clockwise.

use crate::decompose::{Coord, FlattenedOutline, PathCommand};
use crate::outline::{GlyphOutline, GlyphSource, Transform};
use crate::PathinsError;
use read_fonts::types::GlyphId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindingDirection {
    Clockwise,
    CounterClockwise,
    NoContours,
}

impl fmt::Display for WindingDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WindingDirection::Clockwise => write!(f, "clockwise"),
            WindingDirection::CounterClockwise => write!(f, "counter-clockwise"),
            WindingDirection::NoContours => write!(f, "no contours"),
        }
    }
}

/// A composite component whose transform mirrors its outline
#[derive(Debug, Clone, PartialEq)]
pub struct MirroredComponent {
    pub glyph_name: String,
    pub transform: Transform,
}

impl MirroredComponent {
    /// The 2x2 matrix as `[[xx, yx], [xy, yy]]`
    pub fn matrix_string(&self) -> String {
        let t = &self.transform;
        format!("[[{:?}, {:?}], [{:?}, {:?}]]", t.xx, t.yx, t.xy, t.yy)
    }
}

/// Signed area enclosed by the outline, positive for counter-clockwise
pub fn signed_area(outline: &FlattenedOutline) -> f64 {
    let mut area = 0.0;
    let mut start: Coord = (0.0, 0.0);
    let mut current: Coord = (0.0, 0.0);

    for command in outline.commands() {
        match *command {
            PathCommand::MoveTo(point) => {
                start = point;
                current = point;
            }
            PathCommand::LineTo(point) => {
                area += line_area(current, point);
                current = point;
            }
            PathCommand::QuadTo(control, point) => {
                let (x1, y1) = (control.0 - current.0, control.1 - current.1);
                let (x2, y2) = (point.0 - current.0, point.1 - current.1);
                area -= (x2 * y1 - x1 * y2) / 3.0;
                area += line_area(current, point);
                current = point;
            }
            PathCommand::Close => {
                area += line_area(current, start);
                current = start;
            }
        }
    }
    area
}

fn line_area(from: Coord, to: Coord) -> f64 {
    -(to.0 - from.0) * (to.1 + from.1) * 0.5
}

/// Winding direction of the flattened outline
pub fn winding_direction(outline: &FlattenedOutline) -> WindingDirection {
    if outline.contour_count() == 0 {
        return WindingDirection::NoContours;
    }
    if signed_area(outline) < 0.0 {
        WindingDirection::Clockwise
    } else {
        WindingDirection::CounterClockwise
    }
}

/// Components of a composite glyph whose transforms mirror their outline
///
/// These flip the apparent winding of the component's contours. They are
/// reported alongside the direction rather than corrected.
pub fn mirrored_components<S: GlyphSource + ?Sized>(
    source: &S,
    glyph_id: GlyphId,
) -> Result<Vec<MirroredComponent>, PathinsError> {
    match source.outline(glyph_id)? {
        GlyphOutline::Composite(components) => Ok(components
            .iter()
            .filter(|component| component.transform.determinant() < 0.0)
            .map(|component| MirroredComponent {
                glyph_name: source.glyph_name(component.glyph_id),
                transform: component.transform,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}
