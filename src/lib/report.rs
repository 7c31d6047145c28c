//! Text report builders
//!
//! Each function renders one piece of a per-glyph report as a `String`.
//! Multi-line reports end every line with `\n`; single-line results carry no
//! trailing newline.

use crate::decompose::{FlattenedOutline, PathCommand};
use crate::outline::RawOutline;
use crate::path::PathPoint;
use crate::segments::{Segment, SegmentReport};
use crate::style::{bold_text, cyan_bright_text, green_text, red_text};
use crate::winding::{MirroredComponent, WindingDirection};
use crate::PathinsError;

pub const START_STRING: &str = "START ~~~~~~~~";
pub const END_STRING: &str = "~~~~~~~~~~ END";
pub const ON_STRING: &str = "----- on -----";
pub const NO_CONTOURS: &str = "   No contours";

/// Width of the coordinate and marker columns in the coordinates report
const COLUMN_WIDTH: usize = 13;

/// Indent of the component annotation lines in the direction report
const COMPONENT_INDENT: &str = "          ";

/// Header framed by dash lines one character longer than the header text
pub fn report_header(header: &str, color: bool) -> String {
    let divider = "-".repeat(header.chars().count() + 1);
    format!(
        "{}\n{}\n{}",
        divider,
        cyan_bright_text(header, color),
        divider
    )
}

/// `[ name ]: count`
pub fn contours_line(glyph_name: &str, contours: usize, color: bool) -> String {
    format!("[ {} ]: {}", cyan_bright_text(glyph_name, color), contours)
}

/// One line per raw point with its start, end and on-curve markers
///
/// Start and end use the same value-based endpoint test as the quadratic
/// path builder. A point that passes both tests is marked as a start, so a
/// one-point contour still prints.
pub fn coordinates_report(outline: &RawOutline, color: bool) -> Result<String, PathinsError> {
    if outline.is_empty() {
        return Ok(format!("{}\n", NO_CONTOURS));
    }
    outline.validate()?;

    let coords = &outline.coordinates;
    let endpoints = outline.endpoint_coordinates();
    let mut report = String::new();
    for (index, &(x, y)) in coords.iter().enumerate() {
        let start = index == 0 || endpoints.contains(&coords[index - 1]);
        let marker = if start {
            green_text(START_STRING, color)
        } else if endpoints.contains(&(x, y)) {
            red_text(END_STRING, color)
        } else if outline.is_on_curve(index) {
            format!("{:>width$}", ON_STRING, width = COLUMN_WIDTH)
        } else {
            " ".repeat(COLUMN_WIDTH)
        };
        let coordinate = format!("({}, {})", x, y);
        report.push_str(&format!(
            "{:>width$} {}\n",
            coordinate,
            marker,
            width = COLUMN_WIDTH
        ));
    }
    Ok(report)
}

/// A point coloured by its role: green for a contour start, red for an end
fn point_text(point: &PathPoint, color: bool) -> String {
    let text = point.to_string();
    if point.start {
        green_text(&text, color)
    } else if point.end {
        red_text(&text, color)
    } else {
        text
    }
}

/// `(x,y) (x,y): LINE 12.00 units` or the three-point `QCURVE` form
pub fn segment_line(segment: &Segment, color: bool) -> String {
    match segment {
        Segment::Line { from, to, length } => format!(
            "{} {}: {} {:.2} units",
            point_text(from, color),
            point_text(to, color),
            cyan_bright_text("LINE", color),
            length
        ),
        Segment::QuadraticCurve {
            from,
            control,
            to,
            length,
        } => format!(
            "{} {} {}: {} {:.2} units",
            point_text(from, color),
            point_text(control, color),
            point_text(to, color),
            cyan_bright_text("QCURVE", color),
            length
        ),
    }
}

/// `Total: 671.74 units`
pub fn total_line(total_length: f64, color: bool) -> String {
    format!("{}: {:.2} units", bold_text("Total", color), total_length)
}

/// Segment lines followed by a blank line and the indented total
pub fn segments_report(report: &SegmentReport, color: bool) -> String {
    if report.segments.is_empty() {
        return format!("{}\n", NO_CONTOURS);
    }

    let mut text = String::new();
    for segment in &report.segments {
        text.push_str(&segment_line(segment, color));
        text.push('\n');
    }
    text.push_str(&format!("\n {}\n", total_line(report.total_length, color)));
    text
}

/// Format a path coordinate: integral values plainly, others with an `f` suffix
fn path_scalar(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}f", value)
    }
}

/// Dump a flattened outline as path-building statements
pub fn path_dump(outline: &FlattenedOutline) -> String {
    if outline.is_empty() {
        return format!("{}\n", NO_CONTOURS);
    }

    let mut dump = String::from("path.setFillType(SkPathFillType::kWinding);\n");
    for command in outline.commands() {
        let line = match *command {
            PathCommand::MoveTo((x, y)) => {
                format!("path.moveTo({}, {});", path_scalar(x), path_scalar(y))
            }
            PathCommand::LineTo((x, y)) => {
                format!("path.lineTo({}, {});", path_scalar(x), path_scalar(y))
            }
            PathCommand::QuadTo((cx, cy), (x, y)) => format!(
                "path.quadTo({}, {}, {}, {});",
                path_scalar(cx),
                path_scalar(cy),
                path_scalar(x),
                path_scalar(y)
            ),
            PathCommand::Close => "path.close();".to_string(),
        };
        dump.push_str(&line);
        dump.push('\n');
    }
    dump
}

/// `[ name ]: clockwise`, with one annotation line per mirrored component
pub fn direction_result(
    glyph_name: &str,
    direction: WindingDirection,
    mirrored: &[MirroredComponent],
    color: bool,
) -> String {
    let mut result = format!("[ {} ]: {}", cyan_bright_text(glyph_name, color), direction);
    if direction == WindingDirection::NoContours {
        return result;
    }
    for component in mirrored {
        result.push_str(&format!(
            "\n{}with component '{}' transform: {}",
            COMPONENT_INDENT,
            component.glyph_name,
            component.matrix_string()
        ));
    }
    result
}
