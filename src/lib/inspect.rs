//! Inspection pipelines
//!
//! Ties the outline engine to the text reports: one [`ReportKind`] per
//! sub-command, rendered for a single named glyph or for every glyph in
//! glyph order.

use crate::decompose::{decomposed_outline, flatten};
use crate::outline::GlyphSource;
use crate::path::QuadraticPath;
use crate::report::{
    contours_line, coordinates_report, direction_result, path_dump, report_header,
    segments_report,
};
use crate::segments::walk;
use crate::winding::{mirrored_components, winding_direction};
use crate::PathinsError;
use log::{debug, info};
use read_fonts::types::GlyphId;
use std::fmt;
use std::io::Write;

/// The report produced for each glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Number of contours after decomposition
    Contours,
    /// Raw point dump with start, end and on-curve markers
    Coordinates,
    /// Winding direction of the outline
    Direction,
    /// Drawing commands of the flattened outline
    Path,
    /// Line and curve segments with their lengths
    Segments,
}

impl ReportKind {
    /// Multi-line reports are separated by a blank line in full-font runs
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            ReportKind::Coordinates | ReportKind::Path | ReportKind::Segments
        )
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ReportKind::Contours => "contours",
            ReportKind::Coordinates => "coordinates",
            ReportKind::Direction => "direction",
            ReportKind::Path => "path",
            ReportKind::Segments => "segments",
        };
        write!(f, "{}", name)
    }
}

/// Number of contours in a glyph, with composites decomposed
pub fn contour_count<S: GlyphSource + ?Sized>(
    source: &S,
    glyph_id: GlyphId,
) -> Result<usize, PathinsError> {
    Ok(decomposed_outline(source, glyph_id)?.num_contours())
}

/// Render one report for one glyph, newline terminated
pub fn glyph_report<S: GlyphSource + ?Sized>(
    source: &S,
    kind: ReportKind,
    glyph_id: GlyphId,
    glyph_name: &str,
    color: bool,
) -> Result<String, PathinsError> {
    debug!("{} report for '{}' (glyph {})", kind, glyph_name, glyph_id.to_u32());

    let report = match kind {
        ReportKind::Contours => {
            let count = contour_count(source, glyph_id)?;
            format!("{}\n", contours_line(glyph_name, count, color))
        }
        ReportKind::Coordinates => {
            let outline = decomposed_outline(source, glyph_id)?;
            format!(
                "{}\n{}",
                report_header(&format!("'{}' coordinates", glyph_name), color),
                coordinates_report(&outline, color)?
            )
        }
        ReportKind::Direction => {
            let flattened = flatten(source, glyph_id)?;
            let mirrored = mirrored_components(source, glyph_id)?;
            format!(
                "{}\n",
                direction_result(glyph_name, winding_direction(&flattened), &mirrored, color)
            )
        }
        ReportKind::Path => {
            let flattened = flatten(source, glyph_id)?;
            format!(
                "{}\n{}",
                report_header(&format!("'{}' path", glyph_name), color),
                path_dump(&flattened)
            )
        }
        ReportKind::Segments => {
            let outline = decomposed_outline(source, glyph_id)?;
            let path = QuadraticPath::build(&outline, true)?;
            debug!(
                "'{}' path holds {} points, {} implied",
                glyph_name,
                path.len(),
                path.implied_count()
            );
            format!(
                "{}\n{}",
                report_header(&format!("'{}' segments", glyph_name), color),
                segments_report(&walk(&path)?, color)
            )
        }
    };
    Ok(report)
}

/// Write `kind` reports for `glyph`, or for every glyph when it is `None`
///
/// A named glyph is looked up before anything is written. The first failing
/// glyph aborts the run.
pub fn run<S: GlyphSource + ?Sized, W: Write>(
    source: &S,
    kind: ReportKind,
    glyph: Option<&str>,
    color: bool,
    out: &mut W,
) -> Result<(), PathinsError> {
    match glyph {
        Some(name) => {
            let glyph_id = source
                .glyph_id(name)
                .ok_or_else(|| PathinsError::GlyphNotFound {
                    name: name.to_string(),
                })?;
            out.write_all(glyph_report(source, kind, glyph_id, name, color)?.as_bytes())?;
        }
        None => {
            info!(
                "Writing {} reports for {} glyphs",
                kind,
                source.glyph_order().len()
            );
            for (index, name) in source.glyph_order().iter().enumerate() {
                if index > 0 && kind.is_multiline() {
                    out.write_all(b"\n")?;
                }
                let glyph_id = GlyphId::new(index as u32);
                out.write_all(glyph_report(source, kind, glyph_id, name, color)?.as_bytes())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{ComponentAnchor, ComponentRef, GlyphOutline, RawOutline, Transform};
    use std::collections::HashMap;

    struct TestSource {
        names: Vec<String>,
        outlines: HashMap<u32, GlyphOutline>,
    }

    impl GlyphSource for TestSource {
        fn glyph_order(&self) -> &[String] {
            &self.names
        }

        fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, PathinsError> {
            Ok(self
                .outlines
                .get(&glyph_id.to_u32())
                .cloned()
                .unwrap_or(GlyphOutline::Empty))
        }
    }

    fn source() -> TestSource {
        let square = RawOutline::new(
            vec![(0, 0), (0, 100), (100, 100), (100, 0)],
            vec![3],
            vec![1, 1, 1, 1],
        );
        let mut outlines = HashMap::new();
        outlines.insert(1, GlyphOutline::Simple(square));
        outlines.insert(
            2,
            GlyphOutline::Composite(vec![ComponentRef {
                glyph_id: GlyphId::new(1),
                transform: Transform::matrix(-1.0, 0.0, 0.0, 1.0),
                anchor: ComponentAnchor::Offset { x: 100, y: 0 },
                scaled_offset: false,
            }]),
        );
        TestSource {
            names: vec![".notdef".to_string(), "square".to_string(), "mirror".to_string()],
            outlines,
        }
    }

    fn run_to_string(kind: ReportKind, glyph: Option<&str>) -> Result<String, PathinsError> {
        let mut out = Vec::new();
        run(&source(), kind, glyph, false, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_contours_all_glyphs() {
        let output = run_to_string(ReportKind::Contours, None).unwrap();
        assert_eq!(output, "[ .notdef ]: 0\n[ square ]: 1\n[ mirror ]: 1\n");
    }

    #[test]
    fn test_unknown_glyph_writes_nothing() {
        let mut out = Vec::new();
        let err = run(&source(), ReportKind::Segments, Some("bogus"), false, &mut out).unwrap_err();
        assert!(matches!(err, PathinsError::GlyphNotFound { ref name } if name == "bogus"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_direction_reports_mirrored_component() {
        let output = run_to_string(ReportKind::Direction, None).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[ .notdef ]: no contours");
        assert_eq!(lines[1], "[ square ]: clockwise");
        assert_eq!(lines[2], "[ mirror ]: counter-clockwise");
        assert_eq!(
            lines[3],
            "          with component 'square' transform: [[-1.0, 0.0], [0.0, 1.0]]"
        );
    }

    #[test]
    fn test_segments_single_glyph() {
        let output = run_to_string(ReportKind::Segments, Some("square")).unwrap();
        assert_eq!(
            output,
            "------------------\n\
             'square' segments\n\
             ------------------\n\
             (0,0) (0,100): LINE 100.00 units\n\
             (0,100) (100,100): LINE 100.00 units\n\
             (100,100) (100,0): LINE 100.00 units\n\
             (100,0) (0,0): LINE 100.00 units\n\
             \n \
             Total: 400.00 units\n"
        );
    }

    #[test]
    fn test_multiline_reports_separated_by_blank_line() {
        let output = run_to_string(ReportKind::Coordinates, None).unwrap();
        assert!(output.starts_with("----------------------\n'.notdef' coordinates\n"));
        assert!(output.contains("   No contours\n\n--------"));
        assert!(output.contains("'mirror' coordinates"));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_path_of_composite_is_decomposed() {
        let output = run_to_string(ReportKind::Path, Some("mirror")).unwrap();
        assert!(output.contains("path.moveTo(100, 0);\n"));
        assert!(output.contains("path.lineTo(0, 0);\n"));
        assert!(output.ends_with("path.close();\n"));
    }

    #[test]
    fn test_report_kind_display() {
        assert_eq!(ReportKind::Segments.to_string(), "segments");
        assert!(ReportKind::Path.is_multiline());
        assert!(!ReportKind::Direction.is_multiline());
    }
}
