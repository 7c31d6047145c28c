//! Glyph decomposition
//!
//! Converts glyphs into a flattened outline of drawing commands, resolving
//! composite glyphs recursively with every component transform applied, and
//! converts flattened outlines back into the raw parallel-array form.
//!
//! The round trip is geometrically faithful but not lossless: implied
//! on-curve points become explicit, coordinates are rounded to font units,
//! and composite structure is gone.

use crate::math::round_half_up;
use crate::outline::{
    ComponentAnchor, GlyphOutline, GlyphSource, RawOutline, Transform, FLAG_ON_CURVE,
};
use crate::PathinsError;
use log::{debug, trace};
use read_fonts::types::GlyphId;

/// Deepest composite nesting that is followed before giving up
pub const MAX_COMPONENT_DEPTH: usize = 64;

/// A point in font units after transformation
pub type Coord = (f64, f64);

/// A single drawing command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Coord),
    LineTo(Coord),
    /// Control point, then end point
    QuadTo(Coord, Coord),
    Close,
}

/// An outline expressed as move/line/quadratic/close commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedOutline {
    commands: Vec<PathCommand>,
}

impl FlattenedOutline {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        FlattenedOutline { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of contours, one per `MoveTo`
    pub fn contour_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::MoveTo(_)))
            .count()
    }
}

/// Points of one contour with their on-curve flag
type Contour = Vec<(Coord, bool)>;

/// Flatten the glyph `glyph_id` into drawing commands
///
/// Composite glyphs are decomposed: each component's outline is transformed
/// into the parent's coordinate space and all contours are merged.
pub fn flatten<S: GlyphSource + ?Sized>(
    source: &S,
    glyph_id: GlyphId,
) -> Result<FlattenedOutline, PathinsError> {
    let contours = resolve_contours(source, glyph_id, 0)?;
    let mut commands = Vec::new();
    for contour in &contours {
        contour_commands(contour, &mut commands);
    }
    debug!(
        "glyph {} flattened into {} contours, {} commands",
        glyph_id.to_u32(),
        contours.len(),
        commands.len()
    );
    Ok(FlattenedOutline { commands })
}

/// Convert a flattened outline back to a raw, non-composite outline
///
/// Coordinates are rounded half up. A closing point that repeats its
/// contour's start point is dropped, and so are single-point contours.
pub fn unflatten(outline: &FlattenedOutline) -> RawOutline {
    let mut builder = RawBuilder::default();
    for command in outline.commands() {
        match *command {
            PathCommand::MoveTo(point) => {
                builder.close_contour();
                builder.push(point, true);
            }
            PathCommand::LineTo(point) => builder.push(point, true),
            PathCommand::QuadTo(control, point) => {
                builder.push(control, false);
                builder.push(point, true);
            }
            PathCommand::Close => builder.close_contour(),
        }
    }
    builder.close_contour();
    builder.outline
}

/// Raw outline of a glyph with composite glyphs decomposed
///
/// Simple glyphs pass through untouched; composite glyphs are flattened and
/// converted back into a single simple outline.
pub fn decomposed_outline<S: GlyphSource + ?Sized>(
    source: &S,
    glyph_id: GlyphId,
) -> Result<RawOutline, PathinsError> {
    match source.outline(glyph_id)? {
        GlyphOutline::Empty => Ok(RawOutline::default()),
        GlyphOutline::Simple(outline) => Ok(outline),
        GlyphOutline::Composite(_) => {
            debug!("decomposing composite glyph {}", glyph_id.to_u32());
            Ok(unflatten(&flatten(source, glyph_id)?))
        }
    }
}

/// Collect the contours of a glyph in its own coordinate space
fn resolve_contours<S: GlyphSource + ?Sized>(
    source: &S,
    glyph_id: GlyphId,
    depth: usize,
) -> Result<Vec<Contour>, PathinsError> {
    if depth > MAX_COMPONENT_DEPTH {
        return Err(PathinsError::malformed(format!(
            "composite nesting deeper than {} levels at glyph {}",
            MAX_COMPONENT_DEPTH,
            glyph_id.to_u32()
        )));
    }

    match source.outline(glyph_id)? {
        GlyphOutline::Empty => Ok(Vec::new()),
        GlyphOutline::Simple(outline) => {
            outline.validate()?;
            Ok(outline
                .contour_ranges()
                .map(|range| {
                    range
                        .map(|index| {
                            let (x, y) = outline.coordinates[index];
                            ((x as f64, y as f64), outline.is_on_curve(index))
                        })
                        .collect()
                })
                .collect())
        }
        GlyphOutline::Composite(components) => {
            let mut contours: Vec<Contour> = Vec::new();
            for component in components {
                let mut child = resolve_contours(source, component.glyph_id, depth + 1)?;
                for point in child.iter_mut().flatten() {
                    point.0 = component.transform.apply(point.0);
                }

                let (dx, dy) = match component.anchor {
                    ComponentAnchor::Offset { x, y } if component.scaled_offset => {
                        component.transform.apply((x as f64, y as f64))
                    }
                    ComponentAnchor::Offset { x, y } => (x as f64, y as f64),
                    ComponentAnchor::Point { base, component: point } => {
                        let base_point = nth_point(&contours, base).ok_or_else(|| {
                            PathinsError::malformed(format!(
                                "anchor point {} is out of range in glyph {}",
                                base,
                                glyph_id.to_u32()
                            ))
                        })?;
                        let child_point = nth_point(&child, point).ok_or_else(|| {
                            PathinsError::malformed(format!(
                                "component anchor point {} is out of range in glyph {}",
                                point,
                                component.glyph_id.to_u32()
                            ))
                        })?;
                        (base_point.0 - child_point.0, base_point.1 - child_point.1)
                    }
                };

                let offset = Transform::translate(dx, dy);
                trace!(
                    "component glyph {} placed with {:?} at ({}, {})",
                    component.glyph_id.to_u32(),
                    component.transform,
                    dx,
                    dy
                );
                for point in child.iter_mut().flatten() {
                    point.0 = offset.apply(point.0);
                }
                contours.append(&mut child);
            }
            Ok(contours)
        }
    }
}

fn nth_point(contours: &[Contour], index: usize) -> Option<Coord> {
    contours.iter().flatten().nth(index).map(|(point, _)| *point)
}

fn midpoint(a: Coord, b: Coord) -> Coord {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Emit drawing commands for one TrueType contour
///
/// The contour starts at its first on-curve point. A contour made only of
/// control points starts at the implied midpoint of its last and first
/// points.
fn contour_commands(contour: &[(Coord, bool)], commands: &mut Vec<PathCommand>) {
    if contour.is_empty() {
        return;
    }

    let count = contour.len();
    let (start, rest): (Coord, Vec<(Coord, bool)>) =
        match contour.iter().position(|(_, on_curve)| *on_curve) {
            Some(first) => (
                contour[first].0,
                (1..count).map(|step| contour[(first + step) % count]).collect(),
            ),
            None => (midpoint(contour[count - 1].0, contour[0].0), contour.to_vec()),
        };

    commands.push(PathCommand::MoveTo(start));
    let mut pending: Option<Coord> = None;
    for (point, on_curve) in rest {
        if on_curve {
            match pending.take() {
                Some(control) => commands.push(PathCommand::QuadTo(control, point)),
                None => commands.push(PathCommand::LineTo(point)),
            }
        } else {
            if let Some(control) = pending {
                commands.push(PathCommand::QuadTo(control, midpoint(control, point)));
            }
            pending = Some(point);
        }
    }
    if let Some(control) = pending {
        commands.push(PathCommand::QuadTo(control, start));
    }
    commands.push(PathCommand::Close);
}

#[derive(Default)]
struct RawBuilder {
    outline: RawOutline,
    contour_start: usize,
}

impl RawBuilder {
    fn push(&mut self, point: Coord, on_curve: bool) {
        self.outline
            .coordinates
            .push((round_half_up(point.0), round_half_up(point.1)));
        self.outline
            .flags
            .push(if on_curve { FLAG_ON_CURVE } else { 0 });
    }

    fn pop(&mut self) {
        self.outline.coordinates.pop();
        self.outline.flags.pop();
    }

    fn close_contour(&mut self) {
        let len = self.outline.coordinates.len();
        if len == self.contour_start {
            return;
        }
        if len - self.contour_start == 1 {
            // lone anchor point
            self.pop();
            return;
        }
        if self.outline.coordinates[self.contour_start] == self.outline.coordinates[len - 1] {
            self.pop();
        }
        let end = self.outline.coordinates.len() - 1;
        self.outline.contour_end_indices.push(end);
        self.contour_start = end + 1;
    }
}
