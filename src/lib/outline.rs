//! Glyph outline data model
//!
//! This module holds the raw TrueType outline representation (three parallel
//! arrays, as stored in the `glyf` table), composite component references,
//! and the [`GlyphSource`] trait that every outline consumer reads glyphs
//! through.

use crate::PathinsError;
use read_fonts::types::GlyphId;
use std::collections::HashSet;
use std::ops::Range;

/// Bit 0 of a simple glyph flag marks an on-curve point.
pub const FLAG_ON_CURVE: u8 = 0x01;

/// Raw simple glyph outline in parallel-array form
///
/// * `coordinates` - every point of every contour, in contour order
/// * `contour_end_indices` - index of the last point of each contour
/// * `flags` - one flag byte per coordinate, bit 0 set for on-curve points
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutline {
    pub coordinates: Vec<(i32, i32)>,
    pub contour_end_indices: Vec<usize>,
    pub flags: Vec<u8>,
}

impl RawOutline {
    pub fn new(
        coordinates: Vec<(i32, i32)>,
        contour_end_indices: Vec<usize>,
        flags: Vec<u8>,
    ) -> Self {
        RawOutline {
            coordinates,
            contour_end_indices,
            flags,
        }
    }

    /// Number of contours in the outline
    pub fn num_contours(&self) -> usize {
        self.contour_end_indices.len()
    }

    /// Number of points across all contours
    pub fn num_points(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contour_end_indices.is_empty()
    }

    /// Whether the point at `index` is on the curve
    pub fn is_on_curve(&self, index: usize) -> bool {
        self.flags
            .get(index)
            .map(|flag| flag & FLAG_ON_CURVE != 0)
            .unwrap_or(false)
    }

    /// Point index ranges, one per contour
    pub fn contour_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let mut start = 0;
        self.contour_end_indices.iter().map(move |&end| {
            let range = start..end + 1;
            start = end + 1;
            range
        })
    }

    /// Coordinate values of every contour end point
    ///
    /// Start/end classification compares coordinate values against this set
    /// rather than point indices.
    pub fn endpoint_coordinates(&self) -> HashSet<(i32, i32)> {
        self.contour_end_indices
            .iter()
            .filter_map(|&end| self.coordinates.get(end).copied())
            .collect()
    }

    /// Check the parallel-array invariants
    ///
    /// An outline with no contours and no points is valid.
    pub fn validate(&self) -> Result<(), PathinsError> {
        if self.flags.len() != self.coordinates.len() {
            return Err(PathinsError::malformed(format!(
                "{} flags for {} coordinates",
                self.flags.len(),
                self.coordinates.len()
            )));
        }

        if self.contour_end_indices.is_empty() {
            if self.coordinates.is_empty() {
                return Ok(());
            }
            return Err(PathinsError::malformed(format!(
                "{} coordinates without any contour end index",
                self.coordinates.len()
            )));
        }

        for pair in self.contour_end_indices.windows(2) {
            if pair[1] <= pair[0] {
                return Err(PathinsError::malformed(format!(
                    "contour end indices are not strictly increasing ({} then {})",
                    pair[0], pair[1]
                )));
            }
        }

        // non-empty by the check above
        let last = self.contour_end_indices[self.contour_end_indices.len() - 1];
        if last + 1 != self.coordinates.len() {
            return Err(PathinsError::malformed(format!(
                "last contour ends at index {} but there are {} coordinates",
                last,
                self.coordinates.len()
            )));
        }

        Ok(())
    }
}

/// 2x3 affine transform in the TrueType component layout
///
/// ```text
/// x' = xx * x + xy * y + dx
/// y' = yx * x + yy * y + dy
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Linear part only, no translation
    pub fn matrix(xx: f64, yx: f64, xy: f64, yy: f64) -> Self {
        Transform {
            xx,
            yx,
            xy,
            yy,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Transform {
            dx,
            dy,
            ..Transform::IDENTITY
        }
    }

    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        (
            self.xx * point.0 + self.xy * point.1 + self.dx,
            self.yx * point.0 + self.yy * point.1 + self.dy,
        )
    }

    /// Determinant of the linear part; negative values mirror the outline
    /// and flip its winding direction.
    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }
}

/// How a component is positioned inside its parent glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAnchor {
    /// Translate by an x/y offset in font units
    Offset { x: i32, y: i32 },
    /// Move the component so its point `component` lands on the parent's
    /// already-placed point `base`
    Point { base: usize, component: usize },
}

/// A transformed reference to another glyph inside a composite glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentRef {
    pub glyph_id: GlyphId,
    /// Linear part of the component transform; translation comes from `anchor`
    pub transform: Transform,
    pub anchor: ComponentAnchor,
    /// The offset anchor is in the component's scaled space and goes through
    /// `transform` before it is applied
    pub scaled_offset: bool,
}

/// Outline of a single glyph as stored in the font
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphOutline {
    /// No outline data (space, .notdef without contours, ...)
    Empty,
    Simple(RawOutline),
    Composite(Vec<ComponentRef>),
}

impl GlyphOutline {
    pub fn is_composite(&self) -> bool {
        matches!(self, GlyphOutline::Composite(_))
    }
}

/// Read access to the glyphs of a font
///
/// This is the boundary to the font container: everything past it works on
/// [`GlyphOutline`] values and never touches font tables directly.
pub trait GlyphSource {
    /// Glyph names in glyph order
    fn glyph_order(&self) -> &[String];

    /// Outline of the glyph with the given id
    fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, PathinsError>;

    /// Look up a glyph id by name
    fn glyph_id(&self, name: &str) -> Option<GlyphId> {
        self.glyph_order()
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| GlyphId::new(index as u32))
    }

    /// Name of the glyph with the given id, `gidN` when it is unnamed
    fn glyph_name(&self, glyph_id: GlyphId) -> String {
        self.glyph_order()
            .get(glyph_id.to_u32() as usize)
            .cloned()
            .unwrap_or_else(|| format!("gid{}", glyph_id.to_u32()))
    }

    fn is_composite(&self, glyph_id: GlyphId) -> Result<bool, PathinsError> {
        Ok(self.outline(glyph_id)?.is_composite())
    }
}
