//! TrueType font file access
//!
//! [`FontFile`] owns the raw font bytes and hands out outlines through the
//! [`GlyphSource`] trait. Each glyph is read from `glyf` once and cached. Table parsing is delegated to `read-fonts`; glyph
//! names come from `skrifa`, which falls back to synthesized names when the
//! `post` table carries none.

use crate::outline::{
    ComponentAnchor, ComponentRef, GlyphOutline, GlyphSource, RawOutline, Transform,
    FLAG_ON_CURVE,
};
use crate::PathinsError;
use log::{debug, info, trace};
use read_fonts::tables::glyf::{Anchor, CompositeGlyph, CompositeGlyphFlags, Glyph, SimpleGlyph};
use read_fonts::types::GlyphId;
use read_fonts::{FontRef, TableProvider};
use skrifa::MetadataProvider;
use std::cell::OnceCell;
use std::fs;
use std::path::Path;

/// sfnt version tags accepted as TrueType
const TRUETYPE_SIGNATURES: [[u8; 4]; 2] = [[0x00, 0x01, 0x00, 0x00], *b"true"];

/// A TrueType font loaded into memory
#[derive(Debug, Clone)]
pub struct FontFile {
    /// Raw font data
    data: Vec<u8>,
    glyph_order: Vec<String>,
    /// Outlines already read, indexed by glyph id
    outlines: Vec<OnceCell<GlyphOutline>>,
}

impl FontFile {
    /// Open and validate the font at `path`
    ///
    /// # Errors
    ///
    /// * `NotAFile` if `path` is not a regular file
    /// * `NotTrueType` if the file does not start with a TrueType signature
    /// * `FontRead` if the table directory cannot be parsed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PathinsError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.is_file() {
            return Err(PathinsError::NotAFile { path: display });
        }

        let data = fs::read(path)?;
        if !has_truetype_signature(&data) {
            return Err(PathinsError::NotTrueType { path: display });
        }

        let font = Self::from_bytes(data)?;
        info!("Opened {} ({} glyphs)", display, font.glyph_order.len());
        Ok(font)
    }

    /// Build a font from bytes that are already in memory
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PathinsError> {
        let glyph_order = {
            let font = FontRef::new(&data)?;
            font.glyph_names()
                .iter()
                .map(|(_, name)| name.to_string())
                .collect::<Vec<_>>()
        };
        debug!("Font glyph order holds {} names", glyph_order.len());
        let outlines = vec![OnceCell::new(); glyph_order.len()];
        Ok(FontFile {
            data,
            glyph_order,
            outlines,
        })
    }

    /// Number of glyph outlines read from the font so far
    pub fn cached_outlines(&self) -> usize {
        self.outlines.iter().filter(|cell| cell.get().is_some()).count()
    }

    fn read_outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, PathinsError> {
        let font = FontRef::new(&self.data)?;
        let glyf = font.glyf()?;
        let loca = font.loca(None)?;

        match loca.get_glyf(glyph_id, &glyf)? {
            None => {
                trace!("glyph {} has no outline data", glyph_id.to_u32());
                Ok(GlyphOutline::Empty)
            }
            Some(Glyph::Simple(simple)) => Ok(simple_outline(&simple)),
            Some(Glyph::Composite(composite)) => Ok(composite_outline(&composite)),
        }
    }
}

/// Whether `data` starts with one of the TrueType sfnt version tags
pub fn has_truetype_signature(data: &[u8]) -> bool {
    data.get(..4)
        .map(|tag| TRUETYPE_SIGNATURES.iter().any(|signature| signature == tag))
        .unwrap_or(false)
}

impl GlyphSource for FontFile {
    fn glyph_order(&self) -> &[String] {
        &self.glyph_order
    }

    fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, PathinsError> {
        let Some(cell) = self.outlines.get(glyph_id.to_u32() as usize) else {
            return self.read_outline(glyph_id);
        };
        if let Some(outline) = cell.get() {
            return Ok(outline.clone());
        }
        let outline = self.read_outline(glyph_id)?;
        let _ = cell.set(outline.clone());
        Ok(outline)
    }
}

fn simple_outline(glyph: &SimpleGlyph) -> GlyphOutline {
    let contour_end_indices: Vec<usize> = glyph
        .end_pts_of_contours()
        .iter()
        .map(|end| end.get() as usize)
        .collect();
    if contour_end_indices.is_empty() {
        return GlyphOutline::Empty;
    }

    let mut coordinates = Vec::new();
    let mut flags = Vec::new();
    for point in glyph.points() {
        coordinates.push((point.x as i32, point.y as i32));
        flags.push(if point.on_curve { FLAG_ON_CURVE } else { 0 });
    }
    GlyphOutline::Simple(RawOutline::new(coordinates, contour_end_indices, flags))
}

fn composite_outline(glyph: &CompositeGlyph) -> GlyphOutline {
    let components = glyph
        .components()
        .map(|component| {
            let matrix = component.transform;
            let anchor = match component.anchor {
                Anchor::Offset { x, y } => ComponentAnchor::Offset {
                    x: x as i32,
                    y: y as i32,
                },
                Anchor::Point { base, component } => ComponentAnchor::Point {
                    base: base as usize,
                    component: component as usize,
                },
            };
            ComponentRef {
                glyph_id: GlyphId::from(component.glyph),
                transform: Transform::matrix(
                    matrix.xx.to_f32() as f64,
                    matrix.yx.to_f32() as f64,
                    matrix.xy.to_f32() as f64,
                    matrix.yy.to_f32() as f64,
                ),
                anchor,
                scaled_offset: has_scaled_offset(component.flags),
            }
        })
        .collect();
    GlyphOutline::Composite(components)
}

/// `SCALED_COMPONENT_OFFSET` set without `UNSCALED_COMPONENT_OFFSET`
fn has_scaled_offset(flags: CompositeGlyphFlags) -> bool {
    flags.contains(CompositeGlyphFlags::SCALED_COMPONENT_OFFSET)
        && !flags.contains(CompositeGlyphFlags::UNSCALED_COMPONENT_OFFSET)
}
