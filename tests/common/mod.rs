// Minimal TrueType font assembly for integration tests.
//
// The fonts carry just the tables the inspector reads: head, maxp, loca,
// glyf and a version 2 post table for glyph names.
#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;
use tempfile::NamedTempFile;

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const ARGS_ARE_XY_VALUES: u16 = 0x0002;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const SCALED_COMPONENT_OFFSET: u16 = 0x0800;

/// First post table name index that refers to a custom name
const FIRST_CUSTOM_NAME_INDEX: u16 = 258;

pub struct TestComponent {
    pub glyph: u16,
    pub dx: i16,
    pub dy: i16,
    /// x and y scale as F2Dot14 values
    pub scale: Option<(f32, f32)>,
    /// Set the scaled component offset flag
    pub scaled_offset: bool,
}

pub enum TestGlyph {
    Empty,
    /// Contours of (x, y, on_curve) points
    Simple(Vec<Vec<(i16, i16, bool)>>),
    Composite(Vec<TestComponent>),
}

pub fn comma_contour() -> Vec<(i16, i16, bool)> {
    vec![
        (185, 116, true),
        (192, 105, true),
        (178, 52, false),
        (130, -75, false),
        (106, -129, true),
        (41, -129, true),
        (55, -72, false),
        (84, 64, false),
        (91, 116, true),
    ]
}

pub fn square_contour() -> Vec<(i16, i16, bool)> {
    vec![
        (0, 0, true),
        (0, 100, true),
        (100, 100, true),
        (100, 0, true),
    ]
}

/// Glyph order: .notdef, space, comma, square, squareflip, pair
pub fn sample_glyphs() -> Vec<(&'static str, TestGlyph)> {
    vec![
        (".notdef", TestGlyph::Empty),
        ("space", TestGlyph::Empty),
        ("comma", TestGlyph::Simple(vec![comma_contour()])),
        ("square", TestGlyph::Simple(vec![square_contour()])),
        (
            "squareflip",
            TestGlyph::Composite(vec![TestComponent {
                glyph: 3,
                dx: 100,
                dy: 0,
                scale: Some((-1.0, 1.0)),
                scaled_offset: false,
            }]),
        ),
        (
            "pair",
            TestGlyph::Composite(vec![
                TestComponent {
                    glyph: 3,
                    dx: 0,
                    dy: 0,
                    scale: None,
                    scaled_offset: false,
                },
                TestComponent {
                    glyph: 2,
                    dx: 200,
                    dy: 0,
                    scale: None,
                    scaled_offset: false,
                },
            ]),
        ),
    ]
}

/// Write the sample font to a temporary `.ttf` file
pub fn sample_font_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ttf")
        .tempfile()
        .unwrap();
    file.write_all(&build_font(&sample_glyphs())).unwrap();
    file.flush().unwrap();
    file
}

/// Assemble a TrueType font holding `glyphs` in the given order
pub fn build_font(glyphs: &[(&str, TestGlyph)]) -> Vec<u8> {
    let mut glyf = Vec::new();
    let mut loca = Vec::new();
    for (_, glyph) in glyphs {
        loca.write_u32::<BigEndian>(glyf.len() as u32).unwrap();
        encode_glyph(glyph, &mut glyf);
        while glyf.len() % 4 != 0 {
            glyf.push(0);
        }
    }
    loca.write_u32::<BigEndian>(glyf.len() as u32).unwrap();

    let names: Vec<&str> = glyphs.iter().map(|(name, _)| *name).collect();

    // table tags in ascending order
    let tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"glyf", glyf),
        (b"head", head_table()),
        (b"loca", loca),
        (b"maxp", maxp_table(glyphs.len() as u16)),
        (b"post", post_table(&names)),
    ];
    assemble(&tables)
}

fn assemble(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut font = Vec::new();
    font.write_u32::<BigEndian>(0x0001_0000).unwrap();
    font.write_u16::<BigEndian>(num_tables).unwrap();
    font.write_u16::<BigEndian>(search_range).unwrap();
    font.write_u16::<BigEndian>(entry_selector).unwrap();
    font.write_u16::<BigEndian>(num_tables * 16 - search_range).unwrap();

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in tables {
        font.write_all(*tag).unwrap();
        font.write_u32::<BigEndian>(0).unwrap();
        font.write_u32::<BigEndian>(offset as u32).unwrap();
        font.write_u32::<BigEndian>(data.len() as u32).unwrap();
        offset += padded_len(data.len());
    }

    for (_, data) in tables {
        font.write_all(data).unwrap();
        font.resize(font.len() + padded_len(data.len()) - data.len(), 0);
    }
    font
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn head_table() -> Vec<u8> {
    let mut head = Vec::new();
    head.write_u16::<BigEndian>(1).unwrap(); // major version
    head.write_u16::<BigEndian>(0).unwrap(); // minor version
    head.write_u32::<BigEndian>(0x0001_0000).unwrap(); // font revision
    head.write_u32::<BigEndian>(0).unwrap(); // checksum adjustment
    head.write_u32::<BigEndian>(0x5F0F_3CF5).unwrap(); // magic number
    head.write_u16::<BigEndian>(0).unwrap(); // flags
    head.write_u16::<BigEndian>(1000).unwrap(); // units per em
    head.write_i64::<BigEndian>(0).unwrap(); // created
    head.write_i64::<BigEndian>(0).unwrap(); // modified
    head.write_i16::<BigEndian>(0).unwrap(); // x min
    head.write_i16::<BigEndian>(-129).unwrap(); // y min
    head.write_i16::<BigEndian>(400).unwrap(); // x max
    head.write_i16::<BigEndian>(116).unwrap(); // y max
    head.write_u16::<BigEndian>(0).unwrap(); // mac style
    head.write_u16::<BigEndian>(8).unwrap(); // lowest rec ppem
    head.write_i16::<BigEndian>(2).unwrap(); // font direction hint
    head.write_i16::<BigEndian>(1).unwrap(); // long loca offsets
    head.write_i16::<BigEndian>(0).unwrap(); // glyph data format
    head
}

fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    let mut maxp = Vec::new();
    maxp.write_u32::<BigEndian>(0x0000_5000).unwrap();
    maxp.write_u16::<BigEndian>(num_glyphs).unwrap();
    maxp
}

fn post_table(names: &[&str]) -> Vec<u8> {
    let mut post = Vec::new();
    post.write_u32::<BigEndian>(0x0002_0000).unwrap();
    post.write_u32::<BigEndian>(0).unwrap(); // italic angle
    post.write_i16::<BigEndian>(-100).unwrap(); // underline position
    post.write_i16::<BigEndian>(50).unwrap(); // underline thickness
    for _ in 0..5 {
        // fixed pitch flag and memory hints
        post.write_u32::<BigEndian>(0).unwrap();
    }

    post.write_u16::<BigEndian>(names.len() as u16).unwrap();
    let mut custom = Vec::new();
    for name in names {
        if *name == ".notdef" {
            post.write_u16::<BigEndian>(0).unwrap();
        } else {
            post.write_u16::<BigEndian>(FIRST_CUSTOM_NAME_INDEX + custom.len() as u16)
                .unwrap();
            custom.push(*name);
        }
    }
    for name in custom {
        post.write_u8(name.len() as u8).unwrap();
        post.write_all(name.as_bytes()).unwrap();
    }
    post
}

fn encode_glyph(glyph: &TestGlyph, out: &mut Vec<u8>) {
    match glyph {
        TestGlyph::Empty => {}
        TestGlyph::Simple(contours) => encode_simple(contours, out),
        TestGlyph::Composite(components) => encode_composite(components, out),
    }
}

fn encode_simple(contours: &[Vec<(i16, i16, bool)>], out: &mut Vec<u8>) {
    let points: Vec<(i16, i16, bool)> = contours.iter().flatten().copied().collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    out.write_i16::<BigEndian>(contours.len() as i16).unwrap();
    out.write_i16::<BigEndian>(x_min).unwrap();
    out.write_i16::<BigEndian>(y_min).unwrap();
    out.write_i16::<BigEndian>(x_max).unwrap();
    out.write_i16::<BigEndian>(y_max).unwrap();

    let mut end = 0usize;
    for contour in contours {
        end += contour.len();
        out.write_u16::<BigEndian>((end - 1) as u16).unwrap();
    }
    out.write_u16::<BigEndian>(0).unwrap(); // instruction length

    // long coordinate deltas only: neither the short nor the same bits are set
    for point in &points {
        out.write_u8(if point.2 { 0x01 } else { 0x00 }).unwrap();
    }
    let mut previous = 0i16;
    for point in &points {
        out.write_i16::<BigEndian>(point.0 - previous).unwrap();
        previous = point.0;
    }
    previous = 0;
    for point in &points {
        out.write_i16::<BigEndian>(point.1 - previous).unwrap();
        previous = point.1;
    }
}

fn encode_composite(components: &[TestComponent], out: &mut Vec<u8>) {
    out.write_i16::<BigEndian>(-1).unwrap();
    for _ in 0..4 {
        // the bounding box is not read back
        out.write_i16::<BigEndian>(0).unwrap();
    }

    for (index, component) in components.iter().enumerate() {
        let mut flags = ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES;
        if index + 1 < components.len() {
            flags |= MORE_COMPONENTS;
        }
        if component.scale.is_some() {
            flags |= WE_HAVE_AN_X_AND_Y_SCALE;
        }
        if component.scaled_offset {
            flags |= SCALED_COMPONENT_OFFSET;
        }
        out.write_u16::<BigEndian>(flags).unwrap();
        out.write_u16::<BigEndian>(component.glyph).unwrap();
        out.write_i16::<BigEndian>(component.dx).unwrap();
        out.write_i16::<BigEndian>(component.dy).unwrap();
        if let Some((x_scale, y_scale)) = component.scale {
            out.write_i16::<BigEndian>(f2dot14(x_scale)).unwrap();
            out.write_i16::<BigEndian>(f2dot14(y_scale)).unwrap();
        }
    }
}

fn f2dot14(value: f32) -> i16 {
    (value * 16384.0).round() as i16
}
