//! The pathins library inspects the quadratic Bezier outlines stored in the `glyf`
//! table of TrueType fonts. It is a diagnostic tool for font engineers: nothing in
//! this crate edits, rasterizes or hints glyphs.
//!
//! The core of the library rebuilds a glyph's outline from the raw parallel arrays
//! TrueType stores (coordinates, on-curve flags and contour end indices) into a
//! linked sequence of classified points, synthesizing the implied on-curve points
//! the format omits between consecutive control points. The segment walker then
//! turns that sequence into line and quadratic curve segments with exact arc
//! lengths.
//!
//! ```rust
//! use pathins::outline::RawOutline;
//! use pathins::path::QuadraticPath;
//! use pathins::segments::walk;
//! use std::error::Error;
//!
//! fn example() -> Result<(), Box<dyn Error>> {
//!     // a closed triangle with one control point
//!     let outline = RawOutline::new(
//!         vec![(0, 0), (50, 100), (100, 0)],
//!         vec![2],
//!         vec![1, 0, 1],
//!     );
//!     let path = QuadraticPath::build(&outline, true)?;
//!     let report = walk(&path)?;
//!     assert_eq!(report.segments.len(), 2);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Pipeline
//! ```text
//! +-------------+     +----------------+     +-----------------+     +-------------+
//! | Font file   |     | Decomposer     |     | Quadratic path  |     | Segment     |
//! | glyf / loca | --> | composite ->   | --> | builder         | --> | walker      |
//! | post names  |     | raw outline    |     | classified pts  |     | LINE/QCURVE |
//! +-------------+     +----------------+     +-----------------+     +-------------+
//! ```
//!
//! Composite glyphs are flattened into drawing commands, with every component's
//! transform applied, and converted back into a single simple outline before they
//! reach the builder.

pub mod decompose;
pub mod font;
pub mod inspect;
pub mod math;
pub mod outline;
pub mod path;
pub mod report;
pub mod segments;
pub mod style;
pub mod winding;

use std::error::Error;
use std::fmt;

/// Errors raised while opening fonts and inspecting glyph outlines.
///
/// The first group are user input problems: the path is wrong, the file is not a
/// TrueType font or the glyph does not exist. `MalformedOutline` and
/// `InvariantViolation` indicate corrupt outline data or a logic defect.
#[derive(Debug)]
pub enum PathinsError {
    /// The font path does not name a regular file
    NotAFile { path: String },
    /// The file does not carry a TrueType signature
    NotTrueType { path: String },
    /// The font container could not be parsed
    FontRead { message: String },
    /// The requested glyph name is not in the glyph order
    GlyphNotFound { name: String },
    /// Outline arrays break the parallel-array contract
    MalformedOutline { message: String },
    /// A classification or path invariant does not hold
    InvariantViolation { message: String },
    /// Reading the font or writing a report failed
    Io { message: String },
}

impl Error for PathinsError {}
impl fmt::Display for PathinsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathinsError::NotAFile { path } => {
                write!(f, "{} does not appear to be a file", path)
            }
            PathinsError::NotTrueType { path } => {
                write!(f, "{} does not appear to be a TTF format font", path)
            }
            PathinsError::FontRead { message } => {
                write!(f, "Failed to read font: {}", message)
            }
            PathinsError::GlyphNotFound { name } => {
                write!(
                    f,
                    "Failed to open glyph '{}'. Does it exist in the font?",
                    name
                )
            }
            PathinsError::MalformedOutline { message } => {
                write!(f, "Malformed outline: {}", message)
            }
            PathinsError::InvariantViolation { message } => {
                write!(f, "Outline invariant violated: {}", message)
            }
            PathinsError::Io { message } => write!(f, "I/O error: {}", message),
        }
    }
}

impl PathinsError {
    /// Creates a malformed outline error with just a message
    pub fn malformed(message: impl Into<String>) -> Self {
        PathinsError::MalformedOutline {
            message: message.into(),
        }
    }

    /// Creates an invariant violation error with just a message
    pub fn invariant(message: impl Into<String>) -> Self {
        PathinsError::InvariantViolation {
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the font data
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PathinsError::NotAFile { .. }
                | PathinsError::NotTrueType { .. }
                | PathinsError::GlyphNotFound { .. }
        )
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<std::io::Error> for PathinsError {
    fn from(err: std::io::Error) -> Self {
        PathinsError::Io {
            message: err.to_string(),
        }
    }
}

impl From<read_fonts::ReadError> for PathinsError {
    fn from(err: read_fonts::ReadError) -> Self {
        PathinsError::FontRead {
            message: err.to_string(),
        }
    }
}
