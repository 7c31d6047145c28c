//! Command-line argument parsing module
//!
//! This module defines the CLI structure using clap with derive macros.
//! It supports:
//! - One sub-command per report: contours, coordinates, direction, path, segments
//! - Standard verbosity flags: -v, -vv, -vvv
//! - Quiet flag: -q
//! - Verbose level flag: --verbose-level=LEVEL
//! - Environment variable RUST_LOG integration

use clap::{Args, Parser, Subcommand};
use pathins::inspect::ReportKind;
use std::path::PathBuf;

/// Inspect the quadratic outlines of TrueType fonts
///
/// Every sub-command reports on one named glyph, or on every glyph in glyph
/// order when the glyph name is omitted.
#[derive(Parser, Debug, Clone)]
#[command(name = "pathins", author, version, about, long_about = None)]
pub struct PathinsArgs {
    #[command(subcommand)]
    pub command: Option<InspectCommand>,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity level (suppress most output except errors)
    #[arg(short, global = true)]
    pub quiet: bool,

    /// Set explicit verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub verbose_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum InspectCommand {
    /// Number of contours per glyph
    Contours(GlyphArgs),
    /// Point coordinates with start, end and on-curve markers
    Coordinates(GlyphArgs),
    /// Outline winding direction
    Direction(GlyphArgs),
    /// Drawing commands of the decomposed outline
    Path(GlyphArgs),
    /// Line and curve segments with their lengths
    Segments(GlyphArgs),
}

// shared by every sub-command
#[derive(Args, Debug, Clone)]
pub struct GlyphArgs {
    /// Do not use ANSI colors in the report
    #[arg(long)]
    pub nocolor: bool,

    /// Path to the TrueType font file
    #[arg(value_name = "FONTPATH")]
    pub fontpath: PathBuf,

    /// Glyph name, all glyphs in glyph order when omitted
    #[arg(value_name = "GLYPHNAME")]
    pub glyphname: Option<String>,
}

impl InspectCommand {
    pub fn report_kind(&self) -> ReportKind {
        match self {
            InspectCommand::Contours(_) => ReportKind::Contours,
            InspectCommand::Coordinates(_) => ReportKind::Coordinates,
            InspectCommand::Direction(_) => ReportKind::Direction,
            InspectCommand::Path(_) => ReportKind::Path,
            InspectCommand::Segments(_) => ReportKind::Segments,
        }
    }

    pub fn glyph_args(&self) -> &GlyphArgs {
        match self {
            InspectCommand::Contours(args)
            | InspectCommand::Coordinates(args)
            | InspectCommand::Direction(args)
            | InspectCommand::Path(args)
            | InspectCommand::Segments(args) => args,
        }
    }
}

impl PathinsArgs {
    /// Determine the effective log level based on CLI flags and environment variables
    ///
    /// Priority:
    /// 1. RUST_LOG environment variable (highest priority)
    /// 2. --verbose-level flag
    /// 3. -q flag
    /// 4. Count of -v flags (lowest priority)
    pub fn effective_log_level(&self) -> String {
        // RUST_LOG environment variable takes precedence
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            return rust_log;
        }

        if let Some(level) = &self.verbose_level {
            return level.clone();
        }

        if self.quiet {
            return "error".to_string();
        }

        // warnings only by default
        match self.verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}
