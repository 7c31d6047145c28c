//! TrueType outline inspector binary entry point
//!
//! # Examples
//!
//! Segment lengths of one glyph:
//! ```sh
//! cargo run --bin pathins -- segments fonts/NotoSans-Regular.ttf comma
//! ```
//!
//! Winding direction of every glyph, with debug logging:
//! ```sh
//! cargo run --bin pathins -- -vv direction --nocolor fonts/NotoSans-Regular.ttf
//! ```

use clap::{CommandFactory, Parser};
use log::debug;
use pathins::font::FontFile;
use pathins::inspect;
use pathins::PathinsError;
use std::io::{self, IsTerminal};
use std::process;

mod args;
mod logging;

use args::{InspectCommand, PathinsArgs};
use logging::init_logging;

fn main() {
    let args = PathinsArgs::parse();

    // Initialize logging based on CLI arguments and RUST_LOG environment variable
    if let Err(e) = init_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    debug!("Parsed arguments: {:?}", args);

    let command = match &args.command {
        Some(command) => command,
        None => {
            eprint!("{}", PathinsArgs::command().render_usage());
            eprintln!();
            eprintln!("pathins: error: please enter a valid sub-command");
            process::exit(1);
        }
    };

    if let Err(e) = run(command) {
        eprintln!("error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Open the font and write the requested report to standard output
fn run(command: &InspectCommand) -> Result<(), PathinsError> {
    let glyph_args = command.glyph_args();
    let stdout = io::stdout();
    let color = !glyph_args.nocolor && stdout.is_terminal();
    debug!("ANSI color enabled: {}", color);

    let font = FontFile::open(&glyph_args.fontpath)?;
    let mut out = stdout.lock();
    inspect::run(
        &font,
        command.report_kind(),
        glyph_args.glyphname.as_deref(),
        color,
        &mut out,
    )?;
    debug!("{} glyph outlines read", font.cached_outlines());
    Ok(())
}
