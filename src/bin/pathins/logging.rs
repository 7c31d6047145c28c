//! Logging initialization module
//!
//! Handles initialization of env_logger based on CLI arguments and environment variables.
//! The RUST_LOG environment variable takes precedence over CLI flags. Log records go
//! to standard error so they never interleave with a report on standard output.

use crate::args::PathinsArgs;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize logging based on CLI arguments and environment variables
///
/// # Log Level Selection Priority
///
/// 1. RUST_LOG environment variable (highest priority)
/// 2. --verbose-level flag
/// 3. -q flag (quiet, only show errors)
/// 4. Count of -v flags (-v = info, -vv = debug, -vvv = trace)
/// 5. Default (warn level)
pub fn init_logging(args: &PathinsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    let level_str = args.effective_log_level();
    match parse_level(&level_str) {
        Some(level_filter) => {
            builder.filter_level(level_filter);
        }
        None => {
            // RUST_LOG style directives such as `pathins::decompose=trace`
            builder.parse_filters(&level_str);
        }
    }

    // Set a simple format: level + message
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });

    builder
        .try_init()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)?;

    Ok(())
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Some(LevelFilter::Trace));
        assert_eq!(parse_level("warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("pathins=debug"), None);
    }
}
