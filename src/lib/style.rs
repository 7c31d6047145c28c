//! ANSI styling for report text
//!
//! Every helper takes an explicit `color` flag. The binary decides once, at
//! startup, whether colour is wanted (no `--nocolor` flag and standard output
//! is a terminal) and passes that decision down.

pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const BRIGHT_BOLD_CYAN: &str = "\x1b[1;96m";
pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

fn paint(code: &str, text: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn green_text(text: &str, color: bool) -> String {
    paint(GREEN, text, color)
}

pub fn red_text(text: &str, color: bool) -> String {
    paint(RED, text, color)
}

pub fn cyan_bright_text(text: &str, color: bool) -> String {
    paint(BRIGHT_BOLD_CYAN, text, color)
}

pub fn bold_text(text: &str, color: bool) -> String {
    paint(BOLD, text, color)
}
