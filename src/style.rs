//! ANSI styling for prompts, listings, and diagnostics.
//!
//! Directory names are blue, the prompt path is yellow, error labels are
//! bold red. Every helper resets the style at the end of the fragment so
//! callers can concatenate freely.

pub struct Style;

impl Style {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const CYAN: &'static str = "\x1b[36m";

    fn paint(code: &str, s: &str) -> String {
        format!("{}{}{}", code, s, Self::RESET)
    }

    pub fn red(s: &str) -> String {
        Self::paint(Self::RED, s)
    }

    pub fn green(s: &str) -> String {
        Self::paint(Self::GREEN, s)
    }

    pub fn yellow(s: &str) -> String {
        Self::paint(Self::YELLOW, s)
    }

    pub fn blue(s: &str) -> String {
        Self::paint(Self::BLUE, s)
    }

    pub fn cyan(s: &str) -> String {
        Self::paint(Self::CYAN, s)
    }

    pub fn bold_red(s: &str) -> String {
        format!("{}{}{}{}", Self::BOLD, Self::RED, s, Self::RESET)
    }
}
