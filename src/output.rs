//! Terminal output formatting for the pixelate CLI.
//!
//! Cargo-style status lines with a right-aligned coloured verb. Status output
//! goes to stderr; stdout carries only command results (palettes, preset
//! tables, completions) so it can be piped.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Green,
    Cyan,
    Yellow,
    Red,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Green => "\x1b[32m",
            Tone::Cyan => "\x1b[36m",
            Tone::Yellow => "\x1b[33m",
            Tone::Red => "\x1b[31m",
        }
    }
}

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
#[derive(Debug)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "  Converting photos/cat.jpg (800x600)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(Tone::Green, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(Tone::Cyan, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(Tone::Yellow, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(Tone::Red, verb, message);
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Format a string as cyan (for paths).
    pub fn cyan(&self, text: &str) -> String {
        if self.color {
            format!("{}{text}{RESET}", Tone::Cyan.code())
        } else {
            text.to_string()
        }
    }

    /// Render a status line without printing it.
    fn format_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            format!(
                "{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}",
                tone.code()
            )
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn print_line(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.format_line(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// Pluralize a count: `plural(1, "image", "images")` → "1 image".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
