//! ANSI color codes for terminal output.
//!
//! Used by table dumps and parser traces:
//! - Blue: nonterminal names
//! - Green: terminal labels (keywords, token names)
//! - Red: dead ends, fatal conditions
//! - Dim: state numbers, positions, metadata
//! - Reset: return to default

/// ANSI color palette for CLI output.
///
/// Only standard 16-color ANSI codes, so output reads well on light and dark
/// themes alike.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Colors enabled (ANSI escape codes).
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        red: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Colors disabled (empty strings).
    pub const OFF: Self = Self {
        blue: "",
        green: "",
        red: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
