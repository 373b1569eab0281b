//! Source locations.
//!
//! Every form and every emitted call instruction carries a `Sloc` so
//! failures can point at the offending row and column of the source text.

use std::fmt;

/// A row/column position within a named source string.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sloc {
    /// Name of the source being read (e.g. `"eval"`).
    pub source: &'static str,
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub col: u32,
}

impl Sloc {
    /// Placeholder location for generated forms.
    pub const DUMMY: Sloc = Sloc {
        source: "",
        row: 0,
        col: 0,
    };

    /// Create a location.
    #[inline]
    pub const fn new(source: &'static str, row: u32, col: u32) -> Self {
        Sloc { source, row, col }
    }

    /// Advance past one character, tracking rows and columns.
    #[inline]
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
    }
}

impl Default for Sloc {
    fn default() -> Self {
        Sloc::DUMMY
    }
}

impl fmt::Display for Sloc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'; row {}, column {}", self.source, self.row, self.col)
    }
}
