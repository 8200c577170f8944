//! Source positions.
//!
//! Provides a compact 12-byte position (line, column, byte offset) attached to
//! every registered declaration.

use std::fmt;

/// Source position of a declaration.
///
/// Layout: 12 bytes total
/// - line: u32 - 1-based line number
/// - column: u32 - 1-based column number
/// - offset: u32 - byte offset from file start
///
/// Built-in declarations have no source location and use [`Position::BUILTIN`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Position {
    /// Position used for built-in declarations.
    pub const BUILTIN: Position = Position {
        line: 0,
        column: 0,
        offset: 0,
    };

    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }

    /// Create a position from line and column only.
    #[inline]
    pub const fn at(line: u32, column: u32) -> Self {
        Position {
            line,
            column,
            offset: 0,
        }
    }

    /// Check whether this is the built-in sentinel.
    #[inline]
    pub const fn is_builtin(&self) -> bool {
        self.line == 0 && self.column == 0
    }

    /// Check whether the position lies on a line in `start..=end`.
    #[inline]
    pub fn on_lines(&self, start: u32, end: u32) -> bool {
        self.line >= start && self.line <= end
    }

    /// Check whether two positions name the same line and column.
    #[inline]
    pub fn same_location(&self, other: Position) -> bool {
        self.line == other.line && self.column == other.column
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            f.write_str("<builtin>")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

#[cfg(test)]
mod tests;
