use std::fmt;

use serde::Serialize;

/// A location in the source: line index and code-point offset within the
/// line's content (indentation prefix excluded).
///
/// Ordering is lexicographic, line first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// The extent of a block.
///
/// `start..end` covers the whole block including its delimiters,
/// `content_start..content_end` only the inner text. All ranges are half-open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
    pub content_start: Position,
    pub content_end: Position,
}

impl Span {
    /// A span whose outer and content bounds coincide.
    pub const fn between(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            content_start: start,
            content_end: end,
        }
    }

    /// `start <= content_start <= content_end <= end`
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.content_start
            && self.content_start <= self.content_end
            && self.content_end <= self.end
    }

    /// True when `other` lies entirely within this span's outer bounds.
    #[must_use]
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
