//! Unordered (`-`) and ordered (`1.`, `A.`, `a.`, `I.`, `i.`) lists.
//!
//! Lists have no closing token. An item ends when a sibling or shallower
//! item starts, or when a line is not indented as its continuation.

use serde::Serialize;

use crate::parsing::text::LineCursor;

/// Marker class of an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OlMarker {
    Number,
    LetterCapital,
    Letter,
    RomanCapital,
    Roman,
}

impl OlMarker {
    pub fn classify(c: char) -> Option<Self> {
        match c {
            '1'..='9' => Some(OlMarker::Number),
            'I' => Some(OlMarker::RomanCapital),
            'i' => Some(OlMarker::Roman),
            'A'..='Z' => Some(OlMarker::LetterCapital),
            'a'..='z' => Some(OlMarker::Letter),
            _ => None,
        }
    }

    /// Value of the HTML `type` attribute.
    pub fn html_type(self) -> &'static str {
        match self {
            OlMarker::Number => "1",
            OlMarker::LetterCapital => "A",
            OlMarker::Letter => "a",
            OlMarker::RomanCapital => "I",
            OlMarker::Roman => "i",
        }
    }
}

pub struct ListSyntax;

impl ListSyntax {
    pub const BULLET: char = '-';
    pub const ORDINAL_DOT: char = '.';
    /// Continuation indentation beyond the item's own.
    pub const BULLET_CONTINUATION: usize = 2;
    pub const ORDINAL_CONTINUATION: usize = 3;

    /// True if an unordered item could open at the cursor.
    pub fn bullet_at(cur: &LineCursor) -> bool {
        cur.column() == 0 && cur.current() == Some(Self::BULLET)
    }

    /// The marker class of an ordered item opening at the cursor, which must
    /// sit on the dot after a single marker character.
    pub fn ordinal_at(cur: &LineCursor) -> Option<OlMarker> {
        if cur.column() != 1 || cur.current() != Some(Self::ORDINAL_DOT) {
            return None;
        }
        OlMarker::classify(cur.previous()?)
    }
}
