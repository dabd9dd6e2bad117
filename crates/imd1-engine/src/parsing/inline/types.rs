use std::fmt;

use serde::Serialize;

use crate::parsing::tree::NodeId;

/// Inline content stored in the tree under a [`Block::Inline`] wrapper.
///
/// [`Block::Inline`]: crate::parsing::blocks::Block::Inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Root of a resolved paragraph.
    Document,
    Raw(String),
    /// A marker still waiting for a partner.
    Delimiter(DelimiterKind),
    Modifier(ModifierKind),
    Href { address: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DelimiterKind {
    Underscore,
    Asterisk,
    Tilde,
    OpenBracket,
}

impl DelimiterKind {
    pub fn from_emphasis_char(c: char) -> Option<Self> {
        match c {
            '_' => Some(Self::Underscore),
            '*' => Some(Self::Asterisk),
            '~' => Some(Self::Tilde),
            _ => None,
        }
    }

    pub fn literal(self) -> char {
        match self {
            Self::Underscore => '_',
            Self::Asterisk => '*',
            Self::Tilde => '~',
            Self::OpenBracket => '[',
        }
    }
}

impl fmt::Display for DelimiterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModifierKind {
    Italic,
    Bold,
    Strikeout,
}

impl ModifierKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Italic => "italic",
            Self::Bold => "bold",
            Self::Strikeout => "strikeout",
        }
    }
}

/// Working form of a paragraph while the resolver passes run. Only
/// [`Piece::Embedded`] refers back into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Raw(String),
    Delimiter(DelimiterKind),
    Modifier(ModifierKind, Vec<Piece>),
    Href(String, Vec<Piece>),
    /// A block child of the paragraph (inline code, footnote...).
    Embedded(NodeId),
}

impl Piece {
    pub fn raw(text: impl Into<String>) -> Self {
        Piece::Raw(text.into())
    }
}
