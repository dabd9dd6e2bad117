use std::fmt;

use serde::Serialize;

use super::kinds::code::CodeListing;
use super::kinds::figure::{Figure, SubFigure};
use super::kinds::list::OlMarker;
use super::kinds::math::{InlineMathDelimiter, MathDelimiter};
use super::kinds::meta::BibInfo;
use super::kinds::reference::Reference;
use crate::parsing::inline::Inline;
use crate::parsing::text::Span;
use crate::parsing::tree::{Spanned, Tree};

/// A block variant together with its variant-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Document,
    Paragraph,
    Heading {
        level: usize,
        anchor: Option<String>,
    },
    TextBox {
        class: Option<String>,
    },
    TextBoxTitle,
    TextBoxContent,
    Comment {
        raw: String,
    },
    Html {
        raw: String,
    },
    Latex {
        raw: String,
    },
    Code(CodeListing),
    InlineCode {
        raw: String,
    },
    Math {
        delimiter: MathDelimiter,
        raw: String,
    },
    InlineMath {
        delimiter: InlineMathDelimiter,
        raw: String,
    },
    UnorderedList {
        indentation: usize,
    },
    UnorderedItem {
        indentation: usize,
        line: usize,
    },
    OrderedList {
        indentation: usize,
        marker: OlMarker,
    },
    OrderedItem {
        indentation: usize,
        line: usize,
        marker: OlMarker,
    },
    Figure(Figure),
    SubFigure(SubFigure),
    Tabs {
        selected: usize,
    },
    Tab {
        name: Option<String>,
        selected: bool,
    },
    /// `index` is assigned in document order once the tree is complete.
    Footnote {
        index: usize,
    },
    Ref(Reference),
    /// Rendered listings cached by the cross-reference pass.
    Bibliography {
        html: String,
        latex: String,
    },
    Meta,
    Author {
        raw: String,
    },
    Copyright {
        raw: String,
    },
    BibInfo(BibInfo),
    Inline(Inline),
}

/// The tag of a [`Block`], without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    Document,
    Paragraph,
    Heading,
    TextBox,
    TextBoxTitle,
    TextBoxContent,
    Comment,
    Html,
    Latex,
    Code,
    InlineCode,
    Math,
    InlineMath,
    UnorderedList,
    UnorderedItem,
    OrderedList,
    OrderedItem,
    Figure,
    SubFigure,
    Tabs,
    Tab,
    Footnote,
    Ref,
    Bibliography,
    Meta,
    Author,
    Copyright,
    BibInfo,
    Inline,
}

impl BlockKind {
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Document => "document",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::TextBox => "textbox",
            BlockKind::TextBoxTitle => "textbox title",
            BlockKind::TextBoxContent => "textbox content",
            BlockKind::Comment => "comment",
            BlockKind::Html => "html",
            BlockKind::Latex => "latex",
            BlockKind::Code => "code listing",
            BlockKind::InlineCode => "inline code",
            BlockKind::Math => "math",
            BlockKind::InlineMath => "inline math",
            BlockKind::UnorderedList => "unordered list",
            BlockKind::UnorderedItem => "unordered list item",
            BlockKind::OrderedList => "ordered list",
            BlockKind::OrderedItem => "ordered list item",
            BlockKind::Figure => "figure",
            BlockKind::SubFigure => "subfigure",
            BlockKind::Tabs => "tabs",
            BlockKind::Tab => "tab",
            BlockKind::Footnote => "footnote",
            BlockKind::Ref => "reference",
            BlockKind::Bibliography => "bibliography",
            BlockKind::Meta => "meta",
            BlockKind::Author => "author",
            BlockKind::Copyright => "copyright",
            BlockKind::BibInfo => "bibinfo",
            BlockKind::Inline => "inline",
        }
    }

    /// List containers and items: the blocks that end without a closing token.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            BlockKind::UnorderedList
                | BlockKind::UnorderedItem
                | BlockKind::OrderedList
                | BlockKind::OrderedItem
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Document => BlockKind::Document,
            Block::Paragraph => BlockKind::Paragraph,
            Block::Heading { .. } => BlockKind::Heading,
            Block::TextBox { .. } => BlockKind::TextBox,
            Block::TextBoxTitle => BlockKind::TextBoxTitle,
            Block::TextBoxContent => BlockKind::TextBoxContent,
            Block::Comment { .. } => BlockKind::Comment,
            Block::Html { .. } => BlockKind::Html,
            Block::Latex { .. } => BlockKind::Latex,
            Block::Code(_) => BlockKind::Code,
            Block::InlineCode { .. } => BlockKind::InlineCode,
            Block::Math { .. } => BlockKind::Math,
            Block::InlineMath { .. } => BlockKind::InlineMath,
            Block::UnorderedList { .. } => BlockKind::UnorderedList,
            Block::UnorderedItem { .. } => BlockKind::UnorderedItem,
            Block::OrderedList { .. } => BlockKind::OrderedList,
            Block::OrderedItem { .. } => BlockKind::OrderedItem,
            Block::Figure(_) => BlockKind::Figure,
            Block::SubFigure(_) => BlockKind::SubFigure,
            Block::Tabs { .. } => BlockKind::Tabs,
            Block::Tab { .. } => BlockKind::Tab,
            Block::Footnote { .. } => BlockKind::Footnote,
            Block::Ref(_) => BlockKind::Ref,
            Block::Bibliography { .. } => BlockKind::Bibliography,
            Block::Meta => BlockKind::Meta,
            Block::Author { .. } => BlockKind::Author,
            Block::Copyright { .. } => BlockKind::Copyright,
            Block::BibInfo(_) => BlockKind::BibInfo,
            Block::Inline(_) => BlockKind::Inline,
        }
    }

    /// Literal source text slot, for variants that keep one.
    pub fn raw_content(&self) -> Option<&str> {
        match self {
            Block::Comment { raw }
            | Block::Html { raw }
            | Block::Latex { raw }
            | Block::InlineCode { raw }
            | Block::Math { raw, .. }
            | Block::InlineMath { raw, .. }
            | Block::Author { raw }
            | Block::Copyright { raw } => Some(raw),
            Block::Code(code) => Some(&code.raw),
            Block::Ref(reference) => Some(&reference.raw),
            Block::BibInfo(info) => Some(&info.raw),
            _ => None,
        }
    }

    pub fn raw_content_mut(&mut self) -> Option<&mut String> {
        match self {
            Block::Comment { raw }
            | Block::Html { raw }
            | Block::Latex { raw }
            | Block::InlineCode { raw }
            | Block::Math { raw, .. }
            | Block::InlineMath { raw, .. }
            | Block::Author { raw }
            | Block::Copyright { raw } => Some(raw),
            Block::Code(code) => Some(&mut code.raw),
            Block::Ref(reference) => Some(&mut reference.raw),
            Block::BibInfo(info) => Some(&mut info.raw),
            _ => None,
        }
    }
}

/// A tree value: a block and where it sits in the source.
///
/// Inline nodes produced by the inline resolver carry no span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub span: Option<Span>,
    pub block: Block,
}

impl BlockNode {
    pub fn new(block: Block, span: Span) -> Self {
        Self {
            span: Some(span),
            block,
        }
    }

    pub fn inline(inline: Inline) -> Self {
        Self {
            span: None,
            block: Block::Inline(inline),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.block.kind()
    }
}

impl Spanned for BlockNode {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

pub type DocumentTree = Tree<BlockNode>;
