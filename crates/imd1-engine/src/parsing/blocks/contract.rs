//! The recognizer contract every block variant implements.
//!
//! The builder drives blocks only through these methods: whether a variant
//! starts at the cursor, how far to seek past its opener, which options it
//! reads, whether it ends, and which children it admits.

use super::containers::ParsingContext;
use super::kinds::TagPair;
use super::kinds::code::{CodeListing, CodeSyntax};
use super::kinds::figure::{Figure, FigureSyntax, SubFigure};
use super::kinds::heading::HeadingSyntax;
use super::kinds::list::{ListSyntax, OlMarker};
use super::kinds::math::{InlineMathDelimiter, MathDelimiter};
use super::kinds::meta::{BibInfo, MetaSyntax};
use super::kinds::passthrough::PassthroughSyntax;
use super::kinds::reference::{Reference, ReferenceSyntax};
use super::kinds::tabs::TabsSyntax;
use super::kinds::textbox::TextBoxSyntax;
use super::options::parse_option_groups;
use super::types::{Block, BlockKind as K};
use crate::diagnostics::Report;
use crate::parsing::text::{LineCursor, Position, Span};

/// The two independent ways an open block can end at the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndCheck {
    /// An explicit closing token, or the variant's own end rule.
    pub normally: bool,
    /// A run of blank lines combined with an indentation change.
    pub via_blank_run: bool,
}

impl EndCheck {
    pub fn ends(self) -> bool {
        self.normally || self.via_blank_run
    }
}

const DOCUMENT_CHILDREN: &[K] = &[
    K::Comment,
    K::Html,
    K::Latex,
    K::Tabs,
    K::Code,
    K::InlineCode,
    K::Math,
    K::InlineMath,
    K::TextBox,
    K::Figure,
    K::UnorderedList,
    K::OrderedList,
    K::Footnote,
    K::Ref,
    K::Heading,
    K::Meta,
    K::Bibliography,
];

/// Heading and textbox title: inline material only.
const INLINE_CHILDREN: &[K] = &[
    K::Comment,
    K::Html,
    K::Latex,
    K::InlineCode,
    K::InlineMath,
    K::Footnote,
    K::Ref,
];

/// Textbox content and list items.
const FLOW_CHILDREN: &[K] = &[
    K::Comment,
    K::Html,
    K::Latex,
    K::Tabs,
    K::Code,
    K::InlineCode,
    K::Math,
    K::InlineMath,
    K::TextBox,
    K::Figure,
    K::UnorderedList,
    K::OrderedList,
    K::Footnote,
    K::Ref,
];

const TEXTBOX_CHILDREN: &[K] = &[K::Comment, K::TextBoxTitle, K::TextBoxContent];

const FIGURE_CHILDREN: &[K] = &[K::Comment, K::Html, K::Latex, K::SubFigure];

const SUBFIGURE_CHILDREN: &[K] = &[
    K::Comment,
    K::Html,
    K::Latex,
    K::Code,
    K::InlineCode,
    K::Math,
    K::InlineMath,
    K::Footnote,
    K::Ref,
];

const TABS_CHILDREN: &[K] = &[K::Comment, K::Html, K::Latex, K::Tab];

const TAB_CHILDREN: &[K] = &[
    K::Comment,
    K::Html,
    K::Latex,
    K::Tabs,
    K::TextBox,
    K::Code,
    K::InlineCode,
    K::Math,
    K::InlineMath,
    K::Footnote,
    K::Ref,
];

const FOOTNOTE_CHILDREN: &[K] = &[
    K::Comment,
    K::Html,
    K::Latex,
    K::Code,
    K::InlineCode,
    K::Math,
    K::InlineMath,
    K::UnorderedList,
    K::OrderedList,
    K::Ref,
];

const META_CHILDREN: &[K] = &[K::Author, K::Copyright, K::BibInfo];

impl K {
    /// Variants legal directly inside this one, in tie-break order.
    pub fn allowed_children(self) -> &'static [K] {
        match self {
            K::Document => DOCUMENT_CHILDREN,
            K::Heading | K::TextBoxTitle => INLINE_CHILDREN,
            K::TextBoxContent | K::UnorderedItem | K::OrderedItem => FLOW_CHILDREN,
            K::TextBox => TEXTBOX_CHILDREN,
            K::Figure => FIGURE_CHILDREN,
            K::SubFigure => SUBFIGURE_CHILDREN,
            K::Tabs => TABS_CHILDREN,
            K::Tab => TAB_CHILDREN,
            K::Footnote => FOOTNOTE_CHILDREN,
            K::Meta => META_CHILDREN,
            K::UnorderedList => &[K::UnorderedItem],
            K::OrderedList => &[K::OrderedItem],
            _ => &[],
        }
    }

    /// Blocks that flow inside a paragraph rather than splitting it.
    pub fn is_paragraph_eligible(self) -> bool {
        matches!(self, K::InlineCode | K::InlineMath | K::Footnote | K::Ref)
    }

    /// Whether paragraph segmentation looks inside this block.
    pub fn digs_for_paragraphs(self) -> bool {
        !matches!(
            self,
            K::Paragraph
                | K::Comment
                | K::Html
                | K::Latex
                | K::Code
                | K::InlineCode
                | K::Math
                | K::InlineMath
                | K::Ref
                | K::Bibliography
                | K::Meta
                | K::Author
                | K::Copyright
                | K::BibInfo
                | K::Inline
        )
    }

    fn tag_pair(self) -> Option<TagPair> {
        let pair = match self {
            K::TextBox => TextBoxSyntax::BOX,
            K::TextBoxTitle => TextBoxSyntax::TITLE,
            K::TextBoxContent => TextBoxSyntax::CONTENT,
            K::Comment => PassthroughSyntax::COMMENT,
            K::Html => PassthroughSyntax::HTML,
            K::Latex => PassthroughSyntax::LATEX,
            K::Figure => FigureSyntax::FIGURE,
            K::SubFigure => FigureSyntax::SUBFIGURE,
            K::Tabs => TabsSyntax::TABS,
            K::Tab => TabsSyntax::TAB,
            K::Footnote => ReferenceSyntax::FOOTNOTE,
            K::Ref => ReferenceSyntax::REF,
            K::Bibliography => ReferenceSyntax::BIBLIOGRAPHY,
            K::Meta => MetaSyntax::META,
            K::Author => MetaSyntax::AUTHOR,
            K::Copyright => MetaSyntax::COPYRIGHT,
            K::BibInfo => MetaSyntax::BIBINFO,
            _ => return None,
        };
        Some(pair)
    }

    /// A provisional block if this variant starts at the cursor.
    pub fn try_start(self, cur: &LineCursor) -> Option<Block> {
        if let Some(pair) = self.tag_pair() {
            return pair.opens_at(cur).then(|| self.empty_tagged());
        }
        match self {
            K::Heading => HeadingSyntax::level_at(cur).map(|level| Block::Heading {
                level,
                anchor: None,
            }),
            K::Code => CodeSyntax::opens_fence(cur).then(|| Block::Code(CodeListing::default())),
            K::InlineCode => CodeSyntax::opens_inline(cur).then(|| Block::InlineCode {
                raw: String::new(),
            }),
            K::Math => MathDelimiter::opening_at(cur).map(|delimiter| Block::Math {
                delimiter,
                raw: String::new(),
            }),
            K::InlineMath => {
                InlineMathDelimiter::opening_at(cur).map(|delimiter| Block::InlineMath {
                    delimiter,
                    raw: String::new(),
                })
            }
            K::UnorderedList => ListSyntax::bullet_at(cur).then(|| Block::UnorderedList {
                indentation: cur.indentation(),
            }),
            K::UnorderedItem => ListSyntax::bullet_at(cur).then(|| Block::UnorderedItem {
                indentation: cur.indentation(),
                line: cur.line_index(),
            }),
            K::OrderedList => ListSyntax::ordinal_at(cur).map(|marker| Block::OrderedList {
                indentation: cur.indentation(),
                marker,
            }),
            K::OrderedItem => ListSyntax::ordinal_at(cur).map(|marker| Block::OrderedItem {
                indentation: cur.indentation(),
                line: cur.line_index(),
                marker,
            }),
            _ => None,
        }
    }

    fn empty_tagged(self) -> Block {
        match self {
            K::TextBox => Block::TextBox { class: None },
            K::TextBoxTitle => Block::TextBoxTitle,
            K::TextBoxContent => Block::TextBoxContent,
            K::Comment => Block::Comment { raw: String::new() },
            K::Html => Block::Html { raw: String::new() },
            K::Latex => Block::Latex { raw: String::new() },
            K::Figure => Block::Figure(Figure::default()),
            K::SubFigure => Block::SubFigure(SubFigure::default()),
            K::Tabs => Block::Tabs { selected: 0 },
            K::Tab => Block::Tab {
                name: None,
                selected: false,
            },
            K::Footnote => Block::Footnote { index: 0 },
            K::Ref => Block::Ref(Reference::default()),
            K::Bibliography => Block::Bibliography {
                html: String::new(),
                latex: String::new(),
            },
            K::Meta => Block::Meta,
            K::Author => Block::Author { raw: String::new() },
            K::Copyright => Block::Copyright { raw: String::new() },
            K::BibInfo => Block::BibInfo(BibInfo::default()),
            _ => Block::Document,
        }
    }
}

impl Block {
    /// Veto on top of `allowed_children`: list containers only take items
    /// that match their indentation and marker class.
    pub fn accepts_child(&self, candidate: &Block) -> bool {
        match (self, candidate) {
            (
                Block::UnorderedList { indentation },
                Block::UnorderedItem {
                    indentation: item, ..
                },
            ) => indentation == item,
            (
                Block::OrderedList {
                    indentation,
                    marker,
                },
                Block::OrderedItem {
                    indentation: item,
                    marker: item_marker,
                    ..
                },
            ) => indentation == item && marker == item_marker,
            _ => true,
        }
    }

    /// Code points to advance once the opener is recognized.
    pub fn seek_after_start(&self) -> usize {
        match self {
            Block::Heading { level, .. } => *level,
            Block::Code(_) => CodeSyntax::FENCE.len(),
            Block::Math { delimiter, .. } => delimiter.seek_after_start(),
            Block::UnorderedList { .. } | Block::OrderedList { .. } => 0,
            _ => 1,
        }
    }

    /// Length of the opener that precedes the cursor after seeking.
    pub fn opener_len(&self) -> usize {
        if let Some(pair) = self.kind().tag_pair() {
            return pair.open_len();
        }
        match self {
            Block::Heading { level, .. } => *level,
            Block::Code(_) => CodeSyntax::FENCE.len(),
            Block::InlineCode { .. } => CodeSyntax::INLINE.len(),
            Block::Math { delimiter, .. } => delimiter.open().chars().count(),
            Block::InlineMath { delimiter, .. } => delimiter.open().chars().count(),
            Block::OrderedList { .. } | Block::UnorderedItem { .. } => 1,
            Block::OrderedItem { .. } => 2,
            _ => 0,
        }
    }

    /// Start hook: reads the variant's option groups at the cursor.
    pub fn on_start(&mut self, cur: &mut LineCursor, report: &mut Report) {
        let kind = self.kind();
        let at = cur.position();
        match self {
            Block::Heading { anchor, .. } => {
                let options = parse_option_groups(cur, kind, HeadingSyntax::OPTIONS, report);
                *anchor = options.get("anchor").map(str::to_string);
            }
            Block::TextBox { class } => {
                let options = parse_option_groups(cur, kind, TextBoxSyntax::OPTIONS, report);
                *class = options.get("class").map(str::to_string);
            }
            Block::Code(code) => {
                let options = parse_option_groups(cur, kind, CodeSyntax::OPTIONS, report);
                code.apply_options(&options, report, at);
            }
            Block::Figure(figure) => {
                let options =
                    parse_option_groups(cur, kind, FigureSyntax::FIGURE_OPTIONS, report);
                figure.apply_options(&options, report, at);
            }
            Block::SubFigure(sub) => {
                let options =
                    parse_option_groups(cur, kind, FigureSyntax::SUBFIGURE_OPTIONS, report);
                sub.apply_options(&options);
            }
            Block::Tabs { selected } => {
                let options = parse_option_groups(cur, kind, TabsSyntax::TABS_OPTIONS, report);
                *selected = TabsSyntax::selected(&options, report, at);
            }
            Block::Tab { name, .. } => {
                let options = parse_option_groups(cur, kind, TabsSyntax::TAB_OPTIONS, report);
                *name = options.get("name").map(str::to_string);
            }
            Block::Ref(reference) => {
                let options = parse_option_groups(cur, kind, ReferenceSyntax::REF_OPTIONS, report);
                reference.file = options.get("file").map(str::to_string);
            }
            Block::BibInfo(info) => {
                let options = parse_option_groups(cur, kind, MetaSyntax::BIBINFO_OPTIONS, report);
                info.apply_options(&options);
            }
            _ => {}
        }
    }

    /// The explicit token that closes this block, if it has one.
    pub fn closing_token(&self) -> Option<&'static str> {
        if let Some(pair) = self.kind().tag_pair() {
            return Some(pair.close);
        }
        match self {
            Block::Code(_) => Some(CodeSyntax::FENCE),
            Block::InlineCode { .. } => Some(CodeSyntax::INLINE),
            Block::Math { delimiter, .. } => Some(delimiter.close()),
            Block::InlineMath { delimiter, .. } => Some(delimiter.close()),
            _ => None,
        }
    }

    pub fn check_ends(
        &self,
        span: &Span,
        cur: &LineCursor,
        blank_run: usize,
        context: &ParsingContext,
    ) -> EndCheck {
        match self {
            Block::Heading { .. } => EndCheck {
                normally: cur.line_index() != span.start.line,
                via_blank_run: false,
            },
            Block::UnorderedList { indentation } => {
                let continues = cur.indentation() == *indentation
                    && cur.line().get(0) == Some(ListSyntax::BULLET);
                EndCheck {
                    normally: cur.column() == 0
                        && cur.line_index() != span.start.line
                        && !continues,
                    via_blank_run: blank_run >= 1 || cur.indentation() < *indentation,
                }
            }
            Block::OrderedList {
                indentation,
                marker,
            } => {
                let line = cur.line();
                let continues = cur.indentation() == *indentation
                    && line.get(1) == Some(ListSyntax::ORDINAL_DOT)
                    && line.get(0).and_then(OlMarker::classify)
                        == Some(*marker);
                EndCheck {
                    normally: cur.column() == 0
                        && cur.line_index() != span.start.line
                        && !continues,
                    via_blank_run: blank_run >= 1 || cur.indentation() < *indentation,
                }
            }
            Block::UnorderedItem { indentation, line } => {
                let own = *indentation;
                let continuation = own + ListSyntax::BULLET_CONTINUATION;
                let normally = if context.list_item_ends_suppressed() || cur.line_index() == *line
                {
                    false
                } else if ListSyntax::ordinal_at(cur).is_some() && cur.indentation() <= own {
                    true
                } else if ListSyntax::bullet_at(cur) {
                    cur.indentation() <= own
                } else {
                    cur.indentation() != continuation
                };
                EndCheck {
                    normally,
                    via_blank_run: blank_run >= 1 && cur.indentation() != continuation,
                }
            }
            Block::OrderedItem {
                indentation,
                line,
                marker,
            } => {
                let own = *indentation;
                let continuation = own + ListSyntax::ORDINAL_CONTINUATION;
                let normally = if context.list_item_ends_suppressed() || cur.line_index() == *line
                {
                    false
                } else if let Some(next) = ListSyntax::ordinal_at(cur) {
                    cur.indentation() <= own || next != *marker
                } else if ListSyntax::bullet_at(cur) {
                    cur.indentation() <= own
                } else {
                    cur.indentation() != continuation
                };
                EndCheck {
                    normally,
                    via_blank_run: blank_run >= 1 && cur.indentation() != continuation,
                }
            }
            _ => EndCheck {
                normally: self
                    .closing_token()
                    .is_some_and(|token| closes_inside_content(span, cur, token)),
                via_blank_run: false,
            },
        }
    }

    pub fn seek_after_end(&self) -> usize {
        self.closing_token().map_or(0, |_| 1)
    }

    /// End hook for a normal close: `end` is the cursor after seeking past
    /// the closing token.
    pub fn on_end(&self, span: &mut Span, end: Position) {
        let token_len = self.closing_token().map_or(0, |t| t.chars().count());
        span.end = end;
        span.content_end = Position::new(end.line, end.column.saturating_sub(token_len));
    }
}

/// The closing token must lie entirely after the content start, so an
/// opener can never double as its own closer.
fn closes_inside_content(span: &Span, cur: &LineCursor, token: &str) -> bool {
    if !cur.ends_with_unescaped(token) {
        return false;
    }
    let token_len = token.chars().count();
    cur.line_index() != span.content_start.line
        || cur.column() + 1 >= span.content_start.column + token_len
}
