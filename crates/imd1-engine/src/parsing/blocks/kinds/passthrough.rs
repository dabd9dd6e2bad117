use super::TagPair;

/// Blocks whose content is kept verbatim: comments and HTML/LaTeX passthrough.
pub struct PassthroughSyntax;

impl PassthroughSyntax {
    pub const COMMENT: TagPair = TagPair {
        open: "<!--",
        close: "-->",
    };
    pub const HTML: TagPair = TagPair {
        open: "|html>",
        close: "<html|",
    };
    pub const LATEX: TagPair = TagPair {
        open: "|latex>",
        close: "<latex|",
    };
}
