use super::TagPair;

pub struct ReferenceSyntax;

impl ReferenceSyntax {
    pub const FOOTNOTE: TagPair = TagPair {
        open: "|footnote>",
        close: "<footnote|",
    };
    pub const REF: TagPair = TagPair {
        open: "|ref>",
        close: "<ref|",
    };
    pub const BIBLIOGRAPHY: TagPair = TagPair {
        open: "|bibliography>",
        close: "<bibliography|",
    };
    pub const REF_OPTIONS: &'static [&'static str] = &["file"];
}

/// A citation of a bibliography entry by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// The cited tag, as written.
    pub raw: String,
    /// Document holding the bibliography listing; empty means this one.
    pub file: Option<String>,
    /// Resolved reference index; `None` when the tag is unknown.
    pub index: Option<usize>,
}

impl Reference {
    pub fn tag(&self) -> &str {
        self.raw.trim()
    }
}
