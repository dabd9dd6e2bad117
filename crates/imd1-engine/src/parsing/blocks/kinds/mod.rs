//! Per-variant syntax: delimiter tokens, option pools, and the field types
//! each variant fills from its options.

pub mod code;
pub mod figure;
pub mod heading;
pub mod list;
pub mod math;
pub mod meta;
pub mod passthrough;
pub mod reference;
pub mod tabs;
pub mod textbox;

use crate::parsing::text::LineCursor;

/// An explicit open/close token pair such as `|tab>` … `<tab|`.
///
/// Both tokens are recognized with the cursor on their last code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPair {
    pub open: &'static str,
    pub close: &'static str,
}

impl TagPair {
    pub fn opens_at(&self, cur: &LineCursor) -> bool {
        cur.ends_with_unescaped(self.open)
    }

    pub fn closes_at(&self, cur: &LineCursor) -> bool {
        cur.ends_with_unescaped(self.close)
    }

    pub fn open_len(&self) -> usize {
        self.open.chars().count()
    }

    pub fn close_len(&self) -> usize {
        self.close.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::text::Source;

    const SAMPLE: TagPair = TagPair {
        open: "|tab>",
        close: "<tab|",
    };

    #[test]
    fn tag_pair_matches_on_last_code_point() {
        let source = Source::read("|tab>x<tab|");
        let mut cur = LineCursor::new(&source.lines()[0]);
        cur.bump_n(3);
        assert!(!SAMPLE.opens_at(&cur));
        cur.bump();
        assert!(SAMPLE.opens_at(&cur));
        cur.bump_n(6);
        assert!(SAMPLE.closes_at(&cur));
        assert_eq!(SAMPLE.open_len(), 5);
    }

    #[test]
    fn escaped_tag_is_literal() {
        let source = Source::read(r"\|tab>");
        let mut cur = LineCursor::new(&source.lines()[0]);
        cur.bump_n(5);
        assert!(!SAMPLE.opens_at(&cur));
    }
}
