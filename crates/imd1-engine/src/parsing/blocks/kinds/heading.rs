use crate::parsing::text::LineCursor;

/// `#` headings. The level is the length of the `#` run at the start of the
/// line's content; the heading runs to the end of that line.
pub struct HeadingSyntax;

impl HeadingSyntax {
    pub const MARKER: char = '#';
    pub const OPTIONS: &'static [&'static str] = &["anchor"];

    /// The level of a heading opening at the cursor, if one does.
    pub fn level_at(cur: &LineCursor) -> Option<usize> {
        if cur.column() != 0 || cur.current() != Some(Self::MARKER) {
            return None;
        }
        let level = cur
            .line()
            .chars()
            .iter()
            .take_while(|&&c| c == Self::MARKER)
            .count();
        Some(level)
    }
}
