use super::TagPair;

/// `|textbox>` with its `|title>` and `|content>` sections.
pub struct TextBoxSyntax;

impl TextBoxSyntax {
    pub const BOX: TagPair = TagPair {
        open: "|textbox>",
        close: "<textbox|",
    };
    pub const TITLE: TagPair = TagPair {
        open: "|title>",
        close: "<title|",
    };
    pub const CONTENT: TagPair = TagPair {
        open: "|content>",
        close: "<content|",
    };
    pub const OPTIONS: &'static [&'static str] = &["class"];
}
