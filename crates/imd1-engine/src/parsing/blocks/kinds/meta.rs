use super::TagPair;
use crate::parsing::blocks::options::{Options, parse_bool};

pub struct MetaSyntax;

impl MetaSyntax {
    pub const META: TagPair = TagPair {
        open: "|meta>",
        close: "<meta|",
    };
    pub const AUTHOR: TagPair = TagPair {
        open: "|author>",
        close: "<author|",
    };
    pub const COPYRIGHT: TagPair = TagPair {
        open: "|copyright>",
        close: "<copyright|",
    };
    pub const BIBINFO: TagPair = TagPair {
        open: "|bibinfo>",
        close: "<bibinfo|",
    };
    pub const BIBINFO_OPTIONS: &'static [&'static str] = &["inline", "ref-file"];
}

/// A bibliography declaration: inline JSON, or the path of a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibInfo {
    pub raw: String,
    pub inline: bool,
    /// Default document for references to these entries.
    pub ref_file: Option<String>,
}

impl BibInfo {
    pub fn apply_options(&mut self, options: &Options) {
        self.inline = options.get("inline").is_some_and(parse_bool);
        self.ref_file = options.get("ref-file").map(str::to_string);
    }
}
