use super::TagPair;
use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::blocks::options::Options;
use crate::parsing::text::Position;

pub struct TabsSyntax;

impl TabsSyntax {
    pub const TABS: TagPair = TagPair {
        open: "|tabs>",
        close: "<tabs|",
    };
    pub const TAB: TagPair = TagPair {
        open: "|tab>",
        close: "<tab|",
    };
    pub const TABS_OPTIONS: &'static [&'static str] = &["selected"];
    pub const TAB_OPTIONS: &'static [&'static str] = &["name"];

    /// The `selected` option; a value that is not a tab index selects the first tab.
    pub fn selected(options: &Options, report: &mut Report, at: Position) -> usize {
        let Some(value) = options.get("selected") else {
            return 0;
        };
        value.trim().parse().unwrap_or_else(|_| {
            report.warn(
                DiagnosticKind::InvalidOptionValue {
                    option: "selected",
                    value: value.to_string(),
                },
                Some(at),
            );
            0
        })
    }
}
