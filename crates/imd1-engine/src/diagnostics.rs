//! # Diagnostics
//!
//! Malformed markup never aborts a parse. Every recoverable problem becomes a
//! [`Diagnostic`] pushed into the [`Report`] the caller hands to the pipeline.
//! Each push is also mirrored to the `log` facade so a binary that installs a
//! logger sees diagnostics as they happen.

use std::fmt;

use thiserror::Error;

use crate::parsing::blocks::BlockKind;
use crate::parsing::text::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// What went wrong. The `Display` form is the message shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("option group `[{group}]` has no `=`; later option groups on this tag are ignored")]
    MalformedOptionGroup { group: String },

    #[error("unknown option `{key}` on {block}")]
    UnknownOption { key: String, block: BlockKind },

    #[error("unrecognized escape sequence `\\{escaped}`")]
    UnrecognizedEscape { escaped: char },

    #[error("reference to unknown bibliography tag `{tag}`")]
    DanglingReference { tag: String },

    #[error("bibliography tag `{tag}` is already defined; keeping the first definition")]
    DuplicateBibliographyTag { tag: String },

    #[error("invalid value `{value}` for `{option}`; using {fallback}")]
    InvalidEnumValue {
        option: &'static str,
        value: String,
        fallback: &'static str,
    },

    #[error("invalid value `{value}` for `{option}`")]
    InvalidOptionValue { option: &'static str, value: String },

    #[error("selected tab {selected} is out of range for {count} tab(s); selecting the first")]
    TabIndexOutOfRange { selected: usize, count: usize },

    #[error("cannot read bibliography `{source_name}`: {reason}")]
    UnreadableBibliographyFile { source_name: String, reason: String },

    #[error("malformed bibliography `{source_name}`: {detail}")]
    MalformedBibliography { source_name: String, detail: String },

    #[error("unresolved `{delimiter}` delimiter reached the renderer")]
    LeftoverDelimiter { delimiter: char },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub position: Option<Position>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match self.position {
            Some(pos) => write!(f, "{label} at {pos}: {}", self.kind),
            None => write!(f, "{label}: {}", self.kind),
        }
    }
}

/// Collects diagnostics for one pipeline run.
#[derive(Debug, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, kind: DiagnosticKind, position: Option<Position>) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            position,
        });
    }

    pub fn error(&mut self, kind: DiagnosticKind, position: Option<Position>) {
        self.push(Diagnostic {
            severity: Severity::Error,
            kind,
            position,
        });
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Error => log::error!("{diagnostic}"),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_and_errors_are_separated() {
        let mut report = Report::new();
        report.warn(
            DiagnosticKind::DanglingReference { tag: "x".into() },
            Some(Position::new(2, 4)),
        );
        report.error(
            DiagnosticKind::UnreadableBibliographyFile {
                source_name: "refs.json".into(),
                reason: "not found".into(),
            },
            None,
        );

        assert_eq!(report.len(), 2);
        assert_eq!(report.warnings().count(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn display_includes_one_based_position() {
        let d = Diagnostic {
            severity: Severity::Warning,
            kind: DiagnosticKind::UnrecognizedEscape { escaped: 'q' },
            position: Some(Position::new(0, 3)),
        };
        assert_eq!(
            d.to_string(),
            "warning at 1:4: unrecognized escape sequence `\\q`"
        );
    }

    #[test]
    fn empty_report() {
        let report = Report::new();
        assert!(report.is_empty());
        assert!(!report.has_errors());
    }
}
