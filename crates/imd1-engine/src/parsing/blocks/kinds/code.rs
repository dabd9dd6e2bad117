use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::blocks::options::{Options, parse_bool};
use crate::parsing::text::{LineCursor, Position};

/// Fenced code listings (```` ``` ````) and inline code (`` ` ``).
///
/// Both openers are recognized with the cursor on their first backtick, so a
/// fence is never mistaken for an inline span.
pub struct CodeSyntax;

impl CodeSyntax {
    pub const FENCE: &'static str = "```";
    pub const INLINE: &'static str = "`";
    pub const OPTIONS: &'static [&'static str] = &["lang", "file", "align", "copy"];

    const BACKTICK: char = '`';

    pub fn opens_fence(cur: &LineCursor) -> bool {
        cur.current() == Some(Self::BACKTICK)
            && cur.is_unescaped()
            && cur.peek(1) == Some(Self::BACKTICK)
            && cur.peek(2) == Some(Self::BACKTICK)
    }

    pub fn opens_inline(cur: &LineCursor) -> bool {
        cur.current() == Some(Self::BACKTICK) && cur.is_unescaped() && !Self::opens_fence(cur)
    }
}

/// Horizontal alignment of a listing's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
    Justify,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "left" => Some(Align::Left),
            "right" => Some(Align::Right),
            "center" => Some(Align::Center),
            "justify" => Some(Align::Justify),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
            Align::Center => "center",
            Align::Justify => "justify",
        }
    }
}

pub const DEFAULT_LANGUAGE: &str = "plaintext";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeListing {
    pub language: String,
    pub file: Option<String>,
    pub align: Option<Align>,
    /// Whether the rendered listing offers a copy button.
    pub copy: bool,
    pub raw: String,
}

impl Default for CodeListing {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            file: None,
            align: None,
            copy: true,
            raw: String::new(),
        }
    }
}

impl CodeListing {
    pub fn apply_options(&mut self, options: &Options, report: &mut Report, at: Position) {
        if let Some(lang) = options.get("lang") {
            self.language = normalize_language(lang);
        }
        if let Some(file) = options.get("file") {
            self.file = Some(file.to_string());
        }
        if let Some(copy) = options.get("copy") {
            self.copy = parse_bool(copy);
        }
        if let Some(align) = options.get("align") {
            self.align = Align::parse(align);
            if self.align.is_none() {
                report.warn(
                    DiagnosticKind::InvalidEnumValue {
                        option: "align",
                        value: align.to_string(),
                        fallback: "no alignment",
                    },
                    Some(at),
                );
            }
        }
    }
}

fn normalize_language(lang: &str) -> String {
    match lang.trim() {
        "" | "text" | "txt" => DEFAULT_LANGUAGE.to_string(),
        other => other.to_string(),
    }
}
