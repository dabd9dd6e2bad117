use super::TagPair;
use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::blocks::options::Options;
use crate::parsing::text::Position;

pub struct FigureSyntax;

impl FigureSyntax {
    pub const FIGURE: TagPair = TagPair {
        open: "|figure>",
        close: "<figure|",
    };
    pub const SUBFIGURE: TagPair = TagPair {
        open: "|subfigure>",
        close: "<subfigure|",
    };
    pub const FIGURE_OPTIONS: &'static [&'static str] = &["max-width", "dock", "padding"];
    pub const SUBFIGURE_OPTIONS: &'static [&'static str] = &["src", "padding", "width"];
}

/// Where a figure docks on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dock {
    #[default]
    Center,
    Top,
    Bottom,
}

impl Dock {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "center" => Some(Dock::Center),
            "top" | "dock-top" => Some(Dock::Top),
            "bot" | "bottom" | "dock-bot" | "dock-bottom" => Some(Dock::Bottom),
            _ => None,
        }
    }

    /// Extra CSS class, if the dock needs one.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Dock::Center => None,
            Dock::Top => Some("dock-top"),
            Dock::Bottom => Some("dock-bottom"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Figure {
    pub max_width: Option<String>,
    pub dock: Dock,
    pub padding: Option<String>,
}

impl Figure {
    /// An unrecognized `dock` value always falls back to [`Dock::Center`].
    pub fn apply_options(&mut self, options: &Options, report: &mut Report, at: Position) {
        self.max_width = options.get("max-width").map(str::to_string);
        self.padding = options.get("padding").map(str::to_string);
        if let Some(dock) = options.get("dock") {
            self.dock = Dock::parse(dock).unwrap_or_else(|| {
                report.warn(
                    DiagnosticKind::InvalidEnumValue {
                        option: "dock",
                        value: dock.to_string(),
                        fallback: "center",
                    },
                    Some(at),
                );
                Dock::Center
            });
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubFigure {
    pub src: Option<String>,
    /// Inherited from the enclosing figure when not given.
    pub padding: Option<String>,
    pub width: Option<String>,
}

impl SubFigure {
    pub fn apply_options(&mut self, options: &Options) {
        self.src = options.get("src").map(str::to_string);
        self.padding = options.get("padding").map(str::to_string);
        self.width = options.get("width").map(str::to_string);
    }
}
