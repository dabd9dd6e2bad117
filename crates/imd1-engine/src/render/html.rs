use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{TagRenderer, escape};
use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::blocks::kinds::math::MathDelimiter;
use crate::parsing::blocks::{Block, DocumentTree};
use crate::parsing::inline::{Inline, ModifierKind};
use crate::parsing::resolve::Metadata;
use crate::parsing::tree::NodeId;

/// How much document scaffolding surrounds the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum HtmlMode {
    /// Doctype, `<html>`, `<head>` and `<body>`.
    #[default]
    Complete,
    /// As [`HtmlMode::Complete`] without the doctype.
    Html,
    /// Only the `<body>` element.
    Body,
    /// The bare fragment.
    Direct,
}

pub struct HtmlRenderer<'a> {
    mode: HtmlMode,
    metadata: &'a Metadata,
    report: &'a mut Report,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(mode: HtmlMode, metadata: &'a Metadata, report: &'a mut Report) -> Self {
        Self {
            mode,
            metadata,
            report,
        }
    }

    fn head(&self) -> String {
        let mut head = String::from("<head><title></title>");
        if let Some(author) = &self.metadata.author {
            let _ = write!(
                head,
                "<meta name=\"author\" content=\"{}\">",
                escape::attribute(author)
            );
        }
        if let Some(copyright) = &self.metadata.copyright {
            let _ = write!(
                head,
                "<meta name=\"copyright\" content=\"{}\">",
                escape::attribute(copyright)
            );
        }
        head.push_str("</head>\n");
        head
    }

    fn document_open(&self) -> String {
        match self.mode {
            HtmlMode::Complete => format!("<!DOCTYPE html>\n<html>\n{}<body>\n", self.head()),
            HtmlMode::Html => format!("<html>\n{}<body>\n", self.head()),
            HtmlMode::Body => "<body>\n".to_string(),
            HtmlMode::Direct => String::new(),
        }
    }

    fn document_close(&self) -> &'static str {
        match self.mode {
            HtmlMode::Complete | HtmlMode::Html => "</body>\n</html>\n",
            HtmlMode::Body => "</body>\n",
            HtmlMode::Direct => "",
        }
    }

    fn tabs_open(tree: &DocumentTree, id: NodeId) -> String {
        let mut out = String::from("\n<div class=\"tabs\">\n<div class=\"tabs-select\">");
        for &child in tree.children(id) {
            if let Block::Tab { name, selected } = &tree.get(child).block {
                let class = if *selected { "tab-opt selected" } else { "tab-opt" };
                let name = name.as_deref().map(escape::html).unwrap_or_default();
                let _ = write!(out, "<div class=\"{class}\">{name}</div>");
            }
        }
        out.push_str("</div>\n");
        out
    }

    fn inline_open(&mut self, inline: &Inline) -> String {
        match inline {
            Inline::Document => String::new(),
            Inline::Raw(text) => escape::html(text),
            Inline::Modifier(kind) => match kind {
                ModifierKind::Italic => "<em>",
                ModifierKind::Bold => "<strong>",
                ModifierKind::Strikeout => "<del>",
            }
            .to_string(),
            Inline::Href { address } => format!("<a href=\"{}\">", escape::attribute(address)),
            Inline::Delimiter(kind) => {
                self.report.warn(
                    DiagnosticKind::LeftoverDelimiter {
                        delimiter: kind.literal(),
                    },
                    None,
                );
                escape::html(&kind.literal().to_string())
            }
        }
    }
}

fn math_html(delimiter: MathDelimiter) -> (&'static str, &'static str) {
    match delimiter {
        MathDelimiter::Brackets | MathDelimiter::DoubleDollar | MathDelimiter::EquationStar => {
            ("\\[", "\\]\n")
        }
        MathDelimiter::Equation => ("\\begin{equation}", "\\end{equation}\n"),
        MathDelimiter::Align => ("\\begin{align}", "\\end{align}\n"),
        MathDelimiter::AlignStar => ("\\[\\begin{split}", "\\end{split}\\]\n"),
    }
}

impl TagRenderer for HtmlRenderer<'_> {
    fn open(&mut self, tree: &DocumentTree, id: NodeId) -> String {
        match &tree.get(id).block {
            Block::Document => self.document_open(),
            Block::Paragraph => "<p>".to_string(),
            Block::Heading { level, anchor } => {
                let level = (*level).clamp(1, 6);
                match anchor {
                    Some(anchor) => format!("<h{level} id=\"{}\">", escape::attribute(anchor)),
                    None => format!("<h{level}>"),
                }
            }
            Block::TextBox { class } => match class {
                Some(class) => format!("<div class=\"box {}\">\n", escape::attribute(class)),
                None => "<div class=\"box\">\n".to_string(),
            },
            Block::TextBoxTitle => "<div class=\"box-title\">".to_string(),
            Block::TextBoxContent => "<div class=\"box-content\">".to_string(),
            Block::Comment { raw } => format!("<!--{}-->", escape::html(raw)),
            Block::Html { raw } => raw.clone(),
            Block::Latex { .. } | Block::Meta | Block::Author { .. } | Block::Copyright { .. } => {
                String::new()
            }
            Block::BibInfo(_) => String::new(),
            Block::Code(code) => {
                let mut out = String::from("<div class=\"code-listing\">");
                if code.copy {
                    out.push_str("<div class=\"copy-code\"></div>");
                }
                if let Some(file) = &code.file {
                    let _ = write!(out, "<div class=\"file-name\">{}</div>", escape::html(file));
                }
                match code.align {
                    Some(align) => {
                        let _ = write!(out, "<pre style=\"text-align: {}\">", align.as_str());
                    }
                    None => out.push_str("<pre>"),
                }
                let _ = write!(
                    out,
                    "<code class=\"language-{}\">{}",
                    escape::attribute(&code.language),
                    escape::html(&code.raw)
                );
                out
            }
            Block::InlineCode { raw } => format!("<code>{}", escape::html(raw)),
            Block::Math { delimiter, raw } => {
                format!("{}{}", math_html(*delimiter).0, escape::katex(raw))
            }
            Block::InlineMath { raw, .. } => format!("\\({}", escape::katex(raw)),
            Block::UnorderedList { .. } => "<ul>\n".to_string(),
            Block::OrderedList { marker, .. } => format!("<ol type=\"{}\">\n", marker.html_type()),
            Block::UnorderedItem { .. } | Block::OrderedItem { .. } => "<li>\n".to_string(),
            Block::Figure(figure) => {
                let mut out = String::from("<div class=\"figure");
                if let Some(class) = figure.dock.css_class() {
                    let _ = write!(out, " {class}");
                }
                out.push('"');
                if let Some(width) = &figure.max_width {
                    let _ = write!(
                        out,
                        " style=\"max-width: {};\"",
                        escape::attribute(width)
                    );
                }
                out.push_str(">\n");
                out
            }
            Block::SubFigure(subfigure) => {
                let src = subfigure.src.as_deref().unwrap_or_default();
                let mut img = format!("<img src=\"{}\"", escape::attribute(src));
                let mut style = String::new();
                if let Some(padding) = &subfigure.padding {
                    let _ = write!(style, "padding: {};", escape::attribute(padding));
                }
                if let Some(width) = &subfigure.width {
                    let _ = write!(style, "width: {};", escape::attribute(width));
                }
                if !style.is_empty() {
                    let _ = write!(img, " style=\"{style}\"");
                }
                img.push('>');
                format!("<div class=\"subfigure\">{img}<div class=\"subcaption\">")
            }
            Block::Tabs { .. } => Self::tabs_open(tree, id),
            Block::Tab { selected, .. } => {
                if *selected {
                    "<div class=\"tab-content selected\">".to_string()
                } else {
                    "<div class=\"tab-content\">".to_string()
                }
            }
            Block::Footnote { index } => format!(
                "<a href=\"#footnote-{index}\" class=\"footnote-href\">\
                 <div class=\"footnote footnote-{index}\">"
            ),
            Block::Ref(reference) => {
                let file = reference.file.as_deref().map(escape::attribute).unwrap_or_default();
                match reference.index {
                    Some(index) => format!(
                        "<a href=\"{file}#ref-{index}\" class=\"reference-href\">[{index}]"
                    ),
                    None => format!("<a href=\"{file}#ref-0\" class=\"reference-href\">[?]"),
                }
            }
            Block::Bibliography { html, .. } => html.clone(),
            Block::Inline(inline) => self.inline_open(inline),
        }
    }

    fn close(&mut self, tree: &DocumentTree, id: NodeId) -> String {
        match &tree.get(id).block {
            Block::Document => self.document_close().to_string(),
            Block::Paragraph => "</p>\n".to_string(),
            Block::Heading { level, .. } => format!("</h{}>\n", (*level).clamp(1, 6)),
            Block::TextBox { .. }
            | Block::TextBoxTitle
            | Block::TextBoxContent
            | Block::Figure(_)
            | Block::Tabs { .. }
            | Block::Tab { .. } => "</div>\n".to_string(),
            Block::Code(_) => "</code></pre></div>\n".to_string(),
            Block::InlineCode { .. } => "</code>".to_string(),
            Block::Math { delimiter, .. } => math_html(*delimiter).1.to_string(),
            Block::InlineMath { .. } => "\\)".to_string(),
            Block::UnorderedList { .. } => "</ul>\n".to_string(),
            Block::OrderedList { .. } => "</ol>\n".to_string(),
            Block::UnorderedItem { .. } | Block::OrderedItem { .. } => "</li>\n".to_string(),
            Block::SubFigure(_) => "</div></div>\n".to_string(),
            Block::Footnote { .. } => "</div></a>\n".to_string(),
            Block::Ref(_) => "</a>".to_string(),
            Block::Inline(Inline::Modifier(kind)) => match kind {
                ModifierKind::Italic => "</em>",
                ModifierKind::Bold => "</strong>",
                ModifierKind::Strikeout => "</del>",
            }
            .to_string(),
            Block::Inline(Inline::Href { .. }) => "</a>".to_string(),
            _ => String::new(),
        }
    }
}
