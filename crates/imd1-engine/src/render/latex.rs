use std::fmt::Write;

use super::{TagRenderer, escape};
use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::blocks::{Block, DocumentTree};
use crate::parsing::inline::{Inline, ModifierKind};
use crate::parsing::resolve::Metadata;
use crate::parsing::tree::NodeId;

const PREAMBLE: &str = "\\documentclass{article}\n\
\\usepackage[normalem]{ulem}\n\
\\usepackage{float}\n\
\\usepackage{graphicx}\n\
\\usepackage{caption}\n\
\\usepackage{subcaption}\n\
\\usepackage{hyperref}\n\
\\newcommand{\\code}[1]{\\texttt{#1}}\n";

const SECTIONS: [&str; 5] = [
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// Renders a standalone `article` document.
pub struct LatexRenderer<'a> {
    metadata: &'a Metadata,
    report: &'a mut Report,
}

impl<'a> LatexRenderer<'a> {
    pub fn new(metadata: &'a Metadata, report: &'a mut Report) -> Self {
        Self { metadata, report }
    }

    fn document_open(&self) -> String {
        let mut out = String::from(PREAMBLE);
        if let Some(author) = &self.metadata.author {
            let _ = writeln!(out, "\\author{{{}}}", escape::latex(author));
        }
        out.push_str("\\begin{document}\n");
        out
    }

    fn inline_open(&mut self, inline: &Inline) -> String {
        match inline {
            Inline::Document => String::new(),
            Inline::Raw(text) => escape::latex(text),
            Inline::Modifier(kind) => match kind {
                ModifierKind::Italic => "\\textit{",
                ModifierKind::Bold => "\\textbf{",
                ModifierKind::Strikeout => "\\sout{",
            }
            .to_string(),
            Inline::Href { address } => format!("\\href{{{}}}{{", escape::latex(address)),
            Inline::Delimiter(kind) => {
                self.report.warn(
                    DiagnosticKind::LeftoverDelimiter {
                        delimiter: kind.literal(),
                    },
                    None,
                );
                escape::latex(&kind.literal().to_string())
            }
        }
    }
}

fn section(level: usize) -> &'static str {
    SECTIONS[level.clamp(1, SECTIONS.len()) - 1]
}

impl TagRenderer for LatexRenderer<'_> {
    fn open(&mut self, tree: &DocumentTree, id: NodeId) -> String {
        match &tree.get(id).block {
            Block::Document => self.document_open(),
            Block::Heading { level, .. } => format!("\\{}{{", section(*level)),
            Block::TextBox { .. } => "\\begin{quote}\n".to_string(),
            Block::TextBoxTitle => "\\textbf{".to_string(),
            Block::Latex { raw } => raw.clone(),
            Block::Code(code) => format!("\\begin{{verbatim}}\n{}\n", code.raw),
            Block::InlineCode { raw } => format!("\\code{{{}", escape::latex(raw)),
            Block::Math { delimiter, raw } => format!("{}{}", delimiter.open(), raw),
            Block::InlineMath { delimiter, raw } => format!("{}{}", delimiter.open(), raw),
            Block::UnorderedList { .. } => "\\begin{itemize}\n".to_string(),
            Block::OrderedList { .. } => "\\begin{enumerate}\n".to_string(),
            Block::UnorderedItem { .. } | Block::OrderedItem { .. } => "\\item ".to_string(),
            Block::Figure(_) => "\\begin{figure}[H]\n\\centering\n".to_string(),
            Block::SubFigure(subfigure) => {
                let src = subfigure.src.as_deref().unwrap_or_default();
                format!(
                    "\\begin{{subfigure}}{{\\linewidth}}\n\
                     \\includegraphics[width=\\textwidth]{{{src}}}\n\
                     \\caption{{"
                )
            }
            Block::Tab { name, .. } => match name {
                Some(name) => format!("\\textbf{{{}}}\n\n", escape::latex(name)),
                None => String::new(),
            },
            Block::Footnote { .. } => "\\footnote{".to_string(),
            Block::Ref(reference) => format!("\\cite{{{}}}", reference.tag()),
            Block::Bibliography { latex, .. } => latex.clone(),
            Block::Inline(inline) => self.inline_open(inline),
            _ => String::new(),
        }
    }

    fn close(&mut self, tree: &DocumentTree, id: NodeId) -> String {
        match &tree.get(id).block {
            Block::Document => "\\end{document}\n".to_string(),
            Block::Paragraph => "\n\n".to_string(),
            Block::Heading { .. } => "}\n".to_string(),
            Block::TextBox { .. } => "\\end{quote}\n".to_string(),
            Block::TextBoxTitle => "}\n\n".to_string(),
            Block::Code(_) => "\\end{verbatim}\n".to_string(),
            Block::InlineCode { .. } | Block::Footnote { .. } => "}".to_string(),
            Block::Math { delimiter, .. } => format!("{}\n", delimiter.close()),
            Block::InlineMath { delimiter, .. } => delimiter.close().to_string(),
            Block::UnorderedList { .. } => "\\end{itemize}\n".to_string(),
            Block::OrderedList { .. } => "\\end{enumerate}\n".to_string(),
            Block::UnorderedItem { .. } | Block::OrderedItem { .. } => "\n".to_string(),
            Block::Figure(_) => "\\end{figure}\n".to_string(),
            Block::SubFigure(_) => "}\n\\end{subfigure}\n".to_string(),
            Block::Inline(Inline::Modifier(_) | Inline::Href { .. }) => "}".to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{ParseOptions, parse_document};
    use crate::render::render;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn to_latex(text: &str) -> String {
        let mut report = Report::new();
        let doc = parse_document(text, &ParseOptions::default(), &mut report)
            .expect("parse should succeed");
        let mut renderer = LatexRenderer::new(&doc.metadata, &mut report);
        render(&doc.tree, &mut renderer)
    }

    /// The body between `\begin{document}` and `\end{document}`.
    fn body(latex: &str) -> &str {
        let start = latex
            .find("\\begin{document}\n")
            .map(|i| i + "\\begin{document}\n".len())
            .unwrap_or(0);
        let end = latex.rfind("\\end{document}").unwrap_or(latex.len());
        &latex[start..end]
    }

    #[test]
    fn wraps_in_article() {
        let latex = to_latex("text");
        assert!(latex.starts_with("\\documentclass{article}\n"));
        assert!(latex.ends_with("\\end{document}\n"));
        assert_eq!(body(&latex), "text\n\n");
    }

    #[rstest]
    #[case(1, "section")]
    #[case(3, "subsubsection")]
    #[case(5, "subparagraph")]
    #[case(9, "subparagraph")]
    fn heading_levels(#[case] level: usize, #[case] expected: &str) {
        assert_eq!(section(level), expected);
    }

    #[test]
    fn emphasis_and_links() {
        let latex = to_latex("*a* **b** ~c~ [d](e)");
        assert_eq!(
            body(&latex),
            "\\textit{a} \\textbf{b} \\sout{c} \\href{e}{d}\n\n"
        );
    }

    #[test]
    fn raw_text_is_escaped() {
        let latex = to_latex("100% & more");
        assert_eq!(body(&latex), "100\\% \\& more\n\n");
    }

    #[test]
    fn author_goes_in_preamble() {
        let mut report = Report::new();
        let metadata = Metadata {
            author: Some("Ada".to_string()),
            copyright: None,
        };
        let renderer = LatexRenderer::new(&metadata, &mut report);
        assert!(renderer.document_open().contains("\\author{Ada}\n\\begin{document}\n"));
    }
}
