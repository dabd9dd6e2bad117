pub mod diagnostics;
pub mod io;
pub mod parsing;
pub mod render;

#[cfg(test)]
pub mod tests;

use std::time::Instant;

pub use diagnostics::{Diagnostic, DiagnosticKind, Report, Severity};
pub use parsing::resolve::Metadata;
pub use parsing::{ParseError, ParseOptions, ParsedDoc, parse_document};
pub use render::{HtmlMode, HtmlRenderer, LatexRenderer, TagRenderer};

/// Output of a full compile.
#[derive(Debug)]
pub struct Rendered {
    pub output: String,
    pub metadata: Metadata,
}

/// Parses `text`, logging how long the pipeline took.
pub fn parse(
    text: &str,
    options: &ParseOptions,
    report: &mut Report,
) -> Result<ParsedDoc, ParseError> {
    let started = Instant::now();
    let doc = parse_document(text, options, report)?;
    log::info!(
        "parsed {} nodes in {:?} ({} diagnostics)",
        doc.tree.len(),
        started.elapsed(),
        report.len()
    );
    Ok(doc)
}

pub fn to_html(
    text: &str,
    mode: HtmlMode,
    options: &ParseOptions,
    report: &mut Report,
) -> Result<Rendered, ParseError> {
    let doc = parse(text, options, report)?;
    let started = Instant::now();
    let output = {
        let mut renderer = HtmlRenderer::new(mode, &doc.metadata, report);
        render::render(&doc.tree, &mut renderer)
    };
    log::info!("rendered HTML in {:?}", started.elapsed());
    Ok(Rendered {
        output,
        metadata: doc.metadata,
    })
}

pub fn to_latex(
    text: &str,
    options: &ParseOptions,
    report: &mut Report,
) -> Result<Rendered, ParseError> {
    let doc = parse(text, options, report)?;
    let started = Instant::now();
    let output = {
        let mut renderer = LatexRenderer::new(&doc.metadata, report);
        render::render(&doc.tree, &mut renderer)
    };
    log::info!("rendered LaTeX in {:?}", started.elapsed());
    Ok(Rendered {
        output,
        metadata: doc.metadata,
    })
}
