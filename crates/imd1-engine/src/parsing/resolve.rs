//! Post-segmentation passes: raw content, inline resolution and the
//! per-variant fixups that need the finished tree.

use serde::Serialize;

use super::blocks::{Block, BlockKind, DocumentTree};
use super::inline;
use super::text::{Source, slice_between};
use super::tree::NodeId;
use crate::diagnostics::{DiagnosticKind, Report};

/// Document metadata declared in `|meta>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub author: Option<String>,
    pub copyright: Option<String>,
}

/// Copies literal source text into every block that keeps it.
pub fn fill_raw_content(tree: &mut DocumentTree, source: &Source) {
    for id in tree.descendants(tree.root()) {
        let node = tree.get_mut(id);
        let Some(span) = node.span else {
            continue;
        };
        let is_code = node.kind() == BlockKind::Code;
        let Some(raw) = node.block.raw_content_mut() else {
            continue;
        };
        if !raw.is_empty() {
            continue;
        }
        let text = slice_between(source, span.content_start, span.content_end);
        *raw = if is_code { trim_listing(&text) } else { text };
    }
}

/// Drops the rest of the opening fence line when it is blank, and trailing
/// whitespace.
fn trim_listing(text: &str) -> String {
    let body = match text.split_once('\n') {
        Some((first, rest)) if first.trim().is_empty() => rest,
        _ => text,
    };
    body.trim_end().to_string()
}

/// Resolves every paragraph's inline content.
pub fn resolve_paragraphs(tree: &mut DocumentTree, source: &Source, report: &mut Report) {
    let paragraphs: Vec<NodeId> = tree
        .descendants(tree.root())
        .into_iter()
        .filter(|&id| tree.get(id).kind() == BlockKind::Paragraph)
        .collect();
    log::debug!("resolving {} paragraph(s)", paragraphs.len());
    for paragraph in paragraphs {
        inline::resolve_paragraph(tree, source, paragraph, report);
    }
}

/// Footnote numbering, tab selection, subfigure padding and metadata.
pub fn finish_blocks(tree: &mut DocumentTree, report: &mut Report) -> Metadata {
    let mut metadata = Metadata::default();
    let mut footnotes = 0;
    for id in tree.descendants(tree.root()) {
        let parent_padding = tree.parent(id).and_then(|parent| match &tree.get(parent).block {
            Block::Figure(figure) => figure.padding.clone(),
            _ => None,
        });
        match &mut tree.get_mut(id).block {
            Block::Footnote { index } => {
                footnotes += 1;
                *index = footnotes;
            }
            Block::SubFigure(subfigure) => {
                if subfigure.padding.is_none() {
                    subfigure.padding = parent_padding;
                }
            }
            Block::Author { raw } => metadata.author = Some(raw.trim().to_string()),
            Block::Copyright { raw } => metadata.copyright = Some(raw.trim().to_string()),
            Block::Tabs { .. } => select_tab(tree, id, report),
            _ => {}
        }
    }
    metadata
}

fn select_tab(tree: &mut DocumentTree, tabs: NodeId, report: &mut Report) {
    let tab_ids: Vec<NodeId> = tree
        .children(tabs)
        .iter()
        .copied()
        .filter(|&id| tree.get(id).kind() == BlockKind::Tab)
        .collect();
    let node = tree.get_mut(tabs);
    let at = node.span.map(|s| s.start);
    let Block::Tabs { selected } = &mut node.block else {
        return;
    };
    if *selected > 0 && *selected >= tab_ids.len() {
        report.warn(
            DiagnosticKind::TabIndexOutOfRange {
                selected: *selected,
                count: tab_ids.len(),
            },
            at,
        );
        *selected = 0;
    }
    let chosen = *selected;
    for (i, id) in tab_ids.into_iter().enumerate() {
        if let Block::Tab { selected, .. } = &mut tree.get_mut(id).block {
            *selected = i == chosen;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("\nfn main() {}\n", "fn main() {}")]
    #[case("  \n    indented\n", "    indented")]
    #[case("same line\nnext\n\n", "same line\nnext")]
    fn listing_trimming(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(trim_listing(raw), expected);
    }
}
