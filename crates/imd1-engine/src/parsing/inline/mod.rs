//! # Inline resolution
//!
//! Turns each paragraph's source text into inline nodes in three ordered
//! passes over an intermediate [`Piece`] list:
//!
//! 1. [`links`]: the link automaton, which also embeds the paragraph's block
//!    children at their source positions
//! 2. [`emphasis`]: the delimiter stack for `_`, `*` and `~`
//! 3. [`cleanup`]: coalescing of raw text and unpaired delimiters
//!
//! The result is written back under one [`Inline::Document`] node.
//!
//! ## Key Invariants
//!
//! - No [`Inline::Delimiter`] survives [`resolve_paragraph`]
//! - Embedded blocks keep their relative order

pub mod cleanup;
pub mod emphasis;
pub mod links;
pub mod types;

pub use types::{DelimiterKind, Inline, ModifierKind, Piece};

use crate::diagnostics::Report;
use crate::parsing::blocks::{BlockKind, BlockNode, DocumentTree};
use crate::parsing::text::Source;
use crate::parsing::tree::NodeId;

/// Runs the three passes over one paragraph.
pub fn resolve_pieces(
    tree: &DocumentTree,
    source: &Source,
    paragraph: NodeId,
    report: &mut Report,
) -> Vec<Piece> {
    let at = tree
        .get(paragraph)
        .span
        .map(|s| s.content_start)
        .unwrap_or_default();
    let linked = links::resolve_links(tree, source, paragraph);
    let emphasized = emphasis::resolve_emphasis(linked, report, at);
    cleanup::trim_edges(cleanup::coalesce(emphasized))
}

/// Resolves a paragraph in place and returns its inline document node.
///
/// Inside a heading or textbox title the inline document takes the
/// paragraph's place.
pub fn resolve_paragraph(
    tree: &mut DocumentTree,
    source: &Source,
    paragraph: NodeId,
    report: &mut Report,
) -> NodeId {
    let pieces = resolve_pieces(tree, source, paragraph, report);
    let document = tree.insert(BlockNode::inline(Inline::Document));
    let children = materialize(tree, pieces);
    tree.set_children(document, children);

    let unwrap = tree.parent(paragraph).is_some_and(|parent| {
        matches!(
            tree.get(parent).kind(),
            BlockKind::Heading | BlockKind::TextBoxTitle
        )
    });
    if unwrap {
        tree.replace(paragraph, document);
    } else {
        tree.set_children(paragraph, vec![document]);
    }
    document
}

fn materialize(tree: &mut DocumentTree, pieces: Vec<Piece>) -> Vec<NodeId> {
    pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Embedded(id) => id,
            Piece::Raw(raw) => tree.insert(BlockNode::inline(Inline::Raw(raw))),
            Piece::Delimiter(kind) => tree.insert(BlockNode::inline(Inline::Delimiter(kind))),
            Piece::Modifier(kind, children) => {
                let id = tree.insert(BlockNode::inline(Inline::Modifier(kind)));
                let children = materialize(tree, children);
                tree.set_children(id, children);
                id
            }
            Piece::Href(address, children) => {
                let id = tree.insert(BlockNode::inline(Inline::Href { address }));
                let children = materialize(tree, children);
                tree.set_children(id, children);
                id
            }
        })
        .collect()
}
