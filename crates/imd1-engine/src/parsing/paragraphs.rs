//! Paragraph segmentation.
//!
//! Literal text between recognized blocks becomes paragraphs. Gaps are split
//! at blank lines; paragraph-eligible blocks (inline code, inline math,
//! footnotes, references) do not split a gap and are moved into the
//! paragraph that contains them.

use super::blocks::{Block, BlockNode, DocumentTree};
use super::text::{Position, Source, Span, preview};
use super::tree::NodeId;

/// Segments the whole tree, children before parents.
pub fn segment(tree: &mut DocumentTree, source: &Source) {
    segment_node(tree, source, tree.root());
}

fn segment_node(tree: &mut DocumentTree, source: &Source, id: NodeId) {
    let children = tree.children(id).to_vec();
    for &child in &children {
        if tree.get(child).kind().digs_for_paragraphs() {
            segment_node(tree, source, child);
        }
    }
    let Some(span) = tree.get(id).span else {
        return;
    };

    let mut out = Vec::with_capacity(children.len());
    let mut pending = Vec::new();
    let mut before = span.content_start;
    for child in children {
        let node = tree.get(child);
        if node.kind().is_paragraph_eligible() {
            pending.push(child);
            continue;
        }
        let Some(child_span) = node.span else {
            out.push(child);
            continue;
        };
        fill_gap(tree, source, before, child_span.start, &mut pending, &mut out);
        out.push(child);
        before = child_span.end;
    }
    fill_gap(tree, source, before, span.content_end, &mut pending, &mut out);
    tree.set_children(id, out);
}

fn fill_gap(
    tree: &mut DocumentTree,
    source: &Source,
    before: Position,
    after: Position,
    pending: &mut Vec<NodeId>,
    out: &mut Vec<NodeId>,
) {
    let inside: Vec<Span> = pending.iter().filter_map(|&c| tree.get(c).span).collect();
    let ranges = detect_paragraphs(source, before, after, &inside);
    if ranges.is_empty() {
        out.append(pending);
        return;
    }
    let paragraphs: Vec<NodeId> = ranges
        .iter()
        .map(|&range| tree.insert(BlockNode::new(Block::Paragraph, range)))
        .collect();

    let mut loose = Vec::new();
    for child in pending.drain(..) {
        let span = tree
            .get(child)
            .span
            .unwrap_or_else(|| Span::between(before, before));
        match ranges.iter().position(|range| range.contains(&span)) {
            Some(index) => tree.append_child(paragraphs[index], child),
            None => {
                log::debug!("block {child} at {} fits no paragraph", span.start);
                loose.push(child);
            }
        }
    }
    out.extend(paragraphs);
    out.append(&mut loose);
}

/// Splits the text between two positions at blank lines and returns the
/// extent of every run that holds more than whitespace.
///
/// A run ends at column 0 of the blank line that terminates it, or at
/// `after` for the final run. Blank lines inside one of the `inside` spans
/// belong to that block and never end a run.
pub fn detect_paragraphs(
    source: &Source,
    before: Position,
    after: Position,
    inside: &[Span],
) -> Vec<Span> {
    let mut ranges = Vec::new();
    if after < before {
        return ranges;
    }
    let mut text = String::new();
    let mut start = before;
    for index in before.line..=after.line {
        let Some(line) = source.line(index) else {
            break;
        };
        let from = if index == before.line { before.column } else { 0 };
        let to = if index == after.line {
            after.column
        } else {
            line.len()
        };
        let (from, to) = (from.min(line.len()), to.min(line.len()));
        if from < to {
            text.extend(&line.chars()[from..to]);
        }
        text.push(' ');

        let last = index == after.line;
        let at = Position::new(index, 0);
        let covered = inside.iter().any(|span| span.start < at && at < span.end);
        if (line.is_blank() && !covered) || last {
            let content = text.trim();
            if !content.is_empty() {
                let end = if last {
                    after
                } else {
                    Position::new(index, 0)
                };
                log::trace!("paragraph {start}..{end}: {}", preview(content, 40));
                ranges.push(Span::between(start, end));
                start = end;
            }
            text.clear();
        }
    }
    ranges
}
