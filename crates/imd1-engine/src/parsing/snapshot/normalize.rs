use std::fmt::Write;

use serde::Serialize;

use crate::parsing::blocks::{Block, DocumentTree};
use crate::parsing::inline::Inline;
use crate::parsing::text::{Span, preview};
use crate::parsing::tree::NodeId;

const PREVIEW_LEN: usize = 60;

#[derive(Debug, Serialize)]
pub struct Snap {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Snap>,
}

pub fn normalize(tree: &DocumentTree) -> Snap {
    snap(tree, tree.root())
}

fn snap(tree: &DocumentTree, id: NodeId) -> Snap {
    let node = tree.get(id);
    Snap {
        kind: kind_label(&node.block),
        span: node.span.as_ref().map(span_label),
        text: detail(&node.block),
        children: tree.children(id).iter().map(|&c| snap(tree, c)).collect(),
    }
}

/// One line per node, children indented by two spaces.
pub fn outline(tree: &DocumentTree) -> String {
    let mut out = String::new();
    write_outline(&normalize(tree), 0, &mut out);
    out
}

fn write_outline(snap: &Snap, depth: usize, out: &mut String) {
    let _ = write!(out, "{:indent$}{}", "", snap.kind, indent = depth * 2);
    if !snap.text.is_empty() {
        let _ = write!(out, " {:?}", snap.text);
    }
    out.push('\n');
    for child in &snap.children {
        write_outline(child, depth + 1, out);
    }
}

fn span_label(span: &Span) -> String {
    format!("{}..{}", span.start, span.end)
}

fn kind_label(block: &Block) -> String {
    match block {
        Block::Inline(inline) => match inline {
            Inline::Document => "inline".to_string(),
            Inline::Raw(_) => "text".to_string(),
            Inline::Delimiter(_) => "delimiter".to_string(),
            Inline::Modifier(kind) => kind.name().to_string(),
            Inline::Href { .. } => "href".to_string(),
        },
        Block::Heading { level, .. } => format!("heading({level})"),
        other => other.kind().name().to_string(),
    }
}

fn detail(block: &Block) -> String {
    match block {
        Block::Comment { raw }
        | Block::Html { raw }
        | Block::Latex { raw }
        | Block::InlineCode { raw }
        | Block::Math { raw, .. }
        | Block::InlineMath { raw, .. }
        | Block::Author { raw }
        | Block::Copyright { raw } => preview(raw, PREVIEW_LEN),
        Block::Code(code) => format!("{}: {}", code.language, preview(&code.raw, PREVIEW_LEN)),
        Block::Footnote { index } => index.to_string(),
        Block::Ref(reference) => match reference.index {
            Some(index) => format!("{} -> {index}", reference.tag()),
            None => format!("{} -> ?", reference.tag()),
        },
        Block::Tab { name, selected } => {
            let name = name.as_deref().unwrap_or_default();
            if *selected {
                format!("{name} (selected)")
            } else {
                name.to_string()
            }
        }
        Block::Inline(Inline::Raw(text)) => preview(text, PREVIEW_LEN),
        Block::Inline(Inline::Delimiter(kind)) => kind.to_string(),
        Block::Inline(Inline::Href { address }) => address.clone(),
        _ => String::new(),
    }
}
