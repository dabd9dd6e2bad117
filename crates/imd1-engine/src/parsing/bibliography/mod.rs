//! # Bibliography
//!
//! Collects `|bibinfo>` declarations into one tag-keyed [`Bibliography`],
//! numbers it, resolves every `|ref>` against it and caches the rendered
//! listing on every `|bibliography>` block.
//!
//! ## Key Invariants
//!
//! - Reference indices follow sorted tag order, never first use
//! - A tag keeps its first definition

pub mod entry;
pub mod load;
pub mod render;

use std::path::Path;

pub use entry::{BibEntry, Bibliography, EntryFields, EntryKind};

use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::blocks::{Block, DocumentTree};

/// Runs the cross-reference pass over a resolved tree.
pub fn cross_reference(
    tree: &mut DocumentTree,
    base_dir: Option<&Path>,
    report: &mut Report,
) -> Bibliography {
    let nodes = tree.descendants(tree.root());

    let mut bibliography = Bibliography::new();
    for &id in &nodes {
        let node = tree.get(id);
        let Block::BibInfo(info) = &node.block else {
            continue;
        };
        let at = node.span.map(|s| s.start);
        for entry in load::load_entries(info, base_dir, report, at) {
            bibliography.insert(entry, report, at);
        }
    }
    bibliography.assign_indices();
    log::debug!("bibliography holds {} entries", bibliography.len());

    let mut listing = None;
    for &id in &nodes {
        let node = tree.get_mut(id);
        let at = node.span.map(|s| s.start);
        match &mut node.block {
            Block::Ref(reference) => match bibliography.get(reference.tag()) {
                Some(entry) => {
                    reference.index = Some(entry.index);
                    if reference.file.as_deref().is_none_or(str::is_empty) {
                        reference.file = entry.ref_file.clone();
                    }
                }
                None => report.warn(
                    DiagnosticKind::DanglingReference {
                        tag: reference.tag().to_string(),
                    },
                    at,
                ),
            },
            Block::Bibliography { html, latex } => {
                let (cached_html, cached_latex) = listing.get_or_insert_with(|| {
                    (
                        render::html_listing(&bibliography),
                        render::latex_listing(&bibliography),
                    )
                });
                html.clone_from(cached_html);
                latex.clone_from(cached_latex);
            }
            _ => {}
        }
    }
    bibliography
}
