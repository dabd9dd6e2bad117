//! # Parsing pipeline
//!
//! Source text flows through five passes, each finishing before the next
//! starts:
//!
//! 1. [`text`]: line model and positions
//! 2. [`blocks`]: the block-tree builder state machine
//! 3. [`paragraphs`]: paragraph segmentation of the text between blocks
//! 4. [`resolve`] and [`inline`]: raw content, inline resolution, fixups
//! 5. [`bibliography`]: cross-referencing
//!
//! ## Key Invariants
//!
//! - The arena tree passes [`tree::Tree::verify`] after the pipeline
//! - No inline delimiter is left unresolved
//! - Reference indices follow sorted bibliography tags

pub mod bibliography;
pub mod blocks;
pub mod inline;
pub mod paragraphs;
pub mod resolve;
pub mod snapshot;
pub mod text;
pub mod tree;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostics::Report;
use bibliography::Bibliography;
use blocks::{BlockBuilder, BlockKind, DocumentTree};
use resolve::Metadata;
use text::Source;
use tree::TreeError;

/// Failures that indicate a defect in the parser, never in the input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("structural invariant violated: expected {expected}, found {found}")]
    StructuralInvariantViolation {
        expected: BlockKind,
        found: BlockKind,
    },
    #[error("document tree is inconsistent: {0}")]
    Tree(#[from] TreeError),
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Base directory for relative bibinfo file paths.
    pub base_dir: Option<PathBuf>,
}

impl ParseOptions {
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

#[derive(Debug)]
pub struct ParsedDoc {
    pub tree: DocumentTree,
    pub metadata: Metadata,
    pub bibliography: Bibliography,
}

/// Builds the block tree without paragraphs or inline content.
pub fn build_blocks(source: &Source, report: &mut Report) -> Result<DocumentTree, ParseError> {
    let mut builder = BlockBuilder::new();
    for line in source.lines() {
        builder.push(line, report)?;
    }
    Ok(builder.finish())
}

/// Runs every pass over `text`.
pub fn parse_document(
    text: &str,
    options: &ParseOptions,
    report: &mut Report,
) -> Result<ParsedDoc, ParseError> {
    let source = Source::read(text);
    let mut tree = build_blocks(&source, report)?;
    tree.verify()?;

    paragraphs::segment(&mut tree, &source);
    tree.verify()?;

    resolve::fill_raw_content(&mut tree, &source);
    resolve::resolve_paragraphs(&mut tree, &source, report);
    let metadata = resolve::finish_blocks(&mut tree, report);
    let bibliography =
        bibliography::cross_reference(&mut tree, options.base_dir.as_deref(), report);
    tree.verify()?;

    Ok(ParsedDoc {
        tree,
        metadata,
        bibliography,
    })
}
