use super::types::{Block, BlockKind};
use crate::parsing::text::{Position, Span};
use crate::parsing::tree::NodeId;

/// A block still open on the builder's path from the root to the active leaf.
///
/// Hooks mutate the frame; closing it finalizes the block into the arena.
#[derive(Debug, Clone)]
pub struct Frame {
    pub block: Block,
    pub span: Span,
    /// Already finalized children, in document order.
    pub children: Vec<NodeId>,
}

impl Frame {
    pub fn open(block: Block, start: Position, content_start: Position) -> Self {
        Self {
            block,
            span: Span {
                start,
                content_start,
                end: content_start,
                content_end: content_start,
            },
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.block.kind()
    }

    /// Closes without a token: both end positions become `at`.
    pub fn cut_off(&mut self, at: Position) {
        let at = at.max(self.span.content_start);
        self.span.end = at;
        self.span.content_end = at;
    }
}

/// Ambient state shared by the open blocks.
#[derive(Debug, Default, Clone)]
pub struct ParsingContext {
    /// Set when inline math closes; cleared at the next line.
    list_item_ends_suppressed: bool,
}

impl ParsingContext {
    pub fn leave(&mut self, kind: BlockKind) {
        if kind == BlockKind::InlineMath {
            self.list_item_ends_suppressed = true;
        }
    }

    pub fn start_line(&mut self) {
        self.list_item_ends_suppressed = false;
    }

    /// A list item spanning inline math must not end on the line the math closes.
    pub fn list_item_ends_suppressed(&self) -> bool {
        self.list_item_ends_suppressed
    }
}
