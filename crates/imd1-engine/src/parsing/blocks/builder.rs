use crate::diagnostics::Report;
use crate::parsing::ParseError;
use crate::parsing::text::{Line, LineCursor, Position, Span};
use crate::parsing::tree::{NodeId, Tree};

use super::{
    containers::{Frame, ParsingContext},
    types::{Block, BlockKind, BlockNode, DocumentTree},
};

/// The blank-run counter before the first line: the document start counts
/// as a long run of blank lines.
const INITIAL_BLANK_RUN: usize = 16;

/// Incremental state machine that turns lines into a tree of block spans.
///
/// The path holds every open block from the document (index 0) down to the
/// active leaf. Each non-blank line is consumed by alternating a close phase
/// and an open phase until the cursor reaches the end of the line.
pub struct BlockBuilder {
    tree: DocumentTree,
    path: Vec<Frame>,
    context: ParsingContext,
    blank_run: usize,
    end: Position,
}

impl BlockBuilder {
    pub fn new() -> Self {
        let origin = Position::default();
        Self {
            tree: Tree::new(BlockNode::new(Block::Document, Span::default())),
            path: vec![Frame::open(Block::Document, origin, origin)],
            context: ParsingContext::default(),
            blank_run: INITIAL_BLANK_RUN,
            end: origin,
        }
    }

    pub fn push(&mut self, line: &Line, report: &mut Report) -> Result<(), ParseError> {
        self.end = line.end();
        if line.is_blank() {
            self.blank_run += 1;
            return Ok(());
        }

        self.context.start_line();
        let mut cur = LineCursor::new(line);
        while !cur.eof() {
            if cur.column() > 0 {
                self.blank_run = 0;
            }
            self.close_phase(&mut cur)?;
            if cur.eof() {
                break;
            }
            self.open_phase(&mut cur, report);
        }
        self.blank_run = 0;
        Ok(())
    }

    /// Closes everything still open at the document's final position.
    pub fn finish(mut self) -> DocumentTree {
        let end = self.end;
        while self.path.len() > 1 {
            self.cut_off_leaf(end);
        }
        let root = self.tree.root();
        let children = self
            .path
            .pop()
            .map(|frame| frame.children)
            .unwrap_or_default();
        *self.tree.get_mut(root) = BlockNode::new(
            Block::Document,
            Span::between(Position::default(), end),
        );
        self.tree.set_children(root, children);
        self.tree
    }

    fn leaf(&self) -> &Frame {
        // the document frame is only removed by `finish`
        &self.path[self.path.len() - 1]
    }

    fn close_phase(&mut self, cur: &mut LineCursor) -> Result<(), ParseError> {
        loop {
            let leaf = self.leaf();
            if leaf
                .block
                .check_ends(&leaf.span, cur, self.blank_run, &self.context)
                .ends()
            {
                self.close_leaf(cur);
                continue;
            }
            match self.soft_discard_target(cur) {
                Some(depth) => self.soft_discard(depth, cur)?,
                None => return Ok(()),
            }
        }
    }

    fn open_phase(&mut self, cur: &mut LineCursor, report: &mut Report) {
        let round_start = cur.column();
        while !cur.eof() {
            let parent = &self.leaf().block;
            let candidate = parent
                .kind()
                .allowed_children()
                .iter()
                .find_map(|kind| kind.try_start(cur).filter(|b| parent.accepts_child(b)));
            let Some(block) = candidate else {
                break;
            };
            self.open(block, cur, report);
        }
        if cur.column() == round_start {
            cur.bump();
        }
    }

    fn open(&mut self, mut block: Block, cur: &mut LineCursor, report: &mut Report) {
        cur.bump_n(block.seek_after_start());
        let start = Position::new(
            cur.line_index(),
            cur.column().saturating_sub(block.opener_len()),
        );
        block.on_start(cur, report);
        log::debug!(">>> {} at {start}", block.kind());
        self.path.push(Frame::open(block, start, cur.position()));
    }

    /// Normal close of the active leaf on its own end condition.
    fn close_leaf(&mut self, cur: &mut LineCursor) {
        if self.path.len() <= 1 {
            return;
        }
        cur.bump_n(self.leaf().block.seek_after_end());
        if let Some(mut frame) = self.path.pop() {
            frame.block.on_end(&mut frame.span, cur.position());
            self.finalize(frame);
        }
    }

    /// Close of the active leaf without a token of its own.
    fn cut_off_leaf(&mut self, at: Position) {
        if self.path.len() <= 1 {
            return;
        }
        if let Some(mut frame) = self.path.pop() {
            frame.cut_off(at);
            self.finalize(frame);
        }
    }

    fn finalize(&mut self, frame: Frame) -> NodeId {
        let kind = frame.kind();
        self.context.leave(kind);
        log::debug!("<<< {kind} at {}", frame.span.end);
        let id = self.tree.insert(BlockNode::new(frame.block, frame.span));
        self.tree.set_children(id, frame.children);
        let depth = self.path.len() - 1;
        self.path[depth].children.push(id);
        id
    }

    /// Depth of an ancestor whose closing token ends at the cursor while the
    /// active leaf is a list block, which has no token of its own.
    fn soft_discard_target(&self, cur: &LineCursor) -> Option<usize> {
        if !self.leaf().kind().is_list() {
            return None;
        }
        let depth = (1..self.path.len())
            .rev()
            .find(|&d| !self.path[d].kind().is_list())?;
        let frame = &self.path[depth];
        frame
            .block
            .check_ends(&frame.span, cur, self.blank_run, &self.context)
            .normally
            .then_some(depth)
    }

    /// Closes the list blocks above `depth` where the ancestor's closing
    /// token begins, then closes the ancestor itself.
    fn soft_discard(&mut self, depth: usize, cur: &mut LineCursor) -> Result<(), ParseError> {
        let target = self.path[depth].kind();
        let token_len = self.path[depth]
            .block
            .closing_token()
            .map_or(0, |t| t.chars().count());
        let token_start = Position::new(
            cur.line_index(),
            (cur.column() + 1).saturating_sub(token_len),
        );
        log::debug!("soft discard up to {target} at {token_start}");

        while self.path.len() > depth + 1 {
            let found = self.leaf().kind();
            if !found.is_list() {
                return Err(ParseError::StructuralInvariantViolation {
                    expected: BlockKind::UnorderedItem,
                    found,
                });
            }
            self.cut_off_leaf(token_start);
        }

        let found = self.leaf().kind();
        if found != target {
            return Err(ParseError::StructuralInvariantViolation {
                expected: target,
                found,
            });
        }
        self.close_leaf(cur);
        Ok(())
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::text::Source;
    use pretty_assertions::assert_eq;

    fn build(text: &str) -> (DocumentTree, Report) {
        let source = Source::read(text);
        let mut report = Report::new();
        let mut builder = BlockBuilder::new();
        for line in source.lines() {
            builder.push(line, &mut report).unwrap();
        }
        let tree = builder.finish();
        tree.verify().unwrap();
        (tree, report)
    }

    /// Indented kind outline of the tree.
    fn outline(tree: &DocumentTree) -> String {
        fn walk(tree: &DocumentTree, id: NodeId, depth: usize, out: &mut String) {
            out.push_str(&"  ".repeat(depth));
            out.push_str(tree.get(id).kind().name());
            out.push('\n');
            for &child in tree.children(id) {
                walk(tree, child, depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(tree, tree.root(), 0, &mut out);
        out
    }

    fn span_of(tree: &DocumentTree, kind: BlockKind) -> Span {
        let id = tree.find(|n| n.kind() == kind).unwrap();
        tree.get(id).span.unwrap()
    }

    #[test]
    fn empty_document() {
        let (tree, report) = build("");
        assert_eq!(outline(&tree), "document\n");
        assert!(report.is_empty());
    }

    #[test]
    fn heading_spans_to_next_content_line() {
        let (tree, _) = build("# Title\n\nbody");
        assert_eq!(outline(&tree), "document\n  heading\n");
        let span = span_of(&tree, BlockKind::Heading);
        assert_eq!(span.start, Position::new(0, 0));
        assert_eq!(span.content_start, Position::new(0, 1));
        assert_eq!(span.end, Position::new(2, 0));
        assert_eq!(span.content_end, Position::new(2, 0));
    }

    #[test]
    fn textbox_sections_nest() {
        let (tree, _) = build("|textbox>\n|title>T<title|\n|content>body<content|\n<textbox|");
        assert_eq!(
            outline(&tree),
            "document\n  textbox\n    textbox title\n    textbox content\n"
        );
        let title = span_of(&tree, BlockKind::TextBoxTitle);
        assert_eq!(title.start, Position::new(1, 0));
        assert_eq!(title.content_start, Position::new(1, 7));
        assert_eq!(title.content_end, Position::new(1, 8));
        assert_eq!(title.end, Position::new(1, 15));
    }

    #[test]
    fn sibling_bullets_share_one_list() {
        let (tree, _) = build("- A\n- B");
        assert_eq!(
            outline(&tree),
            "document\n  unordered list\n    unordered list item\n    unordered list item\n"
        );
    }

    #[test]
    fn deeper_bullet_nests() {
        let (tree, _) = build("- A\n  - B\n- C");
        assert_eq!(
            outline(&tree),
            concat!(
                "document\n",
                "  unordered list\n",
                "    unordered list item\n",
                "      unordered list\n",
                "        unordered list item\n",
                "    unordered list item\n",
            )
        );
    }

    #[test]
    fn blank_line_splits_lists() {
        let (tree, _) = build("- A\n\n- B");
        assert_eq!(
            outline(&tree),
            concat!(
                "document\n",
                "  unordered list\n",
                "    unordered list item\n",
                "  unordered list\n",
                "    unordered list item\n",
            )
        );
    }

    #[test]
    fn list_closes_before_plain_text() {
        let (tree, _) = build("- A\nafter");
        let list = span_of(&tree, BlockKind::UnorderedList);
        assert_eq!(list.end, Position::new(1, 0));
    }

    #[test]
    fn marker_change_starts_a_new_ordered_list() {
        let (tree, _) = build("1. one\n2. two\na. letter");
        assert_eq!(
            outline(&tree),
            concat!(
                "document\n",
                "  ordered list\n",
                "    ordered list item\n",
                "    ordered list item\n",
                "  ordered list\n",
                "    ordered list item\n",
            )
        );
    }

    #[test]
    fn ordered_list_closes_before_bullets() {
        let (tree, _) = build("1. one\n- bullet");
        assert_eq!(
            outline(&tree),
            concat!(
                "document\n",
                "  ordered list\n",
                "    ordered list item\n",
                "  unordered list\n",
                "    unordered list item\n",
            )
        );
    }

    #[test]
    fn plain_line_closes_list_before_ancestor_token() {
        let (tree, _) = build("|textbox>|content>\n- item\n<content|<textbox|");
        let list = span_of(&tree, BlockKind::UnorderedList);
        assert_eq!(list.end, Position::new(2, 0));
        let content = span_of(&tree, BlockKind::TextBoxContent);
        assert_eq!(content.end, Position::new(2, 9));
    }

    #[test]
    fn ancestor_token_soft_discards_open_list() {
        let (tree, report) =
            build("|textbox>|content>\n- item\n  more<content|<textbox|\nafter");
        assert!(report.is_empty());
        assert_eq!(
            outline(&tree),
            concat!(
                "document\n",
                "  textbox\n",
                "    textbox content\n",
                "      unordered list\n",
                "        unordered list item\n",
            )
        );
        let item = span_of(&tree, BlockKind::UnorderedItem);
        assert_eq!(item.end, Position::new(2, 4));
        let list = span_of(&tree, BlockKind::UnorderedList);
        assert_eq!(list.end, Position::new(2, 4));
        let content = span_of(&tree, BlockKind::TextBoxContent);
        assert_eq!(content.content_end, Position::new(2, 4));
        assert_eq!(content.end, Position::new(2, 13));
        let textbox = span_of(&tree, BlockKind::TextBox);
        assert_eq!(textbox.end, Position::new(2, 22));
    }

    #[test]
    fn code_listing_is_a_raw_zone() {
        let (tree, _) = build("```[lang=rust]\n|textbox> not a box\n```");
        assert_eq!(outline(&tree), "document\n  code listing\n");
        let id = tree.find(|n| n.kind() == BlockKind::Code).unwrap();
        let Block::Code(code) = &tree.get(id).block else {
            panic!("expected code");
        };
        assert_eq!(code.language, "rust");
        let span = tree.get(id).span.unwrap();
        assert_eq!(span.content_start, Position::new(0, 14));
        assert_eq!(span.content_end, Position::new(2, 0));
    }

    #[test]
    fn unterminated_block_closes_at_end_of_document() {
        let (tree, _) = build("|footnote>never closed\nstill inside");
        let span = span_of(&tree, BlockKind::Footnote);
        assert_eq!(span.end, Position::new(1, 12));
        assert_eq!(span.content_end, Position::new(1, 12));
    }

    #[test]
    fn empty_inline_code_closes_immediately() {
        let (tree, _) = build("a `` b");
        let span = span_of(&tree, BlockKind::InlineCode);
        assert_eq!(span.content_start, Position::new(0, 3));
        assert_eq!(span.content_end, Position::new(0, 3));
        assert_eq!(span.end, Position::new(0, 4));
    }

    #[test]
    fn inline_math_keeps_list_item_open_for_the_line() {
        let (tree, _) = build("- $a\nb$ tail\n- next");
        assert_eq!(
            outline(&tree),
            concat!(
                "document\n",
                "  unordered list\n",
                "    unordered list item\n",
                "      inline math\n",
                "    unordered list item\n",
            )
        );
    }

    #[test]
    fn options_are_read_by_start_hooks() {
        let (tree, report) = build("|figure>[dock=top][bogus=1]\n<figure|");
        assert_eq!(report.len(), 1);
        let id = tree.find(|n| n.kind() == BlockKind::Figure).unwrap();
        let Block::Figure(figure) = &tree.get(id).block else {
            panic!("expected figure");
        };
        assert_eq!(
            figure.dock,
            crate::parsing::blocks::kinds::figure::Dock::Top
        );
    }

    #[test]
    fn escaped_tag_is_text() {
        let (tree, _) = build(r"\|ref>x<ref|");
        assert_eq!(outline(&tree), "document\n");
    }
}
