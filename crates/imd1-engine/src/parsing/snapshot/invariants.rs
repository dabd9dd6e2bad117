use crate::parsing::blocks::{Block, DocumentTree};
use crate::parsing::inline::Inline;

/// Panics when the finished tree breaks a structural guarantee.
pub fn check(tree: &DocumentTree) {
    if let Err(err) = tree.verify() {
        panic!("tree fails verification: {err}");
    }
    for id in tree.descendants(tree.root()) {
        let node = tree.get(id);
        assert!(
            !matches!(node.block, Block::Inline(Inline::Delimiter(_))),
            "unresolved delimiter left at node {id}: {:?}",
            node.block
        );
        let (Some(span), Some(parent)) = (node.span, tree.parent(id)) else {
            continue;
        };
        if let Some(parent_span) = tree.get(parent).span {
            assert!(
                parent_span.start <= span.start,
                "node {id} starts at {} before its parent at {}",
                span.start,
                parent_span.start
            );
            assert!(
                span.end <= parent_span.end,
                "node {id} ends at {} after its parent at {}",
                span.end,
                parent_span.end
            );
        }
    }
}
