//! Flat arena tree.
//!
//! Nodes live in one vector and refer to each other by [`NodeId`]. A node owns
//! its value and an ordered child list; the parent link is an index used for
//! navigation only. Nodes detached by restructuring stay in the arena but are
//! unreachable from the root.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::text::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Values that may carry a source span. Nodes without one are skipped by
/// the ordering checks in [`Tree::verify`].
pub trait Spanned {
    fn span(&self) -> Option<Span>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {node} is listed under {listed_under} but links to {links_to:?}")]
    ParentMismatch {
        node: NodeId,
        listed_under: NodeId,
        links_to: Option<NodeId>,
    },
    #[error("node {node} is reachable more than once")]
    SharedNode { node: NodeId },
    #[error("root node has a parent")]
    RootHasParent,
    #[error("node {node} has a malformed span")]
    MalformedSpan { node: NodeId },
    #[error("node {node} starts before its previous sibling ends")]
    SiblingOrder { node: NodeId },
}

#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
    root: NodeId,
}

impl<T> Tree<T> {
    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![Node {
                value: root,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a detached node.
    pub fn insert(&mut self, value: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &T {
        &self.nodes[id.0].value
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.0].value
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Replaces the child list of `parent`, detaching previous children that
    /// are not in the new list.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        let previous = std::mem::take(&mut self.nodes[parent.0].children);
        for old in previous {
            if self.nodes[old.0].parent == Some(parent) {
                self.nodes[old.0].parent = None;
            }
        }
        for &child in &children {
            self.detach(child);
            self.nodes[child.0].parent = Some(parent);
        }
        self.nodes[parent.0].children = children;
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Puts `new` where `old` sits in its parent's child list.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        let Some(parent) = self.nodes[old.0].parent else {
            return;
        };
        self.detach(new);
        if let Some(slot) = self.nodes[parent.0]
            .children
            .iter_mut()
            .find(|c| **c == old)
        {
            *slot = new;
        }
        self.nodes[old.0].parent = None;
        self.nodes[new.0].parent = Some(parent);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
    }

    /// Pre-order traversal of the subtree rooted at `id`, `id` included.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev());
        }
        out
    }

    /// First node in pre-order whose value satisfies `pred`.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| pred(self.get(id)))
    }

    /// First value in pre-order for which `f` yields something.
    pub fn find_map<U>(&self, f: impl Fn(&T) -> Option<U>) -> Option<U> {
        self.descendants(self.root)
            .into_iter()
            .find_map(|id| f(self.get(id)))
    }
}

impl<T: Spanned> Tree<T> {
    /// Checks parent links, single ownership, span shape and sibling order
    /// for every node reachable from the root.
    pub fn verify(&self) -> Result<(), TreeError> {
        if self.nodes[self.root.0].parent.is_some() {
            return Err(TreeError::RootHasParent);
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                return Err(TreeError::SharedNode { node: id });
            }
            if self.get(id).span().is_some_and(|span| !span.is_well_formed()) {
                return Err(TreeError::MalformedSpan { node: id });
            }
            let mut previous_end = None;
            for &child in self.children(id) {
                if self.nodes[child.0].parent != Some(id) {
                    return Err(TreeError::ParentMismatch {
                        node: child,
                        listed_under: id,
                        links_to: self.nodes[child.0].parent,
                    });
                }
                if let Some(span) = self.get(child).span() {
                    if previous_end.is_some_and(|end| span.start < end) {
                        return Err(TreeError::SiblingOrder { node: child });
                    }
                    previous_end = Some(span.end);
                }
                stack.push(child);
            }
        }
        Ok(())
    }
}
