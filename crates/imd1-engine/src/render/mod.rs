//! # Rendering
//!
//! Renderers see the finished tree through [`TagRenderer`]: one string before
//! a node's children and one after. [`render`] drives the depth-first walk.
//!
//! ## Modules
//!
//! - **`html`**: HTML output in four document modes
//! - **`latex`**: a standalone LaTeX article
//! - **`escape`**: text escaping for both formats

pub mod escape;
pub mod html;
pub mod latex;

pub use html::{HtmlMode, HtmlRenderer};
pub use latex::LatexRenderer;

use crate::parsing::blocks::DocumentTree;
use crate::parsing::tree::NodeId;

pub trait TagRenderer {
    fn open(&mut self, tree: &DocumentTree, id: NodeId) -> String;
    fn close(&mut self, tree: &DocumentTree, id: NodeId) -> String;
}

pub fn render(tree: &DocumentTree, renderer: &mut impl TagRenderer) -> String {
    let mut out = String::new();
    walk(tree, tree.root(), renderer, &mut out);
    out
}

fn walk(tree: &DocumentTree, id: NodeId, renderer: &mut impl TagRenderer, out: &mut String) {
    out.push_str(&renderer.open(tree, id));
    for &child in tree.children(id) {
        walk(tree, child, renderer, out);
    }
    out.push_str(&renderer.close(tree, id));
}
