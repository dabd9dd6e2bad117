//! Pipeline tests for the parsing module.
//!
//! Fixtures (`.imd`) live in `fixtures/`; every fixture must parse without
//! errors and pass the structural invariants before its own assertions run.


use crate::diagnostics::Report;
use crate::parsing::blocks::kinds::figure::Dock;
use crate::parsing::blocks::kinds::math::MathDelimiter;
use crate::parsing::blocks::{Block, BlockKind, DocumentTree};
use crate::parsing::inline::{self, Inline};
use crate::parsing::snapshot::{invariants, outline};
use crate::parsing::text::Source;
use crate::parsing::tree::NodeId;
use crate::parsing::{ParseOptions, ParsedDoc, build_blocks, paragraphs, parse_document};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn parse(text: &str) -> (ParsedDoc, Report) {
    let mut report = Report::new();
    let doc = parse_document(text, &ParseOptions::default(), &mut report)
        .expect("parse should succeed");
    invariants(&doc.tree);
    (doc, report)
}

fn load_fixture(name: &str) -> (ParsedDoc, Report) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(format!("{fixtures_dir}/{name}.imd")).unwrap();
    let (doc, report) = parse(&text);
    assert!(!report.has_errors(), "{name}: {:?}", report.diagnostics());
    (doc, report)
}

fn of_kind(tree: &DocumentTree, kind: BlockKind) -> Vec<NodeId> {
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&id| tree.get(id).kind() == kind)
        .collect()
}

// Fixture tests

#[test]
fn fixture_heading_paragraph() {
    let (doc, report) = load_fixture("heading_paragraph");
    assert!(report.is_empty(), "{:?}", report.diagnostics());
    let outline = outline(&doc.tree);
    assert!(
        outline.contains("  heading(1)\n    inline\n      text \"Title\"\n"),
        "{outline}"
    );
    assert_eq!(of_kind(&doc.tree, BlockKind::Paragraph).len(), 2);
    assert!(
        outline.contains("text \". This line joins the paragraph above.\""),
        "{outline}"
    );
    assert!(outline.contains("bold\n"), "{outline}");
    assert!(outline.contains("strikeout\n"), "{outline}");
    assert!(outline.contains("href \"https://example.com\""), "{outline}");
}

#[test]
fn fixture_nested_lists() {
    let (doc, _) = load_fixture("nested_lists");
    let tree = &doc.tree;
    assert_eq!(of_kind(tree, BlockKind::UnorderedItem).len(), 3);
    assert_eq!(of_kind(tree, BlockKind::OrderedItem).len(), 2);

    let ordered = of_kind(tree, BlockKind::OrderedList);
    assert_eq!(ordered.len(), 1);
    let parent = tree.parent(ordered[0]).expect("ordered list has a parent");
    assert_eq!(tree.get(parent).kind(), BlockKind::UnorderedItem);

    let top_level: Vec<BlockKind> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.get(id).kind())
        .collect();
    assert_eq!(
        top_level,
        vec![BlockKind::UnorderedList, BlockKind::Paragraph]
    );
}

#[test]
fn fixture_textbox() {
    let (doc, _) = load_fixture("textbox");
    let tree = &doc.tree;
    let &[textbox] = of_kind(tree, BlockKind::TextBox).as_slice() else {
        panic!("expected one textbox");
    };
    assert_eq!(
        tree.get(textbox).block,
        Block::TextBox {
            class: Some("note".to_string())
        }
    );

    let &[title] = of_kind(tree, BlockKind::TextBoxTitle).as_slice() else {
        panic!("expected one title");
    };
    let title_children = tree.children(title);
    assert_eq!(title_children.len(), 1);
    assert_eq!(
        tree.get(title_children[0]).block,
        Block::Inline(Inline::Document)
    );

    let code = of_kind(tree, BlockKind::InlineCode);
    assert_eq!(
        tree.get(code[0]).block,
        Block::InlineCode {
            raw: "inline code".to_string()
        }
    );
    let math = of_kind(tree, BlockKind::InlineMath);
    assert!(matches!(&tree.get(math[0]).block, Block::InlineMath { raw, .. } if raw == "x^2"));
}

#[test]
fn fixture_figure_tabs() {
    let (doc, report) = load_fixture("figure_tabs");
    assert!(report.is_empty(), "{:?}", report.diagnostics());
    let tree = &doc.tree;

    let figure = of_kind(tree, BlockKind::Figure);
    let Block::Figure(figure) = &tree.get(figure[0]).block else {
        panic!("expected a figure");
    };
    assert_eq!(figure.dock, Dock::Top);
    assert_eq!(figure.max_width.as_deref(), Some("40em"));

    let subfigures: Vec<_> = of_kind(tree, BlockKind::SubFigure)
        .into_iter()
        .filter_map(|id| match &tree.get(id).block {
            Block::SubFigure(sub) => Some((sub.src.clone(), sub.width.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        subfigures,
        vec![
            (Some("cat.png".to_string()), Some("50%".to_string())),
            (Some("dog.png".to_string()), None),
        ]
    );

    let selected: Vec<_> = of_kind(tree, BlockKind::Tab)
        .into_iter()
        .filter_map(|id| match &tree.get(id).block {
            Block::Tab { name, selected } => Some((name.clone(), *selected)),
            _ => None,
        })
        .collect();
    assert_eq!(
        selected,
        vec![
            (Some("First".to_string()), false),
            (Some("Second".to_string()), true),
        ]
    );
}

#[test]
fn fixture_math_code() {
    let (doc, _) = load_fixture("math_code");
    let tree = &doc.tree;

    let math = of_kind(tree, BlockKind::Math);
    let Block::Math { delimiter, raw } = &tree.get(math[0]).block else {
        panic!("expected display math");
    };
    assert_eq!(*delimiter, MathDelimiter::DoubleDollar);
    assert_eq!(raw.trim(), "e = mc^2");

    let code = of_kind(tree, BlockKind::Code);
    let Block::Code(listing) = &tree.get(code[0]).block else {
        panic!("expected a listing");
    };
    assert_eq!(listing.language, "rust");
    assert_eq!(listing.file.as_deref(), Some("main.rs"));
    assert_eq!(listing.raw, "fn main() {}");

    assert_eq!(of_kind(tree, BlockKind::Comment).len(), 1);
    let footnote = of_kind(tree, BlockKind::Footnote);
    assert_eq!(tree.get(footnote[0]).block, Block::Footnote { index: 1 });
}

// Behaviour tests

#[test]
fn crossed_markers_stay_literal() {
    let (doc, report) = parse("_*hello_*");
    assert!(report.is_empty());
    assert_eq!(
        outline(&doc.tree),
        "document\n  paragraph\n    inline\n      text \"_*hello_*\"\n"
    );
}

#[test]
fn link_becomes_href_node() {
    let (doc, _) = parse("[hey](https://example.com)");
    assert_eq!(
        outline(&doc.tree),
        "document\n  paragraph\n    inline\n      href \"https://example.com\"\n        text \"hey\"\n"
    );
}

#[rstest]
#[case::footnote("before |footnote>x\n\ny<footnote| after", BlockKind::Footnote, "after", "<footnote|")]
#[case::inline_code("a `co\n\nde` b", BlockKind::InlineCode, "b", "`")]
#[case::inline_math("a $x\n\ny$ b", BlockKind::InlineMath, "b", "$")]
fn blank_line_inside_inline_block_keeps_one_paragraph(
    #[case] input: &str,
    #[case] inner: BlockKind,
    #[case] tail: &str,
    #[case] closer: &str,
) {
    let (doc, _) = parse(input);
    let tree = &doc.tree;
    let top: Vec<BlockKind> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.get(id).kind())
        .collect();
    assert_eq!(top, vec![BlockKind::Paragraph]);

    let &[block] = of_kind(tree, inner).as_slice() else {
        panic!("expected one {inner:?}");
    };
    let paragraph = tree.children(tree.root())[0];
    assert!(std::iter::successors(tree.parent(block), |&id| tree.parent(id)).any(|id| id == paragraph));

    let raw: Vec<&str> = tree
        .descendants(tree.root())
        .into_iter()
        .filter_map(|id| match &tree.get(id).block {
            Block::Inline(Inline::Raw(text)) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(raw.iter().filter(|text| text.trim() == tail).count(), 1, "{raw:?}");
    assert!(raw.iter().all(|text| !text.contains(closer)), "{raw:?}");
}

#[test]
fn two_item_list() {
    let (doc, _) = parse("- A\n- B");
    let tree = &doc.tree;
    let lists = of_kind(tree, BlockKind::UnorderedList);
    assert_eq!(lists.len(), 1);
    assert_eq!(tree.children(lists[0]).len(), 2);
}

#[test]
fn footnotes_are_numbered_in_document_order() {
    let (doc, _) = parse("a|footnote>x<footnote| b|footnote>y<footnote|\n\n|footnote>z<footnote|");
    let indices: Vec<_> = of_kind(&doc.tree, BlockKind::Footnote)
        .into_iter()
        .map(|id| tree_footnote(&doc.tree, id))
        .collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

fn tree_footnote(tree: &DocumentTree, id: NodeId) -> usize {
    match tree.get(id).block {
        Block::Footnote { index } => index,
        _ => 0,
    }
}

#[test]
fn out_of_range_tab_selection_falls_back_to_first() {
    let (doc, report) = parse("|tabs>[selected=4]\n|tab>[name=a]\nx\n<tab|\n<tabs|");
    assert_eq!(report.len(), 1);
    let tab = of_kind(&doc.tree, BlockKind::Tab)[0];
    assert!(matches!(doc.tree.get(tab).block, Block::Tab { selected: true, .. }));
}

#[test]
fn cleanup_is_idempotent_on_resolved_paragraphs() {
    let text = "a *b* [c](d) \\_e_ ~~f~~ [g";
    let source = Source::read(text);
    let mut report = Report::new();
    let mut tree = build_blocks(&source, &mut report).unwrap();
    paragraphs::segment(&mut tree, &source);
    let paragraph = of_kind(&tree, BlockKind::Paragraph)[0];

    let once = inline::resolve_pieces(&tree, &source, paragraph, &mut report);
    let twice = inline::cleanup::coalesce(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn author_and_copyright_are_trimmed() {
    let (doc, _) = parse("|meta>\n|author>  Ada <author|\n|copyright> 2024 <copyright|\n<meta|");
    assert_eq!(doc.metadata.author.as_deref(), Some("Ada"));
    assert_eq!(doc.metadata.copyright.as_deref(), Some("2024"));
}
