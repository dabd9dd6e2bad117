//! Link recognition.
//!
//! A pushdown automaton over the paragraph's source text. The stack holds
//! unmatched `[` (with the index of its delimiter piece) and `(` markers. A
//! completed `[text](address)` collapses the pieces after the opening bracket
//! into an [`Piece::Href`].
//!
//! Backslash escapes are copied through untouched so that the emphasis pass
//! can interpret them; an escaped bracket never takes part in a link.

use crate::parsing::blocks::DocumentTree;
use crate::parsing::text::{Position, Source, Span};
use crate::parsing::tree::NodeId;

use super::types::{DelimiterKind, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    AfterCloseBracket,
    AfterSpace,
    InsideLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    /// Index of the open-bracket delimiter in the output.
    Bracket(usize),
    Paren,
}

struct LinkAutomaton {
    state: State,
    stack: Vec<Marker>,
    pieces: Vec<Piece>,
    text: String,
    /// Delimiter index of the bracket matched by the last `]`.
    link_text_begin: Option<usize>,
    escaped: bool,
    emitted: bool,
    last_was_space: bool,
}

impl LinkAutomaton {
    fn new() -> Self {
        Self {
            state: State::Start,
            stack: Vec::new(),
            pieces: Vec::new(),
            text: String::new(),
            link_text_begin: None,
            escaped: false,
            emitted: false,
            last_was_space: false,
        }
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.pieces.push(Piece::Raw(std::mem::take(&mut self.text)));
        }
    }

    fn write(&mut self, c: char) {
        self.text.push(c);
        self.emitted = true;
        self.last_was_space = c == ' ';
    }

    /// Line breaks read as a single space.
    fn line_break(&mut self) {
        self.escaped = false;
        if self.emitted && !self.last_was_space {
            self.space();
        }
    }

    fn embed(&mut self, child: NodeId) {
        self.flush();
        self.pieces.push(Piece::Embedded(child));
        self.emitted = true;
        self.last_was_space = false;
        self.state = match self.state {
            State::InsideLink => {
                self.stack.clear();
                State::Start
            }
            _ => State::AfterSpace,
        };
    }

    fn space(&mut self) {
        self.state = State::AfterSpace;
        self.write(' ');
    }

    fn feed(&mut self, c: char) {
        if self.escaped {
            self.escaped = false;
            self.write(c);
            return;
        }
        match c {
            '\\' => {
                self.escaped = true;
                self.write(c);
            }
            '[' => self.open_bracket(),
            ']' => self.close_bracket(),
            ' ' => self.space(),
            '(' => self.open_paren(),
            ')' => self.close_paren(),
            _ => {
                if self.state != State::InsideLink {
                    self.state = State::AfterSpace;
                }
                self.write(c);
            }
        }
    }

    fn open_bracket(&mut self) {
        if self.state == State::InsideLink {
            self.write('[');
            return;
        }
        self.flush();
        self.pieces.push(Piece::Delimiter(DelimiterKind::OpenBracket));
        self.stack.push(Marker::Bracket(self.pieces.len() - 1));
        self.emitted = true;
        self.last_was_space = false;
        self.state = State::Start;
    }

    fn close_bracket(&mut self) {
        if self.state != State::InsideLink {
            self.flush();
            match self.stack.last() {
                Some(&Marker::Bracket(index)) => {
                    self.stack.pop();
                    self.link_text_begin = Some(index);
                    self.state = State::AfterCloseBracket;
                }
                _ => {
                    self.stack.clear();
                    self.state = State::Start;
                }
            }
        }
        self.write(']');
    }

    fn open_paren(&mut self) {
        match self.state {
            State::AfterCloseBracket | State::InsideLink => {
                self.state = State::InsideLink;
                self.stack.push(Marker::Paren);
            }
            State::Start | State::AfterSpace => self.state = State::AfterSpace,
        }
        self.write('(');
    }

    fn close_paren(&mut self) {
        match self.state {
            State::InsideLink => {
                if self.stack.last() == Some(&Marker::Paren) {
                    self.stack.pop();
                } else {
                    self.state = State::Start;
                }
            }
            _ => self.state = State::AfterSpace,
        }
        let nested = self.stack.last() == Some(&Marker::Paren);
        if self.state == State::InsideLink && !nested {
            self.close_link();
        } else {
            self.write(')');
        }
    }

    /// `text` holds `](address` at this point.
    fn close_link(&mut self) {
        self.stack.clear();
        self.state = State::Start;
        let address: String = std::mem::take(&mut self.text).chars().skip(2).collect();
        let Some(begin) = self.link_text_begin.take() else {
            self.pieces.push(Piece::Raw(format!("]({address})")));
            return;
        };
        let children = self
            .pieces
            .split_off(begin + 1)
            .into_iter()
            .map(|piece| match piece {
                Piece::Delimiter(DelimiterKind::OpenBracket) => Piece::raw("["),
                other => other,
            })
            .collect();
        self.pieces.truncate(begin);
        self.pieces.push(Piece::Href(address, children));
        self.last_was_space = false;
    }

    fn finish(mut self) -> Vec<Piece> {
        self.flush();
        self.pieces
    }
}

/// Walks the paragraph content, embedding its block children where they
/// start, and returns the link-resolved pieces.
pub fn resolve_links(tree: &DocumentTree, source: &Source, paragraph: NodeId) -> Vec<Piece> {
    let Some(span) = tree.get(paragraph).span else {
        return Vec::new();
    };
    let children: Vec<(NodeId, Span)> = tree
        .children(paragraph)
        .iter()
        .filter_map(|&id| tree.get(id).span.map(|s| (id, s)))
        .collect();
    let mut next_child = children.iter().peekable();

    let mut automaton = LinkAutomaton::new();
    let mut pos = span.content_start;
    while pos < span.content_end {
        if next_child.peek().is_some_and(|(_, child)| child.start <= pos) {
            if let Some(&(id, child)) = next_child.next() {
                automaton.embed(id);
                pos = pos.max(child.end);
            }
            continue;
        }
        let Some(line) = source.line(pos.line) else {
            break;
        };
        match line.get(pos.column) {
            Some(c) => {
                automaton.feed(c);
                pos.column += 1;
            }
            None => {
                automaton.line_break();
                pos = Position::new(pos.line + 1, 0);
            }
        }
    }
    for &(id, _) in next_child {
        automaton.embed(id);
    }
    automaton.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> Vec<Piece> {
        let mut automaton = LinkAutomaton::new();
        for c in text.chars() {
            automaton.feed(c);
        }
        automaton.finish()
    }

    #[test]
    fn plain_link() {
        assert_eq!(
            run("[hey](https://example.com)"),
            vec![Piece::Href(
                "https://example.com".to_string(),
                vec![Piece::raw("hey")]
            )]
        );
    }

    #[test]
    fn link_in_running_text() {
        assert_eq!(
            run("see [docs](a.html) now"),
            vec![
                Piece::raw("see "),
                Piece::Href("a.html".to_string(), vec![Piece::raw("docs")]),
                Piece::raw(" now"),
            ]
        );
    }

    #[test]
    fn nested_parentheses_stay_in_address() {
        assert_eq!(
            run("[w](x_(y))"),
            vec![Piece::Href("x_(y)".to_string(), vec![Piece::raw("w")])]
        );
    }

    #[test]
    fn brackets_without_address_stay_delimiters() {
        assert_eq!(
            run("[a] (b)"),
            vec![
                Piece::Delimiter(DelimiterKind::OpenBracket),
                Piece::raw("a"),
                Piece::raw("] (b)"),
            ]
        );
    }

    #[test]
    fn unmatched_close_bracket_is_text() {
        assert_eq!(run("a]b"), vec![Piece::raw("a"), Piece::raw("]b")]);
    }

    #[test]
    fn escaped_bracket_is_not_a_link() {
        assert_eq!(
            run(r"\[a](b)"),
            vec![Piece::raw(r"\[a"), Piece::raw("](b)")]
        );
    }

    #[test]
    fn inner_open_bracket_becomes_literal_inside_link() {
        assert_eq!(
            run("[[x](y)"),
            vec![
                Piece::Delimiter(DelimiterKind::OpenBracket),
                Piece::Href("y".to_string(), vec![Piece::raw("x")]),
            ]
        );
    }

    #[test]
    fn line_break_reads_as_space() {
        let mut automaton = LinkAutomaton::new();
        automaton.feed('a');
        automaton.line_break();
        automaton.line_break();
        automaton.feed('b');
        assert_eq!(automaton.finish(), vec![Piece::raw("a b")]);
    }
}
