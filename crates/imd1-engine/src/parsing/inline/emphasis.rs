//! Emphasis and strikeout resolution over link-resolved pieces.
//!
//! A single left-to-right scan keeps a stack of unpaired delimiter runs. A new
//! run pairs only with a stack top of the same marker; a different marker on
//! top blocks it, so `_*a_*` stays literal.

use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::text::Position;

use super::types::{DelimiterKind, ModifierKind, Piece};

/// Characters that may follow a backslash.
pub const ESCAPABLE: &[char] = &[
    '_', '*', '|', '~', '<', '>', '\\', '$', '`', '#', '[', ']', '(', ')',
];

#[derive(Debug, Clone, Copy)]
struct Run {
    kind: DelimiterKind,
    remaining: usize,
}

struct EmphasisResolver<'r> {
    out: Vec<Piece>,
    stack: Vec<Run>,
    text: String,
    report: &'r mut Report,
    at: Position,
}

impl EmphasisResolver<'_> {
    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.out.push(Piece::Raw(std::mem::take(&mut self.text)));
        }
    }

    fn scan(&mut self, raw: &str) {
        let chars: Vec<char> = raw.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\\' {
                match chars.get(i + 1) {
                    Some(&next) if ESCAPABLE.contains(&next) => self.text.push(next),
                    Some(&next) => {
                        self.report.warn(
                            DiagnosticKind::UnrecognizedEscape { escaped: next },
                            Some(self.at),
                        );
                        self.text.push('\\');
                        self.text.push(next);
                    }
                    None => self.text.push('\\'),
                }
                i += 2;
                continue;
            }
            let Some(kind) = DelimiterKind::from_emphasis_char(c) else {
                self.text.push(c);
                i += 1;
                continue;
            };
            let run = chars[i..].iter().take_while(|&&x| x == c).count();
            self.flush();
            self.delimiter_run(kind, run);
            i += run;
        }
    }

    fn delimiter_run(&mut self, kind: DelimiterKind, mut count: usize) {
        while count > 0 {
            let Some(top) = self.stack.last().copied().filter(|top| top.kind == kind) else {
                break;
            };
            let extract = if kind == DelimiterKind::Tilde {
                1
            } else if top.remaining >= 2 && count >= 2 {
                2
            } else {
                1
            };
            let Some(last) = self
                .out
                .iter()
                .rposition(|p| *p == Piece::Delimiter(kind))
            else {
                break;
            };
            let modifier = match (kind, extract) {
                (DelimiterKind::Tilde, _) => ModifierKind::Strikeout,
                (_, 2) => ModifierKind::Bold,
                _ => ModifierKind::Italic,
            };
            let children = self.out.split_off(last + 1);
            self.out.truncate(last + 1 - extract);
            self.out.push(Piece::Modifier(modifier, children));

            count -= extract;
            let remaining = top.remaining - extract;
            if remaining == 0 {
                self.stack.pop();
            } else if let Some(top) = self.stack.last_mut() {
                top.remaining = remaining;
            }
        }
        if count > 0 {
            self.stack.push(Run {
                kind,
                remaining: count,
            });
            self.out
                .extend(std::iter::repeat_n(Piece::Delimiter(kind), count));
        }
    }

    fn piece(&mut self, piece: Piece) {
        match piece {
            Piece::Raw(raw) => self.scan(&raw),
            Piece::Href(address, children) => {
                self.flush();
                let children = resolve_emphasis(children, &mut *self.report, self.at);
                self.out.push(Piece::Href(address, children));
            }
            other => {
                self.flush();
                self.out.push(other);
            }
        }
    }
}

/// Pairs `_`, `*` and `~` runs into modifiers and interprets backslash
/// escapes. Unpaired markers stay as [`Piece::Delimiter`].
///
/// `at` locates escape warnings.
pub fn resolve_emphasis(pieces: Vec<Piece>, report: &mut Report, at: Position) -> Vec<Piece> {
    let mut resolver = EmphasisResolver {
        out: Vec::with_capacity(pieces.len()),
        stack: Vec::new(),
        text: String::new(),
        report,
        at,
    };
    for piece in pieces {
        resolver.piece(piece);
    }
    resolver.flush();
    resolver.out
}
