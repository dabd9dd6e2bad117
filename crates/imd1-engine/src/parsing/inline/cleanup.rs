use super::types::Piece;

/// Merges adjacent raw text and leftover delimiters into single raw pieces.
///
/// Modifiers, links and embedded blocks are hard boundaries; their own
/// children are cleaned recursively. Running it twice changes nothing.
pub fn coalesce(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len());
    let mut text = String::new();
    for piece in pieces {
        match piece {
            Piece::Raw(raw) => text.push_str(&raw),
            Piece::Delimiter(kind) => text.push(kind.literal()),
            boundary => {
                if !text.is_empty() {
                    out.push(Piece::Raw(std::mem::take(&mut text)));
                }
                out.push(match boundary {
                    Piece::Modifier(kind, children) => Piece::Modifier(kind, coalesce(children)),
                    Piece::Href(address, children) => Piece::Href(address, coalesce(children)),
                    other => other,
                });
            }
        }
    }
    if !text.is_empty() {
        out.push(Piece::Raw(text));
    }
    out
}

/// Trims leading whitespace of the first piece and trailing whitespace of
/// the last, when they are raw text.
pub fn trim_edges(mut pieces: Vec<Piece>) -> Vec<Piece> {
    if let Some(Piece::Raw(first)) = pieces.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Piece::Raw(last)) = pieces.last_mut() {
        *last = last.trim_end().to_string();
    }
    pieces.retain(|p| !matches!(p, Piece::Raw(raw) if raw.is_empty()));
    pieces
}
