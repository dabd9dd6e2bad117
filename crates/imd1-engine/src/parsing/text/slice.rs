use super::lines::Source;
use super::span::Position;

/// Extracts the literal source text between two positions.
///
/// Line boundaries become `\n`. Lines after the first keep their literal
/// indentation so that code listings retain their layout.
pub fn slice_between(source: &Source, start: Position, end: Position) -> String {
    let mut out = String::new();
    if end < start {
        return out;
    }
    for index in start.line..=end.line {
        let Some(line) = source.line(index) else {
            break;
        };
        let from = if index == start.line {
            start.column.min(line.len())
        } else {
            out.push('\n');
            out.push_str(line.prefix());
            0
        };
        let to = if index == end.line {
            end.column.min(line.len())
        } else {
            line.len()
        };
        if from < to {
            out.extend(&line.chars()[from..to]);
        }
    }
    out
}

/// Truncates `text` to `max` code points with a "..." suffix if needed.
///
/// Used for human-readable snapshot output.
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut s: String = text.chars().take(max).collect();
    s.push_str("...");
    s
}
