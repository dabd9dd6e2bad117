//! `[key=value]` option groups that follow an opening token.

use std::collections::BTreeMap;

use super::types::BlockKind;
use crate::diagnostics::{DiagnosticKind, Report};
use crate::parsing::text::LineCursor;

/// Options gathered for one block, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Values accepted as "true" by boolean options, compared case-insensitively.
const TRUTHY: &[&str] = &["allow", "allowed", "1", "true", "ok", "yes"];

pub fn parse_bool(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    TRUTHY.contains(&lowered.as_str())
}

/// Reads option groups at the cursor and advances past each one.
///
/// A group that meets whitespace or the end of the line before `]` is plain
/// text and ends the scan. A group without `=` is reported and also ends it.
/// Keys outside `pool` are reported and dropped.
pub fn parse_option_groups(
    cur: &mut LineCursor,
    kind: BlockKind,
    pool: &[&str],
    report: &mut Report,
) -> Options {
    let mut options = Options::default();
    while cur.current() == Some('[') {
        let Some(group) = scan_group(cur) else {
            break;
        };
        let Some((key, value)) = group.key_value else {
            report.warn(
                DiagnosticKind::MalformedOptionGroup { group: group.text },
                Some(cur.position()),
            );
            break;
        };
        if pool.contains(&key.as_str()) {
            options.0.insert(key, value);
        } else {
            report.warn(
                DiagnosticKind::UnknownOption { key, block: kind },
                Some(cur.position()),
            );
        }
        cur.bump_n(group.len);
    }
    options
}

struct Group {
    /// Raw text between the brackets.
    text: String,
    key_value: Option<(String, String)>,
    /// Code points from `[` through `]`.
    len: usize,
}

fn scan_group(cur: &LineCursor) -> Option<Group> {
    let mut text = String::new();
    let mut key: Option<String> = None;
    let mut value = String::new();
    let mut escaped = false;
    let mut offset = 1;
    loop {
        let c = cur.peek(offset)?;
        offset += 1;
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
            text.push(c);
            continue;
        } else if c == ']' {
            break;
        } else if c.is_whitespace() {
            return None;
        } else if c == '=' && key.is_none() {
            key = Some(std::mem::take(&mut value));
            text.push(c);
            continue;
        }
        text.push(c);
        value.push(c);
    }
    Some(Group {
        text,
        key_value: key.map(|k| (k, value)),
        len: offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::text::{Line, Source};
    use pretty_assertions::assert_eq;

    fn line(text: &str) -> Line {
        Source::read(text).lines()[0].clone()
    }

    fn parse(text: &str, pool: &[&str]) -> (Options, usize, Report) {
        let l = line(text);
        let mut cur = LineCursor::new(&l);
        let mut report = Report::new();
        let options = parse_option_groups(&mut cur, BlockKind::Code, pool, &mut report);
        (options, cur.column(), report)
    }

    #[test]
    fn reads_consecutive_groups() {
        let (options, column, report) = parse("[lang=rust][file=main.rs]fn", &["lang", "file"]);
        assert_eq!(options.get("lang"), Some("rust"));
        assert_eq!(options.get("file"), Some("main.rs"));
        assert_eq!(column, 25);
        assert!(report.is_empty());
    }

    #[test]
    fn unknown_key_is_reported_and_skipped() {
        let (options, column, report) = parse("[colour=red][lang=c]", &["lang"]);
        assert_eq!(options.get("colour"), None);
        assert_eq!(options.get("lang"), Some("c"));
        assert_eq!(column, 20);
        assert!(matches!(
            report.diagnostics()[0].kind,
            DiagnosticKind::UnknownOption { ref key, .. } if key == "colour"
        ));
    }

    #[test]
    fn group_without_equals_stops_scanning() {
        let (options, column, report) = parse("[rust][lang=c]", &["lang"]);
        assert!(options.is_empty());
        assert_eq!(column, 0);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.diagnostics()[0].kind,
            DiagnosticKind::MalformedOptionGroup { ref group } if group == "rust"
        ));
    }

    #[test]
    fn whitespace_makes_group_plain_text() {
        let (options, column, report) = parse("[see also] text", &["lang"]);
        assert!(options.is_empty());
        assert_eq!(column, 0);
        assert!(report.is_empty());
    }

    #[test]
    fn unterminated_group_is_plain_text() {
        let (options, column, report) = parse("[lang=rust", &["lang"]);
        assert!(options.is_empty());
        assert_eq!(column, 0);
        assert!(report.is_empty());
    }

    #[test]
    fn escaped_bracket_is_part_of_value() {
        let (options, _, _) = parse(r"[src=a\]b.png]", &["src"]);
        assert_eq!(options.get("src"), Some("a]b.png"));
    }

    #[test]
    fn value_may_contain_equals() {
        let (options, _, _) = parse("[src=a=b]", &["src"]);
        assert_eq!(options.get("src"), Some("a=b"));
    }

    #[test]
    fn truthy_values() {
        assert!(parse_bool("Yes"));
        assert!(parse_bool("1"));
        assert!(parse_bool("ALLOWED"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool(""));
    }
}
