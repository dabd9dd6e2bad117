//! Text escaping for the output formats.

/// Escapes text content for HTML. Besides `& < > " ' /`, the characters the
/// markup language treats specially are written as numeric references so a
/// browser-side math or highlighting script never picks them up.
pub fn html(text: &str) -> String {
    let safe = html_escape::encode_safe(text);
    let mut out = String::with_capacity(safe.len());
    for c in safe.chars() {
        match c {
            '$' => out.push_str("&#36;"),
            '`' => out.push_str("&#96;"),
            '^' => out.push_str("&#94;"),
            '~' => out.push_str("&#126;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '|' => out.push_str("&#124;"),
            '\\' => out.push_str("&#92;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes a double-quoted attribute value.
pub fn attribute(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// Math source for client-side KaTeX: only the angle brackets need care.
pub fn katex(text: &str) -> String {
    text.replace('<', "\\lt ").replace('>', "\\gt ")
}

pub fn latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' | '}' | '$' | '&' | '%' | '#' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            c => out.push(c),
        }
    }
    out
}
