use super::span::Position;

const TAB_WIDTH: usize = 4;

/// One source line after indentation has been measured and stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Zero-based line index in the document.
    pub index: usize,
    /// Indentation width: tabs count 4, spaces count 1.
    pub indentation: usize,
    /// The literal indentation characters that were stripped.
    prefix: String,
    /// Code points after the indentation prefix.
    chars: Vec<char>,
}

impl Line {
    fn measure(index: usize, raw: &str) -> Self {
        let mut indentation = 0;
        let mut prefix = String::new();
        let mut chars = raw.chars().peekable();
        while let Some(&c) = chars.peek() {
            match c {
                ' ' => indentation += 1,
                '\t' => indentation += TAB_WIDTH,
                _ => break,
            }
            prefix.push(c);
            chars.next();
        }
        Self {
            index,
            indentation,
            prefix,
            chars: chars.collect(),
        }
    }

    /// The line's content, indentation excluded.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// A line with no content after its indentation. Whitespace-only lines are blank.
    pub fn is_blank(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<char> {
        self.chars.get(column).copied()
    }

    /// Position one past the last code point of the line.
    pub fn end(&self) -> Position {
        Position::new(self.index, self.len())
    }
}

/// A document split into measured lines.
#[derive(Debug, Clone)]
pub struct Source {
    lines: Vec<Line>,
}

impl Source {
    /// Normalizes `\r\n` and lone `\r` to `\n` and splits into lines.
    ///
    /// Always yields at least one line, so an empty document is a single blank line.
    pub fn read(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let lines = normalized
            .split('\n')
            .enumerate()
            .map(|(index, raw)| Line::measure(index, raw))
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The final position of the document: end of its last line.
    pub fn end(&self) -> Position {
        self.lines
            .last()
            .map(Line::end)
            .unwrap_or_default()
    }
}
