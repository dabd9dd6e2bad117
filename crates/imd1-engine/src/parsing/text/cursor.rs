use super::lines::Line;
use super::span::Position;

/// A read cursor over one line's content, measured in code points.
///
/// Block recognizers examine the line at the cursor; the builder advances it.
/// The cursor only moves forward.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    line: &'a Line,
    column: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(line: &'a Line) -> Self {
        Self { line, column: 0 }
    }

    pub fn line(&self) -> &'a Line {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn line_index(&self) -> usize {
        self.line.index
    }

    pub fn indentation(&self) -> usize {
        self.line.indentation
    }

    pub fn position(&self) -> Position {
        Position::new(self.line.index, self.column)
    }

    pub fn eof(&self) -> bool {
        self.column >= self.line.len()
    }

    /// The code point under the cursor.
    pub fn current(&self) -> Option<char> {
        self.line.get(self.column)
    }

    /// The code point `offset` places after the cursor.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.line.get(self.column + offset)
    }

    /// The code point just before the cursor.
    pub fn previous(&self) -> Option<char> {
        self.column.checked_sub(1).and_then(|c| self.line.get(c))
    }

    /// True if the content from the cursor onwards begins with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        let rest = self.line.chars().get(self.column..).unwrap_or_default();
        let mut n = 0;
        for c in pat.chars() {
            if rest.get(n) != Some(&c) {
                return false;
            }
            n += 1;
        }
        true
    }

    /// True if the content up to and including the cursor ends with `token`
    /// and the token is not preceded by an odd run of backslashes.
    pub fn ends_with_unescaped(&self, token: &str) -> bool {
        let token: Vec<char> = token.chars().collect();
        let end = self.column + 1;
        if end > self.line.len() || token.len() > end {
            return false;
        }
        let begin = end - token.len();
        if self.line.chars()[begin..end] != token[..] {
            return false;
        }
        self.escapes_before(begin) % 2 == 0
    }

    /// True if the code point under the cursor is not escaped.
    pub fn is_unescaped(&self) -> bool {
        self.escapes_before(self.column) % 2 == 0
    }

    fn escapes_before(&self, column: usize) -> usize {
        self.line.chars()[..column.min(self.line.len())]
            .iter()
            .rev()
            .take_while(|&&c| c == '\\')
            .count()
    }

    /// Advances by one code point.
    pub fn bump(&mut self) {
        self.column += 1;
    }

    /// Advances by `n` code points.
    pub fn bump_n(&mut self, n: usize) {
        self.column += n;
    }
}
