use crate::parsing::text::LineCursor;

/// Display math delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDelimiter {
    /// `\[` … `\]`
    Brackets,
    /// `$$` … `$$`
    DoubleDollar,
    Equation,
    EquationStar,
    Align,
    AlignStar,
}

impl MathDelimiter {
    /// Environment-style openers, matched on their last code point.
    const ENVIRONMENTS: [MathDelimiter; 5] = [
        MathDelimiter::Equation,
        MathDelimiter::EquationStar,
        MathDelimiter::Align,
        MathDelimiter::AlignStar,
        MathDelimiter::Brackets,
    ];

    pub fn open(self) -> &'static str {
        match self {
            MathDelimiter::Brackets => r"\[",
            MathDelimiter::DoubleDollar => "$$",
            MathDelimiter::Equation => r"\begin{equation}",
            MathDelimiter::EquationStar => r"\begin{equation*}",
            MathDelimiter::Align => r"\begin{align}",
            MathDelimiter::AlignStar => r"\begin{align*}",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            MathDelimiter::Brackets => r"\]",
            MathDelimiter::DoubleDollar => "$$",
            MathDelimiter::Equation => r"\end{equation}",
            MathDelimiter::EquationStar => r"\end{equation*}",
            MathDelimiter::Align => r"\end{align}",
            MathDelimiter::AlignStar => r"\end{align*}",
        }
    }

    /// The delimiter opening at the cursor. `$$` is matched on its first
    /// dollar so the inline `$` recognizer never sees it.
    pub fn opening_at(cur: &LineCursor) -> Option<Self> {
        if cur.current() == Some('$') && cur.is_unescaped() && cur.peek(1) == Some('$') {
            return Some(MathDelimiter::DoubleDollar);
        }
        Self::ENVIRONMENTS
            .into_iter()
            .find(|d| cur.ends_with_unescaped(d.open()))
    }

    /// Code points to advance past the opener once recognized.
    pub fn seek_after_start(self) -> usize {
        match self {
            MathDelimiter::DoubleDollar => 2,
            _ => 1,
        }
    }
}

/// Inline math delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineMathDelimiter {
    /// `\(` … `\)`
    Parens,
    /// `$` … `$`
    Dollar,
}

impl InlineMathDelimiter {
    pub fn open(self) -> &'static str {
        match self {
            InlineMathDelimiter::Parens => r"\(",
            InlineMathDelimiter::Dollar => "$",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            InlineMathDelimiter::Parens => r"\)",
            InlineMathDelimiter::Dollar => "$",
        }
    }

    pub fn opening_at(cur: &LineCursor) -> Option<Self> {
        if cur.ends_with_unescaped(r"\(") {
            Some(InlineMathDelimiter::Parens)
        } else if cur.current() == Some('$') && cur.is_unescaped() && cur.peek(1) != Some('$') {
            Some(InlineMathDelimiter::Dollar)
        } else {
            None
        }
    }
}
