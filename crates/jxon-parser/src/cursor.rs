//! Character-level source navigation and diagnostic positions.

use crate::chars::is_label_char;
use crate::error::ParseError;

/// Sentinel returned when peeking at an end of line or end of input.
pub(crate) const NUL: char = '\0';

/// A cursor over pre-split source lines, tracking a 0-indexed
/// `(line, col)` position in characters.
///
/// After any successful grammar rule the cursor sits on the first character
/// not yet consumed by that rule.
pub(crate) struct Cursor {
    lines: Vec<Vec<char>>,
    line: usize,
    col: usize,
}

/// A saved cursor position for deferred diagnostics.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Breakpoint {
    line: usize,
    col: usize,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Self {
            lines: source
                .split('\n')
                .map(|line| line.chars().collect())
                .collect(),
            line: 0,
            col: 0,
        }
    }

    pub fn eof(&self) -> bool {
        self.line >= self.lines.len()
    }

    /// True at a line end; end of input counts as one.
    pub fn at_eol(&self) -> bool {
        self.eof() || self.col >= self.lines[self.line].len()
    }

    /// The character under the cursor, or [`NUL`] at EOL/EOF.
    pub fn peek(&self) -> char {
        if self.at_eol() {
            NUL
        } else {
            self.lines[self.line][self.col]
        }
    }

    /// Whether the rest of the current line starts with `s`.
    pub fn peek_is(&self, s: &str) -> bool {
        if self.eof() {
            return false;
        }
        let line = &self.lines[self.line];
        let mut i = self.col;
        for c in s.chars() {
            if line.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// [`Cursor::peek_is`], plus a word boundary after the keyword.
    pub fn peek_keyword(&self, keyword: &str) -> bool {
        if !self.peek_is(keyword) {
            return false;
        }
        let line = &self.lines[self.line];
        match line.get(self.col + keyword.chars().count()) {
            Some(&c) => !is_label_char(c),
            None => true,
        }
    }

    /// Moves one step forward; crossing a line end consumes the break.
    /// At end of input this is a no-op.
    pub fn advance(&mut self) {
        if self.eof() {
            return;
        }
        if self.col >= self.lines[self.line].len() {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
    }

    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Atomic compare-and-advance of `s` within the current line.
    pub fn expect(&mut self, s: &str) -> Result<(), ParseError> {
        if self.peek_is(s) {
            self.advance_by(s.chars().count());
            Ok(())
        } else {
            Err(self.error(format!("Expected '{s}'")))
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint {
            line: self.line,
            col: self.col,
        }
    }

    pub fn jump(&mut self, breakpoint: Breakpoint) {
        self.line = breakpoint.line;
        self.col = breakpoint.col;
    }

    /// A diagnostic at the current position, clamped to the last valid
    /// position at end of input.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        let breakpoint = if self.eof() {
            let line = self.lines.len().saturating_sub(1);
            let col = self
                .lines
                .get(line)
                .map_or(0, |l| l.len().saturating_sub(1));
            Breakpoint { line, col }
        } else {
            self.breakpoint()
        };
        self.error_at(breakpoint, message)
    }

    /// A diagnostic positioned at a saved breakpoint.
    pub fn error_at(&self, breakpoint: Breakpoint, message: impl Into<String>) -> ParseError {
        ParseError {
            line: breakpoint.line + 1,
            col: breakpoint.col + 1,
            message: message.into(),
            source_line: self
                .lines
                .get(breakpoint.line)
                .map(|l| l.iter().collect())
                .unwrap_or_default(),
        }
    }
}
