use core::fmt;

/// A location in the overall input stream.
///
/// `offset` counts characters from the very first chunk fed into the session,
/// so it keeps increasing across `feed` calls. `line` starts at 1 and `column`
/// at 1; a line feed advances `line` and resets `column`.
///
/// Every [`ParserError`](crate::ParserError) carries the position of the
/// character or token that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(crate) fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub(crate) fn advance(&mut self, ch: char) {
        self.offset += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Bulk variant of [`advance`](Self::advance) for characters that are
    /// known not to contain a line feed.
    pub(crate) fn advance_by(&mut self, count: usize) {
        self.offset += count;
        self.column += count;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
