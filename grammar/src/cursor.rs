//! Character-addressable cursor over a usage string.
//!
//! The cursor tracks line/column positions as it advances and can render a
//! two-line source frame (the original text plus a caret underline) for any
//! location, which is how grammar errors point at the offending slice of a
//! usage string.

use usagekit_core::Error;

/// A position within a usage string, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub line: usize,
    pub column: usize,
}

/// Everything needed to build a source-located grammar error.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub loc: Loc,
    /// Number of source characters to underline; clamped to at least 1.
    pub length: usize,
    pub message: String,
}

/// Cursor over the characters of one usage string.
///
/// `peek` and `consume_next_char` fail with an internal error when called
/// at end of input; callers are expected to check [`eof`](Self::eof) first.
pub struct SourceCursor {
    text: String,
    chars: Vec<char>,
    cursor: usize,
    line: usize,
    column: usize,
}

impl SourceCursor {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            chars: text.chars().collect(),
            cursor: 0,
            line: 0,
            column: 0,
        }
    }

    pub fn eof(&self) -> bool {
        self.cursor == self.chars.len()
    }

    pub fn loc(&self) -> Loc {
        Loc {
            line: self.line,
            column: self.column,
        }
    }

    /// The next character, without advancing.
    pub fn peek(&self) -> Result<char, Error> {
        self.chars.get(self.cursor).copied().ok_or_else(|| {
            Error::Internal("attempted to read past the end of the source text".into())
        })
    }

    /// Consumes and returns the next character, updating line/column.
    pub fn consume_next_char(&mut self) -> Result<char, Error> {
        let character = self.peek()?;
        self.cursor += 1;

        if character == '\n' {
            self.column = 0;
            self.line += 1;
        } else {
            self.column += 1;
        }

        Ok(character)
    }

    /// Builds (never raises) a grammar error carrying a source frame.
    pub fn generate_error(&self, report: ErrorReport) -> Error {
        Error::Grammar {
            frame: self.frame(report.loc, report.length.max(1)),
            message: report.message,
        }
    }

    // Something like:
    //   --port <number
    //          ^^^^^^^
    fn frame(&self, loc: Loc, length: usize) -> String {
        let source_line = self.text.lines().nth(loc.line).unwrap_or("");
        let offset = " ".repeat(loc.column);
        let underline = "^".repeat(length);
        format!("  {source_line}\n  {offset}{underline}")
    }
}
