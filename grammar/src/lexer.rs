//! Tokenizer for usage strings.
//!
//! Emits one token at a time over a [`SourceCursor`], with one token of
//! lookahead held in an explicit `Option<Token>` slot: `peek` fills the
//! slot without advancing, `next_token` drains it. Whitespace between
//! tokens is discarded and never becomes a token.

use std::fmt;

use usagekit_core::Error;

use crate::cursor::{ErrorReport, Loc, SourceCursor};

/// Discriminant of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    ShortFlag,
    LongFlag,
    Punctuation,
    Argument,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::ShortFlag => "ShortFlag",
            TokenKind::LongFlag => "LongFlag",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Argument => "Argument",
        };
        f.write_str(name)
    }
}

/// One lexed usage-string token.
///
/// Every variant carries `raw` (the exact source slice) and `loc` so that
/// downstream parsers can report errors against the original text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `-q`, or an all-digit run like `-1337`.
    ShortFlag { name: String, raw: String, loc: Loc },
    /// `--quiet`, `--separated-value`.
    LongFlag { name: String, raw: String, loc: Loc },
    /// `,` or `=`; the meaning is up to the consuming parser.
    Punctuation { value: char, raw: String, loc: Loc },
    /// `<name>`, `[name]`, `<name...>`, `[name...]`.
    Argument {
        name: String,
        required: bool,
        variadic: bool,
        raw: String,
        loc: Loc,
    },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::ShortFlag { .. } => TokenKind::ShortFlag,
            Token::LongFlag { .. } => TokenKind::LongFlag,
            Token::Punctuation { .. } => TokenKind::Punctuation,
            Token::Argument { .. } => TokenKind::Argument,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Token::ShortFlag { raw, .. }
            | Token::LongFlag { raw, .. }
            | Token::Punctuation { raw, .. }
            | Token::Argument { raw, .. } => raw,
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            Token::ShortFlag { loc, .. }
            | Token::LongFlag { loc, .. }
            | Token::Punctuation { loc, .. }
            | Token::Argument { loc, .. } => *loc,
        }
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenizer with one-token lookahead.
pub struct UsageLexer {
    cursor: SourceCursor,
    peeked: Option<Token>,
}

impl UsageLexer {
    pub fn new(source: &str) -> Self {
        Self {
            cursor: SourceCursor::new(source),
            peeked: None,
        }
    }

    /// True once the input is exhausted. Trailing whitespace is discarded
    /// first, and a pending peeked token means we are not at the end yet.
    pub fn eof(&mut self) -> bool {
        if self.peeked.is_some() {
            return false;
        }
        self.discard_whitespace();
        self.cursor.eof()
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        self.discard_whitespace();
        if self.cursor.eof() {
            return Err(Error::Internal("end of token input reached".into()));
        }

        match self.cursor.peek()? {
            ',' | '=' => self.read_punctuation(),
            '-' => self.read_flag(),
            '<' | '[' => self.read_argument(),
            other => Err(self.cursor.generate_error(ErrorReport {
                loc: self.cursor.loc(),
                length: 1,
                message: format!("Unexpected character \"{other}\"."),
            })),
        }
    }

    /// The next token without consuming it; cached until the next
    /// `next_token` call.
    pub fn peek(&mut self) -> Result<&Token, Error> {
        if self.peeked.is_none() {
            let token = self.next_token()?;
            self.peeked = Some(token);
        }
        match &self.peeked {
            Some(token) => Ok(token),
            None => Err(Error::Internal("lookahead slot empty after fill".into())),
        }
    }

    /// Builds a grammar error underlining `token` in the source text.
    pub fn report(&self, token: &Token, message: impl Into<String>) -> Error {
        self.cursor.generate_error(ErrorReport {
            loc: token.loc(),
            length: token.raw().chars().count(),
            message: message.into(),
        })
    }

    /// Builds a grammar error pointing at the current cursor position.
    pub(crate) fn report_here(&self, message: impl Into<String>) -> Error {
        self.cursor.generate_error(ErrorReport {
            loc: self.cursor.loc(),
            length: 1,
            message: message.into(),
        })
    }

    fn discard_whitespace(&mut self) {
        while let Ok(c) = self.cursor.peek() {
            if !c.is_whitespace() {
                break;
            }
            let _ = self.cursor.consume_next_char();
        }
    }

    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> Result<String, Error> {
        let mut acc = String::new();
        while !self.cursor.eof() && predicate(self.cursor.peek()?) {
            acc.push(self.cursor.consume_next_char()?);
        }
        Ok(acc)
    }

    /// Safe peek-compare; erroring out when the string ends mid-token.
    fn is_char(&self, expected: char) -> Result<bool, Error> {
        if self.cursor.eof() {
            return Err(self.cursor.generate_error(ErrorReport {
                loc: self.cursor.loc(),
                length: 1,
                message: format!("Usage string ended unexpectedly (looking for \"{expected}\")."),
            }));
        }
        Ok(self.cursor.peek()? == expected)
    }

    /// Consumes the next character, asserting it matches.
    fn expect(&mut self, expected: char) -> Result<char, Error> {
        if self.cursor.eof() {
            return Err(self.cursor.generate_error(ErrorReport {
                loc: self.cursor.loc(),
                length: 1,
                message: format!("Usage string ended abruptly (expected \"{expected}\")."),
            }));
        }

        let loc = self.cursor.loc();
        let actual = self.cursor.consume_next_char()?;
        if actual != expected {
            return Err(self.cursor.generate_error(ErrorReport {
                loc,
                length: 1,
                message: format!("Expected a \"{expected}\" character, got \"{actual}\"."),
            }));
        }

        Ok(actual)
    }

    fn read_punctuation(&mut self) -> Result<Token, Error> {
        let loc = self.cursor.loc();
        let value = self.cursor.consume_next_char()?;
        Ok(Token::Punctuation {
            raw: value.to_string(),
            value,
            loc,
        })
    }

    fn read_flag(&mut self) -> Result<Token, Error> {
        let loc = self.cursor.loc();
        self.cursor.consume_next_char()?;

        // Two hyphens back to back can only mean one thing.
        if self.is_char('-')? {
            return self.read_long_flag(loc);
        }
        self.read_short_flag(loc)
    }

    fn read_long_flag(&mut self, loc: Loc) -> Result<Token, Error> {
        self.cursor.consume_next_char()?;
        let name = self.read_while(|c| is_word(c) || c == '-')?;
        Ok(Token::LongFlag {
            raw: format!("--{name}"),
            name,
            loc,
        })
    }

    fn read_short_flag(&mut self, loc: Loc) -> Result<Token, Error> {
        let name = self.read_while(is_word)?;

        if name.is_empty() {
            return Err(self.cursor.generate_error(ErrorReport {
                loc,
                length: 1,
                message: format!("Expected a flag name, found \"{name}\"."),
            }));
        }

        // "-port" is ambiguous; only "-p" or an all-digit "-1337" is a
        // valid short flag.
        if name.chars().count() > 1 && !name.chars().all(|c| c.is_ascii_digit()) {
            return Err(self.cursor.generate_error(ErrorReport {
                loc,
                length: name.chars().count(),
                message: "Only one short flag is allowed per usage definition.".into(),
            }));
        }

        Ok(Token::ShortFlag {
            raw: format!("-{name}"),
            name,
            loc,
        })
    }

    fn read_argument(&mut self) -> Result<Token, Error> {
        let loc = self.cursor.loc();
        let required = self.cursor.peek()? == '<';
        let (open, close) = if required { ('<', '>') } else { ('[', ']') };

        let mut raw = String::new();
        raw.push(self.cursor.consume_next_char()?);

        let name = self.read_while(|c| is_word(c) || c == '-')?;
        raw.push_str(&name);

        let variadic = !self.cursor.eof() && self.cursor.peek()? == '.';
        if variadic {
            for _ in 0..3 {
                raw.push(self.expect('.')?);
            }
        }

        // Missing or mismatched close delimiters point at the opening one.
        if self.cursor.eof() {
            return Err(self.cursor.generate_error(ErrorReport {
                loc,
                length: raw.chars().count(),
                message: format!("Unterminated argument (expected \"{close}\")."),
            }));
        }
        let actual = self.cursor.peek()?;
        if actual != close {
            return Err(self.cursor.generate_error(ErrorReport {
                loc,
                length: raw.chars().count() + 1,
                message: format!("Expected \"{close}\" to close \"{open}\", got \"{actual}\"."),
            }));
        }
        raw.push(self.cursor.consume_next_char()?);

        Ok(Token::Argument {
            name,
            required,
            variadic,
            raw,
            loc,
        })
    }
}
