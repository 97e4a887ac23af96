//! Option usage parser.
//!
//! A small state machine over the lexer's token stream that builds one
//! option's [`OptionUsage`]: at most one short flag, one long flag, and one
//! scalar argument. Commas must sit between flags, `=` must be followed by
//! an argument, and variadic arguments are rejected outright (options take
//! at most one value).

use usagekit_core::{Error, OptionUsage, UsageArgument};

use crate::lexer::{Token, TokenKind, UsageLexer};

/// Parses a full option usage string, e.g. `"-p, --port <number>"`.
///
/// # Examples
///
/// ```
/// use usagekit_grammar::parse_option_usage;
///
/// let usage = parse_option_usage("-q, --quiet").unwrap();
/// assert_eq!(usage.short.as_deref(), Some("q"));
/// assert_eq!(usage.long.as_deref(), Some("quiet"));
/// assert!(usage.argument.is_none());
///
/// let usage = parse_option_usage("--color=[bool]").unwrap();
/// assert!(!usage.argument.unwrap().required);
/// ```
pub fn parse_option_usage(source: &str) -> Result<OptionUsage, Error> {
    OptionUsageParser {
        lexer: UsageLexer::new(source),
        usage: OptionUsage::default(),
    }
    .run()
}

struct OptionUsageParser {
    lexer: UsageLexer,
    usage: OptionUsage,
}

impl OptionUsageParser {
    fn run(mut self) -> Result<OptionUsage, Error> {
        while !self.lexer.eof() {
            match self.lexer.peek()?.kind() {
                TokenKind::ShortFlag => self.read_short_flag()?,
                TokenKind::LongFlag => self.read_long_flag()?,
                TokenKind::Punctuation => self.read_punctuation()?,
                TokenKind::Argument => self.read_argument()?,
            }
        }
        Ok(self.usage)
    }

    // -q
    // -7331
    fn read_short_flag(&mut self) -> Result<(), Error> {
        let token = self.lexer.next_token()?;
        if self.usage.short.is_some() {
            return Err(self
                .lexer
                .report(&token, "Each option is only allowed one short flag."));
        }
        if let Token::ShortFlag { name, .. } = &token {
            self.usage.short = Some(name.clone());
        }
        self.expect_comma_between_flags()
    }

    // --color
    // --separated-value
    fn read_long_flag(&mut self) -> Result<(), Error> {
        let token = self.lexer.next_token()?;
        if self.usage.long.is_some() {
            return Err(self
                .lexer
                .report(&token, "Each option is only allowed one long flag."));
        }
        if let Token::LongFlag { name, .. } = &token {
            self.usage.long = Some(name.clone());
        }
        self.expect_comma_between_flags()
    }

    fn expect_comma_between_flags(&mut self) -> Result<(), Error> {
        if self.lexer.eof() {
            return Ok(());
        }
        let kind = self.lexer.peek()?.kind();
        if kind == TokenKind::ShortFlag || kind == TokenKind::LongFlag {
            let token = self.lexer.peek()?.clone();
            return Err(self
                .lexer
                .report(&token, format!("Expected a comma before \"{}\".", token.raw())));
        }
        Ok(())
    }

    // -c, --color
    // -c=[arg]
    fn read_punctuation(&mut self) -> Result<(), Error> {
        let token = self.lexer.next_token()?;
        let comma = matches!(&token, Token::Punctuation { value: ',', .. });
        if comma {
            self.expect_next_is_one_of(&[TokenKind::ShortFlag, TokenKind::LongFlag], &token)
        } else {
            self.expect_next_is_one_of(&[TokenKind::Argument], &token)
        }
    }

    fn expect_next_is_one_of(&mut self, kinds: &[TokenKind], prev: &Token) -> Result<(), Error> {
        if self.lexer.eof() {
            return Err(self.lexer.report(
                prev,
                format!("Expected something after \"{}\" but the string ended.", prev.raw()),
            ));
        }

        let next = self.lexer.peek()?.clone();
        if !kinds.contains(&next.kind()) {
            let expected = kinds
                .iter()
                .map(TokenKind::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(self.lexer.report(
                &next,
                format!("Expected one of {{{expected}}}, got \"{}\".", next.kind()),
            ));
        }

        Ok(())
    }

    // <required-arg>
    // [optional-arg]
    fn read_argument(&mut self) -> Result<(), Error> {
        let token = self.lexer.next_token()?;
        if let Token::Argument {
            name,
            required,
            variadic,
            ..
        } = &token
        {
            if *variadic {
                return Err(self
                    .lexer
                    .report(&token, "Options can't have more than one argument."));
            }
            if self.usage.argument.is_some() {
                return Err(self
                    .lexer
                    .report(&token, "Each option is only allowed one argument."));
            }
            self.usage.argument = Some(UsageArgument {
                name: name.clone(),
                required: *required,
            });
        }
        Ok(())
    }
}
