//! Positional-argument grammar.
//!
//! Turns `<name>` / `[name]` / `<name...>` tokens into [`Argument`]
//! descriptors, and whole positional usage strings like `"<dir> [type...]"`
//! into ordered argument lists. Ordering invariants (required before
//! optional, variadic last) are enforced here, once, at declaration time.

use std::sync::LazyLock;

use regex::Regex;
use usagekit_core::{Argument, Error};

use crate::lexer::{Token, TokenKind, UsageLexer};

// Letters with interior hyphens/underscores; no leading or trailing
// separator.
static ARGUMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z](?:[A-Za-z_-]*[A-Za-z])?$").expect("valid pattern"));

fn validate_argument_name(lexer: &UsageLexer, token: &Token, name: &str) -> Result<(), Error> {
    let complaint = if name.is_empty() {
        Some("Expected an argument name.".to_string())
    } else if name.starts_with('_') {
        Some("Names can't start with an underscore.".to_string())
    } else if name.ends_with('_') {
        Some("Names can't end in an underscore.".to_string())
    } else if name.starts_with('-') {
        Some("Names can't start with a hyphen.".to_string())
    } else if name.ends_with('-') {
        Some("Names can't end in a hyphen.".to_string())
    } else if !ARGUMENT_NAME.is_match(name) {
        Some(format!("Invalid argument name \"{name}\"."))
    } else {
        None
    };

    match complaint {
        Some(message) => Err(lexer.report(token, message)),
        None => Ok(()),
    }
}

fn descriptor_from_token(lexer: &UsageLexer, token: &Token) -> Result<Argument, Error> {
    match token {
        Token::Argument {
            name,
            required,
            variadic,
            raw,
            ..
        } => {
            validate_argument_name(lexer, token, name)?;
            Ok(Argument::new(name, *required, *variadic, raw))
        }
        other => Err(lexer.report(
            other,
            format!("Expected an argument like \"<dir>\", got \"{}\".", other.raw()),
        )),
    }
}

/// Parses a single argument token, e.g. `"<branch>"` or `"[files...]"`.
///
/// # Examples
///
/// ```
/// use usagekit_grammar::parse_argument;
///
/// let arg = parse_argument("<files...>").unwrap();
/// assert!(arg.required);
/// assert!(arg.variadic);
/// assert_eq!(arg.name, "files");
///
/// assert!(parse_argument("<_files>").is_err());
/// ```
pub fn parse_argument(input: &str) -> Result<Argument, Error> {
    let mut lexer = UsageLexer::new(input);
    if lexer.eof() {
        return Err(lexer.report_here("Expected an argument (e.g. \"<dir>\" or \"[files...]\")."));
    }

    let token = lexer.next_token()?;
    let argument = descriptor_from_token(&lexer, &token)?;

    if !lexer.eof() {
        let trailing = lexer.next_token()?;
        return Err(lexer.report(
            &trailing,
            format!("Unexpected trailing input \"{}\".", trailing.raw()),
        ));
    }

    Ok(argument)
}

/// Parses a whitespace-separated positional usage string, preserving order.
///
/// Enforces that required arguments precede optional ones and that a
/// variadic argument, if present, comes last. Flags are rejected here;
/// they belong to the options table.
///
/// # Examples
///
/// ```
/// use usagekit_grammar::parse_command_usage;
///
/// let args = parse_command_usage("<branch> [tracking]").unwrap();
/// assert_eq!(args.len(), 2);
/// assert!(args[0].required);
/// assert!(!args[1].required);
///
/// // Required after optional is a declaration error.
/// assert!(parse_command_usage("[tracking] <branch>").is_err());
/// ```
pub fn parse_command_usage(usage: &str) -> Result<Vec<Argument>, Error> {
    let mut lexer = UsageLexer::new(usage);
    let mut args: Vec<Argument> = Vec::new();

    while !lexer.eof() {
        let token = lexer.next_token()?;
        match token.kind() {
            TokenKind::Argument => {
                let argument = descriptor_from_token(&lexer, &token)?;

                if argument.required
                    && let Some(optional) = args.iter().find(|arg| !arg.required)
                {
                    return Err(lexer.report(
                        &token,
                        format!(
                            "Required arguments should come first.\nMove \"{}\" before \"{}\".",
                            argument.raw, optional.raw
                        ),
                    ));
                }
                if let Some(previous) = args.last()
                    && previous.variadic
                {
                    return Err(lexer.report(
                        &token,
                        format!("No argument can follow the variadic \"{}\".", previous.raw),
                    ));
                }

                args.push(argument);
            }
            TokenKind::ShortFlag | TokenKind::LongFlag => {
                return Err(lexer.report(
                    &token,
                    "Flags aren't allowed here.\nAdd them to the \"options\" table.",
                ));
            }
            TokenKind::Punctuation => {
                return Err(lexer.report(
                    &token,
                    format!(
                        "Unexpected token \"{}\".\nOnly arguments are allowed (e.g. \"[dir]\", \"<values...>\").",
                        token.raw()
                    ),
                ));
            }
        }
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_required_optional_and_variadic_forms() {
        let arg = parse_argument("<branch>").unwrap();
        assert_eq!(arg, Argument::new("branch", true, false, "<branch>"));

        let arg = parse_argument("[tracking]").unwrap();
        assert_eq!(arg, Argument::new("tracking", false, false, "[tracking]"));

        let arg = parse_argument("[type...]").unwrap();
        assert!(arg.variadic);
        assert!(!arg.required);
    }

    #[test]
    fn test_rejects_bad_name_boundaries() {
        for (input, complaint) in [
            ("<_name>", "start with an underscore"),
            ("<name_>", "end in an underscore"),
            ("<-name>", "start with a hyphen"),
            ("<name->", "end in a hyphen"),
        ] {
            let err = parse_argument(input).unwrap_err();
            assert!(
                err.to_string().contains(complaint),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn test_rejects_digits_in_names() {
        let err = parse_argument("<port8080>").unwrap_err();
        assert!(err.to_string().contains("Invalid argument name"));
    }

    #[test]
    fn test_rejects_empty_and_trailing_input() {
        assert!(parse_argument("").is_err());
        assert!(parse_argument("<a> <b>").is_err());
    }

    #[test]
    fn test_command_usage_preserves_declaration_order() {
        let args = parse_command_usage("<dir> [type...]").unwrap();
        assert_eq!(args[0].name, "dir");
        assert_eq!(args[1].name, "type");
        assert!(args[1].variadic);
    }

    #[test]
    fn test_empty_usage_string_declares_no_arguments() {
        assert_eq!(parse_command_usage("").unwrap(), Vec::new());
        assert_eq!(parse_command_usage("   ").unwrap(), Vec::new());
    }

    #[test]
    fn test_required_after_optional_is_rejected() {
        let err = parse_command_usage("[tracking] <branch>").unwrap_err();
        assert!(
            err.to_string()
                .contains("Required arguments should come first.")
        );
    }

    #[test]
    fn test_nothing_may_follow_a_variadic_argument() {
        let err = parse_command_usage("<files...> [dest]").unwrap_err();
        assert!(err.to_string().contains("variadic"));
    }

    #[test]
    fn test_flags_are_rejected_in_positional_usage() {
        let err = parse_command_usage("<dir> --force").unwrap_err();
        assert!(err.to_string().contains("Flags aren't allowed here."));
    }
}
