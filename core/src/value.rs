//! Option value coercion.
//!
//! Every normalized option carries a [`ValueParser`] that turns the raw
//! argv string into a typed [`OptionValue`]. The set of parsers is closed:
//! three built-ins plus a user-supplied closure variant, selected per option
//! at tree-normalization time. Coercion failures are scoped to the flag the
//! user actually typed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Error;

const TRUTHY_VALUES: [&str; 3] = ["true", "yes", "on"];
const FALSEY_VALUES: [&str; 3] = ["false", "no", "off"];

/// A coerced option value.
///
/// # Examples
///
/// ```
/// use usagekit_core::OptionValue;
///
/// let value = OptionValue::Number(8080.0);
/// assert_eq!(serde_json::to_string(&value).unwrap(), "8080.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    String(String),
}

/// User-supplied coercion function.
///
/// Receives the raw input (possibly empty when the flag was given without a
/// value) and returns the coerced value, `None` for "no value", or an error
/// message which the core wraps with the offending flag's name.
pub type CustomParser = Arc<dyn Fn(&str) -> Result<Option<OptionValue>, String> + Send + Sync>;

/// Value-coercion strategy attached to a normalized option.
///
/// `String` is the default when a declaration supplies none.
///
/// # Examples
///
/// ```
/// use usagekit_core::{OptionValue, ValueParser};
///
/// assert_eq!(
///     ValueParser::Bool.parse("--color", "on").unwrap(),
///     Some(OptionValue::Bool(true)),
/// );
/// assert_eq!(
///     ValueParser::Number.parse("--port", "8080").unwrap(),
///     Some(OptionValue::Number(8080.0)),
/// );
/// // Empty input means "flag given without a value".
/// assert_eq!(ValueParser::String.parse("--org", "").unwrap(), None);
/// assert!(ValueParser::Number.parse("--port", "loud").is_err());
/// ```
#[derive(Clone, Default)]
pub enum ValueParser {
    /// `--color`, `--color=yes`, `--color=off`. Bare flags coerce to `true`.
    Bool,
    /// Passes the input through; empty input coerces to no value.
    #[default]
    String,
    /// Finite floats; empty input coerces to no value.
    Number,
    /// User-supplied closure.
    Custom(CustomParser),
}

impl ValueParser {
    /// Coerces `input` into a value, scoping any failure to `flag`.
    pub fn parse(&self, flag: &str, input: &str) -> Result<Option<OptionValue>, Error> {
        match self {
            ValueParser::Bool => {
                if input.is_empty() || TRUTHY_VALUES.contains(&input) {
                    Ok(Some(OptionValue::Bool(true)))
                } else if FALSEY_VALUES.contains(&input) {
                    Ok(Some(OptionValue::Bool(false)))
                } else {
                    Err(Error::InvalidValue {
                        flag: flag.to_string(),
                        message: format!(
                            "expected a boolean value like \"true\", \"false\", \"on\", or \"off\", got \"{input}\""
                        ),
                    })
                }
            }
            ValueParser::String => {
                if input.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(OptionValue::String(input.to_string())))
                }
            }
            ValueParser::Number => {
                if input.is_empty() {
                    return Ok(None);
                }
                match input.parse::<f64>() {
                    Ok(number) if number.is_finite() => Ok(Some(OptionValue::Number(number))),
                    _ => Err(Error::InvalidValue {
                        flag: flag.to_string(),
                        message: format!("couldn't parse \"{input}\" into a number"),
                    }),
                }
            }
            ValueParser::Custom(parser) => parser(input).map_err(|message| Error::InvalidValue {
                flag: flag.to_string(),
                message,
            }),
        }
    }
}

impl fmt::Debug for ValueParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueParser::Bool => f.write_str("Bool"),
            ValueParser::String => f.write_str("String"),
            ValueParser::Number => f.write_str("Number"),
            ValueParser::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_accepts_the_truthy_and_falsey_sets() {
        for input in ["", "true", "yes", "on"] {
            assert_eq!(
                ValueParser::Bool.parse("--color", input).unwrap(),
                Some(OptionValue::Bool(true)),
                "input {input:?}"
            );
        }
        for input in ["false", "no", "off"] {
            assert_eq!(
                ValueParser::Bool.parse("--color", input).unwrap(),
                Some(OptionValue::Bool(false)),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_bool_rejects_surprising_values() {
        let err = ValueParser::Bool.parse("--color", "maybe").unwrap_err();
        assert!(err.to_string().contains("--color"));
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_number_parses_finite_floats() {
        assert_eq!(
            ValueParser::Number.parse("-p", "8080").unwrap(),
            Some(OptionValue::Number(8080.0)),
        );
        assert_eq!(
            ValueParser::Number.parse("-p", "-1.5").unwrap(),
            Some(OptionValue::Number(-1.5)),
        );
        assert_eq!(ValueParser::Number.parse("-p", "").unwrap(), None);
        assert!(ValueParser::Number.parse("-p", "inf").is_err());
        assert!(ValueParser::Number.parse("-p", "loud").is_err());
    }

    #[test]
    fn test_custom_errors_are_scoped_to_the_flag() {
        let parser = ValueParser::Custom(Arc::new(|input| {
            if input == "ok" {
                Ok(Some(OptionValue::String("ok".into())))
            } else {
                Err("expected \"ok\"".into())
            }
        }));

        assert_eq!(
            parser.parse("--mode", "ok").unwrap(),
            Some(OptionValue::String("ok".into())),
        );
        let err = parser.parse("--mode", "nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value at --mode: expected \"ok\""
        );
    }
}
