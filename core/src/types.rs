//! Grammar descriptor types produced by the usage-string compiler.
//!
//! These are the structured results of parsing compact usage grammars such
//! as `"-p, --port <number>"` (option usage) or `"<dir> [type...]"`
//! (positional-argument usage). They are plain data: immutable after
//! parsing, serde-serializable, and owned by whichever option or command
//! node declared them.

use serde::{Deserialize, Serialize};

/// A single positional argument parsed from a usage string token.
///
/// `raw` preserves the exact source slice (`"<branch>"`, `"[files...]"`)
/// for error messages.
///
/// # Examples
///
/// ```
/// use usagekit_core::Argument;
///
/// let arg = Argument::new("files", true, true, "<files...>");
/// assert!(arg.required);
/// assert!(arg.variadic);
/// assert_eq!(arg.raw, "<files...>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument name (letters, hyphens, underscores).
    pub name: String,
    /// Declared with `<...>` rather than `[...]`.
    pub required: bool,
    /// Declared with a trailing `...` (accepts any number of values).
    pub variadic: bool,
    /// Exact source slice this argument was parsed from.
    pub raw: String,
}

impl Argument {
    pub fn new(name: &str, required: bool, variadic: bool, raw: &str) -> Self {
        Self {
            name: name.to_string(),
            required,
            variadic,
            raw: raw.to_string(),
        }
    }
}

/// The scalar argument of a value-taking option (`--port <number>`).
///
/// Option arguments are never variadic, so only the name and the
/// required/optional distinction survive from the underlying token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageArgument {
    pub name: String,
    pub required: bool,
}

/// Parsed usage descriptor for one option.
///
/// At most one short flag, one long flag, and one scalar argument; the
/// option-usage parser enforces the "one per option" rules at parse time.
///
/// # Examples
///
/// ```
/// use usagekit_core::{OptionUsage, UsageArgument};
///
/// let usage = OptionUsage {
///     short: Some("p".into()),
///     long: Some("port".into()),
///     argument: Some(UsageArgument { name: "number".into(), required: true }),
/// };
/// assert_eq!(usage.canonical(), "-p, --port <number>");
/// assert!(usage.takes_value());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionUsage {
    /// Short flag name without the dash (e.g. `"p"` for `-p`).
    pub short: Option<String>,
    /// Long flag name without the dashes (e.g. `"port"` for `--port`).
    pub long: Option<String>,
    /// Declared scalar argument, if the option takes a value.
    pub argument: Option<UsageArgument>,
}

impl OptionUsage {
    /// Whether this option consumes a value from argv.
    pub fn takes_value(&self) -> bool {
        self.argument.is_some()
    }

    /// The flag users most likely typed, long form preferred.
    ///
    /// # Examples
    ///
    /// ```
    /// use usagekit_core::OptionUsage;
    ///
    /// let usage = OptionUsage { short: Some("q".into()), long: Some("quiet".into()), argument: None };
    /// assert_eq!(usage.canonical_flag(), "--quiet");
    /// ```
    pub fn canonical_flag(&self) -> String {
        match (&self.long, &self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => String::new(),
        }
    }

    /// Renders the usage back to its canonical textual form.
    ///
    /// Re-parsing the canonical form yields an equal `OptionUsage`, which
    /// makes this the round-trip anchor for the grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use usagekit_core::{OptionUsage, UsageArgument};
    ///
    /// let usage = OptionUsage {
    ///     short: Some("c".into()),
    ///     long: None,
    ///     argument: Some(UsageArgument { name: "color".into(), required: false }),
    /// };
    /// assert_eq!(usage.canonical(), "-c [color]");
    /// ```
    pub fn canonical(&self) -> String {
        let mut flags = Vec::new();
        if let Some(short) = &self.short {
            flags.push(format!("-{short}"));
        }
        if let Some(long) = &self.long {
            flags.push(format!("--{long}"));
        }

        let mut rendered = flags.join(", ");
        if let Some(argument) = &self.argument {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            if argument.required {
                rendered.push_str(&format!("<{}>", argument.name));
            } else {
                rendered.push_str(&format!("[{}]", argument.name));
            }
        }

        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_renders_all_parts() {
        let usage = OptionUsage {
            short: Some("p".into()),
            long: Some("port".into()),
            argument: Some(UsageArgument {
                name: "number".into(),
                required: true,
            }),
        };
        assert_eq!(usage.canonical(), "-p, --port <number>");
    }

    #[test]
    fn test_canonical_flag_prefers_long_form() {
        let both = OptionUsage {
            short: Some("q".into()),
            long: Some("quiet".into()),
            argument: None,
        };
        assert_eq!(both.canonical_flag(), "--quiet");

        let short_only = OptionUsage {
            short: Some("q".into()),
            long: None,
            argument: None,
        };
        assert_eq!(short_only.canonical_flag(), "-q");
    }

    #[test]
    fn test_argument_round_trips_through_json() {
        let arg = Argument::new("tracking", false, false, "[tracking]");
        let json = serde_json::to_string(&arg).expect("serialize");
        let back: Argument = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, arg);
    }
}
