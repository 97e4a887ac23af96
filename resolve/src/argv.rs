//! Argv canonicalization.
//!
//! Rewrites raw process arguments into the canonical flag stream the
//! matcher consumes: conjoined `--flag=value` pairs are split, short-flag
//! clusters (`-qcp`) explode into independent flags, and numeric-looking
//! tokens (`-1337`) pass through as values. The rewrite is idempotent, so
//! feeding an already-normalized stream back in changes nothing.

use std::sync::LazyLock;

use regex::Regex;

static LOOKS_LIKE_FLAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-").expect("valid pattern"));
static SHORT_FLAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-[^-]").expect("valid pattern"));
static NUMERIC_FLAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\d").expect("valid pattern"));
static CONJOINED_WITH_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--?\w+?=").expect("valid pattern"));

/// `-q`, `--quiet`, `-1337` — anything flag-shaped.
pub fn looks_like_flag(argument: &str) -> bool {
    LOOKS_LIKE_FLAG.is_match(argument)
}

/// Single-dash form, cluster or not: `-q`, `-qcp`, but not `--quiet`.
pub fn is_short_flag(argument: &str) -> bool {
    SHORT_FLAG.is_match(argument)
}

pub(crate) fn is_numeric_flag(argument: &str) -> bool {
    NUMERIC_FLAG.is_match(argument)
}

fn is_conjoined_with_value(argument: &str) -> bool {
    CONJOINED_WITH_VALUE.is_match(argument)
}

/// Massages the argv until it's ready for consumption.
///
/// # Examples
///
/// ```
/// use usagekit_resolve::normalize_argv;
///
/// let argv = vec!["-vp=8080".to_string(), "-1337".to_string()];
/// assert_eq!(normalize_argv(&argv), vec!["-v", "-p", "8080", "-1337"]);
/// ```
pub fn normalize_argv(argv: &[String]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(argv.len());

    for arg in argv {
        // Split "--flag=value" at the first "=", leaving any further "="
        // inside the value. The flag half may itself be a cluster, like
        // "-cvp=8080", so it goes back through normalization.
        if is_conjoined_with_value(arg) {
            if let Some((flag, value)) = arg.split_once('=') {
                normalized.extend(normalize_argv(&[flag.to_string()]));
                normalized.push(value.to_string());
                continue;
            }
        }

        // Numeric (-1337) or just a plain argument.
        if !looks_like_flag(arg) || is_numeric_flag(arg) {
            normalized.push(arg.clone());
            continue;
        }

        // Explode a group of short flags (e.g. -xzvf) into several
        // independent flags (-x -z -v -f).
        if is_short_flag(arg) && arg.chars().count() > 2 {
            normalized.extend(arg.chars().skip(1).map(|flag| format!("-{flag}")));
            continue;
        }

        normalized.push(arg.clone());
    }

    normalized
}
