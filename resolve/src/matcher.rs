//! Flag matching.
//!
//! Indexes a command's options by short and long flag name and consumes the
//! normalized argv stream: non-flag tokens accumulate as positional
//! arguments, resolved flags coerce their values, and unresolved flags are
//! collected (all of them, not just the first) so one invocation reports
//! every invalid flag at once.

use std::collections::{BTreeMap, HashMap, VecDeque};

use usagekit_core::{
    CommandTree, Error, NodeId, OptionSpec, OptionValue, ParsedInvocation,
};

use crate::argv::{is_numeric_flag, is_short_flag, looks_like_flag, normalize_argv};

// Numeric tokens like "-1337" are values, never flags.
fn is_flag(argument: &str) -> bool {
    looks_like_flag(argument) && !is_numeric_flag(argument)
}

struct FlagIndex<'a> {
    short: HashMap<&'a str, &'a OptionSpec>,
    long: HashMap<&'a str, &'a OptionSpec>,
}

impl<'a> FlagIndex<'a> {
    fn new(options: &'a BTreeMap<String, OptionSpec>) -> Self {
        let mut short = HashMap::new();
        let mut long = HashMap::new();

        for spec in options.values() {
            if let Some(flag) = &spec.usage.short {
                short.insert(flag.as_str(), spec);
            }
            if let Some(flag) = &spec.usage.long {
                long.insert(flag.as_str(), spec);
            }
        }

        Self { short, long }
    }

    // Look up the given flag; which index depends on the dash count.
    fn resolve(&self, arg: &str) -> Option<&'a OptionSpec> {
        let name = arg
            .strip_prefix("--")
            .or_else(|| arg.strip_prefix('-'))
            .unwrap_or(arg);

        if is_short_flag(arg) {
            self.short.get(name).copied()
        } else {
            self.long.get(name).copied()
        }
    }
}

/// Coerces one option's value.
///
/// Returns the value (if any) and whether the following argv token was
/// consumed as that value.
fn parse_option_value(
    option: &OptionSpec,
    flag: &str,
    argument: Option<&str>,
) -> Result<(Option<OptionValue>, bool), Error> {
    // If it doesn't accept an argument, the option must be boolean.
    let Some(declared) = &option.usage.argument else {
        return Ok((Some(OptionValue::Bool(true)), false));
    };

    match argument {
        None | Some("") if declared.required => Err(Error::MissingValue {
            flag: flag.to_string(),
            argument: declared.name.clone(),
        }),
        None => Ok((option.parser.parse(flag, "")?, false)),
        Some(input) => Ok((option.parser.parse(flag, input)?, true)),
    }
}

/// Splits an argv remainder into positional arguments and option values.
///
/// The stream is normalized first, then consumed left to right against the
/// command's own options and, with lower precedence, the global options.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use usagekit_core::{CommandConfig, OptionConfig, OptionValue};
/// use usagekit_resolve::{normalize_commands, parse_argv};
///
/// let config = CommandConfig::new()
///     .with_option("quiet", OptionConfig::new("-q, --quiet"))
///     .with_run(|_options, _args| Ok(serde_json::Value::Null));
/// let tree = normalize_commands(config, "cli").unwrap();
///
/// let argv: Vec<String> = ["-q", "file.txt"].map(String::from).into();
/// let parsed = parse_argv(&tree, tree.root(), &BTreeMap::new(), &argv).unwrap();
/// assert_eq!(parsed.options["quiet"], OptionValue::Bool(true));
/// assert_eq!(parsed.args, vec!["file.txt"]);
/// ```
pub fn parse_argv(
    tree: &CommandTree,
    command: NodeId,
    global_options: &BTreeMap<String, OptionSpec>,
    argv: &[String],
) -> Result<ParsedInvocation, Error> {
    let local_index = FlagIndex::new(&tree.node(command).options);
    let global_index = FlagIndex::new(global_options);

    let mut parsed = ParsedInvocation {
        command,
        options: BTreeMap::new(),
        global_options: BTreeMap::new(),
        invalid_options: Vec::new(),
        args: Vec::new(),
    };

    // The argv stack is consumed left to right.
    let mut stack: VecDeque<String> = normalize_argv(argv).into();
    while let Some(arg) = stack.pop_front() {
        // Must be a command argument.
        if !is_flag(&arg) {
            parsed.args.push(arg);
            continue;
        }

        // Prefer the command's own options over global ones.
        let local = local_index.resolve(&arg);
        let Some(option) = local.or_else(|| global_index.resolve(&arg)) else {
            // An invalid flag. Collect any others for a more complete
            // debugging picture.
            parsed.invalid_options.push(arg);
            continue;
        };

        // An empty token (from "--flag=") is still this option's value.
        let pending_value = stack.front().filter(|next| !is_flag(next)).cloned();
        let (value, consumed_argument) =
            parse_option_value(option, &arg, pending_value.as_deref())?;

        // Don't mistake the option's argument for a command argument.
        if consumed_argument {
            stack.pop_front();
        }

        let bucket = if local.is_some() {
            &mut parsed.options
        } else {
            &mut parsed.global_options
        };
        if let Some(value) = value {
            bucket.insert(option.name.clone(), value);
        }
    }

    Ok(parsed)
}
