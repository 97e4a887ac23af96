//! Command tree normalization.
//!
//! Walks a user-declared [`CommandConfig`], parsing every usage string and
//! checking every structural invariant exactly once, and produces the
//! arena-backed [`CommandTree`] the invocation pipeline runs against.
//! All failures here are declaration-time configuration or grammar errors;
//! their messages carry the dotted config path of the offending node.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use usagekit_core::{
    CommandConfig, CommandNode, CommandTree, Error, NodeId, OptionConfig, OptionSpec,
};
use usagekit_grammar::{parse_command_usage, parse_option_usage};

/// Recursively parses, validates, and defaults an entire command tree.
///
/// `name` becomes the root node's name (usually the CLI binary name) and
/// the first segment of every command path in error messages.
///
/// # Examples
///
/// ```
/// use usagekit_core::{CommandConfig, OptionConfig};
/// use usagekit_resolve::normalize_commands;
///
/// let config = CommandConfig::new().with_subcommand(
///     "new-branch",
///     CommandConfig::new()
///         .with_args("<branch> [tracking]")
///         .with_option("quiet", OptionConfig::new("-q, --quiet"))
///         .with_run(|_options, _args| Ok(serde_json::Value::Null)),
/// );
///
/// let tree = normalize_commands(config, "git").unwrap();
/// let branch = tree.node(tree.root()).subcommand("new-branch").unwrap();
/// assert_eq!(tree.command_name(branch), "git new-branch");
/// assert_eq!(tree.node(branch).args.len(), 2);
/// ```
pub fn normalize_commands(config: CommandConfig, name: &str) -> Result<CommandTree, Error> {
    let mut path: Vec<String> = Vec::new();
    let (root, children) = normalize_node(config, name, &path)?;

    let mut tree = CommandTree::new(root);
    let root_id = tree.root();
    normalize_subcommands(&mut tree, root_id, children, &mut path)?;

    debug!(name, commands = tree.node_count(), "normalized command tree");
    Ok(tree)
}

fn normalize_subcommands(
    tree: &mut CommandTree,
    parent: NodeId,
    commands: BTreeMap<String, CommandConfig>,
    path: &mut Vec<String>,
) -> Result<(), Error> {
    for (name, config) in commands {
        path.push(name.clone());
        let (node, children) = normalize_node(config, &name, path)?;
        let id = tree.add_child(parent, node);
        normalize_subcommands(tree, id, children, path)?;
        path.pop();
    }
    Ok(())
}

/// Validates one declaration and builds its node; subcommand configs are
/// handed back for the caller to recurse into once the node has an id.
fn normalize_node(
    config: CommandConfig,
    name: &str,
    path: &[String],
) -> Result<(CommandNode, BTreeMap<String, CommandConfig>), Error> {
    let CommandConfig {
        description,
        args,
        options,
        subcommands,
        run,
    } = config;

    if run.is_none() {
        if args.is_some() {
            return Err(config_error(
                path,
                Some("args"),
                "Arguments were defined for a command that doesn't exist.",
            ));
        }
        if !options.is_empty() {
            return Err(config_error(
                path,
                Some("options"),
                "Options were defined for a command that doesn't exist.",
            ));
        }
        if subcommands.is_empty() {
            return Err(config_error(
                path,
                None,
                "CLI needs an implementation.\nAdd a run(...) function or subcommands.",
            ));
        }
    }

    let options_at = format!("{}.options", describe_config_path(path));
    let normalized_options = normalize_options(options, &options_at)?;
    enforce_option_uniqueness(&normalized_options, &options_at)?;

    let mut node = CommandNode::new(name);
    node.description = description;
    node.args = parse_command_usage(args.as_deref().unwrap_or(""))?;
    node.options = normalized_options;
    node.action = run;

    Ok((node, subcommands))
}

/// Parses usage strings and fills in defaults for an options table.
///
/// `at` is the dotted config location of the table itself, e.g.
/// `config.cli.subcommands.init.options`.
pub fn normalize_options(
    options: BTreeMap<String, OptionConfig>,
    at: &str,
) -> Result<BTreeMap<String, OptionSpec>, Error> {
    let mut specs = BTreeMap::new();

    for (name, option) in options {
        if option.usage.trim().is_empty() {
            return Err(Error::Config {
                path: format!("{at}.{name}"),
                message: "An option is missing the required usage field.".into(),
            });
        }

        let usage = parse_option_usage(&option.usage)?;
        specs.insert(
            name.clone(),
            OptionSpec {
                name,
                usage,
                parser: option.parse_value.unwrap_or_default(),
                description: option.description,
            },
        );
    }

    Ok(specs)
}

/// No two options on one command may claim the same short or long flag.
pub(crate) fn enforce_option_uniqueness(
    options: &BTreeMap<String, OptionSpec>,
    at: &str,
) -> Result<(), Error> {
    let mut flags: HashMap<String, String> = HashMap::new();

    for (option_name, spec) in options {
        let mut declared = Vec::new();
        if let Some(short) = &spec.usage.short {
            declared.push(format!("-{short}"));
        }
        if let Some(long) = &spec.usage.long {
            declared.push(format!("--{long}"));
        }

        for flag in declared {
            if let Some(other) = flags.insert(flag.clone(), option_name.clone()) {
                return Err(Error::Config {
                    path: at.to_string(),
                    message: format!(
                        "The \"{flag}\" flag is redefined by multiple options (\"{other}\" and \"{option_name}\")"
                    ),
                });
            }
        }
    }

    Ok(())
}

// Something like 'config.cli.subcommands.init'.
fn describe_config_path(path: &[String]) -> String {
    if path.is_empty() {
        "config.cli".to_string()
    } else {
        format!("config.cli.subcommands.{}", path.join(".subcommands."))
    }
}

fn config_error(path: &[String], field: Option<&str>, message: &str) -> Error {
    let mut at = describe_config_path(path);
    if let Some(field) = field {
        at.push('.');
        at.push_str(field);
    }
    Error::Config {
        path: at,
        message: message.to_string(),
    }
}
