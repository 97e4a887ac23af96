//! Positional argument arity checks.

use usagekit_core::{CommandTree, Error, NodeId};

/// Checks the resolved positional arguments against the command's
/// declared arity.
///
/// A variadic declaration lifts the upper bound entirely; required
/// declarations set the lower bound. The first missing required argument
/// is named in the error so the user knows what to supply next.
///
/// # Examples
///
/// ```
/// use usagekit_core::CommandConfig;
/// use usagekit_resolve::{normalize_commands, validate_arguments};
///
/// let config = CommandConfig::new()
///     .with_args("<branch> [tracking]")
///     .with_run(|_options, _args| Ok(serde_json::Value::Null));
/// let tree = normalize_commands(config, "checkout").unwrap();
///
/// assert!(validate_arguments(&tree, tree.root(), &["main".to_string()]).is_ok());
/// assert!(validate_arguments(&tree, tree.root(), &[]).is_err());
/// ```
pub fn validate_arguments(
    tree: &CommandTree,
    command: NodeId,
    args: &[String],
) -> Result<(), Error> {
    let node = tree.node(command);
    let declared = &node.args;

    if declared.is_empty() {
        if args.is_empty() {
            return Ok(());
        }
        return Err(Error::UnexpectedArguments {
            command: tree.command_name(command),
        });
    }

    let required = declared.iter().filter(|arg| arg.required).count();
    let max = if declared.iter().any(|arg| arg.variadic) {
        None
    } else {
        Some(declared.len())
    };

    if let Some(max) = max
        && args.len() > max
    {
        return Err(Error::TooManyArguments {
            command: tree.command_name(command),
            max,
            given: args.len(),
        });
    }

    if args.len() < required {
        // The first declared required argument with no value supplied.
        let missing = declared
            .iter()
            .filter(|arg| arg.required)
            .nth(args.len())
            .map(|arg| arg.raw.clone())
            .unwrap_or_default();
        return Err(Error::MissingArgument {
            command: tree.command_name(command),
            argument: missing,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use usagekit_core::CommandConfig;

    use crate::normalize::normalize_commands;

    use super::*;

    fn tree_with_args(usage: &str) -> CommandTree {
        let config = CommandConfig::new()
            .with_args(usage)
            .with_run(|_options, _args| Ok(serde_json::Value::Null));
        normalize_commands(config, "checkout").expect("valid declaration")
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn test_required_then_optional_bounds() {
        let tree = tree_with_args("<branch> [tracking]");
        let root = tree.root();

        assert!(validate_arguments(&tree, root, &args(&["main"])).is_ok());
        assert!(validate_arguments(&tree, root, &args(&["main", "origin/main"])).is_ok());
    }

    #[test]
    fn test_missing_required_argument_is_named() {
        let tree = tree_with_args("<branch> [tracking]");

        let err = validate_arguments(&tree, tree.root(), &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"checkout\" requires the <branch> argument"
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let tree = tree_with_args("<branch> [tracking]");

        let err = validate_arguments(&tree, tree.root(), &args(&["a", "b", "c"])).unwrap_err();
        assert!(err.to_string().contains("checkout"));
    }

    #[test]
    fn test_variadic_lifts_the_upper_bound() {
        let tree = tree_with_args("<files...>");
        let root = tree.root();

        assert!(validate_arguments(&tree, root, &[]).is_err());
        assert!(validate_arguments(&tree, root, &args(&["a"])).is_ok());
        assert!(validate_arguments(&tree, root, &args(&["a", "b", "c", "d"])).is_ok());
    }

    #[test]
    fn test_commands_without_arguments_reject_any() {
        let config = CommandConfig::new()
            .with_run(|_options, _args| Ok(serde_json::Value::Null));
        let tree = normalize_commands(config, "status").unwrap();
        let root = tree.root();

        assert!(validate_arguments(&tree, root, &[]).is_ok());
        let err = validate_arguments(&tree, root, &args(&["extra"])).unwrap_err();
        assert_eq!(err.to_string(), "\"status\" doesn't take arguments");
    }
}
