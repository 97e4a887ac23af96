//! Subcommand resolution.
//!
//! Walks argv left to right, descending the command tree while tokens keep
//! naming subcommands. Flags found before the command name (a habit some
//! users have) are relocated to the end of the argument list so they get
//! interpreted against the resolved command's option set instead of being
//! dropped.

use tracing::debug;
use usagekit_core::{CommandTree, NodeId};

use crate::argv::looks_like_flag;

/// The active (sub)command and the argv remainder it should consume.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCommand {
    pub command: NodeId,
    pub args: Vec<String>,
}

/// Separates the command from the given arguments.
///
/// # Examples
///
/// ```
/// use usagekit_core::{CommandNode, CommandTree};
/// use usagekit_resolve::resolve_command;
///
/// let mut tree = CommandTree::new(CommandNode::new("git"));
/// let remote = tree.add_child(tree.root(), CommandNode::new("remote"));
/// let add = tree.add_child(remote, CommandNode::new("add"));
///
/// let argv: Vec<String> = ["remote", "add", "origin"].map(String::from).into();
/// let resolved = resolve_command(&tree, &argv);
/// assert_eq!(resolved.command, add);
/// assert_eq!(resolved.args, vec!["origin"]);
/// ```
pub fn resolve_command(tree: &CommandTree, argv: &[String]) -> ResolvedCommand {
    let mut relocated_flags: Vec<String> = Vec::new();
    let mut stack: &[String] = argv;
    let mut command = tree.root();

    // Traverse the subcommand tree until the arguments run out, or there
    // isn't a subcommand by that name.
    while let Some(token) = stack.first() {
        if looks_like_flag(token) {
            relocated_flags.push(token.clone());
            stack = &stack[1..];
            continue;
        }

        let Some(subcommand) = tree.node(command).subcommand(token) else {
            break;
        };

        command = subcommand;
        stack = &stack[1..];
    }

    if !relocated_flags.is_empty() {
        debug!(
            command = %tree.command_name(command),
            relocated = relocated_flags.len(),
            "relocated leading flags behind the command arguments"
        );
    }

    let mut args = stack.to_vec();
    args.extend(relocated_flags);

    ResolvedCommand { command, args }
}
