//! Command declarations and the normalized command tree.
//!
//! A CLI is declared as a nested [`CommandConfig`] whose usage strings are
//! still plain text. Normalization (in the `usagekit-resolve` crate) turns
//! that declaration into a [`CommandTree`]: an arena of [`CommandNode`]s
//! addressed by [`NodeId`], validated once and read-only afterwards. Parent
//! links are plain indices used only to rebuild command paths for error
//! messages; ownership flows strictly root-to-children through the arena.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{Argument, Error, OptionUsage, OptionValue, ValueParser};

/// Implementation function of a leaf command.
///
/// Invoked (by the external bootstrap, never by this crate family) with the
/// coerced option values and positional arguments. The output is opaque to
/// the resolution engine.
pub type CommandAction = Arc<
    dyn Fn(&BTreeMap<String, OptionValue>, &[String]) -> Result<serde_json::Value, Error>
        + Send
        + Sync,
>;

/// Declaration of one option, as written by the CLI author.
///
/// # Examples
///
/// ```
/// use usagekit_core::{OptionConfig, ValueParser};
///
/// let port = OptionConfig::new("-p, --port <number>")
///     .with_description("Port to listen on")
///     .with_parser(ValueParser::Number);
/// assert_eq!(port.usage, "-p, --port <number>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionConfig {
    /// Usage grammar, e.g. `"-q, --quiet"` or `"--port <number>"`.
    pub usage: String,
    /// Description for the (external) help page.
    pub description: Option<String>,
    /// Value coercion; defaults to [`ValueParser::String`] when absent.
    pub parse_value: Option<ValueParser>,
}

impl OptionConfig {
    pub fn new(usage: &str) -> Self {
        Self {
            usage: usage.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_parser(mut self, parser: ValueParser) -> Self {
        self.parse_value = Some(parser);
        self
    }
}

/// Declaration of one command: an implementation and/or subcommands, plus
/// options and a positional-argument usage string.
///
/// # Examples
///
/// ```
/// use usagekit_core::{CommandConfig, OptionConfig};
///
/// let cli = CommandConfig::new()
///     .with_subcommand(
///         "new-branch",
///         CommandConfig::new()
///             .with_args("<branch> [tracking]")
///             .with_option("quiet", OptionConfig::new("-q, --quiet"))
///             .with_run(|_options, _args| Ok(serde_json::Value::Null)),
///     );
/// assert!(cli.subcommands.contains_key("new-branch"));
/// ```
#[derive(Clone, Default)]
pub struct CommandConfig {
    pub description: Option<String>,
    /// Positional-argument usage string, e.g. `"<dir> [type...]"`.
    pub args: Option<String>,
    pub options: BTreeMap<String, OptionConfig>,
    pub subcommands: BTreeMap<String, CommandConfig>,
    /// Implementation; a node with neither `run` nor subcommands is invalid.
    pub run: Option<CommandAction>,
}

impl CommandConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_args(mut self, args: &str) -> Self {
        self.args = Some(args.to_string());
        self
    }

    pub fn with_option(mut self, name: &str, option: OptionConfig) -> Self {
        self.options.insert(name.to_string(), option);
        self
    }

    pub fn with_subcommand(mut self, name: &str, config: CommandConfig) -> Self {
        self.subcommands.insert(name.to_string(), config);
        self
    }

    pub fn with_run<F>(mut self, run: F) -> Self
    where
        F: Fn(&BTreeMap<String, OptionValue>, &[String]) -> Result<serde_json::Value, Error>
            + Send
            + Sync
            + 'static,
    {
        self.run = Some(Arc::new(run));
        self
    }
}

impl fmt::Debug for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandConfig")
            .field("description", &self.description)
            .field("args", &self.args)
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .field("run", &self.run.is_some())
            .finish()
    }
}

/// A fully normalized option: declaration key, parsed usage, coercion.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Declaration key (`options: { quiet: ... }` → `"quiet"`).
    pub name: String,
    pub usage: OptionUsage,
    pub parser: ValueParser,
    pub description: Option<String>,
}

/// Index of a [`CommandNode`] within its [`CommandTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One normalized command.
///
/// Invariants (checked once at normalization, never re-checked): required
/// arguments precede optional ones, a variadic argument is final, no two
/// options share a short or long flag, and a node without an `action` has
/// at least one subcommand.
#[derive(Clone)]
pub struct CommandNode {
    pub name: String,
    pub description: Option<String>,
    /// Back-reference for path reconstruction only.
    pub parent: Option<NodeId>,
    pub args: Vec<Argument>,
    pub options: BTreeMap<String, OptionSpec>,
    pub subcommands: BTreeMap<String, NodeId>,
    pub action: Option<CommandAction>,
}

impl CommandNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            parent: None,
            args: Vec::new(),
            options: BTreeMap::new(),
            subcommands: BTreeMap::new(),
            action: None,
        }
    }

    /// Whether the node carries an implementation function.
    pub fn has_implementation(&self) -> bool {
        self.action.is_some()
    }

    /// Looks up a direct subcommand by name.
    pub fn subcommand(&self, name: &str) -> Option<NodeId> {
        self.subcommands.get(name).copied()
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parent", &self.parent)
            .field("args", &self.args)
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// Arena-backed rooted command tree.
///
/// Built once at declaration time; safe to share across any number of
/// concurrent invocations since nothing mutates it afterwards.
///
/// # Examples
///
/// ```
/// use usagekit_core::{CommandNode, CommandTree};
///
/// let mut tree = CommandTree::new(CommandNode::new("git"));
/// let root = tree.root();
/// let remote = tree.add_child(root, CommandNode::new("remote"));
/// let add = tree.add_child(remote, CommandNode::new("add"));
///
/// assert_eq!(tree.node(root).subcommand("remote"), Some(remote));
/// assert_eq!(tree.command_path(add), vec!["git", "remote", "add"]);
/// ```
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
}

impl CommandTree {
    /// Creates a tree holding only the given root node.
    pub fn new(root: CommandNode) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &CommandNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut CommandNode {
        &mut self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts `node` as a child of `parent`, keyed by the node's name, and
    /// wires the parent back-reference.
    pub fn add_child(&mut self, parent: NodeId, mut node: CommandNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        let name = node.name.clone();
        self.nodes.push(node);
        self.nodes[parent.0].subcommands.insert(name, id);
        id
    }

    /// Root-to-node command names, rebuilt through parent links.
    pub fn command_path(&self, id: NodeId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            path.push(node.name.as_str());
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Space-joined command path, e.g. `"git remote add"`.
    pub fn command_name(&self, id: NodeId) -> String {
        self.command_path(id).join(" ")
    }
}

/// Result of resolving one argv array against a [`CommandTree`].
///
/// Created fresh per invocation and handed to the caller; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInvocation {
    /// The resolved (sub)command.
    pub command: NodeId,
    /// Coerced values of the command's own options, by declaration key.
    pub options: BTreeMap<String, OptionValue>,
    /// Coerced values of global options, by declaration key.
    pub global_options: BTreeMap<String, OptionValue>,
    /// Flags that matched no declared option, in argv order.
    pub invalid_options: Vec<String>,
    /// Positional arguments, in argv order.
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_child_wires_parent_and_lookup() {
        let mut tree = CommandTree::new(CommandNode::new("git"));
        let root = tree.root();
        let stash = tree.add_child(root, CommandNode::new("stash"));
        let save = tree.add_child(stash, CommandNode::new("save"));

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.node(save).parent, Some(stash));
        assert_eq!(tree.node(root).subcommand("stash"), Some(stash));
        assert_eq!(tree.node(root).subcommand("missing"), None);
    }

    #[test]
    fn test_command_path_walks_back_to_the_root() {
        let mut tree = CommandTree::new(CommandNode::new("git"));
        let remote = tree.add_child(tree.root(), CommandNode::new("remote"));
        let add = tree.add_child(remote, CommandNode::new("add"));

        assert_eq!(tree.command_path(tree.root()), vec!["git"]);
        assert_eq!(tree.command_name(add), "git remote add");
    }

    #[test]
    fn test_command_config_builder_collects_declarations() {
        let config = CommandConfig::new()
            .with_description("Version control, badly")
            .with_args("<branch>")
            .with_option("quiet", OptionConfig::new("-q, --quiet"))
            .with_run(|_options, _args| Ok(serde_json::Value::Null));

        assert!(config.run.is_some());
        assert_eq!(config.args.as_deref(), Some("<branch>"));
        assert!(config.options.contains_key("quiet"));
        // Debug must not try to print the closure.
        assert!(format!("{config:?}").contains("run: true"));
    }
}
