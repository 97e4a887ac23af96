//! Core data model for usage-grammar command-line interfaces.
//!
//! This crate defines the types shared by the grammar compiler
//! (`usagekit-grammar`) and the resolution engine (`usagekit-resolve`):
//!
//! - [`Argument`], [`OptionUsage`], [`UsageArgument`] — structured results
//!   of parsing usage strings like `"-p, --port <number>"` and
//!   `"<dir> [type...]"`.
//! - [`CommandConfig`] / [`CommandTree`] — the user-facing declaration of a
//!   command hierarchy and its normalized, arena-backed form.
//! - [`OptionValue`] / [`ValueParser`] — typed option values and the closed
//!   set of coercion strategies.
//! - [`Error`] / [`ErrorKind`] — the full error taxonomy, from
//!   source-located grammar errors to per-invocation flag and argument
//!   errors.
//!
//! # Example
//!
//! ```
//! use usagekit_core::{CommandNode, CommandTree, OptionUsage, UsageArgument};
//!
//! let mut tree = CommandTree::new(CommandNode::new("git"));
//! let remote = tree.add_child(tree.root(), CommandNode::new("remote"));
//! assert_eq!(tree.command_name(remote), "git remote");
//!
//! let usage = OptionUsage {
//!     short: Some("p".into()),
//!     long: Some("port".into()),
//!     argument: Some(UsageArgument { name: "number".into(), required: true }),
//! };
//! assert_eq!(usage.canonical(), "-p, --port <number>");
//! ```

mod error;
mod tree;
mod types;
mod value;

pub use error::{Error, ErrorKind};
pub use tree::{
    CommandAction, CommandConfig, CommandNode, CommandTree, NodeId, OptionConfig, OptionSpec,
    ParsedInvocation,
};
pub use types::{Argument, OptionUsage, UsageArgument};
pub use value::{CustomParser, OptionValue, ValueParser};
