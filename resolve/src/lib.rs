//! Argv resolution against a declared command tree.
//!
//! This crate turns a declarative program description into an immutable
//! [`CommandTree`](usagekit_core::CommandTree) and resolves raw process
//! arguments against it: pick the deepest matching subcommand, split the
//! remainder into options and positional arguments, coerce option values,
//! and check argument arity.
//!
//! ```
//! use usagekit_core::{CommandConfig, OptionConfig, OptionValue, ValueParser};
//! use usagekit_resolve::{CliConfig, normalize_cli, resolve_invocation};
//!
//! let config = CliConfig::new(
//!     "serve",
//!     CommandConfig::new()
//!         .with_args("[dir]")
//!         .with_option(
//!             "port",
//!             OptionConfig::new("-p, --port <number>").with_parser(ValueParser::Number),
//!         )
//!         .with_run(|_options, _args| Ok(serde_json::Value::Null)),
//! );
//! let cli = normalize_cli(config).unwrap();
//!
//! let argv: Vec<String> = ["-p", "8080", "public"].map(String::from).into();
//! let invocation = resolve_invocation(&cli, &argv).unwrap();
//! assert_eq!(invocation.options["port"], OptionValue::Number(8080.0));
//! assert_eq!(invocation.args, vec!["public"]);
//! ```

use usagekit_core::{Error, ParsedInvocation};

mod argv;
mod config;
mod matcher;
mod normalize;
mod resolver;
mod validate;

pub use argv::{is_short_flag, looks_like_flag, normalize_argv};
pub use config::{CliConfig, NormalizedCli, normalize_cli};
pub use matcher::parse_argv;
pub use normalize::{normalize_commands, normalize_options};
pub use resolver::{ResolvedCommand, resolve_command};
pub use validate::validate_arguments;

/// Runs the whole resolution pipeline for one invocation.
///
/// Resolves the command, splits the remainder into options and arguments,
/// then checks arity. Unknown flags are collected across the entire argv
/// and reported together.
pub fn resolve_invocation(
    cli: &NormalizedCli,
    argv: &[String],
) -> Result<ParsedInvocation, Error> {
    let resolved = resolve_command(&cli.tree, argv);
    let invocation = parse_argv(
        &cli.tree,
        resolved.command,
        &cli.global_options,
        &resolved.args,
    )?;

    if !invocation.invalid_options.is_empty() {
        return Err(Error::UnknownOptions {
            flags: invocation.invalid_options,
        });
    }

    validate_arguments(&cli.tree, invocation.command, &invocation.args)?;
    Ok(invocation)
}
