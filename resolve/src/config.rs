//! Top-level declaration of a command-line program.

use std::collections::BTreeMap;

use tracing::debug;
use usagekit_core::{CommandConfig, CommandTree, Error, OptionConfig, OptionSpec};

use crate::normalize::{enforce_option_uniqueness, normalize_commands, normalize_options};

/// Everything a program declares up front: a name, an optional version,
/// the command tree, and options shared by every command.
#[derive(Debug, Default)]
pub struct CliConfig {
    pub name: String,
    pub version: Option<String>,
    pub cli: CommandConfig,
    pub global_options: BTreeMap<String, OptionConfig>,
}

impl CliConfig {
    pub fn new(name: &str, cli: CommandConfig) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            cli,
            global_options: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_global_option(mut self, name: &str, option: OptionConfig) -> Self {
        self.global_options.insert(name.to_string(), option);
        self
    }
}

/// A validated, immutable program declaration. Build once, resolve argv
/// against it as many times as you like.
#[derive(Debug)]
pub struct NormalizedCli {
    pub tree: CommandTree,
    pub global_options: BTreeMap<String, OptionSpec>,
    pub version: Option<String>,
}

/// Validates a [`CliConfig`] into a [`NormalizedCli`].
///
/// Every usage string is parsed here, so a malformed declaration fails
/// at startup rather than on some later invocation.
///
/// # Examples
///
/// ```
/// use usagekit_core::CommandConfig;
/// use usagekit_resolve::{CliConfig, normalize_cli};
///
/// let config = CliConfig::new(
///     "greet",
///     CommandConfig::new()
///         .with_args("[name]")
///         .with_run(|_options, _args| Ok(serde_json::Value::Null)),
/// );
/// let cli = normalize_cli(config).unwrap();
/// assert_eq!(cli.tree.command_name(cli.tree.root()), "greet");
/// ```
pub fn normalize_cli(config: CliConfig) -> Result<NormalizedCli, Error> {
    let name = config.name.trim();
    if name.is_empty() {
        return Err(Error::Config {
            path: "config.name".to_string(),
            message: "The program needs a name.".to_string(),
        });
    }

    let tree = normalize_commands(config.cli, name)?;
    let global_options = normalize_options(config.global_options, "config.global_options")?;
    enforce_option_uniqueness(&global_options, "config.global_options")?;

    debug!(name, globals = global_options.len(), "normalized program declaration");

    Ok(NormalizedCli {
        tree,
        global_options,
        version: config.version,
    })
}

#[cfg(test)]
mod tests {
    use usagekit_core::ErrorKind;

    use super::*;

    fn runnable() -> CommandConfig {
        CommandConfig::new().with_run(|_options, _args| Ok(serde_json::Value::Null))
    }

    #[test]
    fn test_a_name_is_required() {
        let err = normalize_cli(CliConfig::new("  ", runnable())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("config.name"));
    }

    #[test]
    fn test_global_options_are_normalized() {
        let config = CliConfig::new("app", runnable())
            .with_version("1.2.0")
            .with_global_option("verbose", OptionConfig::new("-v, --verbose"));

        let cli = normalize_cli(config).unwrap();
        assert_eq!(cli.version.as_deref(), Some("1.2.0"));
        assert_eq!(
            cli.global_options["verbose"].usage.canonical(),
            "-v, --verbose"
        );
    }

    #[test]
    fn test_duplicate_global_flags_are_rejected() {
        let config = CliConfig::new("app", runnable())
            .with_global_option("verbose", OptionConfig::new("-v"))
            .with_global_option("version", OptionConfig::new("-v"));

        let err = normalize_cli(config).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("verbose"), "{rendered}");
        assert!(rendered.contains("version"), "{rendered}");
    }

    #[test]
    fn test_a_bad_global_usage_string_fails_at_startup() {
        let config = CliConfig::new("app", runnable())
            .with_global_option("bad", OptionConfig::new("-too-long"));

        let err = normalize_cli(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Grammar);
    }
}
