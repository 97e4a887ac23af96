use usagekit_core::{
    CommandConfig, ErrorKind, OptionConfig, OptionValue, ValueParser,
};
use usagekit_resolve::{
    CliConfig, NormalizedCli, normalize_argv, normalize_cli, resolve_invocation,
};

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}

/// A git-shaped program exercising nested subcommands, every value
/// parser, global options, and both argument arities.
fn git() -> NormalizedCli {
    let remote = CommandConfig::new()
        .with_run(|_options, _args| Ok(serde_json::Value::Null))
        .with_subcommand(
            "add",
            CommandConfig::new()
                .with_args("<name> <url>")
                .with_option("fetch", OptionConfig::new("-f, --fetch"))
                .with_run(|_options, _args| Ok(serde_json::Value::Null)),
        );

    let stash = CommandConfig::new()
        .with_run(|_options, _args| Ok(serde_json::Value::Null))
        .with_subcommand(
            "save",
            CommandConfig::new()
                .with_args("[message]")
                .with_option("patch", OptionConfig::new("-p, --patch"))
                .with_run(|_options, _args| Ok(serde_json::Value::Null)),
        );

    let add = CommandConfig::new()
        .with_args("<files...>")
        .with_option("all", OptionConfig::new("-A, --all"))
        .with_run(|_options, _args| Ok(serde_json::Value::Null));

    let serve = CommandConfig::new()
        .with_option(
            "port",
            OptionConfig::new("-p, --port <number>").with_parser(ValueParser::Number),
        )
        .with_option(
            "color",
            OptionConfig::new("--color [bool]").with_parser(ValueParser::Bool),
        )
        .with_run(|_options, _args| Ok(serde_json::Value::Null));

    let config = CliConfig::new(
        "git",
        CommandConfig::new()
            .with_subcommand("remote", remote)
            .with_subcommand("stash", stash)
            .with_subcommand("add", add)
            .with_subcommand("serve", serve),
    )
    .with_version("0.1.0")
    .with_global_option("quiet", OptionConfig::new("-q, --quiet"));

    normalize_cli(config).expect("the declaration is valid")
}

#[test]
fn test_resolves_a_nested_subcommand_with_its_arguments() {
    let cli = git();

    let invocation =
        resolve_invocation(&cli, &argv(&["remote", "add", "origin", "git@host:repo"])).unwrap();
    assert_eq!(
        cli.tree.command_name(invocation.command),
        "git remote add"
    );
    assert_eq!(invocation.args, vec!["origin", "git@host:repo"]);
}

#[test]
fn test_flags_before_the_subcommand_are_reinterpreted_against_it() {
    let cli = git();

    let invocation = resolve_invocation(&cli, &argv(&["stash", "--patch", "save"])).unwrap();
    assert_eq!(cli.tree.command_name(invocation.command), "git stash save");
    assert_eq!(invocation.options["patch"], OptionValue::Bool(true));
    assert!(invocation.args.is_empty());
}

#[test]
fn test_short_and_long_flags_both_set_the_option() {
    let cli = git();

    for flag in ["-f", "--fetch"] {
        let invocation =
            resolve_invocation(&cli, &argv(&["remote", "add", flag, "origin", "url"])).unwrap();
        assert_eq!(invocation.options["fetch"], OptionValue::Bool(true), "{flag}");
    }
}

#[test]
fn test_conjoined_and_clustered_forms_match_their_expanded_spelling() {
    let cli = git();

    let expanded = resolve_invocation(&cli, &argv(&["serve", "-p", "8080"])).unwrap();
    let conjoined = resolve_invocation(&cli, &argv(&["serve", "--port=8080"])).unwrap();
    assert_eq!(expanded.options, conjoined.options);
    assert_eq!(expanded.options["port"], OptionValue::Number(8080.0));
}

#[test]
fn test_boolean_coercion_accepts_the_word_forms() {
    let cli = git();

    for (word, expected) in [("yes", true), ("on", true), ("no", false), ("off", false)] {
        let invocation = resolve_invocation(&cli, &argv(&["serve", "--color", word])).unwrap();
        assert_eq!(invocation.options["color"], OptionValue::Bool(expected), "{word}");
    }

    let err = resolve_invocation(&cli, &argv(&["serve", "--color", "maybe"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Flag);
}

#[test]
fn test_a_conjoined_flag_with_an_empty_value_leaves_no_stray_argument() {
    let cli = git();

    let invocation = resolve_invocation(&cli, &argv(&["serve", "--color="])).unwrap();
    assert_eq!(invocation.options["color"], OptionValue::Bool(true));
    assert!(invocation.args.is_empty());
}

#[test]
fn test_global_options_work_on_any_command() {
    let cli = git();

    let invocation = resolve_invocation(&cli, &argv(&["add", "-q", "lib.rs"])).unwrap();
    assert_eq!(invocation.global_options["quiet"], OptionValue::Bool(true));
    assert_eq!(invocation.args, vec!["lib.rs"]);
}

#[test]
fn test_unknown_flags_are_reported_together() {
    let cli = git();

    let err = resolve_invocation(&cli, &argv(&["serve", "-x", "--wat"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Flag);
    assert_eq!(err.to_string(), "unknown options: -x, --wat");
}

#[test]
fn test_variadic_arguments_require_at_least_one_value() {
    let cli = git();

    let err = resolve_invocation(&cli, &argv(&["add"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(err.to_string(), "\"git add\" requires the <files...> argument");

    let invocation = resolve_invocation(&cli, &argv(&["add", "a.rs", "b.rs", "c.rs"])).unwrap();
    assert_eq!(invocation.args, vec!["a.rs", "b.rs", "c.rs"]);
}

#[test]
fn test_too_many_arguments_are_rejected() {
    let cli = git();

    let err = resolve_invocation(
        &cli,
        &argv(&["remote", "add", "origin", "url", "extra"]),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn test_unmatched_tokens_stop_the_command_walk() {
    let cli = git();

    let err = resolve_invocation(&cli, &argv(&["stash", "pop"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(err.to_string(), "\"git stash\" doesn't take arguments");
}

#[test]
fn test_normalization_examples_from_the_readme() {
    assert_eq!(normalize_argv(&argv(&["-qcp"])), vec!["-q", "-c", "-p"]);
    assert_eq!(normalize_argv(&argv(&["--port=8080"])), vec!["--port", "8080"]);
    assert_eq!(normalize_argv(&argv(&["-vp=8080"])), vec!["-v", "-p", "8080"]);
    assert_eq!(normalize_argv(&argv(&["-1337"])), vec!["-1337"]);
}

#[test]
fn test_a_grammar_error_in_the_declaration_carries_a_source_frame() {
    let config = CliConfig::new(
        "app",
        CommandConfig::new()
            .with_option("bad", OptionConfig::new("--port <a <b>"))
            .with_run(|_options, _args| Ok(serde_json::Value::Null)),
    );

    let err = normalize_cli(config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Grammar);
    let rendered = err.to_string();
    assert!(rendered.contains("--port <a <b>"), "{rendered}");
    assert!(rendered.contains('^'), "{rendered}");
}
