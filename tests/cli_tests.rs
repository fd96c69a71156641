// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use clap::Parser;
use constella::cli::{Cli, Commands, SettingsCommands};
use constella::config::{ProviderId, SettingsUpdate};

#[test]
fn test_parse_providers_command() {
    let cli = Cli::try_parse_from(["constella", "providers"]).expect("Valid command parsing");
    assert!(matches!(cli.command, Commands::Providers));
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["constella"]).is_err());
}

#[test]
fn test_parse_settings_show_and_alias() {
    for name in ["settings", "config"] {
        let cli = Cli::try_parse_from(["constella", name, "show"]).expect("Valid command parsing");
        match cli.command {
            Commands::Settings(args) => assert!(matches!(args.command, SettingsCommands::Show)),
            _ => panic!("Expected Settings command"),
        }
    }
}

#[test]
fn test_parse_settings_set_into_update() {
    let cli = Cli::try_parse_from([
        "constella",
        "settings",
        "set",
        "--provider",
        "anthropic",
        "--anthropic-api-key",
        "sk-ant",
        "--anthropic-model",
        "claude-3-5-haiku-20241022",
    ])
    .expect("Valid command parsing");

    let Commands::Settings(args) = cli.command else {
        panic!("Expected Settings command");
    };
    let SettingsCommands::Set(set_args) = args.command else {
        panic!("Expected Set subcommand");
    };
    let update = SettingsUpdate::from(set_args);
    assert_eq!(update.provider, Some(ProviderId::Anthropic));
    assert_eq!(update.anthropic_api_key.as_deref(), Some("sk-ant"));
    assert!(update.openai_api_key.is_none());
}

#[test]
fn test_unknown_provider_is_a_parse_error() {
    let result = Cli::try_parse_from(["constella", "settings", "set", "--provider", "cohere"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_test_without_overrides() {
    let cli = Cli::try_parse_from(["constella", "test"]).expect("Valid command parsing");
    let Commands::Test(args) = cli.command else {
        panic!("Expected Test command");
    };
    assert!(args.candidate(ProviderId::Ollama).is_none());
}

#[test]
fn test_parse_test_with_overrides() {
    let cli = Cli::try_parse_from([
        "constella", "test", "-p", "openai", "-m", "gpt-4o", "--api-key", "sk-x",
    ])
    .expect("Valid command parsing");
    let Commands::Test(args) = cli.command else {
        panic!("Expected Test command");
    };
    let candidate = args.candidate(ProviderId::Ollama).unwrap();
    assert_eq!(candidate.provider, Some(ProviderId::OpenAi));
    assert_eq!(candidate.openai_model.as_deref(), Some("gpt-4o"));
    assert_eq!(candidate.openai_api_key.as_deref(), Some("sk-x"));
}

#[test]
fn test_parse_journal_command() {
    let cli = Cli::try_parse_from([
        "constella", "journal", "-c", "ada.json", "-t", "first snow",
    ])
    .expect("Valid command parsing");
    let Commands::Journal(args) = cli.command else {
        panic!("Expected Journal command");
    };
    assert_eq!(args.character.to_str(), Some("ada.json"));
    assert_eq!(args.theme, "first snow");
    assert!(args.directory.is_none());
}

#[test]
fn test_journal_requires_theme() {
    assert!(Cli::try_parse_from(["constella", "journal", "-c", "ada.json"]).is_err());
}

#[test]
fn test_parse_comment_command() {
    let cli = Cli::try_parse_from([
        "constella",
        "comment",
        "-c",
        "bob.json",
        "-j",
        "entry.json",
        "--comments",
        "thread.json",
        "--reply-to",
        "c2",
    ])
    .expect("Valid command parsing");
    let Commands::Comment(args) = cli.command else {
        panic!("Expected Comment command");
    };
    assert_eq!(args.reply_to.as_deref(), Some("c2"));
    assert!(args.comments.is_some());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "constella",
        "discover",
        "-c",
        "ada.json",
        "-p",
        "old friends",
        "-vv",
        "--env-file",
        "/tmp/constella.env",
    ])
    .expect("Valid command parsing");
    assert_eq!(cli.verbose, 2);
    assert_eq!(
        cli.env_file.as_deref().and_then(|p| p.to_str()),
        Some("/tmp/constella.env")
    );
    assert!(matches!(cli.command, Commands::Discover(_)));
}
