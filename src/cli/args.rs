// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for Constella.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ProviderId, SettingsUpdate};

/// Constella - character journals, comments and discovery from your AI provider
#[derive(Parser, Debug)]
#[command(name = "constella")]
#[command(version, about = "Generate character journals, comments and new characters")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to $CONSTELLA_ENV_FILE, then ./.env)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change provider settings
    #[command(alias = "config")]
    Settings(SettingsArgs),

    /// List supported providers and their known models
    Providers,

    /// Send a short greeting to check a provider configuration
    Test(TestArgs),

    /// Write a diary entry for a character
    Journal(JournalArgs),

    /// Write a comment on a journal entry
    Comment(CommentArgs),

    /// Propose new characters related to a character
    Discover(DiscoverArgs),
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print current settings with secrets masked
    Show,

    /// Update settings; only the given fields change
    Set(SettingsSetArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct SettingsSetArgs {
    /// Active provider (ollama, openai, anthropic, google)
    #[arg(long)]
    pub provider: Option<ProviderId>,

    #[arg(long)]
    pub ollama_api_url: Option<String>,
    #[arg(long)]
    pub ollama_model: Option<String>,

    #[arg(long)]
    pub openai_api_key: Option<String>,
    #[arg(long)]
    pub openai_model: Option<String>,
    #[arg(long)]
    pub openai_base_url: Option<String>,

    #[arg(long)]
    pub anthropic_api_key: Option<String>,
    #[arg(long)]
    pub anthropic_model: Option<String>,
    #[arg(long)]
    pub anthropic_base_url: Option<String>,

    #[arg(long)]
    pub google_api_key: Option<String>,
    #[arg(long)]
    pub google_model: Option<String>,
    #[arg(long)]
    pub google_base_url: Option<String>,
}

impl From<SettingsSetArgs> for SettingsUpdate {
    fn from(args: SettingsSetArgs) -> Self {
        SettingsUpdate {
            provider: args.provider,
            ollama_api_url: args.ollama_api_url,
            ollama_model: args.ollama_model,
            openai_api_key: args.openai_api_key,
            openai_model: args.openai_model,
            openai_base_url: args.openai_base_url,
            anthropic_api_key: args.anthropic_api_key,
            anthropic_model: args.anthropic_model,
            anthropic_base_url: args.anthropic_base_url,
            google_api_key: args.google_api_key,
            google_model: args.google_model,
            google_base_url: args.google_base_url,
        }
    }
}

/// Arguments for the test subcommand
#[derive(clap::Args, Debug, Default)]
pub struct TestArgs {
    /// Provider to test instead of the configured one
    #[arg(short, long)]
    pub provider: Option<ProviderId>,

    /// Model to use for the test
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key to use for the test
    #[arg(long)]
    pub api_key: Option<String>,

    /// Endpoint URL to use for the test
    #[arg(long)]
    pub endpoint: Option<String>,
}

impl TestArgs {
    /// Candidate settings, if any override was given.
    pub fn candidate(&self, current: ProviderId) -> Option<SettingsUpdate> {
        if self.provider.is_none()
            && self.model.is_none()
            && self.api_key.is_none()
            && self.endpoint.is_none()
        {
            return None;
        }
        Some(SettingsUpdate::for_provider(
            self.provider.unwrap_or(current),
            self.endpoint.clone(),
            self.model.clone(),
            self.api_key.clone(),
        ))
    }
}

/// Arguments for the journal subcommand
#[derive(clap::Args, Debug)]
pub struct JournalArgs {
    /// Character JSON file
    #[arg(short, long)]
    pub character: PathBuf,

    /// Theme of the entry
    #[arg(short, long)]
    pub theme: String,

    /// JSON array of characters used to resolve relationship names
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

/// Arguments for the comment subcommand
#[derive(clap::Args, Debug)]
pub struct CommentArgs {
    /// Commenting character JSON file
    #[arg(short, long)]
    pub character: PathBuf,

    /// Journal JSON file
    #[arg(short, long)]
    pub journal: PathBuf,

    /// JSON array of existing comments, oldest first
    #[arg(long)]
    pub comments: Option<PathBuf>,

    /// Id of the comment being replied to
    #[arg(long)]
    pub reply_to: Option<String>,

    /// JSON array of characters used to resolve relationship names
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

/// Arguments for the discover subcommand
#[derive(clap::Args, Debug)]
pub struct DiscoverArgs {
    /// Seed character JSON file
    #[arg(short, long)]
    pub character: PathBuf,

    /// How the new characters relate to the seed character
    #[arg(short, long)]
    pub phrase: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_settings_show() {
        let cli = Cli::parse_from(["constella", "settings", "show"]);
        assert!(matches!(
            cli.command,
            Commands::Settings(SettingsArgs {
                command: SettingsCommands::Show
            })
        ));
        assert_eq!(cli.verbose, 0);
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["constella", "providers", "-vv", "--env-file", "/tmp/x.env"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/x.env")));
    }

    #[test]
    fn test_cli_settings_set_into_update() {
        let cli = Cli::parse_from([
            "constella",
            "settings",
            "set",
            "--provider",
            "anthropic",
            "--anthropic-model",
            "claude-3-5-sonnet-20241022",
        ]);
        let Commands::Settings(SettingsArgs {
            command: SettingsCommands::Set(args),
        }) = cli.command
        else {
            panic!("expected settings set");
        };
        let update = SettingsUpdate::from(args);
        assert_eq!(update.provider, Some(ProviderId::Anthropic));
        assert_eq!(
            update.anthropic_model.as_deref(),
            Some("claude-3-5-sonnet-20241022")
        );
        assert!(update.openai_api_key.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_provider() {
        let result = Cli::try_parse_from(["constella", "test", "--provider", "cohere"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_test_args_candidate() {
        assert!(TestArgs::default().candidate(ProviderId::Ollama).is_none());

        let args = TestArgs {
            model: Some("llama2".to_string()),
            ..Default::default()
        };
        let candidate = args.candidate(ProviderId::Ollama).unwrap();
        assert_eq!(candidate.provider, Some(ProviderId::Ollama));
        assert_eq!(candidate.ollama_model.as_deref(), Some("llama2"));
    }

    #[test]
    fn test_cli_comment_args() {
        let cli = Cli::parse_from([
            "constella",
            "comment",
            "-c",
            "tomas.json",
            "-j",
            "entry.json",
            "--reply-to",
            "k1",
        ]);
        let Commands::Comment(args) = cli.command else {
            panic!("expected comment");
        };
        assert_eq!(args.reply_to.as_deref(), Some("k1"));
        assert!(args.comments.is_none());
    }
}
