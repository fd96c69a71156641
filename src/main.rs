// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Constella - character text generation from the command line
//!
//! Entry point for the Constella CLI application.

use std::sync::Arc;

use clap::Parser;

use constella::cli::{Cli, Commands};
use constella::config::{ConfigStore, LiveSettings, ProviderSettings};
use constella::error::Result;

#[path = "main/cli_commands.rs"]
mod cli_commands;

use cli_commands::{
    run_comment, run_discover, run_journal, run_providers, run_settings_command, run_test,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on request-level diagnostics. `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        if let Ok(parsed) = "constella=debug".parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load settings: file first, then environment overrides
    let path = cli.env_file.unwrap_or_else(ProviderSettings::default_path);
    let store = ConfigStore::new(path);
    let settings = ProviderSettings::load(&store)?.with_env_overrides()?;
    let live = Arc::new(LiveSettings::new(store, settings));

    match cli.command {
        Commands::Settings(args) => run_settings_command(args, &live).await?,
        Commands::Providers => run_providers()?,
        Commands::Test(args) => {
            let report = run_test(args, &live).await?;
            if !report.success {
                std::process::exit(1);
            }
        }
        Commands::Journal(args) => run_journal(args, live).await?,
        Commands::Comment(args) => run_comment(args, live).await?,
        Commands::Discover(args) => run_discover(args, live).await?,
    }

    Ok(())
}
