// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::sync::Arc;

use constella::cli::input::{load_directory, read_json};
use constella::cli::{
    CommentArgs, DiscoverArgs, JournalArgs, SettingsArgs, SettingsCommands, TestArgs,
};
use constella::config::{LiveSettings, SettingsUpdate};
use constella::error::Result;
use constella::generation::harness::test_connection;
use constella::generation::{
    Character, Comment, ConnectionReport, GenerationService, InMemoryDirectory, Journal,
};
use constella::llm::catalog;

pub(super) async fn run_settings_command(args: SettingsArgs, live: &LiveSettings) -> Result<()> {
    match args.command {
        SettingsCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&live.view())?);
        }
        SettingsCommands::Set(set_args) => {
            let update = SettingsUpdate::from(set_args);
            if update.is_empty() {
                println!("Nothing to update.");
                return Ok(());
            }
            live.update(&update).await?;
            println!("Settings saved to {}", live.store().path().display());
            println!("{}", serde_json::to_string_pretty(&live.view())?);
        }
    }
    Ok(())
}

pub(super) fn run_providers() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&catalog())?);
    Ok(())
}

/// Returns the report so the caller can pick the exit status.
pub(super) async fn run_test(args: TestArgs, live: &LiveSettings) -> Result<ConnectionReport> {
    let candidate = args.candidate(live.snapshot().provider);
    let report = test_connection(live, candidate.as_ref()).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report)
}

pub(super) async fn run_journal(args: JournalArgs, live: Arc<LiveSettings>) -> Result<()> {
    let character: Character = read_json(&args.character)?;
    let directory = load_directory(args.directory.as_deref())?;

    let service = GenerationService::new(live, Arc::new(directory));
    let entry = service.generate_journal(character, &args.theme).await?;
    println!("{}", entry);
    Ok(())
}

pub(super) async fn run_comment(args: CommentArgs, live: Arc<LiveSettings>) -> Result<()> {
    let character: Character = read_json(&args.character)?;
    let journal: Journal = read_json(&args.journal)?;
    let thread: Vec<Comment> = match args.comments.as_deref() {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let directory = load_directory(args.directory.as_deref())?;

    let service = GenerationService::new(live, Arc::new(directory));
    let comment = service
        .generate_comment(character, &journal, thread, args.reply_to)
        .await?;
    println!("{}", comment);
    Ok(())
}

pub(super) async fn run_discover(args: DiscoverArgs, live: Arc<LiveSettings>) -> Result<()> {
    let character: Character = read_json(&args.character)?;

    let service = GenerationService::new(live, Arc::new(InMemoryDirectory::new()));
    let outcome = service.discover_characters(character, &args.phrase).await?;
    if outcome.is_fallback() {
        eprintln!("The model did not return usable JSON; showing a placeholder character.");
    }
    let proposals = outcome.into_proposals();
    println!("{}", serde_json::to_string_pretty(&proposals)?);
    Ok(())
}
