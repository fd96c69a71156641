// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration test harness
//!
//! Applies a candidate configuration to the live settings, sends one short
//! prompt, and puts the prior settings back. Restoration happens when the
//! override guard is dropped, so it also runs on errors, panics and
//! cancellation of the calling task.

use serde::Serialize;

use crate::config::{LiveSettings, ProviderId, ProviderSettings, SettingsUpdate};
use crate::error::{ConstellaError, Result};
use crate::llm::{ProviderFactory, TextGenerator};

/// Prompt sent by every connection test
pub const TEST_PROMPT: &str = "Hello. Please reply with a short greeting.";

/// Characters of the response kept in a report
pub const EXCERPT_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub success: bool,
    pub provider: ProviderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

/// Test the live configuration, or `candidate` applied on top of it.
pub async fn test_connection(
    live: &LiveSettings,
    candidate: Option<&SettingsUpdate>,
) -> ConnectionReport {
    test_connection_with(live, candidate, ProviderFactory::current).await
}

/// Same as [`test_connection`] with a caller-supplied provider builder.
pub async fn test_connection_with<G, F>(
    live: &LiveSettings,
    candidate: Option<&SettingsUpdate>,
    build: F,
) -> ConnectionReport
where
    G: TextGenerator,
    F: FnOnce(&ProviderSettings) -> G,
{
    let _writer = live.lock_writes().await;

    let mut guard = OverrideGuard::new(live);
    if let Some(candidate) = candidate {
        if let Err(e) = guard.apply(candidate) {
            return failure(live.snapshot().provider, &e);
        }
    }

    let effective = live.snapshot();
    let generator = build(&effective);
    tracing::debug!(provider = %effective.provider, "testing provider connection");

    let report = match generator.generate(TEST_PROMPT).await {
        Ok(text) => ConnectionReport {
            success: true,
            provider: effective.provider,
            response: Some(excerpt(&text)),
            error: None,
            error_kind: None,
        },
        Err(e) => failure(effective.provider, &e),
    };

    drop(guard);
    report
}

fn failure(provider: ProviderId, err: &ConstellaError) -> ConnectionReport {
    tracing::warn!(provider = %provider, error = %err, "connection test failed");
    ConnectionReport {
        success: false,
        provider,
        response: None,
        error: Some(err.to_string()),
        error_kind: Some(err.kind()),
    }
}

/// Keep at most [`EXCERPT_LIMIT`] characters, marking any cut with `...`.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Restores the settings captured at construction when dropped, if an
/// override was applied.
struct OverrideGuard<'a> {
    live: &'a LiveSettings,
    prior: Option<ProviderSettings>,
}

impl<'a> OverrideGuard<'a> {
    fn new(live: &'a LiveSettings) -> Self {
        Self { live, prior: None }
    }

    fn apply(&mut self, candidate: &SettingsUpdate) -> Result<()> {
        let prior = self.live.snapshot();
        let mut next = prior.clone();
        next.apply_update(candidate)?;
        self.prior = Some(prior);
        self.live.replace(next);
        Ok(())
    }
}

impl Drop for OverrideGuard<'_> {
    fn drop(&mut self) {
        if let Some(prior) = self.prior.take() {
            self.live.replace(prior);
            tracing::info!("restored live settings after connection test");
        }
    }
}
