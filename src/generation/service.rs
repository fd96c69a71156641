// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! End-to-end generation flows
//!
//! enrich -> build prompt -> resolve provider -> generate -> post-process.
//! The provider is resolved from the live settings on every call, so a
//! settings update takes effect on the next generation.

use std::sync::Arc;

use super::context::{
    Character, Comment, CommentContext, DiscoveryContext, GenerationContext, Journal,
    JournalContext,
};
use super::enrich::{enrich, CharacterDirectory};
use super::postprocess::{
    comment_postprocess, discovery_postprocess, journal_postprocess, DiscoveryOutcome,
};
use crate::config::LiveSettings;
use crate::error::Result;
use crate::llm::{ProviderFactory, TextGenerator};

pub struct GenerationService {
    settings: Arc<LiveSettings>,
    directory: Arc<dyn CharacterDirectory>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl GenerationService {
    pub fn new(settings: Arc<LiveSettings>, directory: Arc<dyn CharacterDirectory>) -> Self {
        Self {
            settings,
            directory,
            generator: None,
        }
    }

    /// Use a fixed generator instead of resolving one from the settings.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn settings(&self) -> &Arc<LiveSettings> {
        &self.settings
    }

    fn generator(&self) -> Arc<dyn TextGenerator> {
        match &self.generator {
            Some(generator) => Arc::clone(generator),
            None => Arc::new(ProviderFactory::current(&self.settings.snapshot())),
        }
    }

    /// Write a diary entry for `character` about `theme`.
    pub async fn generate_journal(&self, character: Character, theme: &str) -> Result<String> {
        let character = enrich(character, self.directory.as_ref()).await;
        let ctx = GenerationContext::Journal(JournalContext {
            character,
            theme: theme.to_string(),
        });
        let raw = complete(self.generator().as_ref(), &ctx).await?;
        Ok(journal_postprocess(&raw))
    }

    /// Journal entries for several characters on one theme, in order.
    /// Stops at the first failure.
    pub async fn generate_journals(
        &self,
        characters: &[Character],
        theme: &str,
    ) -> Result<Vec<String>> {
        let mut entries = Vec::with_capacity(characters.len());
        for character in characters {
            entries.push(self.generate_journal(character.clone(), theme).await?);
        }
        Ok(entries)
    }

    /// Write a comment by `character` on `journal`, continuing `thread`.
    pub async fn generate_comment(
        &self,
        character: Character,
        journal: &Journal,
        thread: Vec<Comment>,
        reply_to: Option<String>,
    ) -> Result<String> {
        let character = enrich(character, self.directory.as_ref()).await;
        let ctx = GenerationContext::Comment(CommentContext {
            character,
            journal_body: journal.content.clone(),
            thread,
            reply_to,
        });
        let raw = complete(self.generator().as_ref(), &ctx).await?;
        Ok(comment_postprocess(&raw))
    }

    /// Propose new characters related to `character`.
    pub async fn discover_characters(
        &self,
        character: Character,
        relationship_phrase: &str,
    ) -> Result<DiscoveryOutcome> {
        let seed_name = character.name.clone();
        let ctx = GenerationContext::Discovery(DiscoveryContext {
            character,
            relationship_phrase: relationship_phrase.to_string(),
        });
        let raw = complete(self.generator().as_ref(), &ctx).await?;
        Ok(discovery_postprocess(&raw, &seed_name))
    }
}

/// Render the prompt for `ctx` and send it through `generator`.
pub async fn complete(generator: &dyn TextGenerator, ctx: &GenerationContext) -> Result<String> {
    let prompt = ctx.render_prompt();
    tracing::debug!(
        kind = %ctx.kind(),
        provider = generator.name(),
        character = %ctx.character().name,
        prompt_len = prompt.len(),
        "generating"
    );
    generator.generate(&prompt).await
}
