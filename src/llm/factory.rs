// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Provider factory
//!
//! Resolves a provider id to a live [`Provider`]. Construction never touches
//! the network and never fails for a known id; missing credentials surface
//! when the provider is asked to generate.

use crate::config::{ProviderId, ProviderSettings};
use crate::error::Result;
use crate::llm::provider::Provider;
use crate::llm::providers::{AnthropicProvider, GoogleProvider, OllamaProvider, OpenAiProvider};

/// Factory for creating LLM providers
pub struct ProviderFactory;

impl ProviderFactory {
    /// Provider for the currently selected id.
    pub fn current(settings: &ProviderSettings) -> Provider {
        Self::create(settings.provider, settings)
    }

    /// Provider for `id`, configured from `settings`.
    pub fn create(id: ProviderId, settings: &ProviderSettings) -> Provider {
        match id {
            ProviderId::Ollama => Provider::Ollama(OllamaProvider::from_settings(settings)),
            ProviderId::OpenAi => Provider::OpenAi(OpenAiProvider::from_settings(settings)),
            ProviderId::Anthropic => {
                Provider::Anthropic(AnthropicProvider::from_settings(settings))
            }
            ProviderId::Google => Provider::Google(GoogleProvider::from_settings(settings)),
        }
    }

    /// Resolve a provider name. Anything outside the known set is an
    /// `UnsupportedProvider` error.
    pub fn resolve(name: &str, settings: &ProviderSettings) -> Result<Provider> {
        let id: ProviderId = name.parse()?;
        Ok(Self::create(id, settings))
    }
}
