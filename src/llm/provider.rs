// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Text generation capability and the closed set of providers
//!
//! Every upstream service turns one prompt into one text response. The
//! concrete providers are variants of [`Provider`], so adding a backend
//! means a new module, a new variant and a new match arm.

use async_trait::async_trait;

use crate::config::ProviderId;
use crate::error::Result;
use crate::llm::providers::{AnthropicProvider, GoogleProvider, OllamaProvider, OpenAiProvider};

/// Capability shared by every provider
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name (e.g., "ollama", "anthropic")
    fn name(&self) -> &str;

    /// Send one prompt and return the generated text. Exactly one upstream
    /// attempt is made.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// One live provider instance, built from the settings current at resolve
/// time.
#[derive(Debug, Clone)]
pub enum Provider {
    Ollama(OllamaProvider),
    OpenAi(OpenAiProvider),
    Anthropic(AnthropicProvider),
    Google(GoogleProvider),
}

impl Provider {
    pub fn id(&self) -> ProviderId {
        match self {
            Provider::Ollama(_) => ProviderId::Ollama,
            Provider::OpenAi(_) => ProviderId::OpenAi,
            Provider::Anthropic(_) => ProviderId::Anthropic,
            Provider::Google(_) => ProviderId::Google,
        }
    }

    /// Base URL every request of this provider goes to.
    pub fn base_url(&self) -> &str {
        match self {
            Provider::Ollama(p) => p.base_url(),
            Provider::OpenAi(p) => p.base_url(),
            Provider::Anthropic(p) => p.base_url(),
            Provider::Google(p) => p.base_url(),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::Ollama(p) => p.model(),
            Provider::OpenAi(p) => p.model(),
            Provider::Anthropic(p) => p.model(),
            Provider::Google(p) => p.model(),
        }
    }
}

#[async_trait]
impl TextGenerator for Provider {
    fn name(&self) -> &str {
        self.id().as_str()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            Provider::Ollama(p) => p.generate(prompt).await,
            Provider::OpenAi(p) => p.generate(prompt).await,
            Provider::Anthropic(p) => p.generate(prompt).await,
            Provider::Google(p) => p.generate(prompt).await,
        }
    }
}
