// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Static catalog of supported providers and their known models

use serde::Serialize;

use crate::config::ProviderId;

/// Catalog entry describing one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub name: ProviderId,
    pub display_name: &'static str,
    pub description: &'static str,
    pub requires_api_key: bool,
    pub default_model: &'static str,
    pub available_models: &'static [&'static str],
}

/// Models known to work with each provider. The first entry is the default.
pub fn known_models(id: ProviderId) -> &'static [&'static str] {
    match id {
        ProviderId::Ollama => &["gpt-oss:20b", "llama2", "codellama"],
        ProviderId::OpenAi => &["gpt-4o-mini", "gpt-4o", "gpt-4-turbo", "gpt-3.5-turbo"],
        ProviderId::Anthropic => &["claude-sonnet-4-5-20250929", "claude-3-5-sonnet-20241022"],
        ProviderId::Google => &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"],
    }
}

pub fn provider_info(id: ProviderId) -> ProviderInfo {
    let (display_name, description) = match id {
        ProviderId::Ollama => ("Ollama (Local)", "Run models locally on your own machine"),
        ProviderId::OpenAi => ("OpenAI", "GPT models through the OpenAI API"),
        ProviderId::Anthropic => ("Anthropic Claude", "Claude models through the Anthropic API"),
        ProviderId::Google => ("Google Gemini", "Gemini models through the Google AI API"),
    };
    ProviderInfo {
        name: id,
        display_name,
        description,
        requires_api_key: id.requires_api_key(),
        default_model: id.default_model(),
        available_models: known_models(id),
    }
}

/// Every supported provider, in canonical order.
pub fn catalog() -> Vec<ProviderInfo> {
    ProviderId::ALL.into_iter().map(provider_info).collect()
}

/// Known-good model ids listed when a configured model is not found.
pub fn alternatives(id: ProviderId) -> Vec<String> {
    known_models(id).iter().map(|m| m.to_string()).collect()
}
