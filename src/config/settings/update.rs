// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Partial settings updates and the masked settings view
//!
//! Both shapes are flat, one field per persisted key, which is what the
//! settings endpoints exchange with the UI.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::keys::{setting_key, SettingField, AI_PROVIDER_KEY};
use super::{ProviderId, ProviderSettings};

/// Marker shown instead of a stored secret
pub const REDACTED: &str = "***";

/// Partial settings object. Empty or absent fields leave the current value
/// untouched; an API key equal to [`REDACTED`] is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default, alias = "ai_provider")]
    pub provider: Option<ProviderId>,

    #[serde(default)]
    pub ollama_api_url: Option<String>,
    #[serde(default)]
    pub ollama_model: Option<String>,

    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub openai_model: Option<String>,
    #[serde(default)]
    pub openai_base_url: Option<String>,

    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_model: Option<String>,
    #[serde(default)]
    pub anthropic_base_url: Option<String>,

    #[serde(default)]
    pub google_api_key: Option<String>,
    #[serde(default)]
    pub google_model: Option<String>,
    #[serde(default)]
    pub google_base_url: Option<String>,
}

impl SettingsUpdate {
    /// Candidate that selects `id` and optionally overrides its fields.
    pub fn for_provider(
        id: ProviderId,
        endpoint: Option<String>,
        model: Option<String>,
        api_key: Option<String>,
    ) -> Self {
        let mut update = Self {
            provider: Some(id),
            ..Self::default()
        };
        if let Some(slot) = update.slot_mut(id, SettingField::Endpoint) {
            *slot = endpoint;
        }
        if let Some(slot) = update.slot_mut(id, SettingField::Model) {
            *slot = model;
        }
        if let Some(slot) = update.slot_mut(id, SettingField::ApiKey) {
            *slot = api_key;
        }
        update
    }

    /// Persisted `KEY=VALUE` pairs this update writes, in canonical order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(provider) = self.provider {
            entries.push((AI_PROVIDER_KEY, provider.as_str().to_string()));
        }

        for id in ProviderId::ALL {
            for field in [SettingField::Endpoint, SettingField::Model, SettingField::ApiKey] {
                let (Some(key), Some(value)) = (setting_key(id, field), self.slot(id, field))
                else {
                    continue;
                };
                let value = value.trim();
                if value.is_empty() || (field == SettingField::ApiKey && value == REDACTED) {
                    continue;
                }
                entries.push((key, value.to_string()));
            }
        }
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn slot(&self, id: ProviderId, field: SettingField) -> Option<&String> {
        let slot = match (id, field) {
            (ProviderId::Ollama, SettingField::Endpoint) => &self.ollama_api_url,
            (ProviderId::Ollama, SettingField::Model) => &self.ollama_model,
            (ProviderId::Ollama, SettingField::ApiKey) => return None,
            (ProviderId::OpenAi, SettingField::Endpoint) => &self.openai_base_url,
            (ProviderId::OpenAi, SettingField::Model) => &self.openai_model,
            (ProviderId::OpenAi, SettingField::ApiKey) => &self.openai_api_key,
            (ProviderId::Anthropic, SettingField::Endpoint) => &self.anthropic_base_url,
            (ProviderId::Anthropic, SettingField::Model) => &self.anthropic_model,
            (ProviderId::Anthropic, SettingField::ApiKey) => &self.anthropic_api_key,
            (ProviderId::Google, SettingField::Endpoint) => &self.google_base_url,
            (ProviderId::Google, SettingField::Model) => &self.google_model,
            (ProviderId::Google, SettingField::ApiKey) => &self.google_api_key,
        };
        slot.as_ref()
    }

    fn slot_mut(&mut self, id: ProviderId, field: SettingField) -> Option<&mut Option<String>> {
        let slot = match (id, field) {
            (ProviderId::Ollama, SettingField::Endpoint) => &mut self.ollama_api_url,
            (ProviderId::Ollama, SettingField::Model) => &mut self.ollama_model,
            (ProviderId::Ollama, SettingField::ApiKey) => return None,
            (ProviderId::OpenAi, SettingField::Endpoint) => &mut self.openai_base_url,
            (ProviderId::OpenAi, SettingField::Model) => &mut self.openai_model,
            (ProviderId::OpenAi, SettingField::ApiKey) => &mut self.openai_api_key,
            (ProviderId::Anthropic, SettingField::Endpoint) => &mut self.anthropic_base_url,
            (ProviderId::Anthropic, SettingField::Model) => &mut self.anthropic_model,
            (ProviderId::Anthropic, SettingField::ApiKey) => &mut self.anthropic_api_key,
            (ProviderId::Google, SettingField::Endpoint) => &mut self.google_base_url,
            (ProviderId::Google, SettingField::Model) => &mut self.google_model,
            (ProviderId::Google, SettingField::ApiKey) => &mut self.google_api_key,
        };
        Some(slot)
    }
}

impl ProviderSettings {
    /// Merge a partial update into these settings (in memory only).
    pub fn apply_update(&mut self, update: &SettingsUpdate) -> Result<()> {
        for (key, value) in update.entries() {
            self.apply_entry(key, &value)?;
        }
        Ok(())
    }
}

/// Settings as shown to clients: effective values, secrets masked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub provider: ProviderId,

    pub ollama_api_url: String,
    pub ollama_model: String,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,

    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_base_url: String,

    pub google_api_key: Option<String>,
    pub google_model: String,
    pub google_base_url: String,
}

impl From<&ProviderSettings> for SettingsView {
    fn from(settings: &ProviderSettings) -> Self {
        let masked = |id: ProviderId| settings.api_key(id).map(|_| REDACTED.to_string());
        Self {
            provider: settings.provider,
            ollama_api_url: settings.endpoint(ProviderId::Ollama),
            ollama_model: settings.model(ProviderId::Ollama),
            openai_api_key: masked(ProviderId::OpenAi),
            openai_model: settings.model(ProviderId::OpenAi),
            openai_base_url: settings.endpoint(ProviderId::OpenAi),
            anthropic_api_key: masked(ProviderId::Anthropic),
            anthropic_model: settings.model(ProviderId::Anthropic),
            anthropic_base_url: settings.endpoint(ProviderId::Anthropic),
            google_api_key: masked(ProviderId::Google),
            google_model: settings.model(ProviderId::Google),
            google_base_url: settings.endpoint(ProviderId::Google),
        }
    }
}
