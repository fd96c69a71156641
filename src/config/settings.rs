// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Provider settings
//!
//! `ProviderSettings` selects the active provider and carries the endpoint,
//! model and credential for each known provider. Values are optional at
//! rest; defaults are resolved at call time and a missing API key only
//! becomes an error when a hosted provider is asked to generate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConstellaError, Result};

mod io;
mod keys;
mod live;
mod update;

pub use keys::{setting_key, SettingField, AI_PROVIDER_KEY};
pub use live::LiveSettings;
pub use update::{SettingsUpdate, SettingsView, REDACTED};

/// Closed set of supported upstream providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Self-hosted Ollama server
    Ollama,
    /// OpenAI chat completions
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// Google Gemini generateContent
    Google,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::Ollama,
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Google,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "ollama",
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Google => "google",
        }
    }

    /// Human-readable vendor name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "Ollama",
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Google => "Google",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderId::Ollama)
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "http://localhost:11434",
            ProviderId::OpenAi => "https://api.openai.com/v1",
            ProviderId::Anthropic => "https://api.anthropic.com/v1",
            ProviderId::Google => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::Ollama => "gpt-oss:20b",
            ProviderId::OpenAi => "gpt-4o-mini",
            ProviderId::Anthropic => "claude-sonnet-4-5-20250929",
            ProviderId::Google => "gemini-1.5-flash",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ConstellaError;

    fn from_str(s: &str) -> Result<Self> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| ConstellaError::UnsupportedProvider(s.to_string()))
    }
}

/// Per-provider connection settings
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub endpoint_url: Option<String>,
    pub model_id: Option<String>,
    pub api_key: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("model_id", &self.model_id)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl ProviderConfig {
    pub(crate) fn field_mut(&mut self, field: SettingField) -> &mut Option<String> {
        match field {
            SettingField::Endpoint => &mut self.endpoint_url,
            SettingField::Model => &mut self.model_id,
            SettingField::ApiKey => &mut self.api_key,
        }
    }
}

/// Active provider plus the configuration of every known provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub provider: ProviderId,
    pub ollama: ProviderConfig,
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub google: ProviderConfig,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: ProviderId::Ollama,
            ollama: ProviderConfig::default(),
            openai: ProviderConfig::default(),
            anthropic: ProviderConfig::default(),
            google: ProviderConfig::default(),
        }
    }
}

impl ProviderSettings {
    pub fn config(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::Ollama => &self.ollama,
            ProviderId::OpenAi => &self.openai,
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::Google => &self.google,
        }
    }

    pub fn config_mut(&mut self, id: ProviderId) -> &mut ProviderConfig {
        match id {
            ProviderId::Ollama => &mut self.ollama,
            ProviderId::OpenAi => &mut self.openai,
            ProviderId::Anthropic => &mut self.anthropic,
            ProviderId::Google => &mut self.google,
        }
    }

    /// Configured endpoint, or the provider's public default.
    pub fn endpoint(&self, id: ProviderId) -> String {
        non_empty(&self.config(id).endpoint_url)
            .unwrap_or(id.default_endpoint())
            .trim_end_matches('/')
            .to_string()
    }

    /// Configured model id, or the provider's default model.
    pub fn model(&self, id: ProviderId) -> String {
        non_empty(&self.config(id).model_id)
            .unwrap_or(id.default_model())
            .to_string()
    }

    /// Configured API key, if one is present and non-blank.
    pub fn api_key(&self, id: ProviderId) -> Option<&str> {
        non_empty(&self.config(id).api_key)
    }

    /// Apply one persisted `KEY=VALUE` pair. Unknown keys are ignored and
    /// reported as `false`.
    pub fn apply_entry(&mut self, key: &str, value: &str) -> Result<bool> {
        if key == AI_PROVIDER_KEY {
            self.provider = value.parse()?;
            return Ok(true);
        }

        match keys::lookup(key) {
            Some((id, field)) => {
                let value = value.trim();
                *self.config_mut(id).field_mut(field) =
                    (!value.is_empty()).then(|| value.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_round_trip_names() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
        }
    }

    #[test]
    fn test_provider_id_unknown_is_unsupported() {
        let err = "cohere".parse::<ProviderId>().unwrap_err();
        assert!(matches!(err, ConstellaError::UnsupportedProvider(ref id) if id == "cohere"));
    }

    #[test]
    fn test_provider_id_serde_names() {
        assert_eq!(serde_json::to_string(&ProviderId::OpenAi).unwrap(), "\"openai\"");
        let id: ProviderId = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(id, ProviderId::Anthropic);
    }

    #[test]
    fn test_requires_api_key() {
        assert!(!ProviderId::Ollama.requires_api_key());
        assert!(ProviderId::OpenAi.requires_api_key());
        assert!(ProviderId::Anthropic.requires_api_key());
        assert!(ProviderId::Google.requires_api_key());
    }

    #[test]
    fn test_defaults_resolved_at_call_time() {
        let settings = ProviderSettings::default();
        assert_eq!(settings.provider, ProviderId::Ollama);
        assert_eq!(settings.endpoint(ProviderId::Ollama), "http://localhost:11434");
        assert_eq!(settings.model(ProviderId::OpenAi), "gpt-4o-mini");
        assert!(settings.api_key(ProviderId::Anthropic).is_none());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash_and_ignores_blank() {
        let mut settings = ProviderSettings::default();
        settings.openai.endpoint_url = Some("http://proxy.local/v1/".to_string());
        settings.google.endpoint_url = Some("   ".to_string());
        assert_eq!(settings.endpoint(ProviderId::OpenAi), "http://proxy.local/v1");
        assert_eq!(
            settings.endpoint(ProviderId::Google),
            ProviderId::Google.default_endpoint()
        );
    }

    #[test]
    fn test_blank_api_key_counts_as_absent() {
        let mut settings = ProviderSettings::default();
        settings.openai.api_key = Some("  ".to_string());
        assert!(settings.api_key(ProviderId::OpenAi).is_none());
    }

    #[test]
    fn test_apply_entry() {
        let mut settings = ProviderSettings::default();
        assert!(settings.apply_entry("AI_PROVIDER", "google").unwrap());
        assert!(settings.apply_entry("GOOGLE_MODEL", "gemini-1.5-pro").unwrap());
        assert!(settings.apply_entry("OLLAMA_API_URL", "http://gpu-box:11434").unwrap());
        assert!(!settings.apply_entry("MONGODB_URL", "mongodb://x").unwrap());

        assert_eq!(settings.provider, ProviderId::Google);
        assert_eq!(settings.google.model_id.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(
            settings.ollama.endpoint_url.as_deref(),
            Some("http://gpu-box:11434")
        );
    }

    #[test]
    fn test_apply_entry_rejects_unknown_provider() {
        let mut settings = ProviderSettings::default();
        let err = settings.apply_entry("AI_PROVIDER", "llamafile").unwrap_err();
        assert_eq!(err.kind(), "UnsupportedProviderError");
        assert_eq!(settings.provider, ProviderId::Ollama);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut settings = ProviderSettings::default();
        settings.anthropic.api_key = Some("sk-ant-secret".to_string());
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains(REDACTED));
    }
}
