// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use super::ProviderId;

/// Key selecting the active provider
pub const AI_PROVIDER_KEY: &str = "AI_PROVIDER";

/// Per-provider setting slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Endpoint,
    Model,
    ApiKey,
}

/// Persisted key for every (provider, field) pair that has one.
/// Ollama has no credential.
const PROVIDER_KEYS: &[(ProviderId, SettingField, &str)] = &[
    (ProviderId::Ollama, SettingField::Endpoint, "OLLAMA_API_URL"),
    (ProviderId::Ollama, SettingField::Model, "OLLAMA_MODEL"),
    (ProviderId::OpenAi, SettingField::ApiKey, "OPENAI_API_KEY"),
    (ProviderId::OpenAi, SettingField::Model, "OPENAI_MODEL"),
    (ProviderId::OpenAi, SettingField::Endpoint, "OPENAI_BASE_URL"),
    (ProviderId::Anthropic, SettingField::ApiKey, "ANTHROPIC_API_KEY"),
    (ProviderId::Anthropic, SettingField::Model, "ANTHROPIC_MODEL"),
    (ProviderId::Anthropic, SettingField::Endpoint, "ANTHROPIC_BASE_URL"),
    (ProviderId::Google, SettingField::ApiKey, "GOOGLE_API_KEY"),
    (ProviderId::Google, SettingField::Model, "GOOGLE_MODEL"),
    (ProviderId::Google, SettingField::Endpoint, "GOOGLE_BASE_URL"),
];

/// Persisted key name for a provider field.
pub fn setting_key(id: ProviderId, field: SettingField) -> Option<&'static str> {
    PROVIDER_KEYS
        .iter()
        .find(|(p, f, _)| *p == id && *f == field)
        .map(|(_, _, key)| *key)
}

pub(super) fn lookup(key: &str) -> Option<(ProviderId, SettingField)> {
    PROVIDER_KEYS
        .iter()
        .find(|(_, _, k)| *k == key)
        .map(|(id, field, _)| (*id, *field))
}

/// Every known key, in canonical file order.
pub(super) fn all_keys() -> impl Iterator<Item = &'static str> {
    std::iter::once(AI_PROVIDER_KEY).chain(PROVIDER_KEYS.iter().map(|(_, _, key)| *key))
}
