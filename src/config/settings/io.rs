// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;

use crate::config::store::ConfigStore;
use crate::error::Result;

use super::{keys, ProviderSettings};

/// Environment variable naming the settings file
pub const ENV_FILE_VAR: &str = "CONSTELLA_ENV_FILE";

impl ProviderSettings {
    /// Settings file used when no path is given: `$CONSTELLA_ENV_FILE`, else
    /// `.env` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var(ENV_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".env"))
    }

    /// Load settings from the persisted store. A missing file yields the
    /// defaults; an unknown `AI_PROVIDER` is rejected.
    pub fn load(store: &ConfigStore) -> Result<Self> {
        let mut settings = Self::default();
        for (key, value) in store.entries()? {
            settings.apply_entry(&key, &value)?;
        }
        tracing::debug!(
            path = %store.path().display(),
            provider = %settings.provider,
            "loaded provider settings"
        );
        Ok(settings)
    }

    /// Let process environment variables override stored values.
    /// Priority: env var > settings file.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in keys::all_keys() {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                self.apply_entry(key, &value)?;
            }
        }
        Ok(self)
    }
}
