// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Process-wide live settings
//!
//! Readers take cheap snapshots. Every read-modify-write sequence (a
//! persisted update, or the test harness' save/apply/restore) runs under a
//! single async writer lock so two writers can never interleave.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{Mutex, MutexGuard};

use crate::config::store::ConfigStore;
use crate::error::Result;

use super::{ProviderSettings, SettingsUpdate, SettingsView};

pub struct LiveSettings {
    store: ConfigStore,
    current: RwLock<ProviderSettings>,
    writer: Mutex<()>,
}

impl LiveSettings {
    /// Load the persisted settings from `store`.
    pub fn load(store: ConfigStore) -> Result<Self> {
        let settings = ProviderSettings::load(&store)?;
        Ok(Self::new(store, settings))
    }

    pub fn new(store: ConfigStore, settings: ProviderSettings) -> Self {
        Self {
            store,
            current: RwLock::new(settings),
            writer: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Copy of the settings as they are right now.
    pub fn snapshot(&self) -> ProviderSettings {
        self.read().clone()
    }

    /// Masked view for display.
    pub fn view(&self) -> SettingsView {
        SettingsView::from(&*self.read())
    }

    /// Apply a partial update: persist first, then swap the in-memory copy.
    /// On a persistence failure the live settings are left untouched.
    pub async fn update(&self, update: &SettingsUpdate) -> Result<ProviderSettings> {
        let _writer = self.lock_writes().await;

        let mut next = self.snapshot();
        next.apply_update(update)?;

        let entries = update.entries();
        if !entries.is_empty() {
            self.store.set_many(entries.iter().map(|(k, v)| (*k, v.as_str())))?;
            tracing::info!(
                path = %self.store.path().display(),
                keys = entries.len(),
                "persisted provider settings"
            );
        }

        self.replace(next.clone());
        Ok(next)
    }

    /// Exclusive right to mutate the live settings.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Swap the in-memory settings without touching the store. Callers must
    /// hold the guard from [`LiveSettings::lock_writes`].
    pub(crate) fn replace(&self, settings: ProviderSettings) -> ProviderSettings {
        std::mem::replace(&mut *self.write(), settings)
    }

    fn read(&self) -> RwLockReadGuard<'_, ProviderSettings> {
        self.current.read().unwrap_or_else(|e| {
            tracing::warn!("live settings lock was poisoned, recovering");
            e.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProviderSettings> {
        self.current.write().unwrap_or_else(|e| {
            tracing::warn!("live settings lock was poisoned, recovering");
            e.into_inner()
        })
    }
}
