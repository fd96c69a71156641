// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Relationship enrichment
//!
//! Resolves relationship targets to display names before prompting. A
//! failed or missing lookup yields a placeholder name, never an error.

use async_trait::async_trait;
use std::collections::HashMap;

use super::context::Character;
use crate::error::Result;

/// Display name used when a relationship target cannot be resolved
pub const UNKNOWN_CHARACTER: &str = "Unknown character";

/// Read-only lookup of character names by id
#[async_trait]
pub trait CharacterDirectory: Send + Sync {
    async fn character_name(&self, id: &str) -> Result<Option<String>>;
}

/// Directory backed by an in-memory map
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    names: HashMap<String, String>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Index every character that carries an id.
    pub fn from_characters<'a>(characters: impl IntoIterator<Item = &'a Character>) -> Self {
        let names = characters
            .into_iter()
            .filter_map(|c| c.id.clone().map(|id| (id, c.name.clone())))
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[async_trait]
impl CharacterDirectory for InMemoryDirectory {
    async fn character_name(&self, id: &str) -> Result<Option<String>> {
        Ok(self.names.get(id).cloned())
    }
}

/// Attach a target name to every relationship of `character`.
pub async fn enrich(mut character: Character, directory: &dyn CharacterDirectory) -> Character {
    for relationship in &mut character.relationships {
        let name = match relationship.target_character_id.as_deref() {
            Some(id) => match directory.character_name(id).await {
                Ok(Some(name)) => name,
                Ok(None) => {
                    tracing::debug!(target_id = id, "relationship target not found");
                    UNKNOWN_CHARACTER.to_string()
                }
                Err(e) => {
                    tracing::warn!(target_id = id, error = %e, "relationship lookup failed");
                    UNKNOWN_CHARACTER.to_string()
                }
            },
            None => UNKNOWN_CHARACTER.to_string(),
        };
        relationship.target_character_name = Some(name);
    }
    character
}
