// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! JSON input files for the generation commands

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{ConstellaError, Result};
use crate::generation::{Character, InMemoryDirectory};

/// Read and parse a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConstellaError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ConstellaError::InvalidInput(format!("{} is not valid: {}", path.display(), e))
    })
}

/// Directory from a JSON array of characters; empty when no file is given.
pub fn load_directory(path: Option<&Path>) -> Result<InMemoryDirectory> {
    match path {
        Some(path) => {
            let characters: Vec<Character> = read_json(path)?;
            Ok(InMemoryDirectory::from_characters(&characters))
        }
        None => Ok(InMemoryDirectory::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_character() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mira.json");
        std::fs::write(&path, r#"{"_id": "c1", "name": "Mira"}"#).unwrap();

        let character: Character = read_json(&path).unwrap();
        assert_eq!(character.name, "Mira");
    }

    #[test]
    fn test_read_json_errors_are_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let err = read_json::<Character>(&missing).unwrap_err();
        assert_eq!(err.kind(), "InvalidInputError");

        let broken = temp_dir.path().join("broken.json");
        std::fs::write(&broken, "{name").unwrap();
        let err = read_json::<Character>(&broken).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("all.json");
        std::fs::write(
            &path,
            r#"[{"_id": "c1", "name": "Mira"}, {"_id": "c2", "name": "Tomas"}]"#,
        )
        .unwrap();

        assert_eq!(load_directory(Some(&path)).unwrap().len(), 2);
        assert!(load_directory(None).unwrap().is_empty());
    }
}
