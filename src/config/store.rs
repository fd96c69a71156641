// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Line-oriented `KEY=VALUE` settings file
//!
//! The file is edited in place: untouched lines (comments, blank lines,
//! unknown keys) survive verbatim and keep their order. Disabled template
//! entries such as `#OPENAI_MODEL=gpt-4o` are uncommented when their key is
//! set instead of being duplicated. Every mutation is a whole-file rewrite
//! through a temporary file and a rename.
//!
//! Read/modify/write is not synchronized here; callers that share a store
//! serialize mutations themselves (see [`super::LiveSettings`]).

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ConstellaError, Result};

/// Key prefixes that keep related settings next to each other when a new
/// key has to be inserted.
const KEY_GROUPS: &[(&str, &str)] = &[
    ("AI_PROVIDER", "ai"),
    ("OLLAMA_", "ollama"),
    ("OPENAI_", "openai"),
    ("ANTHROPIC_", "anthropic"),
    ("GOOGLE_", "google"),
];

/// Durable key/value store backed by a single `.env`-style file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for the given file. The file does not need to exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw file content. A missing file reads as empty.
    pub fn read(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(ConstellaError::Persistence(e)),
        }
    }

    /// Replace the whole file content atomically.
    pub fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, content)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(ConstellaError::Persistence(e));
        }

        tracing::debug!(path = %self.path.display(), bytes = content.len(), "settings file rewritten");
        Ok(())
    }

    /// Value of the first live `KEY=...` line, with surrounding quotes removed.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let doc = EnvDocument::parse(&self.read()?);
        Ok(doc.get(key))
    }

    /// Live `KEY=VALUE` pairs in file order. A key that appears on several
    /// live lines is reported once, with the value of its first line.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let doc = EnvDocument::parse(&self.read()?);
        Ok(doc.entries())
    }

    /// Set a single key.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many([(key, value)])
    }

    /// Set several keys with one read and one rewrite.
    ///
    /// Keys are applied in iteration order against the same in-memory line
    /// sequence, so two new keys of the same group end up adjacent.
    pub fn set_many<I, K, V>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        for (key, value) in &entries {
            validate_entry(key.as_ref(), value.as_ref())?;
        }

        let mut doc = EnvDocument::parse(&self.read()?);
        for (key, value) in &entries {
            doc.set(key.as_ref(), value.as_ref());
        }
        self.write(&doc.render())
    }

    /// Drop every live line for `key`. Comments and blank lines are kept.
    pub fn remove(&self, key: &str) -> Result<()> {
        let mut doc = EnvDocument::parse(&self.read()?);
        doc.remove(key);
        self.write(&doc.render())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| ".env".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn validate_entry(key: &str, value: &str) -> Result<()> {
    if key.trim().is_empty() || key.contains('=') || key.contains('\n') || key.starts_with('#') {
        return Err(ConstellaError::InvalidInput(format!(
            "invalid settings key: {:?}",
            key
        )));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(ConstellaError::InvalidInput(format!(
            "value for {} must be a single line",
            key
        )));
    }
    Ok(())
}

/// Group name for a key, from the prefix table
fn key_group(key: &str) -> Option<&'static str> {
    KEY_GROUPS
        .iter()
        .find(|(prefix, _)| key.starts_with(prefix))
        .map(|(_, group)| *group)
}

/// In-memory line sequence of a settings file
#[derive(Debug, Clone, PartialEq, Eq)]
struct EnvDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl EnvDocument {
    fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self {
                lines: Vec::new(),
                trailing_newline: true,
            };
        }

        let trailing_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);
        Self {
            lines: body.split('\n').map(str::to_string).collect(),
            trailing_newline,
        }
    }

    fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    fn get(&self, key: &str) -> Option<String> {
        self.lines.iter().find_map(|line| {
            let (k, v) = live_pair(line)?;
            (k == key).then(|| unquote(v.trim()).to_string())
        })
    }

    fn entries(&self) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .filter_map(|line| live_pair(line))
            .filter(|(k, _)| seen.insert(*k))
            .map(|(k, v)| (k.to_string(), unquote(v.trim()).to_string()))
            .collect()
    }

    /// Rewrite the first live line for `key` and drop any later live
    /// duplicates, so every reader sees the new value.
    fn set(&mut self, key: &str, value: &str) {
        let replacement = format!("{}={}", key, quote(value));

        if let Some(index) = self.lines.iter().position(|line| live_key(line) == Some(key)) {
            self.lines[index] = replacement;
            let mut position = 0;
            self.lines.retain(|line| {
                let keep = position <= index || live_key(line) != Some(key);
                position += 1;
                keep
            });
            return;
        }

        let template = self
            .lines
            .iter()
            .position(|line| commented_key(line) == Some(key));

        match template {
            Some(index) => self.lines[index] = replacement,
            None => {
                let index = self.insert_position(key);
                self.lines.insert(index, replacement);
            }
        }
    }

    fn remove(&mut self, key: &str) {
        self.lines.retain(|line| live_key(line) != Some(key));
    }

    /// Right after the last live line of the same group, else end of file.
    fn insert_position(&self, key: &str) -> usize {
        let Some(group) = key_group(key) else {
            return self.lines.len();
        };

        self.lines
            .iter()
            .rposition(|line| live_key(line).and_then(key_group) == Some(group))
            .map(|index| index + 1)
            .unwrap_or(self.lines.len())
    }
}

fn live_pair(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (key, value) = trimmed.split_once('=')?;
    Some((key.trim(), value))
}

fn live_key(line: &str) -> Option<&str> {
    live_pair(line).map(|(key, _)| key)
}

/// Key of a disabled `#KEY=value` line
fn commented_key(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix('#')?.trim();
    let (key, _) = rest.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then_some(key)
}

/// Wrap a value that would otherwise lose its own surrounding quotes on
/// read, using the other quote character.
fn quote(value: &str) -> Cow<'_, str> {
    if unquote(value).len() == value.len() {
        return Cow::Borrowed(value);
    }
    let wrapper = if value.starts_with('"') { '\'' } else { '"' };
    Cow::Owned(format!("{wrapper}{value}{wrapper}"))
}

fn unquote(value: &str) -> &str {
    for mark in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(mark) && value.ends_with(mark) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
