// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Domain records consumed by the generation flows
//!
//! These mirror the documents the storage layer hands over. Field aliases
//! accept both the stored names (`_id`, `type`, `content`) and the names
//! used here.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::prompts;

/// Attribute kinds that are rendered into prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Description,
    Personality,
    CurrentStatus,
    Backstory,
}

impl AttributeKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.trim() {
            "description" => Some(AttributeKind::Description),
            "personality" => Some(AttributeKind::Personality),
            "currentStatus" | "current_status" => Some(AttributeKind::CurrentStatus),
            "backstory" => Some(AttributeKind::Backstory),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Description => "Description",
            AttributeKind::Personality => "Personality",
            AttributeKind::CurrentStatus => "Current status",
            AttributeKind::Backstory => "Backstory",
        }
    }
}

/// Typed free-text attribute of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(rename = "content", alias = "text", default)]
    pub text: String,
}

impl Attribute {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// Kind of this attribute, if it is one that prompts render.
    pub fn recognized_kind(&self) -> Option<AttributeKind> {
        AttributeKind::parse(&self.kind)
    }
}

/// Relationship from a character to another character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_character_id: Option<String>,
    /// Display name attached by the enricher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_character_name: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, kind: &str, text: &str) -> Self {
        self.attributes.push(Attribute::new(kind, text));
        self
    }

    pub fn with_relationship(mut self, target_id: Option<&str>, description: &str) -> Self {
        self.relationships.push(Relationship {
            target_character_id: target_id.map(str::to_string),
            target_character_name: None,
            description: description.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
}

/// One candidate character returned by discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredProposal {
    pub name: String,
    pub introduction: String,
    pub backstory: String,
    /// How the seed character sees the new character
    #[serde(alias = "your_relationship")]
    pub relationship_from_subject: String,
    /// How the new character relates to the seed character
    #[serde(alias = "my_relationship")]
    pub relationship_to_subject: String,
}

/// Generation kinds, used for logging and dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Journal,
    Comment,
    Discovery,
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenerationKind::Journal => "journal",
            GenerationKind::Comment => "comment",
            GenerationKind::Discovery => "discovery",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalContext {
    pub character: Character,
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContext {
    pub character: Character,
    pub journal_body: String,
    /// Existing comments, oldest first
    pub thread: Vec<Comment>,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryContext {
    pub character: Character,
    pub relationship_phrase: String,
}

/// Everything needed to render one prompt. Built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationContext {
    Journal(JournalContext),
    Comment(CommentContext),
    Discovery(DiscoveryContext),
}

impl GenerationContext {
    pub fn kind(&self) -> GenerationKind {
        match self {
            GenerationContext::Journal(_) => GenerationKind::Journal,
            GenerationContext::Comment(_) => GenerationKind::Comment,
            GenerationContext::Discovery(_) => GenerationKind::Discovery,
        }
    }

    pub fn character(&self) -> &Character {
        match self {
            GenerationContext::Journal(ctx) => &ctx.character,
            GenerationContext::Comment(ctx) => &ctx.character,
            GenerationContext::Discovery(ctx) => &ctx.character,
        }
    }

    pub fn render_prompt(&self) -> String {
        match self {
            GenerationContext::Journal(ctx) => prompts::journal_prompt(ctx),
            GenerationContext::Comment(ctx) => prompts::comment_prompt(ctx),
            GenerationContext::Discovery(ctx) => prompts::discovery_prompt(ctx),
        }
    }
}
