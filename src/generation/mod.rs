// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Text generation flows
//!
//! Domain context goes in, a prompt is rendered, the configured provider
//! answers, and the answer is coerced into the shape each kind promises.

pub mod context;
pub mod enrich;
pub mod harness;
pub mod postprocess;
pub mod prompts;
pub mod service;

pub use context::{
    Attribute, AttributeKind, Character, Comment, Journal, Relationship, StructuredProposal,
};
pub use context::{CommentContext, DiscoveryContext, GenerationContext, GenerationKind, JournalContext};
pub use enrich::{enrich, CharacterDirectory, InMemoryDirectory};
pub use harness::{test_connection, ConnectionReport};
pub use postprocess::DiscoveryOutcome;
pub use service::GenerationService;
