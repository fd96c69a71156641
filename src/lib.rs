// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Constella - AI text generation for character journals.
//!
//! This crate exposes the generation core used by the `constella` CLI
//! (`src/main.rs`) and by any service that embeds it.
//!
//! Architecture highlights:
//! - `config`: persisted `.env`-style settings store and live provider settings
//! - `llm`: provider abstraction and implementations (Ollama/OpenAI/Anthropic/Google)
//! - `generation`: domain context, enrichment, prompts, post-processing,
//!   end-to-end flows and the configuration test harness
//! - `cli`: argument definitions and input loading for the binary

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod llm;

pub use error::{ConstellaError, Result};
