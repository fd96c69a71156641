// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock LLM provider for testing
//!
//! Provides a configurable mock implementation of the TextGenerator trait
//! that can be used in tests without making real API calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ApiError, ConstellaError, Result};
use crate::llm::provider::TextGenerator;

/// A pre-configured response for the mock provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail with an upstream transport error carrying this message
    TransportError(String),
}

impl Default for MockResponse {
    fn default() -> Self {
        MockResponse::Text("Mock response".to_string())
    }
}

/// A mock text generator for testing
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    responses: Arc<Mutex<Vec<MockResponse>>>,
    call_count: Arc<AtomicUsize>,
    recorded_prompts: Arc<Mutex<Vec<String>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Arc::new(Mutex::new(vec![MockResponse::default()])),
            call_count: Arc::new(AtomicUsize::new(0)),
            recorded_prompts: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Create a mock provider with a custom name
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut provider = Self::new();
        provider.name = name.into();
        provider
    }

    /// Set the text response
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_responses(vec![MockResponse::Text(text.into())])
    }

    /// Fail every call with a transport error
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.with_responses(vec![MockResponse::TransportError(message.into())])
    }

    /// Queue multiple responses (returned in order, the last one repeats)
    pub fn with_responses(self, queued: Vec<MockResponse>) -> Self {
        {
            let mut responses = lock(&self.responses);
            responses.clear();
            responses.extend(queued);
        }
        self
    }

    /// Get the number of times generate() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get all recorded prompts
    pub fn recorded_prompts(&self) -> Vec<String> {
        lock(&self.recorded_prompts).clone()
    }

    /// Get the last prompt sent
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.recorded_prompts).last().cloned()
    }

    /// Reset call count and recorded prompts
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        lock(&self.recorded_prompts).clear();
    }

    fn next_response(&self) -> MockResponse {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let responses = lock(&self.responses);
        if responses.is_empty() {
            MockResponse::default()
        } else {
            responses[count.min(responses.len() - 1)].clone()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Mock provider lock was poisoned, recovering");
        poisoned.into_inner()
    })
}

#[async_trait]
impl TextGenerator for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        lock(&self.recorded_prompts).push(prompt.to_string());
        match self.next_response() {
            MockResponse::Text(text) => Ok(text),
            MockResponse::TransportError(message) => {
                Err(ConstellaError::Api(ApiError::Transport(message)))
            }
        }
    }
}
