// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! OpenAI chat completions provider

use serde::{Deserialize, Serialize};

use crate::config::{ProviderId, ProviderSettings};
use crate::error::Result;

use super::common::{self, Endpoint, MAX_OUTPUT_TOKENS, TEMPERATURE};

const ID: ProviderId = ProviderId::OpenAi;

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    endpoint: Endpoint,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self {
            endpoint: Endpoint::resolve(ID, settings),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }

    pub fn model(&self) -> &str {
        &self.endpoint.model
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.endpoint.require_key(ID)?;
        let url = format!("{}/chat/completions", self.endpoint.base_url);
        tracing::debug!(
            provider = %ID,
            model = %self.endpoint.model,
            url = %url,
            prompt_len = prompt.len(),
            "sending generation request"
        );

        let body = ChatRequest {
            model: &self.endpoint.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };
        let response = common::post(ID, &url)?
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| common::transport_error(ID, e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(common::status_error(
                ID,
                status,
                &self.endpoint.model,
                Some(detail.trim()),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| common::transport_error(ID, e))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| common::malformed(ID, "choices[0].message.content"))
    }
}
