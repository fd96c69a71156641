// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Google Gemini provider
//!
//! Uses `models/{model}:generateContent`. The key travels in the
//! `x-goog-api-key` header so it never ends up in a logged URL.

use serde::{Deserialize, Serialize};

use crate::config::{ProviderId, ProviderSettings};
use crate::error::Result;

use super::common::{self, Endpoint, MAX_OUTPUT_TOKENS, TEMPERATURE};

const ID: ProviderId = ProviderId::Google;

#[derive(Debug, Clone)]
pub struct GoogleProvider {
    endpoint: Endpoint,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: [GeminiContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: [GeminiPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GoogleProvider {
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
        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.base_url, self.endpoint.model
        );
        tracing::debug!(
            provider = %ID,
            model = %self.endpoint.model,
            url = %url,
            prompt_len = prompt.len(),
            "sending generation request"
        );

        let body = GeminiRequest {
            contents: [GeminiContent {
                role: "user",
                parts: [GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let response = common::post(ID, &url)?
            .header("x-goog-api-key", api_key)
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

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| common::transport_error(ID, e))?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| common::malformed(ID, "candidates[0].content.parts[0].text"))
    }
}
