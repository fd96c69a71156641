// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Ollama local model provider implementation
//!
//! Talks to a self-hosted Ollama server through the non-streaming
//! `/api/generate` endpoint. No authentication.

use serde::{Deserialize, Serialize};

use crate::config::{ProviderId, ProviderSettings};
use crate::error::{ApiError, ConstellaError, Result};

use super::common::{self, Endpoint};

const ID: ProviderId = ProviderId::Ollama;

/// Ollama local provider
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: Endpoint,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

impl OllamaProvider {
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
        let url = format!("{}/api/generate", self.endpoint.base_url);
        tracing::debug!(
            provider = %ID,
            model = %self.endpoint.model,
            url = %url,
            prompt_len = prompt.len(),
            "sending generation request"
        );

        let body = GenerateRequest {
            model: &self.endpoint.model,
            prompt,
            stream: false,
        };
        let response = common::post(ID, &url)?
            .json(&body)
            .send()
            .await
            .map_err(|e| common::transport_error(ID, e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(provider = %ID, status = status.as_u16(), "upstream call failed");
            return Err(ConstellaError::Api(ApiError::Transport(format!(
                "Ollama returned HTTP {}: {}",
                status.as_u16(),
                detail.trim()
            ))));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| common::transport_error(ID, e))?;
        Ok(parsed.response.unwrap_or_default())
    }
}
