// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Anthropic Claude API provider implementation
//!
//! Sends the prompt as a single user turn to the Messages API.

use serde::{Deserialize, Serialize};

use crate::config::{ProviderId, ProviderSettings};
use crate::error::Result;

use super::common::{self, Endpoint, MAX_OUTPUT_TOKENS, TEMPERATURE};

const ID: ProviderId = ProviderId::Anthropic;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude provider
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    endpoint: Endpoint,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [AnthropicMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AnthropicProvider {
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
        let url = format!("{}/messages", self.endpoint.base_url);
        tracing::debug!(
            provider = %ID,
            model = %self.endpoint.model,
            url = %url,
            prompt_len = prompt.len(),
            "sending generation request"
        );

        let body = MessagesRequest {
            model: &self.endpoint.model,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            messages: [AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };
        let response = common::post(ID, &url)?
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| common::transport_error(ID, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            return Err(common::status_error(
                ID,
                status,
                &self.endpoint.model,
                Some(&detail),
            ));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| common::transport_error(ID, e))?;
        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| common::malformed(ID, "content[0].text"))
    }
}

/// `error.message` from an Anthropic error body, else the raw body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<AnthropicError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer, key: Option<&str>) -> AnthropicProvider {
        let mut settings = ProviderSettings::default();
        settings.anthropic.endpoint_url = Some(server.uri());
        settings.anthropic.api_key = key.map(str::to_string);
        AnthropicProvider::from_settings(&settings)
    }

    #[test]
    fn test_default_endpoint() {
        let provider = AnthropicProvider::from_settings(&ProviderSettings::default());
        assert_eq!(provider.base_url(), "https://api.anthropic.com/v1");
        assert_eq!(provider.model(), "claude-sonnet-4-5-20250929");
    }

    #[test]
    fn test_error_detail() {
        let body = r#"{"type":"error","error":{"type":"invalid_request_error","message":"max_tokens: too large"}}"#;
        assert_eq!(error_detail(body), "max_tokens: too large");
        assert_eq!(error_detail("  gateway down \n"), "gateway down");
    }

    #[tokio::test]
    async fn test_generate_uses_messages_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-5-20250929",
                "max_tokens": 2000,
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "type": "message",
                "content": [{"type": "text", "text": "Hi there."}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider_for(&server, Some("sk-ant-test"))
            .generate("Hello")
            .await
            .unwrap();
        assert_eq!(text, "Hi there.");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider_for(&server, None).generate("x").await.unwrap_err();
        assert_eq!(err.kind(), "ConfigurationError");
    }

    #[tokio::test]
    async fn test_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server, Some("bad"))
            .generate("x")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "UpstreamAuthError");
        assert!(err.to_string().contains("Anthropic"));
    }

    #[tokio::test]
    async fn test_bad_request_carries_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "invalid_request_error", "message": "temperature out of range"}
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server, Some("sk-ant-test"))
            .generate("x")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "UpstreamTransportError");
        assert!(err.to_string().contains("temperature out of range"));
    }

    #[tokio::test]
    async fn test_missing_text_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": []})),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server, Some("sk-ant-test"))
            .generate("x")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "UpstreamMalformedResponseError");
    }
}
