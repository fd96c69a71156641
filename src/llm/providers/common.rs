// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::config::{setting_key, ProviderId, ProviderSettings, SettingField, REDACTED};
use crate::error::{ApiError, ConstellaError, Result};
use crate::llm::catalog;

/// Fixed per-call timeout. There is exactly one attempt per call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Output ceiling sent to hosted providers.
pub(crate) const MAX_OUTPUT_TOKENS: u32 = 2000;

pub(crate) const TEMPERATURE: f32 = 0.7;

/// POST request for one provider call. The timeout is set on the request
/// itself, so it holds even if the client defaults change.
pub(crate) fn post(id: ProviderId, url: &str) -> Result<RequestBuilder> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| {
            tracing::warn!(provider = %id, error = %e, "HTTP client construction failed");
            ConstellaError::Api(ApiError::Transport(format!(
                "{} HTTP client could not be created: {}",
                id.display_name(),
                e
            )))
        })?;
    Ok(client.post(url).timeout(REQUEST_TIMEOUT))
}

/// Connection details resolved for one provider at construction time.
#[derive(Clone)]
pub(crate) struct Endpoint {
    pub(crate) base_url: String,
    pub(crate) model: String,
    pub(crate) api_key: Option<String>,
}

impl Endpoint {
    pub(crate) fn resolve(id: ProviderId, settings: &ProviderSettings) -> Self {
        Self {
            base_url: settings.endpoint(id),
            model: settings.model(id),
            api_key: settings.api_key(id).map(str::to_string),
        }
    }

    /// API key, or a configuration error raised before any request is made.
    pub(crate) fn require_key(&self, id: ProviderId) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ConstellaError::Config(format!(
                "{} API key is not set. Configure {} in the settings.",
                id.display_name(),
                setting_key(id, SettingField::ApiKey).unwrap_or("the API key")
            ))
        })
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Transport failure (connect, DNS, timeout, body read). A body that is not
/// JSON at all counts as a malformed response.
pub(crate) fn transport_error(id: ProviderId, err: reqwest::Error) -> ConstellaError {
    if err.is_decode() {
        return ConstellaError::Api(ApiError::InvalidResponse(format!(
            "{} response is not valid JSON: {}",
            id.display_name(),
            err
        )));
    }
    let message = if err.is_timeout() {
        format!(
            "{} request timed out after {}s",
            id.display_name(),
            REQUEST_TIMEOUT.as_secs()
        )
    } else {
        format!("{} request failed: {}", id.display_name(), err)
    };
    tracing::warn!(provider = %id, error = %err, "upstream transport failure");
    ConstellaError::Api(ApiError::Transport(message))
}

/// Map a non-2xx status from a hosted provider onto the error taxonomy.
pub(crate) fn status_error(
    id: ProviderId,
    status: StatusCode,
    model: &str,
    detail: Option<&str>,
) -> ConstellaError {
    tracing::warn!(provider = %id, status = status.as_u16(), model, "upstream call failed");
    let provider = id.display_name().to_string();
    let err = match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthenticationFailed { provider },
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { provider },
        StatusCode::NOT_FOUND => ApiError::ModelNotFound {
            model: model.to_string(),
            alternatives: catalog::alternatives(id),
        },
        _ => {
            let mut message = format!("{} returned HTTP {}", provider, status.as_u16());
            if let Some(detail) = detail.filter(|d| !d.is_empty()) {
                message.push_str(": ");
                message.push_str(detail);
            }
            ApiError::Transport(message)
        }
    };
    ConstellaError::Api(err)
}

/// Envelope field missing from an otherwise successful response.
pub(crate) fn malformed(id: ProviderId, what: &str) -> ConstellaError {
    ConstellaError::Api(ApiError::InvalidResponse(format!(
        "{} response is missing {}",
        id.display_name(),
        what
    )))
}
