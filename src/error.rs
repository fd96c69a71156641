// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for Constella
//!
//! Every failure the generation core can surface maps onto one variant here.
//! Discovery parse failures are deliberately absent: they degrade to a
//! fallback value instead of an error.

use thiserror::Error;

/// Main error type for Constella operations
#[derive(Error, Debug)]
pub enum ConstellaError {
    /// Upstream provider errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Provider id outside the known set
    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    /// Missing or unusable configuration (e.g. absent API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable settings store could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Upstream-call error types, uniform across providers
#[derive(Error, Debug)]
pub enum ApiError {
    /// 401 from a hosted provider
    #[error("Authentication failed: invalid {provider} API key. Please check your API key settings.")]
    AuthenticationFailed { provider: String },

    /// 429 from a hosted provider
    #[error("{provider} API rate limit exceeded. Check your usage limits or wait before retrying.")]
    RateLimited { provider: String },

    /// 404 from a hosted provider
    #[error("Model '{model}' not found. Available models: {}", .alternatives.join(", "))]
    ModelNotFound {
        model: String,
        alternatives: Vec<String>,
    },

    /// Network failure, timeout, or any other non-2xx status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response envelope did not have the expected shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for Constella operations
pub type Result<T> = std::result::Result<T, ConstellaError>;

impl ConstellaError {
    /// Stable taxonomy name, for callers that report machine-readable kinds.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstellaError::Api(api) => api.kind(),
            ConstellaError::UnsupportedProvider(_) => "UnsupportedProviderError",
            ConstellaError::Config(_) => "ConfigurationError",
            ConstellaError::Persistence(_) => "PersistenceIOError",
            ConstellaError::Json(_) => "JsonError",
            ConstellaError::InvalidInput(_) => "InvalidInputError",
        }
    }
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::AuthenticationFailed { .. } => "UpstreamAuthError",
            ApiError::RateLimited { .. } => "UpstreamRateLimitError",
            ApiError::ModelNotFound { .. } => "UpstreamNotFoundError",
            ApiError::Transport(_) => "UpstreamTransportError",
            ApiError::InvalidResponse(_) => "UpstreamMalformedResponseError",
        }
    }
}
