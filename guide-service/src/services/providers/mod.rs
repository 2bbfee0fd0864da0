//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for chat-completion
//! providers, allowing the backend (Gemini, mock) to be swapped without
//! touching the guide logic.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Upstream call timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::Timeout(_) => "timeout",
        }
    }
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Completion text, if the model produced any.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Error,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Complete => "complete",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
            FinishReason::Error => "error",
        }
    }
}

/// Generation parameters for AI requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Ask the provider for JSON output when it supports it.
    pub json_output: bool,

    /// Schema for structured output; only sent when `json_output` is set.
    pub response_schema: Option<serde_json::Value>,
}

/// Trait for text/JSON generation providers (e.g., Gemini).
///
/// One call is one completion: implementations must not retry and must not
/// keep conversation state between calls.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name, used in logs and metric labels.
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Generate a completion from a system instruction and a user message.
    async fn generate(
        &self,
        system: &str,
        user: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Local readiness check; does not call the upstream API.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
