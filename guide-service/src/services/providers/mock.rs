//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock does when called.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with this completion text.
    Reply(String),
    /// Reply with no text at all.
    NoText,
    /// Fail with this provider error.
    Fail(ProviderError),
    /// Sleep, then reply with this text.
    Delayed(Duration, String),
}

/// One call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub json_output: bool,
}

/// Mock text provider for testing.
#[derive(Clone)]
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(text.into()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(MockBehavior::Fail(error))
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    fn reply(text: String) -> ProviderResponse {
        ProviderResponse {
            input_tokens: 0,
            output_tokens: text.len() as i32 / 4,
            text: Some(text),
            finish_reason: FinishReason::Complete,
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(
        &self,
        system: &str,
        user: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                system: system.to_string(),
                user: user.to_string(),
                json_output: params.json_output,
            });
        }

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(Self::reply(text.clone())),
            MockBehavior::NoText => Ok(ProviderResponse {
                text: None,
                input_tokens: 0,
                output_tokens: 0,
                finish_reason: FinishReason::Complete,
            }),
            MockBehavior::Fail(error) => Err(error.clone()),
            MockBehavior::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(Self::reply(text.clone()))
            }
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
