//! Tourist guide orchestration: prompt, single model call, strict parse.

use crate::error::GuideError;
use crate::models::TouristInfo;
use crate::services::metrics;
use crate::services::parser::parse_tourist_info;
use crate::services::prompt::{build_prompt, response_schema};
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use crate::services::validation::GuideRequest;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Stateless guide shared by all request handlers.
#[derive(Clone)]
pub struct TouristGuide {
    provider: Arc<dyn TextProvider>,
    timeout: Duration,
}

impl TouristGuide {
    pub fn new(provider: Arc<dyn TextProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Ask the model about `request.place` once and decode its reply.
    #[tracing::instrument(skip(self, request), fields(place = %request.place, count = request.count))]
    pub async fn generate_info(&self, request: &GuideRequest) -> Result<TouristInfo, GuideError> {
        let prompt = build_prompt(request);
        let params = GenerationParams {
            json_output: true,
            response_schema: Some(response_schema()),
        };

        let provider_name = self.provider.name().to_string();
        let model = self.provider.model().to_string();

        tracing::info!(provider = %provider_name, model = %model, "Calling model provider");

        let start = Instant::now();
        let outcome = tokio::time::timeout(
            self.timeout,
            self.provider.generate(&prompt.system, &prompt.user, &params),
        )
        .await
        .unwrap_or(Err(ProviderError::Timeout(self.timeout)));
        let elapsed = start.elapsed();

        metrics::record_provider_latency(&provider_name, &model, elapsed.as_secs_f64());

        let response = outcome.map_err(|e| {
            metrics::record_provider_error(&provider_name, e.error_type());
            tracing::error!(
                provider = %provider_name,
                error = %e,
                elapsed_ms = elapsed.as_millis() as u64,
                "Model provider call failed"
            );
            GuideError::Provider(e)
        })?;

        metrics::record_tokens(&model, response.input_tokens, response.output_tokens);

        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = response.finish_reason.as_str(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Model provider replied"
        );

        let raw = response.text.unwrap_or_default();
        parse_tourist_info(&raw).map_err(|e| {
            tracing::error!(error = %e, reply_len = raw.len(), "Model reply rejected");
            GuideError::Parse(e)
        })
    }
}
