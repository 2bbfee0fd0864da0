use crate::services::providers::gemini::{GeminiConfig, GEMINI_API_BASE};
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    /// Upper bound on one model call, end to end.
    pub timeout: Duration,
}

impl GeminiSettings {
    pub fn provider_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            timeout: self.timeout,
        }
    }
}

impl GuideConfig {
    /// Load from `configuration.*`, `APP__*` and the process environment.
    ///
    /// A missing `GEMINI_KEY` is fatal: the service must not start without it.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new)
            .ok_or_else(|| {
                AppError::config(
                    "GEMINI_KEY is required but not set; define it in the service environment",
                )
            })?;

        let timeout_secs = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                AppError::config(format!(
                    "GEMINI_TIMEOUT_SECS must be a positive integer, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(GuideConfig {
            common,
            gemini: GeminiSettings {
                api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base: lookup("GEMINI_API_BASE").unwrap_or_else(|| GEMINI_API_BASE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }

}
