//! Request-level failures and their HTTP mapping.

use crate::services::parser::ParseError;
use crate::services::providers::ProviderError;
use crate::services::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

const PROVIDER_FAILURE: &str = "Échec de l'appel au LLM";
const PROVIDER_DETAIL: &str = "Vérifiez la clé GEMINI_KEY et les logs du serveur.";
const INVALID_REPLY: &str = "Le LLM n'a pas retourné de données valides.";

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Model reply rejected: {0}")]
    Parse(#[from] ParseError),
}

impl GuideError {
    /// Metric label for this failure class.
    pub fn outcome(&self) -> &'static str {
        match self {
            GuideError::Validation(_) => "invalid_request",
            GuideError::Provider(_) => "provider_error",
            GuideError::Parse(_) => "parse_error",
        }
    }
}

/// JSON error body; `message`/`detail` only appear for provider failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub erreur: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    fn new(erreur: impl Into<String>) -> Self {
        Self {
            erreur: erreur.into(),
            message: None,
            detail: None,
        }
    }
}

impl IntoResponse for GuideError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            GuideError::Validation(err) => (StatusCode::BAD_REQUEST, ErrorBody::new(err.reason)),
            GuideError::Provider(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    erreur: PROVIDER_FAILURE.to_string(),
                    message: Some(err.to_string()),
                    detail: Some(PROVIDER_DETAIL.to_string()),
                },
            ),
            GuideError::Parse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(INVALID_REPLY),
            ),
        };

        (status, Json(body)).into_response()
    }
}
