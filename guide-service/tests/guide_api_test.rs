//! End-to-end tests of the guide API against a mock model provider.

mod common;

use axum::http::StatusCode;
use common::{get, router_with, PARIS_REPLY};
use guide_service::services::init_metrics;
use guide_service::services::providers::mock::MockTextProvider;
use guide_service::services::providers::ProviderError;
use serde_json::json;

// ============================================================================
// Success path
// ============================================================================

mod success {
    use super::*;

    #[tokio::test]
    async fn count_in_path_returns_model_answer() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/2").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({
                "ville_ou_pays": "Paris",
                "endroits_a_visiter": ["Tour Eiffel", "Louvre"],
                "prix_moyen_repas": "25 EUR"
            })
        );

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].user,
            "Indique les 2 principaux endroits à visiter à/en Paris et le prix moyen d'un repas."
        );
    }

    #[tokio::test]
    async fn success_disables_caching_and_allows_any_origin() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/2").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.header("cache-control"),
            Some("no-store, no-cache, must-revalidate, max-age=0")
        );
        assert_eq!(response.header("pragma"), Some("no-cache"));
        assert_eq!(response.header("access-control-allow-origin"), Some("*"));
        assert!(response
            .header("content-type")
            .is_some_and(|ct| ct.starts_with("application/json")));
    }

    #[tokio::test]
    async fn query_count_defaults_to_two() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris").await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(mock.calls()[0].user.contains("Indique les 2 "));
    }

    #[tokio::test]
    async fn query_count_is_forwarded() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris?nb=5").await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(mock.calls()[0].user.contains("Indique les 5 "));
    }

    #[tokio::test]
    async fn encoded_place_reaches_the_prompt_decoded() {
        let mock = MockTextProvider::replying(
            r#"{"ville_ou_pays":"São Paulo","endroits_a_visiter":["Ibirapuera"],"prix_moyen_repas":"40 BRL"}"#,
        );
        let response = get(router_with(&mock), "/api/guide/lieu/S%C3%A3o%20Paulo/1").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["ville_ou_pays"], "São Paulo");
        assert!(mock.calls()[0].user.contains("à/en São Paulo "));
    }

    #[tokio::test]
    async fn model_reply_is_passed_through_without_count_check() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/5").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json()["endroits_a_visiter"]
                .as_array()
                .map(|a| a.len()),
            Some(2)
        );
    }

    #[tokio::test]
    async fn self_test_endpoint_answers_in_plain_text() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/test").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.text(), "API Guide Touristique fonctionne ! ✓");
        assert!(response
            .header("content-type")
            .is_some_and(|ct| ct.starts_with("text/plain")));
        assert_eq!(mock.call_count(), 0);
    }
}

// ============================================================================
// Validation
// ============================================================================

mod validation {
    use super::*;

    async fn assert_rejected(uri: &str, reason: &str) {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), uri).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response.json(), json!({ "erreur": reason }), "{uri}");
        assert_eq!(mock.call_count(), 0, "{uri} must not reach the model");
    }

    #[tokio::test]
    async fn count_outside_range_is_rejected() {
        for uri in [
            "/api/guide/lieu/Paris/0",
            "/api/guide/lieu/Paris/11",
            "/api/guide/lieu/Paris/-1",
            "/api/guide/lieu/Paris?nb=0",
            "/api/guide/lieu/Paris?nb=42",
        ] {
            assert_rejected(uri, "Le nombre d'endroits doit être entre 1 et 10.").await;
        }
    }

    #[tokio::test]
    async fn non_integer_count_is_rejected() {
        for uri in [
            "/api/guide/lieu/Paris/abc",
            "/api/guide/lieu/Paris/2.5",
            "/api/guide/lieu/Paris?nb=abc",
        ] {
            assert_rejected(uri, "Le nombre d'endroits doit être un entier.").await;
        }
    }

    #[tokio::test]
    async fn blank_place_is_rejected() {
        for uri in [
            "/api/guide/lieu/%20/3",
            "/api/guide/lieu/%20%09",
            "/api/guide/lieu/%20?nb=3",
        ] {
            assert_rejected(uri, "Le paramètre ville_ou_pays est requis.").await;
        }
    }

    #[tokio::test]
    async fn blank_place_wins_over_bad_count() {
        assert_rejected(
            "/api/guide/lieu/%20/0",
            "Le paramètre ville_ou_pays est requis.",
        )
        .await;
    }

    #[tokio::test]
    async fn blank_place_wins_over_non_integer_count() {
        for uri in ["/api/guide/lieu/%20/abc", "/api/guide/lieu/%20?nb=abc"] {
            assert_rejected(uri, "Le paramètre ville_ou_pays est requis.").await;
        }
    }

    #[tokio::test]
    async fn undecodable_parameters_get_a_json_error() {
        for uri in [
            "/api/guide/lieu/%FF/2",
            "/api/guide/lieu/%FF",
            "/api/guide/lieu/Paris?nb=1&nb=2",
        ] {
            assert_rejected(uri, "Les paramètres de la requête sont invalides.").await;
        }
    }

    #[tokio::test]
    async fn undecodable_parameters_are_served_as_json() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/%FF/2").await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response
            .header("content-type")
            .is_some_and(|ct| ct.starts_with("application/json")));
    }

    #[tokio::test]
    async fn error_body_still_allows_any_origin() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/0").await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    }
}

// ============================================================================
// Model failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn unparseable_reply_is_a_500_with_only_erreur() {
        let mock = MockTextProvider::replying("not json");
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/3").await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json(),
            json!({ "erreur": "Le LLM n'a pas retourné de données valides." })
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn fenced_reply_is_rejected() {
        let mock = MockTextProvider::replying(format!("```json\n{}\n```", PARIS_REPLY));
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/3").await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json()["erreur"],
            "Le LLM n'a pas retourné de données valides."
        );
    }

    #[tokio::test]
    async fn provider_error_is_a_500_with_message_and_detail() {
        let mock =
            MockTextProvider::failing(ProviderError::NetworkError("connection refused".into()));
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/3").await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json(),
            json!({
                "erreur": "Échec de l'appel au LLM",
                "message": "Network error: connection refused",
                "detail": "Vérifiez la clé GEMINI_KEY et les logs du serveur."
            })
        );
        assert_eq!(mock.call_count(), 1, "provider errors are not retried");
    }

    #[tokio::test]
    async fn rate_limit_is_reported_as_provider_error() {
        let mock = MockTextProvider::failing(ProviderError::RateLimited);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/3").await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json()["message"], "Rate limited");
    }
}

// ============================================================================
// Ambient endpoints and headers
// ============================================================================

mod ambient {
    use super::*;

    #[tokio::test]
    async fn responses_carry_request_id_and_security_headers() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/lieu/Paris/2").await;

        assert!(response.header("x-request-id").is_some());
        assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
        assert_eq!(response.header("x-frame-options"), Some("DENY"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let mock = MockTextProvider::replying(PARIS_REPLY);
        let response = get(router_with(&mock), "/api/guide/ailleurs").await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn metrics_count_guide_outcomes() {
        init_metrics();
        let mock = MockTextProvider::replying(PARIS_REPLY);
        get(router_with(&mock), "/api/guide/lieu/Paris/2").await;

        let response = get(router_with(&mock), "/metrics").await;

        assert_eq!(response.status, StatusCode::OK);
        let body = response.text();
        assert!(body.contains("guide_requests_total"));
        assert!(body.contains(r#"path="/api/guide/lieu/:place/:count""#));
    }
}
