#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use guide_service::config::GuideConfig;
use guide_service::services::providers::mock::MockTextProvider;
use guide_service::services::TouristGuide;
use guide_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use service_core::config::Config;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const PARIS_REPLY: &str = r#"{"ville_ou_pays":"Paris","endroits_a_visiter":["Tour Eiffel","Louvre"],"prix_moyen_repas":"25 EUR"}"#;

/// Config bound to a random local port with a dummy key.
pub fn test_config() -> GuideConfig {
    let common = Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        ..Config::default()
    };

    GuideConfig::from_lookup(common, |key| match key {
        "GEMINI_KEY" => Some("test-api-key".to_string()),
        _ => None,
    })
    .expect("Failed to build test config")
}

pub fn router_with(mock: &MockTextProvider) -> Router {
    let guide = TouristGuide::new(Arc::new(mock.clone()), Duration::from_secs(5));
    build_router(AppState { guide })
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("Response body is not UTF-8")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send a GET through the router as a browser on another origin would.
pub async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}
