//! Application startup and lifecycle management.
//!
//! Builds the HTTP router (guide API, health, metrics) and owns the bound
//! listener until the server is stopped.

use crate::config::GuideConfig;
use crate::handlers;
use crate::middleware::http_metrics_middleware;
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::TextProvider;
use crate::services::TouristGuide;
use axum::{
    body::Body,
    http::{Method, Request},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    make_request_span, request_id_middleware, security_headers_middleware,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub guide: TouristGuide,
}

/// Routes under `/api/guide`.
fn guide_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(handlers::guide_self_test))
        .route("/lieu/:place", get(handlers::tourist_info_with_query))
        .route("/lieu/:place/:count", get(handlers::tourist_info_with_count))
}

/// Build the full router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .nest("/api/guide", guide_routes())
        .layer(from_fn(http_metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            make_request_span(request)
        }))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application backed by the configured Gemini model.
    pub async fn build(config: GuideConfig) -> Result<Self, AppError> {
        let provider = GeminiTextProvider::new(config.gemini.provider_config()).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::config(e.to_string())
        })?;

        tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: GuideConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let guide = TouristGuide::new(provider, config.gemini.timeout);
        let addr = config.common.socket_addr();

        let state = AppState { guide };
        let router = build_router(state);

        // Port 0 binds a random port for testing
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Guide service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve requests until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
