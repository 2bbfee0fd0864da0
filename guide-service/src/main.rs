use guide_service::config::GuideConfig;
use guide_service::services::init_metrics;
use guide_service::startup::Application;
use service_core::observability::init_tracing;

const SERVICE_NAME: &str = "guide-service";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match GuideConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(SERVICE_NAME, "info", None);
            tracing::error!(fatal = e.is_fatal(), "Failed to load configuration: {}", e);
            return Err(std::io::Error::other(format!("Configuration error: {}", e)));
        }
    };

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics();

    tracing::info!(
        model = %config.gemini.model,
        timeout_secs = config.gemini.timeout.as_secs(),
        "Starting guide service"
    );

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    application.run_until_stopped().await
}
