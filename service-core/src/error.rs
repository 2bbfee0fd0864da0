use thiserror::Error;

/// Infrastructure errors raised while a service is starting or serving.
///
/// Request-level failures are modelled by each service; this type covers what
/// happens around them (configuration, sockets, telemetry).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Build a configuration error from a plain message.
    pub fn config<S: Into<String>>(message: S) -> Self {
        AppError::ConfigError(anyhow::anyhow!(message.into()))
    }

    /// Whether the error should stop the process before it serves traffic.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::ConfigError(_) | AppError::Io(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}
