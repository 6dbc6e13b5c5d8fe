use thiserror::Error;

/// Errors that terminate the service process
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Invalid or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listener could not be bound or accepted
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP server loop failed
    #[error("Server error: {0}")]
    Server(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ServiceError {
    /// Short machine-readable category, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Config(_) => "config",
            ServiceError::Network(_) => "network",
            ServiceError::Server(_) => "server",
            ServiceError::Other(_) => "other",
        }
    }
}

/// Result type alias for service bootstrap operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Log a fatal error with its category before the process exits
pub fn log_fatal(context: &str, error: &ServiceError) {
    tracing::error!(
        context = context,
        error_kind = error.kind(),
        error = %error,
        "Service error occurred"
    );
}
