use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{DecisionLog, TracingDecisionLog};
use crate::validation::ChangeValidator;

/// Shared, read-only state handed to every request handler
#[derive(Clone)]
pub struct ChangeServer {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Change request validator
    validator: ChangeValidator,
}

impl ChangeServer {
    /// Create a server whose validation decisions go to `decision_log`
    pub fn new(config: ServerConfig, decision_log: Arc<dyn DecisionLog>) -> Self {
        Self {
            config: Arc::new(config),
            validator: ChangeValidator::new(decision_log),
        }
    }

    /// Create a server that records decisions through `tracing`
    pub fn with_tracing(config: ServerConfig) -> Self {
        Self::new(config, Arc::new(TracingDecisionLog))
    }

    /// Get server configuration
    pub fn get_config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn validator(&self) -> &ChangeValidator {
        &self.validator
    }
}
