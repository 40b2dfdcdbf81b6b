//! Builder methods for creating errors with context

use super::types::Error;

// Helper methods for creating errors with context
impl Error {
    /// Create a missing property error
    #[must_use]
    pub fn missing_property(key: impl Into<String>) -> Self {
        Error::MissingProperty { key: key.into() }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a transport error
    #[must_use]
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with a source error
    #[must_use]
    pub fn transport_with_source(
        endpoint: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an orchestrator service error
    #[must_use]
    pub fn orchestrator_service(
        endpoint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::OrchestratorService {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the orchestrator's own task API
    #[must_use]
    pub fn is_orchestrator_service(&self) -> bool {
        matches!(self, Error::OrchestratorService { .. })
    }
}
