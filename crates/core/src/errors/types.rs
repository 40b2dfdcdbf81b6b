//! Core error type definitions

/// Result type alias for gatecheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gatecheck operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required notification property was absent when first accessed
    MissingProperty { key: String },

    /// Malformed property values or inconsistent check configuration
    Configuration { message: String },

    /// Network failure or unexpected status on an outbound call
    Transport {
        endpoint: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The orchestrator's task API rejected a timeline or completion call
    OrchestratorService { endpoint: String, message: String },

    /// Cancellation was observed at a suspension point
    Canceled,
}
