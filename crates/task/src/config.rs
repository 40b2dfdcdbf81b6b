//! HTTP client settings shared by the per-invocation adapters

use std::time::Duration;

use gatecheck_core::{constants::DEFAULT_USER_AGENT, Error, Result};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the HTTP clients owned by one check invocation.
///
/// Only per-request transport timeouts are enforced here; the overall
/// approval gate deadline belongs to the orchestrator.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request transport timeout
    pub request_timeout: Duration,
    /// User agent presented to the orchestrator
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|error| {
                Error::configuration(format!("failed to create HTTP client: {error}"))
            })
    }
}
