//! Build-log retrieval from the orchestrator's build API

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use gatecheck_core::constants::{BUILD_API_VERSION, BUILD_LOG_ID};
use gatecheck_core::{Error, Result, TaskProperties};

use crate::client::collection_base;
use crate::config::ClientConfig;

/// Seam for fetching the build log scanned for template markers
#[async_trait]
pub trait BuildLogs: Send + Sync {
    /// Fetch the full text of the build's template log.
    ///
    /// The call is not retried; a transport failure or non-success status is
    /// unrecoverable for the invocation.
    async fn fetch_log(&self, build_id: &str) -> Result<String>;
}

/// REST implementation of [`BuildLogs`]
pub struct HttpBuildLogs {
    client: reqwest::Client,
    api_base: String,
    auth_header: String,
}

impl HttpBuildLogs {
    /// Build the per-invocation client from the notification properties.
    ///
    /// The build API expects the Basic-over-Bearer convention: the header
    /// value is `Bearer base64(":" + token)`.
    pub fn new(properties: &TaskProperties, config: &ClientConfig) -> Result<Self> {
        let api_base = collection_base(&properties.plan_uri()?, properties.project_id()?);
        let encoded = BASE64.encode(format!(":{}", properties.auth_token()?));

        Ok(Self {
            client: config.http_client()?,
            api_base,
            auth_header: format!("Bearer {encoded}"),
        })
    }
}

#[async_trait]
impl BuildLogs for HttpBuildLogs {
    async fn fetch_log(&self, build_id: &str) -> Result<String> {
        let url = format!(
            "{}/build/builds/{build_id}/logs/{BUILD_LOG_ID}?api-version={BUILD_API_VERSION}",
            self.api_base
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|error| Error::transport_with_source(url.as_str(), error.to_string(), error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(
                url.as_str(),
                format!("unexpected status {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|error| Error::transport_with_source(url.as_str(), error.to_string(), error))
    }
}
