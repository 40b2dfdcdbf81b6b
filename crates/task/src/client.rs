//! Orchestrator task-API adapter.
//!
//! Everything the check tells the orchestrator — timeline feed lines, the
//! uploaded check log, and the authoritative completion event — goes through
//! the [`TaskClient`] seam. [`HttpTaskClient`] is the REST implementation;
//! tests substitute their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use gatecheck_core::constants::{EVENT_API_VERSION, TASK_COMPLETED_EVENT, TIMELINE_API_VERSION};
use gatecheck_core::{CheckResult, Error, Result, TaskProperties};

use crate::config::ClientConfig;

/// Seam to the orchestrator's distributed-task API
#[async_trait]
pub trait TaskClient: Send + Sync {
    /// Append lines to the task instance's live timeline feed
    async fn append_feed(&self, lines: &[String]) -> Result<()>;

    /// Upload the full check log for the task instance
    async fn upload_log(&self, content: &str) -> Result<()>;

    /// Report the terminal result for the task instance.
    ///
    /// This is the authoritative signal that resumes or blocks the approval
    /// gate; callers send it exactly once per check invocation.
    async fn report_completed(&self, result: CheckResult) -> Result<()>;
}

/// Root of the collection-scoped REST surface: `{planUri}{projectId}/_apis`
pub(crate) fn collection_base(plan_uri: &Url, project_id: Uuid) -> String {
    format!(
        "{}/{project_id}/_apis",
        plan_uri.as_str().trim_end_matches('/')
    )
}

/// Timeline feed append body
#[derive(Debug, Serialize)]
struct FeedLines<'a> {
    value: &'a [String],
    count: usize,
}

/// Request body creating a task log container for the plan
#[derive(Debug, Serialize)]
struct NewTaskLog {
    path: String,
}

#[derive(Debug, Deserialize)]
struct TaskLogReference {
    id: u32,
}

/// Completion event body expected by the orchestrator
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskCompletedEvent {
    name: &'static str,
    task_id: Uuid,
    job_id: Uuid,
    result: CheckResult,
}

/// REST implementation of [`TaskClient`].
///
/// Owned by exactly one check invocation; holds the invocation-scoped bearer
/// credential and is discarded with the executor.
#[derive(Debug)]
pub struct HttpTaskClient {
    client: reqwest::Client,
    plan_base: String,
    timeline_id: Uuid,
    record_id: Uuid,
    job_id: Uuid,
    auth_header: String,
}

impl HttpTaskClient {
    /// Resolve the addressing properties and build the adapter.
    ///
    /// A missing or malformed addressing property surfaces here, before any
    /// network call is made.
    pub fn new(properties: &TaskProperties, config: &ClientConfig) -> Result<Self> {
        let base = collection_base(&properties.plan_uri()?, properties.project_id()?);
        let plan_base = format!(
            "{base}/distributedtask/hubs/{}/plans/{}",
            properties.hub_name()?,
            properties.plan_id()?
        );

        Ok(Self {
            client: config.http_client()?,
            plan_base,
            timeline_id: properties.timeline_id()?,
            record_id: properties.task_instance_id()?,
            job_id: properties.job_id()?,
            auth_header: format!("Bearer {}", properties.auth_token()?),
        })
    }

    async fn post_json<B>(&self, url: &str, body: &B) -> Result<reqwest::Response>
    where
        B: Serialize + Sync,
    {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(body)
            .send()
            .await
            .map_err(|error| {
                Error::transport_with_source(url, error.to_string(), error)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::orchestrator_service(
                url,
                format!("unexpected status {status}"),
            ));
        }
        Ok(response)
    }
}

#[async_trait]
impl TaskClient for HttpTaskClient {
    async fn append_feed(&self, lines: &[String]) -> Result<()> {
        let url = format!(
            "{}/timelines/{}/records/{}/feed?api-version={TIMELINE_API_VERSION}",
            self.plan_base, self.timeline_id, self.record_id
        );
        let body = FeedLines {
            value: lines,
            count: lines.len(),
        };
        self.post_json(&url, &body).await?;
        Ok(())
    }

    async fn upload_log(&self, content: &str) -> Result<()> {
        // A log container is created against the plan first; its id is where
        // the buffered lines get posted.
        let create_url = format!("{}/logs?api-version={TIMELINE_API_VERSION}", self.plan_base);
        let body = NewTaskLog {
            path: format!("logs\\{}", self.record_id),
        };
        let log: TaskLogReference = self
            .post_json(&create_url, &body)
            .await?
            .json()
            .await
            .map_err(|error| {
                Error::transport_with_source(create_url.as_str(), error.to_string(), error)
            })?;

        let upload_url = format!(
            "{}/logs/{}?api-version={TIMELINE_API_VERSION}",
            self.plan_base, log.id
        );
        let response = self
            .client
            .post(&upload_url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content.to_owned())
            .send()
            .await
            .map_err(|error| {
                Error::transport_with_source(upload_url.as_str(), error.to_string(), error)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::orchestrator_service(
                upload_url,
                format!("unexpected status {status}"),
            ));
        }
        Ok(())
    }

    async fn report_completed(&self, result: CheckResult) -> Result<()> {
        let url = format!("{}/events?api-version={EVENT_API_VERSION}", self.plan_base);
        let event = TaskCompletedEvent {
            name: TASK_COMPLETED_EVENT,
            task_id: self.record_id,
            job_id: self.job_id,
            result,
        };
        self.post_json(&url, &event).await?;
        Ok(())
    }
}
