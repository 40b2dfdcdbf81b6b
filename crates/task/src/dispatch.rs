//! Fire-and-forget dispatch of check executions.
//!
//! The webhook ingress acknowledges the notification immediately; the check
//! itself runs on an independent tokio task with no synchronous ordering
//! relationship beyond "dispatch happens-before execute begins".

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

use gatecheck_core::{CheckResult, Result, TaskProperties};

use crate::builds::HttpBuildLogs;
use crate::client::HttpTaskClient;
use crate::config::ClientConfig;
use crate::executor::CheckExecutor;

/// Spawn one check execution for an inbound notification and return
/// immediately.
///
/// The returned handle exists for tests and supervisors; the dispatcher never
/// needs to await it. Sending `true` through `cancel`'s sender cancels the
/// check; dropping the sender leaves it running to completion.
pub fn dispatch_check(
    properties: TaskProperties,
    config: ClientConfig,
    cancel: watch::Receiver<bool>,
) -> JoinHandle<CheckResult> {
    let check_span = tracing::info_span!(
        "check",
        task = properties.task_instance_name().unwrap_or("unknown")
    );

    tokio::spawn(
        async move {
            let executor = match build_executor(properties, &config) {
                Ok(executor) => executor,
                Err(error) => {
                    // With no addressable orchestrator endpoints there is no
                    // one to report to; the gate's own timeout takes over.
                    tracing::error!(%error, "cannot construct check clients");
                    return CheckResult::Error;
                }
            };
            executor.execute(cancel).await
        }
        .instrument(check_span),
    )
}

fn build_executor(properties: TaskProperties, config: &ClientConfig) -> Result<CheckExecutor> {
    let task_client = HttpTaskClient::new(&properties, config)?;
    let build_logs = HttpBuildLogs::new(&properties, config)?;
    Ok(CheckExecutor::new(
        properties,
        Arc::new(task_client),
        Arc::new(build_logs),
    ))
}
