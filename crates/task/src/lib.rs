//! Check execution for pipeline runs paused on an approval gate.
//!
//! The webhook ingress (an external collaborator) extracts a
//! [`gatecheck_core::TaskProperties`] from the inbound notification and hands
//! it to [`dispatch::dispatch_check`], which spawns one [`CheckExecutor`] per
//! notification and returns immediately. The executor fetches the build log,
//! evaluates the required-template predicate, streams progress to the run's
//! timeline, and always reports exactly one terminal
//! [`gatecheck_core::CheckResult`] back to the orchestrator — on success,
//! failure, internal error, and cancellation alike.
//!
//! ## Key Components
//!
//! - **`client`**: the orchestrator task-API adapter behind the [`TaskClient`]
//!   seam (timeline feed, log upload, completion event).
//! - **`builds`**: authenticated build-log retrieval behind the [`BuildLogs`]
//!   seam.
//! - **`logger`**: the best-effort [`TimelineLogger`] channel; its failures
//!   never abort a check.
//! - **`executor`**: the [`CheckExecutor`] lifecycle with guaranteed single
//!   finalization.
//! - **`dispatch`**: fire-and-forget spawning, one independent task per
//!   notification.

pub mod builds;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod executor;
pub mod logger;

pub use self::{
    builds::{BuildLogs, HttpBuildLogs},
    client::{HttpTaskClient, TaskClient},
    config::ClientConfig,
    dispatch::dispatch_check,
    executor::CheckExecutor,
    logger::TimelineLogger,
};
