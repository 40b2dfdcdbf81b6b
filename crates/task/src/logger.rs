//! Best-effort timeline logging channel.
//!
//! Operators follow the check through the run's timeline, so every step is
//! mirrored there — but a timeline that cannot be written must never take the
//! check down with it. Failed writes are demoted to process-log warnings and
//! the check carries on.

use std::sync::Arc;

use chrono::Utc;

use crate::client::TaskClient;
use crate::executor::CALLBACK_HINT;

/// Timeline channel scoped to one task instance.
///
/// `log` appends a line to the live feed immediately and buffers it; `end`
/// uploads the buffered lines as the instance's permanent log. The logger is
/// acquired at the start of an execution and closed on every exit path.
pub struct TimelineLogger {
    client: Arc<dyn TaskClient>,
    lines: Vec<String>,
    ended: bool,
}

impl TimelineLogger {
    pub fn new(client: Arc<dyn TaskClient>) -> Self {
        Self {
            client,
            lines: Vec::new(),
            ended: false,
        }
    }

    /// Append one timestamped line to the live feed, swallowing failures
    pub async fn log(&mut self, message: &str) {
        let line = format!("{} {message}", Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"));
        self.lines.push(line.clone());

        if let Err(error) = self.client.append_feed(std::slice::from_ref(&line)).await {
            if error.is_orchestrator_service() {
                tracing::warn!(%error, "timeline feed append rejected; {CALLBACK_HINT}");
            } else {
                tracing::warn!(%error, "timeline feed append failed");
            }
        }
    }

    /// Close the channel, uploading the buffered lines as the check's log
    pub async fn end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        if self.lines.is_empty() {
            return;
        }
        if let Err(error) = self.client.upload_log(&self.lines.join("\n")).await {
            tracing::warn!(%error, "task log upload failed");
        }
    }
}
