//! Check execution lifecycle.
//!
//! One `CheckExecutor` runs one approval-gate verification end-to-end:
//! timeline channel up, configuration read, build log fetched, predicate
//! evaluated, and — on every exit path — the timeline closed and the terminal
//! result reported to the orchestrator exactly once. Nothing escapes
//! [`CheckExecutor::execute`]: the ingress that dispatched the check has long
//! since answered its webhook, so the timeline and the completion report are
//! the only channels left.

use std::sync::Arc;

use tokio::sync::watch;

use gatecheck_core::constants::{BUILD_ID_PROPERTY, REQUIRED_TEMPLATES_PROPERTY};
use gatecheck_core::{CheckResult, Error, Result, TaskProperties};

use crate::builds::BuildLogs;
use crate::client::TaskClient;
use crate::logger::TimelineLogger;

/// Remediation guidance attached when the orchestrator rejects a call
pub(crate) const CALLBACK_HINT: &str =
    "Make sure the check's Completion event is set to Callback!";

/// Runs one approval-gate verification against one pipeline run.
///
/// Owns its `TaskProperties` and client adapters exclusively; nothing is
/// shared across invocations and nothing persists after [`Self::execute`]
/// returns.
pub struct CheckExecutor {
    properties: TaskProperties,
    task_client: Arc<dyn TaskClient>,
    build_logs: Arc<dyn BuildLogs>,
}

impl CheckExecutor {
    pub fn new(
        properties: TaskProperties,
        task_client: Arc<dyn TaskClient>,
        build_logs: Arc<dyn BuildLogs>,
    ) -> Self {
        Self {
            properties,
            task_client,
            build_logs,
        }
    }

    /// Run the verification to a terminal [`CheckResult`].
    ///
    /// All verification errors are handled here; the method never panics and
    /// never propagates. Cancellation — `cancel` flipping to `true` — aborts
    /// the remaining verification steps but not finalization: the timeline is
    /// closed and the completion report is still sent, so the approval gate
    /// is never left hanging.
    pub async fn execute(self, mut cancel: watch::Receiver<bool>) -> CheckResult {
        let mut logger = TimelineLogger::new(Arc::clone(&self.task_client));

        let result = match self.run_check(&mut logger, &mut cancel).await {
            Ok(result) => result,
            Err(Error::Canceled) => {
                tracing::info!("check canceled before completion");
                logger.log("Check canceled before completion").await;
                CheckResult::Canceled
            }
            Err(error) => {
                if error.is_orchestrator_service() {
                    logger.log(CALLBACK_HINT).await;
                }
                logger.log(&error.to_string()).await;
                tracing::error!(%error, "check execution failed");
                CheckResult::Error
            }
        };

        self.finalize(logger, result).await;
        result
    }

    /// The verification steps, separated so `execute` can map every exit —
    /// value or error — onto the single finalization path.
    async fn run_check(
        &self,
        logger: &mut TimelineLogger,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<CheckResult> {
        logger.log("Check started!").await;

        let build_id = self.properties.message_property(BUILD_ID_PROPERTY)?;
        let raw_templates = self.properties.message_property(REQUIRED_TEMPLATES_PROPERTY)?;
        let templates = parse_template_list(raw_templates)?;

        ensure_not_canceled(cancel)?;
        logger
            .log("Connecting to Azure DevOps API to check for required templates")
            .await;

        let body = tokio::select! {
            () = canceled(cancel) => return Err(Error::Canceled),
            body = self.build_logs.fetch_log(build_id) => body?,
        };

        ensure_not_canceled(cancel)?;

        let missing = missing_templates(&body, &templates);
        let all_found = missing.is_empty();
        logger
            .log(&format!(
                "All templates were found to be present: {all_found}"
            ))
            .await;
        if !all_found {
            logger
                .log(&format!(
                    "Templates not present in the build log: {}",
                    missing.join(", ")
                ))
                .await;
        }

        Ok(if all_found {
            CheckResult::Succeeded
        } else {
            CheckResult::Failed
        })
    }

    /// Close the timeline and report completion; runs on every exit path
    async fn finalize(&self, mut logger: TimelineLogger, result: CheckResult) {
        logger.end().await;

        match self.task_client.report_completed(result).await {
            Ok(()) => {
                tracing::info!(%result, "reported check completion");
            }
            Err(error) if error.is_orchestrator_service() => {
                // The gate now relies on the orchestrator's own timeout.
                tracing::error!(%error, "failed to report check completion; {CALLBACK_HINT}");
            }
            Err(error) => {
                tracing::error!(%error, "failed to report check completion");
            }
        }
    }
}

/// Split the comma-delimited template list, rejecting an empty result
fn parse_template_list(raw: &str) -> Result<Vec<String>> {
    let templates: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if templates.is_empty() {
        return Err(Error::configuration(format!(
            "'{REQUIRED_TEMPLATES_PROPERTY}' does not name any templates"
        )));
    }
    Ok(templates)
}

/// Template names that are not literal substrings of the fetched log body.
///
/// The check passes iff this is empty. Template names are opaque markers; the
/// log body is never parsed.
fn missing_templates<'a>(body: &str, templates: &'a [String]) -> Vec<&'a str> {
    templates
        .iter()
        .filter(|name| !body.contains(name.as_str()))
        .map(String::as_str)
        .collect()
}

fn ensure_not_canceled(cancel: &watch::Receiver<bool>) -> Result<()> {
    if *cancel.borrow() {
        Err(Error::Canceled)
    } else {
        Ok(())
    }
}

/// Resolves only when cancellation is requested.
///
/// The dispatcher dropping its sender is not cancellation — a fire-and-forget
/// check runs to completion — so a closed channel parks forever instead.
async fn canceled(cancel: &mut watch::Receiver<bool>) {
    if *cancel.borrow() {
        return;
    }
    while cancel.changed().await.is_ok() {
        if *cancel.borrow() {
            return;
        }
    }
    std::future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn template_list_is_split_and_trimmed() {
        let templates = parse_template_list("build.yaml, deploy.yaml ,test.yaml").unwrap();
        assert_eq!(templates, owned(&["build.yaml", "deploy.yaml", "test.yaml"]));
    }

    #[test]
    fn empty_template_list_is_a_configuration_error() {
        for raw in ["", "   ", ",", " , ,"] {
            let error = parse_template_list(raw).unwrap_err();
            assert!(matches!(error, Error::Configuration { .. }), "raw: {raw:?}");
        }
    }

    #[test]
    fn all_present_templates_leave_nothing_missing() {
        let templates = owned(&["build.yaml", "deploy.yaml"]);
        let body = "steps from build.yaml then deploy.yaml ran";
        assert!(missing_templates(body, &templates).is_empty());
    }

    #[test]
    fn absent_template_is_reported_missing() {
        let templates = owned(&["build.yaml", "missing.yaml"]);
        let body = "only build.yaml appears here";
        assert_eq!(missing_templates(body, &templates), vec!["missing.yaml"]);
    }

    proptest! {
        /// Concatenating every template into the body satisfies the check,
        /// with 1, many, and duplicate entries alike.
        #[test]
        fn body_containing_all_templates_passes(
            names in vec("[a-z]{1,12}(\\.yaml)?", 1..8),
            padding in "[ a-z0-9]{0,40}",
        ) {
            let mut templates = names.clone();
            // duplicate an arbitrary entry to cover repeated requirements
            templates.push(names[0].clone());

            let body = format!("{padding}{}{padding}", templates.join(" "));
            prop_assert!(missing_templates(&body, &templates).is_empty());
        }

        /// A template that cannot appear in the body is always missing.
        #[test]
        fn foreign_template_always_fails(
            names in vec("[a-z]{1,12}", 1..8),
            body in "[a-z ]{0,60}",
        ) {
            // the body alphabet has no uppercase, so this can never match
            let mut templates = owned(&[]);
            templates.extend(names);
            templates.push("MISSING.YAML".to_string());

            let missing = missing_templates(&body, &templates);
            prop_assert!(missing.contains(&"MISSING.YAML"));
        }
    }
}
