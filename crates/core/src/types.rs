//! Domain types for the approval-gate check.
//!
//! `TaskProperties` is the immutable carrier for everything the check needs
//! to address the orchestrator; `CheckResult` is the terminal outcome the
//! orchestrator is told about. Both are plain data with no I/O.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::constants::{
    AUTH_TOKEN_PROPERTY, HUB_NAME_PROPERTY, JOB_ID_PROPERTY, PLAN_ID_PROPERTY,
    PLAN_URI_PROPERTY, PROJECT_ID_PROPERTY, TASK_INSTANCE_ID_PROPERTY,
    TASK_INSTANCE_NAME_PROPERTY, TIMELINE_ID_PROPERTY,
};
use crate::errors::{Error, Result};

/// Immutable bag of properties extracted from one inbound check notification.
///
/// Keys are lowercased at construction so lookups are case-insensitive.
/// Construction itself never fails; a required property that is absent or
/// malformed surfaces an error on first access, so callers can report as many
/// problems as possible before aborting.
///
/// One `TaskProperties` is created per notification, owned exclusively by the
/// executor processing it, and discarded when that executor terminates. The
/// auth token is never persisted beyond the invocation.
#[derive(Debug, Clone)]
pub struct TaskProperties {
    properties: HashMap<String, String>,
}

impl TaskProperties {
    /// Build the property bag from any name/value mapping, normalizing keys
    pub fn new<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let properties = properties
            .into_iter()
            .map(|(key, value)| (key.into().to_lowercase(), value.into()))
            .collect();
        Self { properties }
    }

    fn required(&self, key: &str) -> Result<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::missing_property(key))
    }

    fn guid(&self, key: &str) -> Result<Uuid> {
        let value = self.required(key)?;
        value.parse().map_err(|error| {
            Error::configuration(format!("property '{key}' is not a valid GUID: {error}"))
        })
    }

    /// Base URI of the orchestrator collection hosting the plan
    pub fn plan_uri(&self) -> Result<Url> {
        let value = self.required(PLAN_URI_PROPERTY)?;
        Url::parse(value).map_err(|error| {
            Error::configuration(format!(
                "property '{PLAN_URI_PROPERTY}' is not a valid URL: {error}"
            ))
        })
    }

    pub fn project_id(&self) -> Result<Uuid> {
        self.guid(PROJECT_ID_PROPERTY)
    }

    pub fn hub_name(&self) -> Result<&str> {
        self.required(HUB_NAME_PROPERTY)
    }

    pub fn plan_id(&self) -> Result<Uuid> {
        self.guid(PLAN_ID_PROPERTY)
    }

    pub fn job_id(&self) -> Result<Uuid> {
        self.guid(JOB_ID_PROPERTY)
    }

    pub fn timeline_id(&self) -> Result<Uuid> {
        self.guid(TIMELINE_ID_PROPERTY)
    }

    pub fn task_instance_id(&self) -> Result<Uuid> {
        self.guid(TASK_INSTANCE_ID_PROPERTY)
    }

    pub fn task_instance_name(&self) -> Result<&str> {
        self.required(TASK_INSTANCE_NAME_PROPERTY)
    }

    /// Bearer credential scoped to this one check invocation
    pub fn auth_token(&self) -> Result<&str> {
        self.required(AUTH_TOKEN_PROPERTY)
    }

    /// Look up a check-specific message property such as `buildid`
    pub fn message_property(&self, key: &str) -> Result<&str> {
        self.required(&key.to_lowercase())
    }

    /// Non-failing variant of [`Self::message_property`]
    pub fn try_message_property(&self, key: &str) -> Option<&str> {
        self.properties.get(&key.to_lowercase()).map(String::as_str)
    }
}

/// Terminal outcome of one check invocation.
///
/// Serialized with the orchestrator's camelCase wire names; exactly one
/// `CheckResult` is produced per invocation and exactly one completion report
/// carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckResult {
    Succeeded,
    Failed,
    Canceled,
    Error,
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckResult::Succeeded => "succeeded",
            CheckResult::Failed => "failed",
            CheckResult::Canceled => "canceled",
            CheckResult::Error => "error",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn sample_properties() -> TaskProperties {
        TaskProperties::new([
            ("PlanUri", "https://dev.azure.com/fabrikam/"),
            ("ProjectId", "2e18b648-b7f9-4cfe-9eca-3a22b1b6a2a4"),
            ("HubName", "Gates"),
            ("PlanId", "9c3e0a58-5d3b-4e2f-a7b4-8a6a66d0a54e"),
            ("JobId", "0f5e27c4-91b0-4ac9-a686-7d8a9da32a21"),
            ("TimelineId", "8a1e2f7e-2e5a-4dcb-8a2c-31c0a5f0f6f4"),
            ("TaskInstanceId", "b5e3b1a0-6cd9-4a41-86f9-5d52c1c2a9ee"),
            ("TaskInstanceName", "RequiredTemplatesCheck"),
            ("AuthToken", "secret-token"),
            ("BuildId", "1234"),
            ("RequiredTemplates", "build.yaml,deploy.yaml"),
        ])
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let properties = sample_properties();
        assert_eq!(properties.hub_name().unwrap(), "Gates");
        assert_eq!(properties.message_property("BUILDID").unwrap(), "1234");
        assert_eq!(properties.message_property("buildid").unwrap(), "1234");
    }

    #[test]
    fn construction_never_fails_and_validation_is_lazy() {
        // An empty bag constructs fine; problems only surface on access.
        let properties = TaskProperties::new(Vec::<(String, String)>::new());
        let error = properties.auth_token().unwrap_err();
        assert!(matches!(
            error,
            Error::MissingProperty { ref key } if key == "authtoken"
        ));
    }

    #[test]
    fn missing_message_property_names_the_key() {
        let properties = sample_properties();
        let error = properties.message_property("missingkey").unwrap_err();
        assert_eq!(error.to_string(), "required property 'missingkey' is missing");
    }

    #[test]
    fn malformed_guid_is_a_configuration_error() {
        let properties = TaskProperties::new([("projectid", "not-a-guid")]);
        let error = properties.project_id().unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
        assert!(error.to_string().contains("projectid"));
    }

    #[test]
    fn malformed_plan_uri_is_a_configuration_error() {
        let properties = TaskProperties::new([("planuri", "not a url")]);
        let error = properties.plan_uri().unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
    }

    #[test]
    fn check_result_uses_orchestrator_wire_names() {
        let s = serde_json::to_string(&CheckResult::Succeeded).unwrap();
        assert_eq!(s, "\"succeeded\"");

        let s = serde_json::to_string(&CheckResult::Failed).unwrap();
        assert_eq!(s, "\"failed\"");

        let s = serde_json::to_string(&CheckResult::Canceled).unwrap();
        assert_eq!(s, "\"canceled\"");

        let s = serde_json::to_string(&CheckResult::Error).unwrap();
        assert_eq!(s, "\"error\"");
    }

    #[test]
    fn check_result_roundtrip_json() {
        for result in [
            CheckResult::Succeeded,
            CheckResult::Failed,
            CheckResult::Canceled,
            CheckResult::Error,
        ] {
            let s = serde_json::to_string(&result).unwrap();
            let back: CheckResult = serde_json::from_str(&s).unwrap();
            assert_eq!(back, result);
        }
    }
}
