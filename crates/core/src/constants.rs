/// Constants used throughout the gatecheck codebase
// Notification property names (keys are lowercased at construction)
pub const PLAN_URI_PROPERTY: &str = "planuri";
pub const PROJECT_ID_PROPERTY: &str = "projectid";
pub const HUB_NAME_PROPERTY: &str = "hubname";
pub const PLAN_ID_PROPERTY: &str = "planid";
pub const JOB_ID_PROPERTY: &str = "jobid";
pub const TIMELINE_ID_PROPERTY: &str = "timelineid";
pub const TASK_INSTANCE_ID_PROPERTY: &str = "taskinstanceid";
pub const TASK_INSTANCE_NAME_PROPERTY: &str = "taskinstancename";
pub const AUTH_TOKEN_PROPERTY: &str = "authtoken";

// Check-specific message properties
pub const BUILD_ID_PROPERTY: &str = "buildid";
pub const REQUIRED_TEMPLATES_PROPERTY: &str = "requiredtemplates";

// Orchestrator API versions
pub const BUILD_API_VERSION: &str = "6.0";
pub const TIMELINE_API_VERSION: &str = "4.1";
pub const EVENT_API_VERSION: &str = "2.0-preview.1";

// Id of the log container scanned for template markers within a build's logs
pub const BUILD_LOG_ID: u32 = 2;

// Completion event name expected by the orchestrator
pub const TASK_COMPLETED_EVENT: &str = "TaskCompleted";

// Default HTTP user agent
pub const DEFAULT_USER_AGENT: &str = "gatecheck/0.1";
