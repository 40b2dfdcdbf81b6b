//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingProperty { key } => {
                write!(f, "required property '{key}' is missing")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::Transport {
                endpoint, message, ..
            } => {
                write!(f, "request to '{endpoint}' failed: {message}")
            }
            Error::OrchestratorService { endpoint, message } => {
                write!(
                    f,
                    "orchestrator rejected the call to '{endpoint}': {message}"
                )
            }
            Error::Canceled => {
                write!(f, "check execution was canceled")
            }
        }
    }
}
