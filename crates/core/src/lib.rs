//! Core domain types, errors, and constants for the `gatecheck` service.
//!
//! This crate establishes the foundational data structures and error handling
//! mechanisms shared by every part of the check service. It performs no I/O.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`types`**: Contains the domain data carriers — the immutable
//!   `TaskProperties` bag extracted from an inbound check notification and
//!   the terminal `CheckResult` reported back to the pipeline orchestrator.
//! - **`constants`**: Shared, static constants such as well-known property
//!   names and orchestrator API versions.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::{CheckResult, TaskProperties},
};
